//! Market (exchange) identifiers.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, FromRepr};

/// Exchange a quoted instrument trades on.
///
/// The wire carries the id as a u16 in most requests and as a single byte in
/// the quote-snapshot request and response. Decoded snapshots keep the raw
/// byte so unknown ids survive a round trip through the codec;
/// [`Market::from_wire`] converts it when a typed value is wanted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    FromRepr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Market {
    /// Shenzhen stock exchange.
    Shenzhen = 0,
    /// Shanghai stock exchange.
    Shanghai = 1,
}

impl Market {
    /// Wire id of this market.
    pub fn wire(self) -> u8 {
        self as u8
    }

    /// Typed view of a raw wire id, `None` for ids outside the known set.
    pub fn from_wire(raw: u8) -> Option<Self> {
        Self::from_repr(raw)
    }
}
