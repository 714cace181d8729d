//! Bar granularity categories.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, FromRepr};

/// Granularity selector for K-line requests and date decoding.
///
/// Discriminants are the protocol's wire values. The set mirrors the server:
/// two of the variants (`DailyAlt`, `Minute`/`ExtMinute`) are alternate
/// encodings of granularities that also exist under another number.
#[allow(missing_docs)]
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
#[repr(u16)]
pub enum Category {
    FiveMinute = 0,
    FifteenMinute = 1,
    ThirtyMinute = 2,
    Hourly = 3,
    Daily = 4,
    Weekly = 5,
    Monthly = 6,
    /// One-minute bars, extended-hours variant.
    ExtMinute = 7,
    /// One-minute bars.
    Minute = 8,
    /// Alternate daily encoding used by some request paths.
    DailyAlt = 9,
    Quarterly = 10,
    Yearly = 11,
}

impl Category {
    /// Wire discriminant of this category.
    pub fn wire(self) -> u16 {
        self as u16
    }

    /// Categories whose bar timestamps carry an intraday packed day/minute
    /// pair instead of a plain calendar number.
    pub fn is_intraday(self) -> bool {
        matches!(
            self,
            Category::FiveMinute
                | Category::FifteenMinute
                | Category::ThirtyMinute
                | Category::Hourly
                | Category::ExtMinute
                | Category::Minute
        )
    }
}
