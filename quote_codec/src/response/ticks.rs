//! Tick-level transaction list decoding.

use log::debug;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, FromRepr};

use crate::cursor::ByteCursor;
use crate::price::read_price_delta;
use crate::result::Result;

/// Aggressor side of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, FromRepr)]
#[repr(u8)]
pub enum TradeSide {
    /// Buyer-initiated trade.
    Buy = 0,
    /// Seller-initiated trade.
    Sell = 1,
    /// Neutral or unknown; also used for the closing auction print.
    Neutral = 2,
}

impl TradeSide {
    /// Maps the wire side code; anything outside {0, 1} is neutral/unknown.
    pub fn from_wire(code: i64) -> Self {
        match code {
            0 => TradeSide::Buy,
            1 => TradeSide::Sell,
            _ => TradeSide::Neutral,
        }
    }
}

/// Width of the minute-of-day field, which depends on the request shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDayWidth {
    /// Two-byte minute-of-day, used by the live transaction query.
    TwoBytes,
    /// Four-byte minute-of-day, used by the wider historical query shape.
    FourBytes,
}

/// One tick-level transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Trade time rendered `HH:MM` from the wire's minute-of-day.
    pub time: String,
    /// Trade price in currency units (the wire carries hundredths).
    pub price: f64,
    /// Traded volume.
    pub vol: i64,
    /// Number of individual trades aggregated into this tick.
    pub num: i64,
    /// Aggressor side.
    pub side: TradeSide,
}

/// Decodes a tick-list response buffer.
///
/// Layout: u16 record count, then per record a raw minute-of-day, the price
/// delta (accumulated into a running base starting at zero), volume, trade
/// count and side code as variable-length deltas, plus one trailing reserved
/// delta the server always appends.
pub fn decode_ticks(width: TimeOfDayWidth, data: &[u8]) -> Result<Vec<Tick>> {
    let mut cur = ByteCursor::new(data);
    let count = cur.u16_le()?;
    debug!("tick response declares {count} record(s)");

    let mut ticks = Vec::with_capacity(usize::from(count));
    let mut base: i64 = 0;
    for _ in 0..count {
        let minute_of_day = match width {
            TimeOfDayWidth::TwoBytes => u32::from(cur.u16_le()?),
            TimeOfDayWidth::FourBytes => cur.u32_le()?,
        };
        base += read_price_delta(&mut cur)?;
        let vol = read_price_delta(&mut cur)?;
        let num = read_price_delta(&mut cur)?;
        let side = read_price_delta(&mut cur)?;
        let _reserved = read_price_delta(&mut cur)?;

        ticks.push(Tick {
            time: format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60),
            price: base as f64 / 100.0,
            vol,
            num,
            side: TradeSide::from_wire(side),
        });
    }
    Ok(ticks)
}
