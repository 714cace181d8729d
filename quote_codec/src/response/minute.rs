//! Minute-aggregate response decoding.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::price::read_price_delta;
use crate::result::Result;

/// One minute of aggregated trading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinuteBar {
    /// Price in currency units (the wire carries hundredths).
    pub price: f64,
    /// Traded volume for the minute.
    pub vol: i64,
}

/// Decodes a minute-aggregate response buffer.
///
/// Layout: u16 record count, two reserved bytes, then per record three
/// variable-length deltas: the price difference (accumulated into a running
/// base that starts at zero), a reserved field the server always sends, and
/// the volume.
pub fn decode_minute_bars(data: &[u8]) -> Result<Vec<MinuteBar>> {
    let mut cur = ByteCursor::new(data);
    let count = cur.u16_le()?;
    cur.skip(2)?;
    debug!("minute response declares {count} record(s)");

    let mut bars = Vec::with_capacity(usize::from(count));
    let mut base: i64 = 0;
    for _ in 0..count {
        base += read_price_delta(&mut cur)?;
        let _reserved = read_price_delta(&mut cur)?;
        let vol = read_price_delta(&mut cur)?;
        bars.push(MinuteBar {
            price: base as f64 / 100.0,
            vol,
        });
    }
    Ok(bars)
}
