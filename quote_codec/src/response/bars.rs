//! K-line bar response decoding.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::cursor::ByteCursor;
use crate::datetime::BarTime;
use crate::price::read_price_delta;
use crate::result::Result;
use crate::volume::read_packed_volume;

/// One open/high/low/close bar at the requested granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KLineBar {
    /// Opening price in currency units.
    pub open: f64,
    /// Closing price in currency units.
    pub close: f64,
    /// High price in currency units.
    pub high: f64,
    /// Low price in currency units.
    pub low: f64,
    /// Traded volume.
    pub vol: f64,
    /// Traded turnover.
    pub amount: f64,
    /// Bar timestamp, decoded per the requested category.
    pub time: BarTime,
}

/// Decodes a K-line response buffer for the category it was requested with.
///
/// The wire never repeats absolute prices: each bar carries its four prices
/// as deltas, and the base evolves as `open + close` of the bar just decoded
/// (thousandths of a currency unit, starting at zero). Volume and turnover
/// are packed pseudo-floats.
pub fn decode_kline_bars(category: Category, data: &[u8]) -> Result<Vec<KLineBar>> {
    let mut cur = ByteCursor::new(data);
    let count = cur.u16_le()?;
    debug!("k-line response declares {count} bar(s) at {category}");

    let mut bars = Vec::with_capacity(usize::from(count));
    let mut prev_base: i64 = 0;
    for _ in 0..count {
        let mut raw_time = [0u8; 4];
        raw_time.copy_from_slice(cur.take(4)?);

        let open_diff = read_price_delta(&mut cur)?;
        let close_diff = read_price_delta(&mut cur)?;
        let high_diff = read_price_delta(&mut cur)?;
        let low_diff = read_price_delta(&mut cur)?;
        let vol = read_packed_volume(&mut cur)?;
        let amount = read_packed_volume(&mut cur)?;

        let base = prev_base + open_diff;
        bars.push(KLineBar {
            open: thousandths(base),
            close: thousandths(base + close_diff),
            high: thousandths(base + high_diff),
            low: thousandths(base + low_diff),
            vol,
            amount,
            time: BarTime::decode(category, raw_time),
        });
        prev_base = base + close_diff;
    }
    Ok(bars)
}

fn thousandths(value: i64) -> f64 {
    value as f64 / 1000.0
}
