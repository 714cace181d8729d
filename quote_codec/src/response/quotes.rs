//! Real-time quote snapshot decoding.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::error::CodecError;
use crate::price::read_price_delta;
use crate::result::Result;
use crate::volume::read_packed_volume;

/// One price level of the order-book ladder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Bid price in currency units.
    pub bid: f64,
    /// Ask price in currency units.
    pub ask: f64,
    /// Resting volume at the bid.
    pub bid_vol: i64,
    /// Resting volume at the ask.
    pub ask_vol: i64,
}

/// Real-time snapshot of one instrument.
///
/// Every price is reconstructed from the snapshot's base price plus a
/// transmitted delta; the wire never repeats absolute values. The `reserved*`
/// fields are carried through undecoded because downstream consumers diff
/// them across snapshots; two of them also encode the server clock (see
/// [`QuoteSnapshot::server_time`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Raw wire id of the market; see [`crate::Market::from_wire`].
    pub market: u8,
    /// Six-byte instrument code, padding included.
    pub code: String,
    /// Activity counter.
    pub active1: u16,
    /// Last trade price in currency units (the wire carries hundredths).
    pub price: f64,
    /// Previous session close.
    pub last_close: f64,
    /// Session open.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Server clock rendered `HH:MM:SS.mmm`, recovered from the difference
    /// of the two leading reserved fields.
    pub server_time: String,
    /// Reserved field the server time is derived from.
    pub reserved0: i64,
    /// Reserved field the server time is derived from.
    pub reserved1: i64,
    /// Session volume.
    pub vol: i64,
    /// Volume of the current tick.
    pub cur_vol: i64,
    /// Session turnover.
    pub amount: f64,
    /// Seller-initiated volume.
    pub sell_vol: i64,
    /// Buyer-initiated volume.
    pub buy_vol: i64,
    /// Reserved.
    pub reserved2: i64,
    /// Reserved.
    pub reserved3: i64,
    /// Order-book ladder, best level first.
    pub levels: [Level; 5],
    /// Reserved raw word after the ladder.
    pub reserved4: u16,
    /// Reserved.
    pub reserved5: i64,
    /// Reserved.
    pub reserved6: i64,
    /// Reserved.
    pub reserved7: i64,
    /// Reserved.
    pub reserved8: i64,
    /// Reserved signed word, scaled by 100.
    pub reserved9: f64,
    /// Activity counter, repeated at the end of the record.
    pub active2: u16,
}

/// Decodes a quote-snapshot response buffer.
///
/// The buffer opens with two reserved bytes, then the u16 snapshot count.
/// Per snapshot: a fixed header (market byte, six-byte code, activity word),
/// the absolute base price, around thirty deltas against that base, one
/// packed turnover, the five-level ladder, and a raw trailer.
pub fn decode_quote_snapshots(data: &[u8]) -> Result<Vec<QuoteSnapshot>> {
    let mut cur = ByteCursor::new(data);
    cur.skip(2)?;
    let count = cur.u16_le()?;
    debug!("quote response declares {count} snapshot(s)");

    let mut snapshots = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let market = cur.u8()?;
        let code = String::from_utf8_lossy(cur.take(6)?).into_owned();
        let active1 = cur.u16_le()?;

        let base = read_price_delta(&mut cur)?;
        let last_close_diff = read_price_delta(&mut cur)?;
        let open_diff = read_price_delta(&mut cur)?;
        let high_diff = read_price_delta(&mut cur)?;
        let low_diff = read_price_delta(&mut cur)?;
        let reserved0 = read_price_delta(&mut cur)?;
        let reserved1 = read_price_delta(&mut cur)?;
        let vol = read_price_delta(&mut cur)?;
        let cur_vol = read_price_delta(&mut cur)?;
        let amount = read_packed_volume(&mut cur)?;
        let sell_vol = read_price_delta(&mut cur)?;
        let buy_vol = read_price_delta(&mut cur)?;
        let reserved2 = read_price_delta(&mut cur)?;
        let reserved3 = read_price_delta(&mut cur)?;

        let mut levels = [Level::default(); 5];
        for level in &mut levels {
            let bid_diff = read_price_delta(&mut cur)?;
            let ask_diff = read_price_delta(&mut cur)?;
            let bid_vol = read_price_delta(&mut cur)?;
            let ask_vol = read_price_delta(&mut cur)?;
            *level = Level {
                bid: hundredths(base + bid_diff),
                ask: hundredths(base + ask_diff),
                bid_vol,
                ask_vol,
            };
        }

        let reserved4 = cur.u16_le()?;
        let reserved5 = read_price_delta(&mut cur)?;
        let reserved6 = read_price_delta(&mut cur)?;
        let reserved7 = read_price_delta(&mut cur)?;
        let reserved8 = read_price_delta(&mut cur)?;
        let reserved9 = f64::from(cur.i16_le()?) / 100.0;
        let active2 = cur.u16_le()?;

        snapshots.push(QuoteSnapshot {
            market,
            code,
            active1,
            price: hundredths(base),
            last_close: hundredths(base + last_close_diff),
            open: hundredths(base + open_diff),
            high: hundredths(base + high_diff),
            low: hundredths(base + low_diff),
            server_time: format_server_time(reserved0 - reserved1)?,
            reserved0,
            reserved1,
            vol,
            cur_vol,
            amount,
            sell_vol,
            buy_vol,
            reserved2,
            reserved3,
            levels,
            reserved4,
            reserved5,
            reserved6,
            reserved7,
            reserved8,
            reserved9,
            active2,
        });
    }
    Ok(snapshots)
}

fn hundredths(value: i64) -> f64 {
    value as f64 / 100.0
}

/// Renders the server clock hidden in `reserved0 - reserved1`.
///
/// The difference, written in decimal, reads `HHMM` followed by four digits
/// of ten-thousandths of a minute; seconds are that remainder times 60 over
/// 10000. Fewer than six digits render as an empty string; six or seven
/// digits are left-padded with spaces before slicing, shifting the hour into
/// the padding. Both oddities are reference behavior and kept as-is.
fn format_server_time(raw: i64) -> Result<String> {
    let digits = raw.to_string();
    if digits.len() < 6 {
        return Ok(String::new());
    }
    let digits = if digits.len() < 8 {
        format!("{digits:>8}")
    } else {
        digits
    };

    let tenths: u32 = digits[4..8]
        .parse()
        .map_err(|_| CodecError::BadServerTime(digits.clone()))?;
    let seconds = f64::from(tenths) * 60.0 / 10_000.0;
    Ok(format!("{}:{}:{seconds:6.3}", &digits[0..2], &digits[2..4]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::Market;
    use crate::testutil::delta;

    /// One snapshot for instrument 000001, field values from a captured
    /// afternoon-close session.
    fn fixture() -> Vec<u8> {
        let mut buf = vec![0xb1, 0xcb, 0x01, 0x00];

        buf.push(0x00); // market
        buf.extend(b"000001");
        buf.extend(4389u16.to_le_bytes()); // active1

        for v in [
            1251i64,     // base price 12.51
            10,          // last close
            11,          // open
            18,          // high
            -8,          // low
            14_998_750,  // reserved0
            -1251,       // reserved1
            786_362,     // vol
            10_006,      // cur vol
        ] {
            buf.extend(delta(v));
        }
        buf.extend([0x0a, 0x78, 0x6a, 0x4e]); // amount 983_433_856

        for v in [446_986i64, 339_377, 0, 46_626] {
            buf.extend(delta(v));
        }

        let ladder: [(i64, i64, i64, i64); 5] = [
            (-1, 0, 4093, 2418),
            (-2, 1, 2050, 1978),
            (-3, 2, 1897, 2298),
            (-4, 3, 2073, 3487),
            (-5, 4, 2471, 2956),
        ];
        for (bid, ask, bid_vol, ask_vol) in ladder {
            for v in [bid, ask, bid_vol, ask_vol] {
                buf.extend(delta(v));
            }
        }

        buf.extend(5206u16.to_le_bytes()); // reserved4
        for v in [1i64, -24, -23, 15] {
            buf.extend(delta(v));
        }
        buf.extend(8i16.to_le_bytes()); // reserved9 raw
        buf.extend(4389u16.to_le_bytes()); // active2

        buf
    }

    #[test]
    fn reconstructs_all_prices_from_the_base() {
        let snapshots = decode_quote_snapshots(&fixture()).unwrap();
        assert_eq!(snapshots.len(), 1);
        let q = &snapshots[0];

        assert_eq!(Market::from_wire(q.market), Some(Market::Shenzhen));
        assert_eq!(q.code, "000001");
        assert_eq!(q.active1, 4389);
        assert_eq!(q.price, 12.51);
        assert_eq!(q.last_close, 12.61);
        assert_eq!(q.open, 12.62);
        assert_eq!(q.high, 12.69);
        assert_eq!(q.low, 12.43);
        assert_eq!(q.vol, 786_362);
        assert_eq!(q.cur_vol, 10_006);
        assert_eq!(q.amount, 983_433_856.0);
        assert_eq!(q.sell_vol, 446_986);
        assert_eq!(q.buy_vol, 339_377);
        assert_eq!(q.reserved2, 0);
        assert_eq!(q.reserved3, 46_626);
        assert_eq!(q.reserved4, 5206);
        assert_eq!(q.reserved9, 0.08);
        assert_eq!(q.active2, 4389);
    }

    #[test]
    fn ladder_levels_are_deltas_from_the_base() {
        let snapshots = decode_quote_snapshots(&fixture()).unwrap();
        let levels = snapshots[0].levels;

        assert_eq!(
            levels[0],
            Level {
                bid: 12.50,
                ask: 12.51,
                bid_vol: 4093,
                ask_vol: 2418
            }
        );
        assert_eq!(levels[4].bid, 12.46);
        assert_eq!(levels[4].ask, 12.55);
        assert_eq!(levels[4].bid_vol, 2471);
        assert_eq!(levels[4].ask_vol, 2956);
    }

    #[test]
    fn server_time_comes_from_the_reserved_pair() {
        let snapshots = decode_quote_snapshots(&fixture()).unwrap();
        let q = &snapshots[0];
        assert_eq!(q.reserved0, 14_998_750);
        assert_eq!(q.reserved1, -1251);
        // 14998750 - (-1251) = 15000001 -> 15:00 + 0001 tenths of a minute.
        assert_eq!(q.server_time, "15:00: 0.006");
    }

    #[test]
    fn truncation_anywhere_fails_the_whole_call() {
        let buf = fixture();
        for cut in [buf.len() - 1, buf.len() - 2, buf.len() - 10, 12, 3, 0] {
            let err = decode_quote_snapshots(&buf[..cut]).unwrap_err();
            assert!(
                matches!(err, CodecError::BufferTooShort { .. }),
                "cut at {cut}"
            );
        }
    }

    #[test]
    fn server_time_rendering_rules() {
        assert_eq!(format_server_time(15_000_001).unwrap(), "15:00: 0.006");
        assert_eq!(format_server_time(1_105_449_984).unwrap(), "11:05:26.994");
        // Fewer than six digits: not a clock, rendered empty.
        assert_eq!(format_server_time(12_345).unwrap(), "");
        assert_eq!(format_server_time(0).unwrap(), "");
        // Six and seven digit values are space-padded before slicing, so the
        // hour field absorbs the padding. Reference-exact.
        assert_eq!(format_server_time(123_456).unwrap(), "  :12:20.736");
        assert_eq!(format_server_time(1_234_567).unwrap(), " 1:23:27.402");
    }
}
