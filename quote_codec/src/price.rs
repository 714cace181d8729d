//! Variable-length signed integer decoding ("price delta").
//!
//! Nearly every numeric field the server sends as a difference uses this
//! encoding. The first byte carries the low six magnitude bits, a sign flag
//! at `0x40` and a continuation flag at `0x80`; each continuation byte adds
//! seven magnitude bits and repeats the continuation flag.

use crate::cursor::ByteCursor;
use crate::result::Result;

/// Decodes one price delta, advancing the cursor past it.
///
/// There is no cap on the number of continuation bytes: the loop keeps
/// consuming as long as the continuation flag is set. Magnitude bits shifted
/// past position 63 are dropped and the accumulator wraps, matching the
/// reference decoder's shift semantics.
pub fn read_price_delta(cur: &mut ByteCursor<'_>) -> Result<i64> {
    let mut byte = cur.u8()?;
    let mut value = i64::from(byte & 0x3f);
    let negative = byte & 0x40 != 0;
    let mut shift = 6u32;

    while byte & 0x80 != 0 {
        byte = cur.u8()?;
        if shift < 64 {
            value = value.wrapping_add(i64::from(byte & 0x7f) << shift);
        }
        shift += 7;
    }

    if negative {
        value = -value;
    }
    Ok(value)
}
