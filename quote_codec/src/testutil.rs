//! Test-only fixture helpers.
//!
//! The production codec is decode-only for the protocol's custom numeric
//! formats, so tests build their wire fixtures with this inverse encoder.
//! It exists for fixture construction only and must stay out of the public
//! API.

/// Encodes a signed value in the variable-length delta format: six magnitude
/// bits plus sign and continuation flags in the first byte, seven magnitude
/// bits per continuation byte.
pub fn delta(value: i64) -> Vec<u8> {
    let sign = if value < 0 { 0x40 } else { 0x00 };
    let mut magnitude = value.unsigned_abs();

    let mut first = (magnitude & 0x3f) as u8 | sign;
    magnitude >>= 6;
    if magnitude > 0 {
        first |= 0x80;
    }
    let mut out = vec![first];

    while magnitude > 0 {
        let mut byte = (magnitude & 0x7f) as u8;
        magnitude >>= 7;
        if magnitude > 0 {
            byte |= 0x80;
        }
        out.push(byte);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::ByteCursor;
    use crate::price::read_price_delta;

    #[test]
    fn matches_the_documented_examples() {
        assert_eq!(delta(5), vec![0x05]);
        assert_eq!(delta(-5), vec![0x45]);
        assert_eq!(delta(69), vec![0x85, 0x01]);
        assert_eq!(delta(12650), vec![0xaa, 0xc5, 0x01]);
    }

    #[test]
    fn round_trips_through_the_decoder() {
        for value in [
            0i64,
            1,
            -1,
            63,
            -63,
            64,
            -64,
            8213,
            -4839,
            14_998_750,
            -14_998_750,
            i64::from(u32::MAX),
            i64::MAX,
        ] {
            let bytes = delta(value);
            let mut cur = ByteCursor::new(&bytes);
            assert_eq!(read_price_delta(&mut cur).unwrap(), value, "value {value}");
            assert_eq!(cur.remaining(), 0);
        }
    }
}
