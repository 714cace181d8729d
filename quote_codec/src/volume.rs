//! Packed volume/turnover decoding.
//!
//! Volume and turnover magnitudes travel as a custom 4-byte pseudo-float:
//! the top byte is a doubled exponent and the three lower bytes are mantissa
//! lanes weighted at descending powers of two. The format is not IEEE and has
//! no documented closed form, so [`parse_volume`] reproduces the exact lane
//! extractions, exponent arithmetic and summation order of the protocol.
//! Changing the order of the final sum changes the floating-point rounding
//! and breaks byte-for-byte compatibility.
//!
//! The encoding is decode-only; no inverse exists in the protocol.

use crate::cursor::ByteCursor;
use crate::result::Result;

/// Decodes the packed pseudo-float from its 4-byte little-endian integer form.
pub fn parse_volume(raw: u32) -> f64 {
    let logpoint = (raw >> 24) as i32;
    let hleax = ((raw >> 16) & 0xff) as i32;
    let lheax = ((raw >> 8) & 0xff) as i32;
    let lleax = (raw & 0xff) as i32;

    let e1 = 2 * logpoint - 0x7f;
    let e2 = 2 * logpoint - 0x86;
    let e3 = 2 * logpoint - 0x8e;
    let e4 = 2 * logpoint - 0x96;

    let mut term1 = 2f64.powi(e1.abs());
    if e4 < 0 {
        term1 = 1.0 / term1;
    }

    let term2 = if hleax > 0x80 {
        2f64.powi(e2) * 128.0 + f64::from(hleax & 0x7f) * 2f64.powi(e2 + 1)
    } else if e2 >= 0 {
        f64::from(hleax) * 2f64.powi(e2)
    } else {
        f64::from(hleax) / 2f64.powi(-e2)
    };

    let mut term3 = f64::from(lheax) * 2f64.powi(e3);
    let mut term4 = f64::from(lleax) * 2f64.powi(e4);
    if hleax & 0x80 != 0 {
        term3 *= 2.0;
        term4 *= 2.0;
    }

    term1 + term2 + term3 + term4
}

/// Reads a 4-byte little-endian field and decodes it as a packed volume.
pub fn read_packed_volume(cur: &mut ByteCursor<'_>) -> Result<f64> {
    Ok(parse_volume(cur.u32_le()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    fn from_lanes(bytes: [u8; 4]) -> f64 {
        parse_volume(u32::from_le_bytes(bytes))
    }

    #[test]
    fn integral_golden_values() {
        // Daily-bar volume and turnover lanes from captured server traffic.
        assert_eq!(from_lanes([0xf6, 0x68, 0xa4, 0x4c]), 86_198_192.0);
        assert_eq!(from_lanes([0x9f, 0xfc, 0x95, 0x4c]), 78_636_280.0);
        assert_eq!(from_lanes([0xe6, 0x68, 0x04, 0x4c]), 34_710_424.0);
        assert_eq!(from_lanes([0x0a, 0x78, 0x6a, 0x4e]), 983_433_856.0);
        assert_eq!(from_lanes([0x87, 0x41, 0x82, 0x4e]), 1_092_666_240.0);
        assert_eq!(from_lanes([0x40, 0xa9, 0xcd, 0x4d]), 431_302_656.0);
    }

    #[test]
    fn small_exponents_leave_fractional_dust() {
        // With an exponent byte below 0x4b the first term degenerates to a
        // tiny reciprocal power of two that must survive in the sum.
        assert_eq!(from_lanes([0x00, 0x7b, 0x8e, 0x48]), 160_728.0 + 2f64.powi(-17));
    }

    #[test]
    fn high_mantissa_bit_doubles_low_lanes() {
        let low = from_lanes([0x10, 0x20, 0x00, 0x4c]);
        let high = from_lanes([0x10, 0x20, 0x80, 0x4c]);
        // Setting only the 0x80 bit of the second lane adds the implicit
        // 2^(e2+7) term and doubles the two low lanes.
        let e2 = 2 * 0x4c - 0x86;
        let expected = low + 2f64.powi(e2 + 7) + 0x20 as f64 * 2f64.powi(2 * 0x4c - 0x8e)
            + 0x10 as f64 * 2f64.powi(2 * 0x4c - 0x96);
        assert_eq!(high, expected);
    }

    #[test]
    fn decoding_is_deterministic() {
        for raw in [0u32, 0x4c8e7b00, 0xffff_ffff, 0x0102_0304] {
            assert_eq!(parse_volume(raw).to_bits(), parse_volume(raw).to_bits());
        }
    }

    #[test]
    fn cursor_read_consumes_exactly_four_bytes() {
        let data = [0xf6, 0x68, 0xa4, 0x4c, 0xaa];
        let mut cur = ByteCursor::new(&data);
        assert_eq!(read_packed_volume(&mut cur).unwrap(), 86_198_192.0);
        assert_eq!(cur.rest(), &[0xaa]);

        let mut cur = ByteCursor::new(&data[..3]);
        let err = read_packed_volume(&mut cur).unwrap_err();
        assert!(matches!(err, CodecError::BufferTooShort { .. }));
    }
}
