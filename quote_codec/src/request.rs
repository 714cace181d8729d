//! Request encoders for the four query kinds.
//!
//! Requests are fixed headers plus a handful of caller-supplied fields, all
//! little-endian, built with the [`crate::pack`] engine. The opaque header
//! constants are carried verbatim from captured traffic; the server rejects
//! requests without them.

use crate::category::Category;
use crate::error::CodecError;
use crate::market::Market;
use crate::pack::{FormatToken, Value, pack};
use crate::result::Result;

/// Opaque lead-in of the minute-aggregate request.
const MINUTE_HEADER: [u8; 12] = [
    0x0c, 0x1b, 0x08, 0x00, 0x01, 0x01, 0x0e, 0x00, 0x0e, 0x00, 0x1d, 0x05,
];

/// Opaque lead-in of the tick-list request.
const TICKS_HEADER: [u8; 12] = [
    0x0c, 0x17, 0x08, 0x01, 0x01, 0x01, 0x0e, 0x00, 0x0e, 0x00, 0xc5, 0x0f,
];

/// Builds a minute-aggregate request for one instrument.
pub fn minute_bars_request(market: Market, code: &str) -> Result<Vec<u8>> {
    let mut out = MINUTE_HEADER.to_vec();
    out.extend(pack(
        &[FormatToken::I16, FormatToken::Str(6), FormatToken::I32],
        &[
            Value::I16(i16::from(market.wire())),
            Value::Str(code.to_string()),
            Value::I32(0),
        ],
    )?);
    Ok(out)
}

/// Builds a K-line request for `count` bars starting `start` bars back.
pub fn kline_bars_request(
    market: Market,
    code: &str,
    category: Category,
    start: u16,
    count: u16,
) -> Result<Vec<u8>> {
    use FormatToken::*;
    pack(
        &[
            I16, I32, I16, I16, I16, I16, Str(6), I16, I16, I16, I16, I32, I32, I16,
        ],
        &[
            Value::I16(0x10c),
            Value::I32(0x0101_6408),
            Value::I16(0x1c),
            Value::I16(0x1c),
            Value::I16(0x052d),
            Value::I16(i16::from(market.wire())),
            Value::Str(code.to_string()),
            Value::I16(category.wire() as i16),
            Value::I16(1),
            Value::I16(start as i16),
            Value::I16(count as i16),
            Value::I32(0),
            Value::I32(0),
            Value::I16(0),
        ],
    )
}

/// Builds a tick-list request for `count` transactions starting `start`
/// transactions back.
pub fn ticks_request(market: Market, code: &str, start: u16, count: u16) -> Result<Vec<u8>> {
    let mut out = TICKS_HEADER.to_vec();
    out.extend(pack(
        &[
            FormatToken::I16,
            FormatToken::Str(6),
            FormatToken::I16,
            FormatToken::I16,
        ],
        &[
            Value::I16(i16::from(market.wire())),
            Value::Str(code.to_string()),
            Value::I16(start as i16),
            Value::I16(count as i16),
        ],
    )?);
    Ok(out)
}

/// Builds a quote-snapshot request for a batch of instruments.
///
/// The header carries the payload length twice and the instrument count
/// once; each instrument follows as a one-byte market id and the six-byte
/// NUL-padded code. An empty batch is rejected before any bytes are built.
pub fn quote_snapshots_request(instruments: &[(Market, &str)]) -> Result<Vec<u8>> {
    use FormatToken::*;

    if instruments.is_empty() {
        return Err(CodecError::EmptyInstrumentList);
    }
    let payload_len = instruments.len() * 7 + 12;

    let mut out = pack(
        &[I16, I32, I16, I16, I32, I32, I16, I16],
        &[
            Value::I16(0x10c),
            Value::I32(0x0200_6320),
            Value::I16(payload_len as i16),
            Value::I16(payload_len as i16),
            Value::I32(0x5_053e),
            Value::I32(0),
            Value::I16(0),
            Value::I16(instruments.len() as i16),
        ],
    )?;
    for (market, code) in instruments {
        // The per-instrument market id is the one single-byte field of the
        // protocol; it sits outside the pack alphabet.
        out.push(market.wire());
        out.extend(pack(&[Str(6)], &[Value::Str((*code).to_string())])?);
    }
    Ok(out)
}
