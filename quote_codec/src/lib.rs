//!
//! Binary codec for the quote server's wire protocol.
//!
//! The server answers four query kinds — real-time quote snapshots, K-line
//! bars, minute aggregates and tick-level transactions — in a compact binary
//! layout built from three primitives: fixed-width little-endian fields, a
//! variable-length signed delta for most numbers, and a custom 4-byte
//! pseudo-float for volume and turnover. This crate converts between those
//! byte layouts and structured records.
//!
//! This crate aggregates:
//! - `error` — unified error type `CodecError` used across the crate.
//! - `result` — handy `Result<T, CodecError>` alias.
//! - `pack` — format-driven pack/unpack of fixed-width fields.
//! - `cursor` — `ByteCursor`, the bounds-checked read position all decoders share.
//! - `price` — the variable-length signed delta decoder.
//! - `volume` — the packed pseudo-float decoder.
//! - `category` / `datetime` — bar granularities and packed timestamp decoding.
//! - `market` — exchange identifiers.
//! - `request` — encoders for the four request kinds.
//! - `response` — decoders for the four response kinds.
//!
//! Transport and presentation are out of scope: callers hand each decoder a
//! fully received response buffer and get back structured records (or one
//! terminal error — never a partial list). Decoding is synchronous and keeps
//! no state between calls, so independent buffers can be decoded from any
//! number of threads.
#![warn(missing_docs)]
pub mod category;
pub mod cursor;
pub mod datetime;
pub mod error;
pub mod market;
pub mod pack;
pub mod price;
pub mod request;
pub mod response;
pub mod result;
pub mod volume;

#[cfg(test)]
pub(crate) mod testutil;

pub use category::Category;
pub use cursor::ByteCursor;
pub use datetime::BarTime;
pub use error::CodecError;
pub use market::Market;
pub use pack::{FormatToken, Value, calc_size, pack, unpack};
pub use price::read_price_delta;
pub use response::{
    KLineBar, Level, MinuteBar, QuoteSnapshot, Tick, TimeOfDayWidth, TradeSide,
    decode_kline_bars, decode_minute_bars, decode_quote_snapshots, decode_ticks,
};
pub use result::Result;
pub use volume::{parse_volume, read_packed_volume};
