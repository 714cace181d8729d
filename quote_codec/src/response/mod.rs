//! Response decoders for the four query kinds the server answers.
//!
//! Each decoder is a pure function of (request parameters, response buffer):
//! it reads the declared record count, walks a [`crate::ByteCursor`] through
//! exactly that many records and returns the reconstructed values. Running
//! price bases live on the decoder's stack, so decoding the same buffer twice
//! yields identical output. Any read past the end of the buffer aborts the
//! whole call with [`crate::CodecError::BufferTooShort`]; no partial record
//! list is ever returned.

pub mod bars;
pub mod minute;
pub mod quotes;
pub mod ticks;

pub use bars::{KLineBar, decode_kline_bars};
pub use minute::{MinuteBar, decode_minute_bars};
pub use quotes::{Level, QuoteSnapshot, decode_quote_snapshots};
pub use ticks::{TimeOfDayWidth, Tick, TradeSide, decode_ticks};
