//! Error types for the codec.
//!
//! Every failure a decode or encode call can raise is collected in the single
//! `CodecError` enum, so callers can propagate one error type across the
//! whole crate. All errors are terminal for the call that raised them: a
//! decoder never returns a partial record list alongside an error.
use thiserror::Error;

/// Unified error type for pack/unpack and response decoding.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The buffer ended before a declared or implied field width was read.
    #[error("buffer too short: need {needed} byte(s), {remaining} remaining")]
    BufferTooShort {
        /// Bytes the failed read required.
        needed: usize,
        /// Bytes that were actually left in the buffer.
        remaining: usize,
    },

    /// A textual per-field descriptor that is not part of the format alphabet.
    #[error("unknown format token: '{0}'")]
    UnknownFormatToken(String),

    /// Encode-time mismatch between a value and its declared format token.
    #[error("value {value} does not fit format token '{token}'")]
    FormatMismatch {
        /// Display form of the offending token.
        token: String,
        /// Debug form of the offending value.
        value: String,
    },

    /// The format slice describes more fields than values were supplied.
    #[error("format describes {formats} field(s) but only {values} value(s) were given")]
    LengthMismatch {
        /// Number of tokens in the format slice.
        formats: usize,
        /// Number of values supplied for packing.
        values: usize,
    },

    /// The server-time field of a quote snapshot did not contain parseable digits.
    #[error("malformed server time field: '{0}'")]
    BadServerTime(String),

    /// A quote request was built with no instruments to ask for.
    #[error("instrument list is empty")]
    EmptyInstrumentList,
}
