//! Result type alias used across the crate.
//!
//! Defaults the error type to [`CodecError`] so codec functions can simply
//! return `Result<T>`.
use crate::error::CodecError;

/// Crate-wide `Result` alias with `CodecError` as the default error.
pub type Result<T, E = CodecError> = std::result::Result<T, E>;
