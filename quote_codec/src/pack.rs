//! Format-driven pack/unpack of fixed-width fields.
//!
//! A wire layout is described as a slice of [`FormatToken`]s, one per field.
//! [`pack`] turns a matching slice of [`Value`]s into bytes and [`unpack`]
//! does the reverse, returning the undecoded suffix of the buffer so callers
//! can continue decoding variable-length fields past a known-good point.
//!
//! All scalars are little-endian; integers are signed; a fixed string of `N`
//! bytes is NUL-padded on pack and returned verbatim (padding included) on
//! unpack. Trimming the padding is the caller's responsibility.

use std::fmt;
use std::str::FromStr;

use crate::cursor::ByteCursor;
use crate::error::CodecError;
use crate::result::Result;

/// Wire width and kind of a single packed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatToken {
    /// One byte, zero or non-zero.
    Bool,
    /// Two-byte signed little-endian integer.
    I16,
    /// Four-byte signed little-endian integer.
    I32,
    /// Eight-byte signed little-endian integer.
    I64,
    /// Four-byte little-endian IEEE float.
    F32,
    /// Eight-byte little-endian IEEE float.
    F64,
    /// Fixed-length byte string of the given width.
    Str(usize),
}

impl FormatToken {
    /// Packed width of the field in bytes.
    pub fn width(&self) -> usize {
        match self {
            FormatToken::Bool => 1,
            FormatToken::I16 => 2,
            FormatToken::I32 | FormatToken::F32 => 4,
            FormatToken::I64 | FormatToken::F64 => 8,
            FormatToken::Str(n) => *n,
        }
    }
}

impl FromStr for FormatToken {
    type Err = CodecError;

    /// Parses a textual per-field descriptor as used by untyped callers:
    /// `?`, `h`/`H`, `i`/`I`/`l`/`L`, `q`/`Q`, `f`, `d` and `Ns` for a fixed
    /// string of `N` bytes. Anything else is an
    /// [`CodecError::UnknownFormatToken`].
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "?" => Ok(FormatToken::Bool),
            "h" | "H" => Ok(FormatToken::I16),
            "i" | "I" | "l" | "L" => Ok(FormatToken::I32),
            "q" | "Q" => Ok(FormatToken::I64),
            "f" => Ok(FormatToken::F32),
            "d" => Ok(FormatToken::F64),
            _ => {
                if let Some(n) = s.strip_suffix('s') {
                    if let Ok(n) = n.parse::<usize>() {
                        return Ok(FormatToken::Str(n));
                    }
                }
                Err(CodecError::UnknownFormatToken(s.to_string()))
            }
        }
    }
}

impl fmt::Display for FormatToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatToken::Bool => write!(f, "bool"),
            FormatToken::I16 => write!(f, "i16"),
            FormatToken::I32 => write!(f, "i32"),
            FormatToken::I64 => write!(f, "i64"),
            FormatToken::F32 => write!(f, "f32"),
            FormatToken::F64 => write!(f, "f64"),
            FormatToken::Str(n) => write!(f, "{n}s"),
        }
    }
}

/// A single field value, tagged with its kind.
///
/// The closed set of variants makes kind checks a construction-time concern
/// for in-process callers; [`pack`] still verifies each value against its
/// token so data arriving from an untrusted boundary fails with
/// [`CodecError::FormatMismatch`] instead of being mis-encoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean field.
    Bool(bool),
    /// Two-byte integer field.
    I16(i16),
    /// Four-byte integer field.
    I32(i32),
    /// Eight-byte integer field.
    I64(i64),
    /// Four-byte float field.
    F32(f32),
    /// Eight-byte float field.
    F64(f64),
    /// Fixed string field; padding is kept verbatim after unpack.
    Str(String),
}

/// Sums the packed widths of the given format.
pub fn calc_size(formats: &[FormatToken]) -> usize {
    formats.iter().map(FormatToken::width).sum()
}

/// Packs `values` according to `formats`.
///
/// Fails with [`CodecError::LengthMismatch`] when the format describes more
/// fields than values were given (extra values are ignored, matching the
/// protocol's reference behavior) and with [`CodecError::FormatMismatch`]
/// when a value's kind does not match its token or a fixed string is longer
/// than its declared width.
pub fn pack(formats: &[FormatToken], values: &[Value]) -> Result<Vec<u8>> {
    if formats.len() > values.len() {
        return Err(CodecError::LengthMismatch {
            formats: formats.len(),
            values: values.len(),
        });
    }

    let mut out = Vec::with_capacity(calc_size(formats));
    for (token, value) in formats.iter().zip(values) {
        match (token, value) {
            (FormatToken::Bool, Value::Bool(v)) => out.push(u8::from(*v)),
            (FormatToken::I16, Value::I16(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (FormatToken::I32, Value::I32(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (FormatToken::I64, Value::I64(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (FormatToken::F32, Value::F32(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (FormatToken::F64, Value::F64(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (FormatToken::Str(n), Value::Str(s)) => {
                let bytes = s.as_bytes();
                if bytes.len() > *n {
                    return Err(mismatch(token, value));
                }
                out.extend_from_slice(bytes);
                out.resize(out.len() + (n - bytes.len()), 0);
            }
            (token, value) => return Err(mismatch(token, value)),
        }
    }
    Ok(out)
}

/// Unpacks `data` according to `formats`.
///
/// The total width of the format is checked up front; a buffer shorter than
/// that fails with [`CodecError::BufferTooShort`]. On success the remaining
/// undecoded suffix of `data` is returned alongside the values.
pub fn unpack<'a>(formats: &[FormatToken], data: &'a [u8]) -> Result<(&'a [u8], Vec<Value>)> {
    let needed = calc_size(formats);
    if needed > data.len() {
        return Err(CodecError::BufferTooShort {
            needed,
            remaining: data.len(),
        });
    }

    let mut cur = ByteCursor::new(data);
    let mut values = Vec::with_capacity(formats.len());
    for token in formats {
        let value = match token {
            // The reference reads booleans as a signed byte and tests > 0,
            // so 0x80..=0xff decode to false.
            FormatToken::Bool => Value::Bool(cur.u8()? as i8 > 0),
            FormatToken::I16 => Value::I16(cur.i16_le()?),
            FormatToken::I32 => Value::I32(cur.i32_le()?),
            FormatToken::I64 => Value::I64(cur.i64_le()?),
            FormatToken::F32 => Value::F32(cur.f32_le()?),
            FormatToken::F64 => Value::F64(cur.f64_le()?),
            FormatToken::Str(n) => {
                Value::Str(String::from_utf8_lossy(cur.take(*n)?).into_owned())
            }
        };
        values.push(value);
    }
    Ok((cur.rest(), values))
}

fn mismatch(token: &FormatToken, value: &Value) -> CodecError {
    CodecError::FormatMismatch {
        token: token.to_string(),
        value: format!("{value:?}"),
    }
}
