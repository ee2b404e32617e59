//! Error types
//!
//! Scanning primitives fail with a [`ScanError`], which only records the [`ErrorKind`] and
//! the byte offset and is therefore cheap to create and to propagate. The decode entry points
//! convert it once into a [`DecodeError`], which additionally carries a snippet of the
//! input around the failure position.

use std::fmt::{Display, Formatter, Write};

use thiserror::Error;

/// What the scanner was expecting when the end of the input was reached
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Expected {
    /// Any JSON value
    Value,
    /// The given structural byte, such as `{` or `:`
    Byte(u8),
    /// An unsigned integer
    UnsignedInteger,
    /// A signed integer
    Integer,
    /// A floating point number
    Float,
    /// `true` or `false`
    Bool,
    /// A quoted string
    String,
    /// An object member name
    Key,
    /// `,` or `}` after an object member
    Member,
    /// An array element, `,` or `]`
    Element,
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Value => f.write_str("value"),
            Expected::Byte(b) => write!(f, "'{}'", char::from(*b)),
            Expected::UnsignedInteger => f.write_str("unsigned integer"),
            Expected::Integer => f.write_str("integer"),
            Expected::Float => f.write_str("float"),
            Expected::Bool => f.write_str("bool"),
            Expected::String => f.write_str("string"),
            Expected::Key => f.write_str("key"),
            Expected::Member => f.write_str("',' or '}'"),
            Expected::Element => f.write_str("array element, ',' or ']'"),
        }
    }
}

/// Floating point type a number was parsed as
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
pub enum FloatType {
    /// 32-bit float
    #[strum(serialize = "f32")]
    F32,
    /// 64-bit float
    #[strum(serialize = "f64")]
    F64,
}

/// Why a floating point number could not be parsed
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
pub enum FloatErrorDetail {
    /// No prefix of the input is a number
    #[strum(serialize = "invalid syntax")]
    InvalidSyntax,
    /// The literal is finite but too large for the target type
    #[strum(serialize = "value out of range")]
    OutOfRange,
}

/// Describes why decoding failed
///
/// All kinds are terminal for the current decode call; there is no recovery within
/// a single malformed value.
#[non_exhaustive]
#[derive(Error, PartialEq, Eq, Clone, Copy, Debug)]
pub enum ErrorKind {
    /// The input ended before the expected token
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEndOfInput(Expected),
    /// The next byte did not match the expected structural byte
    #[error("expected '{}'", char::from(*.0))]
    ExpectedByte(u8),
    /// The first byte of an unsigned integer is not a digit
    #[error("expected unsigned integer")]
    ExpectedUnsignedInteger,
    /// The first byte of a signed integer (after the sign) is not a digit
    #[error("expected integer")]
    ExpectedInteger,
    /// A signed integer is larger than the maximum of the target type
    #[error("integer too big")]
    IntegerTooLarge,
    /// A signed integer is smaller than the minimum of the target type
    #[error("integer too small")]
    IntegerTooSmall,
    /// An unsigned integer is larger than the maximum of the target type
    #[error("unsigned integer too big")]
    UnsignedIntegerTooLarge,
    /// A floating point number could not be parsed
    #[error("{target} parse error: {detail}")]
    FloatParseError {
        /// Type the number was parsed as
        target: FloatType,
        /// Why parsing failed
        detail: FloatErrorDetail,
    },
    /// Neither `true` nor `false`
    #[error("expected bool")]
    ExpectedBool,
    /// A string does not start with `"`
    #[error("expected opening quote")]
    ExpectedOpeningQuote,
    /// A string has no closing `"`
    #[error("unterminated string, expected closing quote")]
    UnterminatedString,
    /// A malformed escape sequence, for example `\x` or `\u12`
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// A raw control character (below U+0020) inside a string
    #[error("unescaped control character in string")]
    ControlCharacterInString,
    /// String content is not valid UTF-8
    #[error("invalid UTF-8 string")]
    InvalidUtf8,
    /// The JSON data is structurally malformed
    #[error("syntax error")]
    SyntaxError,
    /// A skipped value is nested deeper than the configured limit
    #[error("json too deep")]
    NestingTooDeep,
    /// An object has a member the destination type does not accept
    #[error("unexpected object member")]
    UnexpectedMember,
}

/// Failure of a scanning primitive
///
/// Records where and why scanning stopped. After a primitive returned an error the
/// [`Cursor`](crate::Cursor) must not be used anymore.
#[derive(Error, PartialEq, Eq, Clone, Copy, Debug)]
#[error("{kind} at offset {offset}")]
pub struct ScanError {
    /// Why scanning failed
    pub kind: ErrorKind,
    /// Byte offset in the input where the failure was detected
    pub offset: usize,
}

/// Result type of all scanning primitives
pub type ScanResult<T> = Result<T, ScanError>;

/// Number of bytes shown on each side of the failure position in [`DecodeError::context`]
const CONTEXT_RADIUS: usize = 24;

/// Error returned by [`decode`](crate::decode) when the input could not be decoded
#[derive(Error, PartialEq, Eq, Clone, Debug)]
#[error("{kind} at offset {offset}: {context}")]
pub struct DecodeError {
    /// Why decoding failed
    pub kind: ErrorKind,
    /// Byte offset in the input where the failure was detected
    pub offset: usize,
    /// Excerpt of the input around `offset`; the failure position is marked with `>>>`
    pub context: String,
}

impl DecodeError {
    pub(crate) fn new(bytes: &[u8], error: ScanError) -> Self {
        DecodeError {
            kind: error.kind,
            offset: error.offset,
            context: format_context(bytes, error.offset),
        }
    }
}

fn format_context(bytes: &[u8], offset: usize) -> String {
    let offset = offset.min(bytes.len());
    let start = offset.saturating_sub(CONTEXT_RADIUS);
    let end = (offset + CONTEXT_RADIUS).min(bytes.len());

    let mut context = String::with_capacity(end - start + 10);
    if start > 0 {
        context.push_str("...");
    }
    context.push_str(&String::from_utf8_lossy(&bytes[start..offset]));
    context.push_str(">>>");
    context.push_str(&String::from_utf8_lossy(&bytes[offset..end]));
    if end < bytes.len() {
        context.push_str("...");
    }
    // Make control characters such as line breaks visible
    if context.chars().any(char::is_control) {
        let mut escaped = String::with_capacity(context.len());
        for c in context.chars() {
            if c.is_control() {
                let _ = write!(escaped, "{}", c.escape_default());
            } else {
                escaped.push(c);
            }
        }
        context = escaped;
    }
    context
}
