//! String primitives and the two string materialization strategies
//!
//! - *Safe*: [`Cursor::read_string_into`] unescapes the string into an owned [`String`] and
//!   validates that the content is UTF-8.
//! - *Raw*: [`Cursor::read_raw_str`] returns a [`RawStr`] which refers to the bytes between the
//!   quotes within the input buffer. Nothing is copied, unescaped or validated.

use std::{
    borrow::Cow,
    fmt::{Debug, Display, Formatter},
    str::Utf8Error,
};

use crate::{
    cursor::Cursor,
    error::{ErrorKind, Expected, ScanResult},
    unescape::unescape_into,
};

/// Raw content of a JSON string, borrowed from the input buffer
///
/// This is the zero-copy string representation: the bytes are exactly the ones between the
/// quotes in the input, so escape sequences such as `\n` are still contained in escaped form,
/// and the bytes are not guaranteed to be valid UTF-8. Whether the content is valid can be
/// checked on demand with [`to_str`](Self::to_str) or [`unescape`](Self::unescape).
///
/// The lifetime `'a` is the lifetime of the input buffer, so a record containing a `RawStr`
/// cannot outlive the buffer it was decoded from, and the buffer cannot be modified while
/// the record is in use.
///
/// # Examples
/// ```
/// # use fieldscan::Cursor;
/// let json = br#""tab\there""#;
/// let raw = Cursor::new(json).read_raw_str()?;
/// assert_eq!(br"tab\there", raw.as_bytes());
/// assert!(raw.has_escapes());
/// assert_eq!("tab\there", raw.unescape()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawStr<'a>(&'a [u8]);

impl<'a> RawStr<'a> {
    /// Wraps raw JSON string content (without the enclosing quotes)
    pub fn new(bytes: &'a [u8]) -> Self {
        RawStr(bytes)
    }

    /// The raw bytes, as they appear in the input
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Number of raw bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the raw content contains at least one escape sequence
    pub fn has_escapes(&self) -> bool {
        self.0.contains(&b'\\')
    }

    /// Validates the raw bytes as UTF-8 and returns them as `str`
    ///
    /// Escape sequences are not processed.
    pub fn to_str(&self) -> Result<&'a str, Utf8Error> {
        std::str::from_utf8(self.0)
    }

    /// Unescapes the content into an owned `String`, the same way the safe strategy does
    pub fn unescape(&self) -> Result<String, ErrorKind> {
        let mut s = String::with_capacity(self.0.len());
        unescape_into(self.0, &mut s).map_err(|e| e.kind)?;
        Ok(s)
    }
}

impl Debug for RawStr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RawStr({:?})", String::from_utf8_lossy(self.0))
    }
}

/// Writes the raw content, replacing invalid UTF-8 with U+FFFD
impl Display for RawStr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&String::from_utf8_lossy(self.0), f)
    }
}

impl PartialEq<str> for RawStr<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for RawStr<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<[u8]> for RawStr<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl<'a> From<&'a str> for RawStr<'a> {
    fn from(s: &'a str) -> Self {
        RawStr(s.as_bytes())
    }
}

impl<'a> Cursor<'a> {
    /// Reads a quoted string and returns the raw bytes between the quotes
    ///
    /// The closing quote is the first `"` which is not part of an escape sequence; a `\`
    /// always escapes the byte following it, so `"a\\"` ends after the second backslash.
    /// Escape sequences are not validated here.
    pub fn read_raw_string(&mut self) -> ScanResult<&'a [u8]> {
        match self.peek() {
            None => return Err(self.eof_error(Expected::String)),
            Some(b'"') => self.advance(1),
            Some(_) => return Err(self.error(ErrorKind::ExpectedOpeningQuote)),
        }

        let bytes = self.bytes();
        let start = self.offset();
        let mut i = start;
        while i < bytes.len() {
            match bytes[i] {
                b'"' => {
                    self.set_offset(i + 1);
                    return Ok(&bytes[start..i]);
                }
                b'\\' => i += 2,
                _ => i += 1,
            }
        }
        self.set_offset(bytes.len());
        Err(self.error(ErrorKind::UnterminatedString))
    }

    /// Reads a quoted string without copying it (raw materialization)
    ///
    /// See [`RawStr`] for what is (not) guaranteed about the content.
    pub fn read_raw_str(&mut self) -> ScanResult<RawStr<'a>> {
        self.read_raw_string().map(RawStr)
    }

    /// Reads a quoted string into `dst`, unescaping it and validating that it is UTF-8
    /// (safe materialization)
    ///
    /// `dst` is cleared first; its allocated capacity is reused.
    pub fn read_string_into(&mut self, dst: &mut String) -> ScanResult<()> {
        let raw = self.read_raw_string()?;
        // Offset of the first content byte, behind the opening quote
        let raw_start = self.offset() - raw.len() - 1;
        dst.clear();
        unescape_into(raw, dst).map_err(|e| self.error_at(e.kind, raw_start + e.index))
    }

    /// Reads a quoted string into a new `String`, see [`read_string_into`](Self::read_string_into)
    pub fn read_string(&mut self) -> ScanResult<String> {
        let mut s = String::new();
        self.read_string_into(&mut s)?;
        Ok(s)
    }

    /// Reads an object member name followed by `:`, with optional whitespace around the `:`
    ///
    /// The name is borrowed from the input unless it contains escape sequences, in which case
    /// the unescaped bytes are returned.
    pub fn read_key_colon(&mut self) -> ScanResult<Cow<'a, [u8]>> {
        if self.is_at_end() {
            return Err(self.eof_error(Expected::Key));
        }
        let raw = self.read_raw_string()?;
        let key = if raw.contains(&b'\\') {
            let raw_start = self.offset() - raw.len() - 1;
            let mut unescaped = Vec::with_capacity(raw.len());
            unescape_into(raw, &mut unescaped)
                .map_err(|e| self.error_at(e.kind, raw_start + e.index))?;
            Cow::Owned(unescaped)
        } else {
            Cow::Borrowed(raw)
        };

        self.skip_whitespace();
        self.expect_byte(b':')?;
        self.skip_whitespace();
        Ok(key)
    }
}
