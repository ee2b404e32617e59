//! Read position within a borrowed input buffer
//!
//! The [`Cursor`] is the state threaded through every scanning primitive. The primitives
//! themselves are implemented as methods in the modules which deal with the respective
//! kind of JSON token, for example [`Cursor::read_i64`] in the `scalar` module.

use crate::{
    decode::{DecodeSettings, MAX_NESTING_DEPTH_LIMIT},
    error::{ErrorKind, Expected, ScanError, ScanResult},
};

/// Whether `b` is skipped by [`Cursor::skip_whitespace`]
///
/// In addition to the JSON whitespace characters this includes vertical tab and form feed.
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// Byte buffer together with the current read offset
///
/// A cursor is created for a single decode call and borrows the input for its whole
/// lifetime `'a`; values which alias the input (such as [`RawStr`](crate::RawStr)) carry
/// that lifetime.
///
/// Primitives either advance the offset past the consumed token and return its value,
/// or return a [`ScanError`] and leave the offset at the point of failure. After an
/// error the cursor is not in a resumable state.
///
/// # Examples
/// ```
/// # use fieldscan::Cursor;
/// let mut cursor = Cursor::new(b"[12, true]");
/// cursor.expect_byte(b'[')?;
/// assert_eq!(12, cursor.read_u64()?);
/// cursor.expect_byte(b',')?;
/// cursor.skip_whitespace();
/// assert_eq!(true, cursor.read_bool()?);
/// cursor.expect_byte(b']')?;
/// assert!(cursor.is_at_end());
/// # Ok::<(), fieldscan::ScanError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    settings: DecodeSettings,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `bytes` with default [`DecodeSettings`]
    pub fn new(bytes: &'a [u8]) -> Self {
        Cursor::new_custom(bytes, DecodeSettings::default())
    }

    /// Creates a cursor at the start of `bytes` with custom settings
    ///
    /// # Panics
    /// Panics if `settings.max_nesting_depth` is larger than [`MAX_NESTING_DEPTH_LIMIT`].
    pub fn new_custom(bytes: &'a [u8], settings: DecodeSettings) -> Self {
        assert!(
            settings.max_nesting_depth <= MAX_NESTING_DEPTH_LIMIT,
            "max_nesting_depth {} exceeds limit {MAX_NESTING_DEPTH_LIMIT}",
            settings.max_nesting_depth
        );
        Cursor {
            bytes,
            pos: 0,
            settings,
        }
    }

    /// Settings this cursor was created with
    pub fn settings(&self) -> &DecodeSettings {
        &self.settings
    }

    /// The complete input buffer
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Current read offset; `0 <= offset <= bytes().len()`
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The not yet consumed part of the input
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    /// Whether all bytes have been consumed
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Returns the next byte without consuming it
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Creates an error of the given kind at the current offset
    pub fn error(&self, kind: ErrorKind) -> ScanError {
        self.error_at(kind, self.pos)
    }

    pub(crate) fn error_at(&self, kind: ErrorKind, offset: usize) -> ScanError {
        ScanError { kind, offset }
    }

    pub(crate) fn eof_error(&self, expected: Expected) -> ScanError {
        self.error(ErrorKind::UnexpectedEndOfInput(expected))
    }

    pub(crate) fn advance(&mut self, count: usize) {
        debug_assert!(self.pos + count <= self.bytes.len());
        self.pos += count;
    }

    pub(crate) fn set_offset(&mut self, offset: usize) {
        debug_assert!(offset <= self.bytes.len());
        self.pos = offset;
    }

    /// Skips space, tab, line feed, carriage return, vertical tab and form feed
    ///
    /// Reaching the end of the input is not an error.
    pub fn skip_whitespace(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if !is_whitespace(b) {
                return;
            }
            self.pos += 1;
        }
    }

    /// Consumes and returns the next byte
    ///
    /// `expected` describes what the caller is reading, for the error in case the input has
    /// already been consumed completely.
    pub fn next_byte(&mut self, expected: Expected) -> ScanResult<u8> {
        match self.peek() {
            Some(b) => {
                self.pos += 1;
                Ok(b)
            }
            None => Err(self.eof_error(expected)),
        }
    }

    /// Consumes the next byte, which must be `expected`
    pub fn expect_byte(&mut self, expected: u8) -> ScanResult<()> {
        match self.peek() {
            None => Err(self.eof_error(Expected::Byte(expected))),
            Some(b) if b == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(self.error(ErrorKind::ExpectedByte(expected))),
        }
    }
}
