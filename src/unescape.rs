//! Expansion of JSON string escape sequences

use crate::error::ErrorKind;

/// Destination of unescaped string content
pub(crate) trait UnescapeSink {
    /// Appends raw bytes which contain no escape sequence
    ///
    /// Returns `Err(index)` with the index within `bytes` at which the content is invalid.
    fn push_literal(&mut self, bytes: &[u8]) -> Result<(), usize>;

    /// Appends a char which was represented by an escape sequence
    fn push_char(&mut self, c: char);
}

/// Owned string content; literal bytes must be valid UTF-8
impl UnescapeSink for String {
    fn push_literal(&mut self, bytes: &[u8]) -> Result<(), usize> {
        match std::str::from_utf8(bytes) {
            Ok(s) => {
                self.push_str(s);
                Ok(())
            }
            Err(e) => Err(e.valid_up_to()),
        }
    }

    fn push_char(&mut self, c: char) {
        self.push(c);
    }
}

/// Member names; only compared byte-wise, so literal bytes are not validated
impl UnescapeSink for Vec<u8> {
    fn push_literal(&mut self, bytes: &[u8]) -> Result<(), usize> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn push_char(&mut self, c: char) {
        let mut buf = [0; 4];
        self.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }
}

/// Failure of [`unescape_into`], with the index within the raw content
#[derive(PartialEq, Eq, Debug)]
pub(crate) struct UnescapeError {
    pub kind: ErrorKind,
    pub index: usize,
}

fn parse_hex_digit(digit: u8) -> Option<u32> {
    match digit {
        b'0'..=b'9' => Some(u32::from(digit - b'0')),
        b'a'..=b'f' => Some(u32::from(digit - b'a' + 10)),
        b'A'..=b'F' => Some(u32::from(digit - b'A' + 10)),
        _ => None,
    }
}

/// Parses the 4 hex digits of a `\uXXXX` escape starting at `start` (pointing at `\`)
fn read_unicode_escape(raw: &[u8], start: usize) -> Option<u32> {
    let digits = raw.get(start + 2..start + 6)?;
    digits
        .iter()
        .try_fold(0, |value, &d| Some(value << 4 | parse_hex_digit(d)?))
}

/// Decodes a `\uXXXX` escape, or a surrogate pair of two such escapes, at `start`
///
/// Returns the char and the number of consumed bytes. Unpaired surrogates are decoded
/// as U+FFFD.
fn read_unicode_escape_char(raw: &[u8], start: usize) -> Result<(char, usize), UnescapeError> {
    let c = read_unicode_escape(raw, start).ok_or(UnescapeError {
        kind: ErrorKind::InvalidEscape,
        index: start,
    })?;

    if (0xD800..=0xDBFF).contains(&c) && raw.get(start + 6..start + 8) == Some(&b"\\u"[..]) {
        if let Some(c2 @ 0xDC00..=0xDFFF) = read_unicode_escape(raw, start + 6) {
            let c = ((c - 0xD800) << 10 | (c2 - 0xDC00)) + 0x10000;
            return Ok((
                char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER),
                12,
            ));
        }
    }
    // Surrogates are not valid chars and end up as replacement char here
    Ok((char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER), 6))
}

/// Unescapes the raw content of a JSON string (the bytes between the quotes) into `sink`
///
/// Supports the escape sequences `\"`, `\\`, `\/`, `\b`, `\f`, `\n`, `\r`, `\t` and `\uXXXX`.
/// Raw control characters are rejected.
pub(crate) fn unescape_into<S: UnescapeSink>(raw: &[u8], sink: &mut S) -> Result<(), UnescapeError> {
    let mut literal_start = 0;
    let mut i = 0;

    while i < raw.len() {
        let byte = raw[i];
        if byte == b'\\' {
            sink.push_literal(&raw[literal_start..i])
                .map_err(|index| UnescapeError {
                    kind: ErrorKind::InvalidUtf8,
                    index: literal_start + index,
                })?;

            let invalid_escape = UnescapeError {
                kind: ErrorKind::InvalidEscape,
                index: i,
            };
            let escaped = match raw.get(i + 1) {
                Some(&b) => b,
                None => return Err(invalid_escape),
            };
            let (c, len) = match escaped {
                b'"' | b'\\' | b'/' => (char::from(escaped), 2),
                b'b' => ('\u{8}', 2),
                b'f' => ('\u{C}', 2),
                b'n' => ('\n', 2),
                b'r' => ('\r', 2),
                b't' => ('\t', 2),
                b'u' => read_unicode_escape_char(raw, i)?,
                _ => return Err(invalid_escape),
            };
            sink.push_char(c);
            i += len;
            literal_start = i;
        } else if byte < 0x20 {
            return Err(UnescapeError {
                kind: ErrorKind::ControlCharacterInString,
                index: i,
            });
        } else {
            i += 1;
        }
    }

    sink.push_literal(&raw[literal_start..])
        .map_err(|index| UnescapeError {
            kind: ErrorKind::InvalidUtf8,
            index: literal_start + index,
        })
}
