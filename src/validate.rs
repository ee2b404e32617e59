//! Well-formedness check for JSON values
//!
//! This is the second pass of [`Cursor::skip_value`](crate::Cursor::skip_value): the first
//! pass only finds the end of the value by tracking brackets and strings, this pass verifies
//! the grammar of the found range. It is iterative; nesting is tracked with the same bit
//! stack as the first pass, so its depth is bounded as well.

use crate::{
    decode::MAX_NESTING_DEPTH_LIMIT,
    json_number::json_number_len,
    skip::NestingStack,
    unescape::{unescape_into, UnescapeSink},
};

/// Discards string content, only validating that literal parts are UTF-8
struct ValidatingSink;

impl UnescapeSink for ValidatingSink {
    fn push_literal(&mut self, bytes: &[u8]) -> Result<(), usize> {
        std::str::from_utf8(bytes)
            .map(|_| ())
            .map_err(|e| e.valid_up_to())
    }

    fn push_char(&mut self, _c: char) {}
}

/// Whitespace as defined by RFC 8259
fn skip_json_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while matches!(bytes.get(pos), Some(b' ' | b'\t' | b'\n' | b'\r')) {
        pos += 1;
    }
    pos
}

/// Validates the string starting with the `"` at `pos`, returns the position after it
fn string_end(bytes: &[u8], pos: usize) -> Option<usize> {
    let start = pos + 1;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                unescape_into(&bytes[start..i], &mut ValidatingSink).ok()?;
                return Some(i + 1);
            }
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
    None
}

/// Validates `"name"`, optional whitespace and `:` at `pos`, returns the position of the
/// member value
fn member_name_end(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&b'"') {
        return None;
    }
    let pos = skip_json_whitespace(bytes, string_end(bytes, pos)?);
    if bytes.get(pos) != Some(&b':') {
        return None;
    }
    Some(skip_json_whitespace(bytes, pos + 1))
}

fn literal_end(bytes: &[u8], pos: usize, literal: &[u8]) -> Option<usize> {
    bytes[pos..].starts_with(literal).then_some(pos + literal.len())
}

fn validate(bytes: &[u8]) -> Option<()> {
    let mut stack = NestingStack::new();
    let mut pos = skip_json_whitespace(bytes, 0);

    'value: loop {
        pos = match *bytes.get(pos)? {
            b'{' | b'[' => {
                let is_array = bytes[pos] == b'[';
                let closing = if is_array { b']' } else { b'}' };
                // An empty container is a nesting level as well, even though it is never pushed
                if stack.depth() >= MAX_NESTING_DEPTH_LIMIT {
                    return None;
                }
                pos = skip_json_whitespace(bytes, pos + 1);
                if bytes.get(pos) == Some(&closing) {
                    pos + 1
                } else {
                    if !stack.push(is_array) {
                        return None;
                    }
                    if !is_array {
                        pos = member_name_end(bytes, pos)?;
                    }
                    continue 'value;
                }
            }
            b'"' => string_end(bytes, pos)?,
            b't' => literal_end(bytes, pos, b"true")?,
            b'f' => literal_end(bytes, pos, b"false")?,
            b'n' => literal_end(bytes, pos, b"null")?,
            _ => pos + json_number_len(&bytes[pos..])?,
        };

        // After a complete value: continue the enclosing container or close it
        loop {
            pos = skip_json_whitespace(bytes, pos);
            let Some(is_array) = stack.peek() else {
                return (pos == bytes.len()).then_some(());
            };
            match *bytes.get(pos)? {
                b',' => {
                    pos = skip_json_whitespace(bytes, pos + 1);
                    if !is_array {
                        pos = member_name_end(bytes, pos)?;
                    }
                    continue 'value;
                }
                b']' if is_array => {
                    stack.pop();
                    pos += 1;
                }
                b'}' if !is_array => {
                    stack.pop();
                    pos += 1;
                }
                _ => return None,
            }
        }
    }
}

/// Whether `bytes` consist of exactly one well-formed JSON value, optionally surrounded by
/// whitespace
pub(crate) fn is_valid_json(bytes: &[u8]) -> bool {
    validate(bytes).is_some()
}
