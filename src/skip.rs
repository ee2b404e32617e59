//! Skipping of JSON values of unknown shape

use crate::{
    cursor::{is_whitespace, Cursor},
    decode::MAX_NESTING_DEPTH_LIMIT,
    error::{ErrorKind, Expected, ScanResult},
    validate::is_valid_json,
};

/// Stack of open containers, one bit per level (`1` = array, `0` = object)
#[derive(Debug)]
pub(crate) struct NestingStack {
    bits: u128,
    depth: u32,
}

impl NestingStack {
    pub(crate) fn new() -> Self {
        NestingStack { bits: 0, depth: 0 }
    }

    pub(crate) fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns `false` if the stack is full
    #[must_use]
    pub(crate) fn push(&mut self, is_array: bool) -> bool {
        if self.depth >= MAX_NESTING_DEPTH_LIMIT {
            return false;
        }
        self.bits = self.bits << 1 | u128::from(is_array);
        self.depth += 1;
        true
    }

    /// Removes the innermost container and returns whether it is an array
    pub(crate) fn pop(&mut self) -> Option<bool> {
        let is_array = self.peek()?;
        self.bits >>= 1;
        self.depth -= 1;
        Some(is_array)
    }

    /// Whether the innermost container is an array; `None` if the stack is empty
    pub(crate) fn peek(&self) -> Option<bool> {
        if self.depth == 0 {
            None
        } else {
            Some(self.bits & 1 == 1)
        }
    }
}

impl Cursor<'_> {
    /// Consumes one JSON value of any type without interpreting it
    ///
    /// Leading whitespace is skipped. The value ends at the first `,`, `}` or `]` outside
    /// of nested containers and strings, or at the end of the input; trailing whitespace
    /// is not consumed. Containers may be nested at most
    /// [`max_nesting_depth`](crate::DecodeSettings::max_nesting_depth) levels deep.
    ///
    /// Unless disabled with [`DecodeSettings::validate_skipped_values`](crate::DecodeSettings::validate_skipped_values),
    /// the consumed bytes are afterwards checked to be a well-formed JSON value, so
    /// input such as `[bare words]` is rejected even though its brackets are balanced.
    ///
    /// # Examples
    /// ```
    /// # use fieldscan::Cursor;
    /// let mut cursor = Cursor::new(br#"{"a": [1, {"b": null}]} , 2"#);
    /// cursor.skip_value()?;
    /// assert_eq!(b" , 2", cursor.remaining());
    /// # Ok::<(), fieldscan::ScanError>(())
    /// ```
    pub fn skip_value(&mut self) -> ScanResult<()> {
        self.skip_whitespace();
        let bytes = self.bytes();
        let start = self.offset();
        if start == bytes.len() {
            return Err(self.eof_error(Expected::Value));
        }

        let max_depth = self.settings().max_nesting_depth;
        let mut stack = NestingStack::new();
        let mut i = start;
        let end = loop {
            let Some(&b) = bytes.get(i) else {
                if stack.depth() > 0 {
                    self.set_offset(i);
                    return Err(self.eof_error(Expected::Value));
                }
                break i;
            };
            match b {
                b'{' | b'[' => {
                    if stack.depth() >= max_depth || !stack.push(b == b'[') {
                        return Err(self.error_at(ErrorKind::NestingTooDeep, i));
                    }
                }
                b'}' | b']' => match stack.pop() {
                    None => break i,
                    Some(is_array) => {
                        if is_array != (b == b']') {
                            return Err(self.error_at(ErrorKind::SyntaxError, i));
                        }
                    }
                },
                b',' if stack.depth() == 0 => break i,
                b'"' => {
                    self.set_offset(i);
                    self.read_raw_string()?;
                    i = self.offset();
                    continue;
                }
                _ => {}
            }
            i += 1;
        };

        let mut value_end = end;
        while value_end > start && is_whitespace(bytes[value_end - 1]) {
            value_end -= 1;
        }
        if value_end == start {
            return Err(self.error_at(ErrorKind::SyntaxError, start));
        }
        if self.settings().validate_skipped_values && !is_valid_json(&bytes[start..value_end]) {
            return Err(self.error_at(ErrorKind::SyntaxError, start));
        }
        self.set_offset(value_end);
        Ok(())
    }
}
