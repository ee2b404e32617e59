//! Number and boolean primitives

use lexical_parse_float::FromLexical;

use crate::{
    cursor::Cursor,
    error::{ErrorKind, Expected, FloatErrorDetail, FloatType, ScanResult},
};

/// Reason why [`Cursor::read_digits`] did not produce a value
enum DigitsError {
    /// The input ended before the first digit
    Eof,
    /// The first byte is not a digit
    NotADigit,
    /// The value is larger than the maximum; the cursor points at the overflowing digit
    TooLarge,
}

/// Float types which can be parsed from a prefix of the input
trait PrefixFloat: FromLexical + Copy {
    const TYPE: FloatType;

    fn is_infinite(self) -> bool;
}

impl PrefixFloat for f64 {
    const TYPE: FloatType = FloatType::F64;

    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
}

impl PrefixFloat for f32 {
    const TYPE: FloatType = FloatType::F32;

    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
}

impl<'a> Cursor<'a> {
    /// Parses a non-negative integer which is `<= max_value`
    ///
    /// `cutoff` must be `max_value / 10 + 1`, the smallest number whose tenfold is larger
    /// than `max_value`; callers pass it as constant to avoid the division per call.
    /// Stops at the first non-digit without consuming it.
    fn read_digits(&mut self, max_value: u64, cutoff: u64) -> Result<u64, DigitsError> {
        let first = match self.peek() {
            None => return Err(DigitsError::Eof),
            Some(b) if b.is_ascii_digit() => b,
            Some(_) => return Err(DigitsError::NotADigit),
        };
        let mut value = u64::from(first - b'0');
        self.advance(1);

        while let Some(b) = self.peek() {
            if !b.is_ascii_digit() {
                break;
            }
            if value >= cutoff {
                return Err(DigitsError::TooLarge);
            }
            // value < cutoff, so the multiplication cannot overflow
            value = match (value * 10).checked_add(u64::from(b - b'0')) {
                Some(v) if v <= max_value => v,
                _ => return Err(DigitsError::TooLarge),
            };
            self.advance(1);
        }
        Ok(value)
    }

    fn read_unsigned(&mut self, max_value: u64, cutoff: u64) -> ScanResult<u64> {
        if self.peek() == Some(b'+') {
            self.advance(1);
        }
        self.read_digits(max_value, cutoff).map_err(|e| {
            self.error(match e {
                DigitsError::Eof => ErrorKind::UnexpectedEndOfInput(Expected::UnsignedInteger),
                DigitsError::NotADigit => ErrorKind::ExpectedUnsignedInteger,
                DigitsError::TooLarge => ErrorKind::UnsignedIntegerTooLarge,
            })
        })
    }

    /// Parses a signed integer with magnitude `<= max_magnitude` for negative values and
    /// `< max_magnitude` for positive values, returning it as `i64`
    fn read_signed(&mut self, max_magnitude: u64, cutoff: u64) -> ScanResult<i64> {
        let negative = match self.peek() {
            Some(b'+') => {
                self.advance(1);
                false
            }
            Some(b'-') => {
                self.advance(1);
                true
            }
            _ => false,
        };

        match self.read_digits(max_magnitude, cutoff) {
            Ok(magnitude) => {
                if negative {
                    // Wrapping for the single case `magnitude == 2^63`, which is exactly i64::MIN
                    Ok((magnitude as i64).wrapping_neg())
                } else if magnitude < max_magnitude {
                    Ok(magnitude as i64)
                } else {
                    // Point at the last digit, which made the value too large
                    Err(self.error_at(ErrorKind::IntegerTooLarge, self.offset() - 1))
                }
            }
            Err(DigitsError::Eof) => Err(self.eof_error(Expected::Integer)),
            Err(DigitsError::NotADigit) => Err(self.error(ErrorKind::ExpectedInteger)),
            Err(DigitsError::TooLarge) => Err(self.error(if negative {
                ErrorKind::IntegerTooSmall
            } else {
                ErrorKind::IntegerTooLarge
            })),
        }
    }

    /// Reads an unsigned 64-bit integer
    ///
    /// Accepts an optional leading `+` followed by one or more ASCII digits, and stops at the
    /// first byte which is not a digit.
    pub fn read_u64(&mut self) -> ScanResult<u64> {
        self.read_unsigned(u64::MAX, u64::MAX / 10 + 1)
    }

    /// Reads an unsigned 32-bit integer, see [`read_u64`](Self::read_u64)
    pub fn read_u32(&mut self) -> ScanResult<u32> {
        let value = self.read_unsigned(u64::from(u32::MAX), u64::from(u32::MAX) / 10 + 1)?;
        Ok(value as u32)
    }

    /// Reads a signed 64-bit integer
    ///
    /// Accepts an optional leading `+` or `-` followed by one or more ASCII digits. The full
    /// range from `i64::MIN` to `i64::MAX` is supported.
    pub fn read_i64(&mut self) -> ScanResult<i64> {
        const MAGNITUDE: u64 = 1 << 63;
        self.read_signed(MAGNITUDE, MAGNITUDE / 10 + 1)
    }

    /// Reads a signed 32-bit integer, see [`read_i64`](Self::read_i64)
    pub fn read_i32(&mut self) -> ScanResult<i32> {
        const MAGNITUDE: u64 = 1 << 31;
        let value = self.read_signed(MAGNITUDE, MAGNITUDE / 10 + 1)?;
        Ok(value as i32)
    }

    fn read_float<F: PrefixFloat>(&mut self) -> ScanResult<F> {
        let remaining = self.remaining();
        if remaining.is_empty() {
            return Err(self.eof_error(Expected::Float));
        }
        let invalid = |detail| ErrorKind::FloatParseError {
            target: F::TYPE,
            detail,
        };

        match F::from_lexical_partial(remaining) {
            Ok((value, consumed)) if consumed > 0 => {
                // Overflowing finite literals are parsed as infinity; only spelled out
                // infinity is accepted as infinite value
                if value.is_infinite()
                    && !remaining[..consumed]
                        .iter()
                        .any(|b| b.eq_ignore_ascii_case(&b'i'))
                {
                    return Err(self.error(invalid(FloatErrorDetail::OutOfRange)));
                }
                self.advance(consumed);
                Ok(value)
            }
            _ => Err(self.error(invalid(FloatErrorDetail::InvalidSyntax))),
        }
    }

    /// Reads a 64-bit float from the longest prefix which forms a number literal
    ///
    /// The number does not have to be followed by a delimiter; trailing bytes are left
    /// unconsumed. The result is correctly rounded.
    pub fn read_f64(&mut self) -> ScanResult<f64> {
        self.read_float()
    }

    /// Reads a 32-bit float, see [`read_f64`](Self::read_f64)
    pub fn read_f32(&mut self) -> ScanResult<f32> {
        self.read_float()
    }

    /// Reads a 64-bit float enclosed in double quotes, for example `"1.25"`
    ///
    /// No whitespace is allowed between the quotes and the number.
    pub fn read_quoted_f64(&mut self) -> ScanResult<f64> {
        match self.peek() {
            None => return Err(self.eof_error(Expected::String)),
            Some(b'"') => self.advance(1),
            Some(_) => return Err(self.error(ErrorKind::ExpectedOpeningQuote)),
        }
        let value = self.read_f64()?;
        self.expect_byte(b'"')?;
        Ok(value)
    }

    /// Reads `true` or `false`
    ///
    /// This is a prefix match; the literal does not have to be followed by a delimiter.
    pub fn read_bool(&mut self) -> ScanResult<bool> {
        let remaining = self.remaining();
        if remaining.is_empty() {
            Err(self.eof_error(Expected::Bool))
        } else if remaining.starts_with(b"false") {
            self.advance(5);
            Ok(false)
        } else if remaining.starts_with(b"true") {
            self.advance(4);
            Ok(true)
        } else {
            Err(self.error(ErrorKind::ExpectedBool))
        }
    }
}
