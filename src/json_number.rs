//! Internal module for validating JSON number literals

#[derive(Clone, Copy, PartialEq, Debug)]
enum State {
    Start,
    Minus,
    IntZero,
    IntNonZero,
    DecimalPoint,
    DecimalDigit,
    ExpE,
    ExpSign,
    ExpDigit,
}

impl State {
    fn next(self, byte: u8) -> Option<State> {
        use State::*;

        Some(match (self, byte) {
            (Start, b'-') => Minus,
            (Start | Minus, b'0') => IntZero,
            (Start | Minus | IntNonZero, b'0'..=b'9') => IntNonZero,
            (IntZero | IntNonZero, b'.') => DecimalPoint,
            (DecimalPoint | DecimalDigit, b'0'..=b'9') => DecimalDigit,
            (IntZero | IntNonZero | DecimalDigit, b'e' | b'E') => ExpE,
            (ExpE, b'+' | b'-') => ExpSign,
            (ExpE | ExpSign | ExpDigit, b'0'..=b'9') => ExpDigit,
            _ => return None,
        })
    }

    fn is_complete(self) -> bool {
        matches!(
            self,
            State::IntZero | State::IntNonZero | State::DecimalDigit | State::ExpDigit
        )
    }
}

fn is_number_byte(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
}

/// Returns the length of the JSON number at the start of `bytes`, or `None` if it is invalid
///
/// The number must not be directly followed by another byte which can occur in numbers,
/// so for example `01` and `1.2.3` are invalid as a whole.
pub(crate) fn json_number_len(bytes: &[u8]) -> Option<usize> {
    let mut state = State::Start;
    for (i, &byte) in bytes.iter().enumerate() {
        match state.next(byte) {
            Some(next) => state = next,
            None => return (state.is_complete() && !is_number_byte(byte)).then_some(i),
        }
    }
    state.is_complete().then_some(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_numbers() {
        for number in [
            "0", "-0", "1", "-1", "123", "0.5", "-0.5", "1.25", "1e5", "1E5", "1e+5", "1e-5",
            "1.5e10", "0e0", "1e007", "-12.34E-56",
        ] {
            assert_eq!(Some(number.len()), json_number_len(number.as_bytes()), "{number}");

            let with_suffix = format!("{number}, ");
            assert_eq!(
                Some(number.len()),
                json_number_len(with_suffix.as_bytes()),
                "{with_suffix}"
            );
        }
    }

    #[test]
    fn invalid_numbers() {
        for number in [
            "", "-", "+1", "01", "-01", "00", ".5", "1.", "1.e5", "1e", "1e+", "1e-", "--1",
            "1.2.3", "1e5e5", "1-", "NaN", "Infinity",
        ] {
            assert_eq!(None, json_number_len(number.as_bytes()), "{number}");
        }
    }

    #[test]
    fn trailing_bytes() {
        assert_eq!(Some(1), json_number_len(b"1]"));
        assert_eq!(Some(3), json_number_len(b"1.5}"));
        assert_eq!(Some(2), json_number_len(b"10 "));
        // A letter which is not part of numbers terminates the literal
        assert_eq!(Some(1), json_number_len(b"1x"));
    }
}
