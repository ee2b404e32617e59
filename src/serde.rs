//! Optional [Serde](https://serde.rs) integration
//!
//! Decoded records are often forwarded to other systems; this module implements
//! [`Serialize`] for the value types of this crate, so records containing them can derive
//! `Serialize`.

use serde::{ser::Error, Serialize, Serializer};

use crate::{scan::QuotedF64, string::RawStr};

/// Serializes the unescaped string content
///
/// Fails if the raw content has an invalid escape sequence or is not valid UTF-8.
impl Serialize for RawStr<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.has_escapes() {
            if let Ok(s) = self.to_str() {
                return serializer.serialize_str(s);
            }
        }
        let s = self.unescape().map_err(S::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

/// Serializes the number as unquoted float
impl Serialize for QuotedF64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn serialize_raw_str() -> TestResult {
        assert_eq!(r#""abc""#, serde_json::to_string(&RawStr::new(b"abc"))?);
        assert_eq!(
            r#""a\nb\"""#,
            serde_json::to_string(&RawStr::new(br#"a\nb\""#))?
        );
        assert!(serde_json::to_string(&RawStr::new(br"\x")).is_err());
        assert!(serde_json::to_string(&RawStr::new(b"\xFF")).is_err());
        Ok(())
    }

    #[test]
    fn serialize_quoted_f64() -> TestResult {
        assert_eq!("1.25", serde_json::to_string(&QuotedF64(1.25))?);
        Ok(())
    }
}
