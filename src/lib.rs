#![warn(missing_docs)]
#![forbid(unsafe_code)]
// Allow needless `return` because that makes it sometimes more obvious that
// an expression is the result of the function
#![allow(clippy::needless_return)]
// Allow `assert_eq!(true, ...)` because in some cases it is used to check a bool
// value and not a 'flag' / 'state', and `assert_eq!` makes that more explicit
#![allow(clippy::bool_assert_comparison)]
// Enable 'unused' warnings for doc tests (are disabled by default)
#![doc(test(no_crate_inject))]
#![doc(test(attr(warn(unused))))]
// Fail on warnings in doc tests
#![doc(test(attr(deny(warnings))))]
// When `docsrs` configuration flag is set enable banner for features in documentation
// See https://stackoverflow.com/q/61417452
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Fieldscan decodes JSON records of known structure directly into Rust structs.
//!
//! Instead of building a generic value tree, or going through a visitor based framework,
//! each record type walks the JSON object itself: the member name is matched against the
//! record's fields and the value is parsed by a scanning primitive straight into the field.
//! Members the record does not know are skipped without being interpreted. Records can be
//! decoded repeatedly into the same instance, reusing the capacity of its strings and vectors,
//! so decoding a stream of messages does not allocate in the steady state.
//!
//! # Terminology
//!
//! - *cursor*: the input buffer together with the current read offset, see [`Cursor`]
//! - *primitive*: a method of [`Cursor`] which consumes one token, for example
//!   [`Cursor::read_i64`] or [`Cursor::skip_value`]
//! - *member*: entry of a JSON object, for example `"a": 1` with the *name* `"a"`
//! - *safe* and *raw* strings: strings can either be unescaped and validated into an
//!   owned [`String`], or referenced without copying as [`RawStr`]
//!
//! # Usage examples
//!
//! ## Records
//!
//! ```
//! # use fieldscan::{decode, json_object, RawStr};
//! #[derive(Default, Debug)]
//! struct Ticker<'a> {
//!     symbol: RawStr<'a>,
//!     last_price: f64,
//!     levels: Vec<[f64; 2]>,
//! }
//!
//! json_object! {
//!     impl<'a> for Ticker<'a> {
//!         b"s" => symbol,
//!         b"c" => last_price,
//!         b"l" => levels,
//!     }
//! }
//!
//! let mut ticker = Ticker::default();
//! for line in [
//!     r#"{"s": "BTCUSD", "c": 64000.5, "l": [[63999, 0.5]]}"#,
//!     r#"{"s": "ETHUSD", "c": 3100.25, "l": [], "v": {"unknown": true}}"#,
//! ] {
//!     decode(line.as_bytes(), &mut ticker)?;
//!     println!("{}: {} ({} levels)", ticker.symbol, ticker.last_price, ticker.levels.len());
//! }
//! assert_eq!(ticker.symbol, "ETHUSD");
//! # Ok::<(), fieldscan::DecodeError>(())
//! ```
//!
//! ## Primitives
//!
//! ```
//! # use fieldscan::Cursor;
//! let mut cursor = Cursor::new(br#"{"id": 12}"#);
//! cursor.expect_byte(b'{')?;
//! assert_eq!(b"id", &*cursor.read_key_colon()?);
//! assert_eq!(12, cursor.read_u64()?);
//! cursor.expect_byte(b'}')?;
//! # Ok::<(), fieldscan::ScanError>(())
//! ```
//!
//! # Error handling
//! Primitives return a [`ScanError`] holding the [`ErrorKind`] and the byte offset. The
//! decode functions convert it into a [`DecodeError`], which additionally contains an
//! excerpt of the input around the offset. After a failed decode call the destination is
//! reset; no data of the malformed record remains in it.
//!
//! # Serde integration
//! With the optional `serde` feature the value types of this crate implement
//! `serde::Serialize`, so decoded records can be serialized with Serde.

mod cursor;
mod decode;
mod error;
mod json_number;
mod scalar;
mod scan;
mod skip;
mod string;
mod unescape;
mod validate;
mod walk;

pub mod records;

#[cfg(feature = "serde")]
mod serde;

pub use cursor::Cursor;
pub use decode::{
    decode, decode_with_settings, from_slice, DecodeSettings, DEFAULT_MAX_NESTING_DEPTH,
    MAX_NESTING_DEPTH_LIMIT,
};
pub use error::{
    DecodeError, ErrorKind, Expected, FloatErrorDetail, FloatType, ScanError, ScanResult,
};
pub use scan::{FloatWithSource, QuotedF64, ScanValue};
pub use string::RawStr;
pub use walk::{read_array, read_members, read_object, ObjectFields, UnknownMembers};
