//! Types which can be decoded in place
//!
//! [`ScanValue`] is implemented for the scalar types, for strings in both materialization
//! strategies, and for the containers used by records: vectors, fixed-size arrays, tuples
//! and maps. Records implement it with the [`json_object!`](crate::json_object) macro.

use std::{collections::HashMap, fmt::Debug};

use duplicate::duplicate_item;

use crate::{
    cursor::Cursor,
    error::{ErrorKind, ScanResult},
    string::RawStr,
    walk::{read_array, read_members, read_tuple_end, read_tuple_separator},
};

/// A value which can be decoded from JSON into an existing instance
///
/// The lifetime `'a` is the lifetime of the input buffer; types which borrow from the input,
/// such as [`RawStr`], implement this trait only for their own lifetime, all other types
/// implement it for any `'a`.
pub trait ScanValue<'a> {
    /// Decodes the value at the current cursor position into `self`
    ///
    /// The cursor is positioned at the first byte of the value (whitespace has been
    /// skipped already); on success it is left directly behind the value.
    fn scan(&mut self, cursor: &mut Cursor<'a>) -> ScanResult<()>;

    /// Resets `self` to its zero value, keeping allocated capacity where possible
    fn reset(&mut self);
}

#[duplicate_item(
    ty      read_method;
    [u64]   [read_u64];
    [u32]   [read_u32];
    [i64]   [read_i64];
    [i32]   [read_i32];
    [f64]   [read_f64];
    [f32]   [read_f32];
    [bool]  [read_bool];
)]
impl<'a> ScanValue<'a> for ty {
    fn scan(&mut self, cursor: &mut Cursor<'a>) -> ScanResult<()> {
        *self = cursor.read_method()?;
        Ok(())
    }

    fn reset(&mut self) {
        *self = Default::default();
    }
}

/// Safe materialization: unescaped and UTF-8 validated, reusing the string's buffer
impl<'a> ScanValue<'a> for String {
    fn scan(&mut self, cursor: &mut Cursor<'a>) -> ScanResult<()> {
        cursor.read_string_into(self)
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// Raw materialization: refers to the input bytes
impl<'a> ScanValue<'a> for RawStr<'a> {
    fn scan(&mut self, cursor: &mut Cursor<'a>) -> ScanResult<()> {
        *self = cursor.read_raw_str()?;
        Ok(())
    }

    fn reset(&mut self) {
        *self = RawStr::default();
    }
}

/// JSON array of any length
///
/// The vector is cleared before the elements are added, so if an object contains the same
/// member multiple times the last occurrence wins.
impl<'a, T: ScanValue<'a> + Default> ScanValue<'a> for Vec<T> {
    fn scan(&mut self, cursor: &mut Cursor<'a>) -> ScanResult<()> {
        self.clear();
        read_array(cursor, |cursor| {
            let mut element = T::default();
            element.scan(cursor)?;
            self.push(element);
            Ok(())
        })
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// JSON array with exactly `N` elements, such as a `[price, quantity]` level
impl<'a, T: ScanValue<'a>, const N: usize> ScanValue<'a> for [T; N] {
    fn scan(&mut self, cursor: &mut Cursor<'a>) -> ScanResult<()> {
        cursor.expect_byte(b'[')?;
        for (index, element) in self.iter_mut().enumerate() {
            read_tuple_separator(cursor, index)?;
            element.scan(cursor)?;
        }
        read_tuple_end(cursor)
    }

    fn reset(&mut self) {
        self.iter_mut().for_each(T::reset);
    }
}

/// Heterogeneous JSON array with a fixed number of elements, for tuples of 2 to 8 elements
macro_rules! tuple_scan_value {
    ($($name:ident . $index:tt),+) => {
        impl<'a, $($name: ScanValue<'a>),+> ScanValue<'a> for ($($name,)+) {
            fn scan(&mut self, cursor: &mut Cursor<'a>) -> ScanResult<()> {
                cursor.expect_byte(b'[')?;
                $(
                    read_tuple_separator(cursor, $index)?;
                    self.$index.scan(cursor)?;
                )+
                read_tuple_end(cursor)
            }

            fn reset(&mut self) {
                $(self.$index.reset();)+
            }
        }
    };
}

tuple_scan_value!(A.0, B.1);
tuple_scan_value!(A.0, B.1, C.2);
tuple_scan_value!(A.0, B.1, C.2, D.3);
tuple_scan_value!(A.0, B.1, C.2, D.3, E.4);
tuple_scan_value!(A.0, B.1, C.2, D.3, E.4, F.5);
tuple_scan_value!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
tuple_scan_value!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);

/// JSON object with arbitrary member names
///
/// Member names must be valid UTF-8. If a name occurs multiple times the last value wins.
impl<'a, V: ScanValue<'a> + Default> ScanValue<'a> for HashMap<String, V> {
    fn scan(&mut self, cursor: &mut Cursor<'a>) -> ScanResult<()> {
        self.clear();
        read_members(cursor, |key, key_offset, cursor| {
            let key = String::from_utf8(key.into_owned())
                .map_err(|_| cursor.error_at(ErrorKind::InvalidUtf8, key_offset))?;
            let mut value = V::default();
            value.scan(cursor)?;
            self.insert(key, value);
            Ok(())
        })
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// A float encoded as JSON string, for example `"1.25"`
///
/// Some APIs quote numbers to preserve their exact representation; this wrapper parses
/// the quoted number directly without materializing the string.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default, Debug)]
pub struct QuotedF64(pub f64);

impl<'a> ScanValue<'a> for QuotedF64 {
    fn scan(&mut self, cursor: &mut Cursor<'a>) -> ScanResult<()> {
        self.0 = cursor.read_quoted_f64()?;
        Ok(())
    }

    fn reset(&mut self) {
        self.0 = 0.0;
    }
}

impl From<QuotedF64> for f64 {
    fn from(value: QuotedF64) -> Self {
        value.0
    }
}

/// A float together with the bytes of its literal in the input
///
/// Useful when the exact decimal representation has to be kept, for example to forward
/// a price unchanged, while the parsed value is used for computations.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct FloatWithSource<'a> {
    /// Parsed value
    pub value: f64,
    /// Bytes of the number literal, as they appear in the input
    pub source: &'a [u8],
}

impl Debug for FloatWithSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloatWithSource")
            .field("value", &self.value)
            .field("source", &String::from_utf8_lossy(self.source))
            .finish()
    }
}

impl<'a> ScanValue<'a> for FloatWithSource<'a> {
    fn scan(&mut self, cursor: &mut Cursor<'a>) -> ScanResult<()> {
        let start = cursor.offset();
        self.value = cursor.read_f64()?;
        self.source = &cursor.bytes()[start..cursor.offset()];
        Ok(())
    }

    fn reset(&mut self) {
        *self = FloatWithSource::default();
    }
}
