//! Structural walk over objects and arrays
//!
//! A record type is decoded by [`read_object`]: it iterates over the members of a JSON object
//! and hands each member name to the record's [`ObjectFields::scan_member`], which dispatches
//! on the name and decodes the value directly into the matching field. Members the record
//! does not know are skipped with [`Cursor::skip_value`], or rejected, depending on
//! [`ObjectFields::UNKNOWN_MEMBERS`].
//!
//! Record types normally do not implement [`ObjectFields`] manually but use the
//! [`json_object!`](crate::json_object) macro.

use std::{any::type_name, borrow::Cow};

use log::trace;

use crate::{
    cursor::Cursor,
    error::{ErrorKind, Expected, ScanResult},
};

/// How [`read_object`] handles members which the destination does not recognize
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum UnknownMembers {
    /// Skip the member value
    Skip,
    /// Fail with [`ErrorKind::UnexpectedMember`], at the offset of the member name
    Deny,
}

/// Destination of the members of a JSON object
pub trait ObjectFields<'a> {
    /// How members are handled for which [`scan_member`](Self::scan_member) returns `false`
    const UNKNOWN_MEMBERS: UnknownMembers = UnknownMembers::Skip;

    /// Decodes the value of the member named `key` into the corresponding field
    ///
    /// `key` is the unescaped member name. The cursor is positioned at the member value.
    /// Returns `false` without consuming anything if there is no field for `key`.
    fn scan_member(&mut self, key: &[u8], cursor: &mut Cursor<'a>) -> ScanResult<bool>;
}

/// Iterates over the members of a JSON object
///
/// For each member `on_member` is called with the unescaped member name, the offset of the
/// name's opening quote, and the cursor positioned at the member value. `on_member` must
/// consume the value.
pub fn read_members<'a>(
    cursor: &mut Cursor<'a>,
    mut on_member: impl FnMut(Cow<'a, [u8]>, usize, &mut Cursor<'a>) -> ScanResult<()>,
) -> ScanResult<()> {
    cursor.expect_byte(b'{')?;
    cursor.skip_whitespace();
    if cursor.peek() == Some(b'}') {
        cursor.advance(1);
        return Ok(());
    }

    loop {
        let key_offset = cursor.offset();
        let key = cursor.read_key_colon()?;
        on_member(key, key_offset, cursor)?;

        cursor.skip_whitespace();
        match cursor.peek() {
            Some(b',') => {
                cursor.advance(1);
                cursor.skip_whitespace();
            }
            Some(b'}') => {
                cursor.advance(1);
                return Ok(());
            }
            None => return Err(cursor.eof_error(Expected::Member)),
            Some(_) => return Err(cursor.error(ErrorKind::SyntaxError)),
        }
    }
}

/// Decodes a JSON object into `dst`
///
/// Fields of `dst` whose members are absent keep their current value.
pub fn read_object<'a, T: ObjectFields<'a>>(
    cursor: &mut Cursor<'a>,
    dst: &mut T,
) -> ScanResult<()> {
    read_members(cursor, |key, key_offset, cursor| {
        if dst.scan_member(&key, cursor)? {
            return Ok(());
        }
        match T::UNKNOWN_MEMBERS {
            UnknownMembers::Skip => {
                trace!(
                    "skipping unknown member {:?} of {}",
                    String::from_utf8_lossy(&key),
                    type_name::<T>()
                );
                cursor.skip_value()
            }
            UnknownMembers::Deny => Err(cursor.error_at(ErrorKind::UnexpectedMember, key_offset)),
        }
    })
}

/// Iterates over the elements of a JSON array
///
/// `on_element` is called with the cursor positioned at each element and must consume it.
pub fn read_array<'a>(
    cursor: &mut Cursor<'a>,
    mut on_element: impl FnMut(&mut Cursor<'a>) -> ScanResult<()>,
) -> ScanResult<()> {
    cursor.expect_byte(b'[')?;
    cursor.skip_whitespace();
    if cursor.peek() == Some(b']') {
        cursor.advance(1);
        return Ok(());
    }

    loop {
        if cursor.is_at_end() {
            return Err(cursor.eof_error(Expected::Element));
        }
        on_element(cursor)?;

        cursor.skip_whitespace();
        match cursor.peek() {
            Some(b',') => {
                cursor.advance(1);
                cursor.skip_whitespace();
            }
            Some(b']') => {
                cursor.advance(1);
                return Ok(());
            }
            None => return Err(cursor.eof_error(Expected::Element)),
            Some(_) => return Err(cursor.error(ErrorKind::SyntaxError)),
        }
    }
}

/// Consumes what precedes the element at `index` of a fixed-length array (after its `[`)
pub(crate) fn read_tuple_separator(cursor: &mut Cursor<'_>, index: usize) -> ScanResult<()> {
    cursor.skip_whitespace();
    if index > 0 {
        cursor.expect_byte(b',')?;
        cursor.skip_whitespace();
    }
    Ok(())
}

/// Consumes the `]` of a fixed-length array after its last element
pub(crate) fn read_tuple_end(cursor: &mut Cursor<'_>) -> ScanResult<()> {
    cursor.skip_whitespace();
    cursor.expect_byte(b']')
}

/// Implements decoding of a struct from a JSON object
///
/// Each entry maps a member name, written as byte string literal, to a field of the struct.
/// The field types must implement [`ScanValue`](crate::ScanValue). Members are dispatched
/// with a `match` on the name, so no lookup structure is involved.
///
/// Unknown members are skipped. Adding `_ => deny` as last entry rejects them with
/// [`ErrorKind::UnexpectedMember`](crate::ErrorKind::UnexpectedMember) instead.
///
/// The generated [`ScanValue::reset`](crate::ScanValue::reset) resets all listed fields, and
/// every decode of the object starts with such a reset; fields which are not listed are
/// left untouched.
///
/// The lifetime parameter (`'a` below) is the lifetime of the input buffer. Further type
/// parameters can be declared with a single bound each.
///
/// # Examples
/// ```
/// # use fieldscan::{decode, json_object, RawStr, ScanValue};
/// #[derive(Default, Debug)]
/// struct Trade<S> {
///     id: u64,
///     price: S,
///     tags: Vec<String>,
/// }
///
/// json_object! {
///     impl<'a, S: ScanValue<'a>> for Trade<S> {
///         b"id" => id,
///         b"p" => price,
///         b"tags" => tags,
///     }
/// }
///
/// let json = br#"{"id": 7, "p": "1.5", "tags": ["a"], "extra": null}"#;
///
/// let mut owned = Trade::<String>::default();
/// decode(json, &mut owned)?;
/// assert_eq!(7, owned.id);
/// assert_eq!("1.5", owned.price);
/// assert_eq!(vec!["a"], owned.tags);
///
/// let mut borrowed = Trade::<RawStr<'_>>::default();
/// decode(json, &mut borrowed)?;
/// assert_eq!(borrowed.price, "1.5");
/// # Ok::<(), fieldscan::DecodeError>(())
/// ```
#[macro_export]
macro_rules! json_object {
    (@unknown_members) => {
        $crate::UnknownMembers::Skip
    };
    (@unknown_members skip) => {
        $crate::UnknownMembers::Skip
    };
    (@unknown_members deny) => {
        $crate::UnknownMembers::Deny
    };
    (
        impl<$lt:lifetime $(, $param:ident $(: $bound:path)?)* $(,)?> for $ty:ty {
            $($key:literal => $field:ident,)*
            $(_ => $unknown:ident $(,)?)?
        }
    ) => {
        impl<$lt $(, $param $(: $bound)?)*> $crate::ObjectFields<$lt> for $ty {
            const UNKNOWN_MEMBERS: $crate::UnknownMembers =
                $crate::json_object!(@unknown_members $($unknown)?);

            fn scan_member(
                &mut self,
                key: &[u8],
                cursor: &mut $crate::Cursor<$lt>,
            ) -> $crate::ScanResult<bool> {
                match key {
                    $($key => $crate::ScanValue::scan(&mut self.$field, cursor)?,)*
                    _ => return ::std::result::Result::Ok(false),
                }
                ::std::result::Result::Ok(true)
            }
        }

        impl<$lt $(, $param $(: $bound)?)*> $crate::ScanValue<$lt> for $ty {
            fn scan(&mut self, cursor: &mut $crate::Cursor<$lt>) -> $crate::ScanResult<()> {
                $crate::ScanValue::reset(self);
                $crate::read_object(cursor, self)
            }

            fn reset(&mut self) {
                $($crate::ScanValue::reset(&mut self.$field);)*
            }
        }
    };
}
