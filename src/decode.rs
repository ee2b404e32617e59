//! Decode entry points and their settings
//!
//! [`decode`] is the single place where a [`ScanError`](crate::ScanError) raised by any
//! primitive is turned into the returned [`DecodeError`]; everything below it propagates
//! errors with `?`.

use std::any::type_name;

use log::debug;

use crate::{cursor::Cursor, error::DecodeError, scan::ScanValue};

/// Largest supported value for [`DecodeSettings::max_nesting_depth`]
pub const MAX_NESTING_DEPTH_LIMIT: u32 = 128;

/// Default value of [`DecodeSettings::max_nesting_depth`]
pub const DEFAULT_MAX_NESTING_DEPTH: u32 = 100;

/// Settings to customize decoding behavior
///
/// These settings are used by [`decode_with_settings`] and [`Cursor::new_custom`]. To avoid
/// repeating the default values for unchanged settings `..Default::default()` can be used:
/// ```
/// # use fieldscan::DecodeSettings;
/// DecodeSettings {
///     max_nesting_depth: 20,
///     // For all other settings use the default
///     ..Default::default()
/// }
/// # ;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeSettings {
    /// Maximum nesting depth of values skipped with [`Cursor::skip_value`]
    ///
    /// Unknown object members can contain arbitrarily nested arrays and objects. Their depth
    /// is tracked on a fixed-size stack, so this value must not be larger than
    /// [`MAX_NESTING_DEPTH_LIMIT`]. A value nested exactly `max_nesting_depth` levels deep
    /// is accepted, one level deeper fails with
    /// [`ErrorKind::NestingTooDeep`](crate::ErrorKind::NestingTooDeep).
    ///
    /// This does not limit the nesting of the decoded types themselves; their depth is
    /// fixed by their definition.
    pub max_nesting_depth: u32,

    /// Whether skipped values are checked to be well-formed JSON
    ///
    /// Skipping finds the end of a value by only tracking brackets and strings. When this
    /// setting is enabled the skipped bytes are validated afterwards, so that for example
    /// `[bare words]` is rejected with [`ErrorKind::SyntaxError`](crate::ErrorKind::SyntaxError).
    /// Disabling it makes skipping faster but lets malformed unknown members pass unnoticed.
    pub validate_skipped_values: bool,
}

impl Default for DecodeSettings {
    /// Creates the default decode settings
    ///
    /// - max nesting depth: [`DEFAULT_MAX_NESTING_DEPTH`]
    /// - validate skipped values: true
    fn default() -> Self {
        DecodeSettings {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            validate_skipped_values: true,
        }
    }
}

/// Decodes `bytes` into `dst`, using default settings
///
/// See [`decode_with_settings`].
///
/// # Examples
/// ```
/// # use fieldscan::{decode, json_object};
/// #[derive(Default, Debug, PartialEq)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// json_object! {
///     impl<'a> for Point {
///         b"x" => x,
///         b"y" => y,
///     }
/// }
///
/// let mut point = Point::default();
/// decode(br#"{"y": 2, "z": [true], "x": 1}"#, &mut point)?;
/// assert_eq!(Point { x: 1, y: 2 }, point);
/// # Ok::<(), fieldscan::DecodeError>(())
/// ```
pub fn decode<'a, T: ScanValue<'a> + ?Sized>(bytes: &'a [u8], dst: &mut T) -> Result<(), DecodeError> {
    decode_with_settings(bytes, dst, DecodeSettings::default())
}

/// Decodes `bytes` into `dst`
///
/// `dst` is reset first, so no data of a previous decode call into the same destination
/// remains; allocated capacity of strings and vectors is kept, which allows decoding a
/// sequence of records without allocating once the capacities have grown large enough.
/// Leading whitespace is skipped. Data after the decoded value is ignored.
///
/// On failure `dst` is reset again and the error describes the position in `bytes` where
/// decoding stopped.
///
/// # Panics
/// Panics if `settings.max_nesting_depth` is larger than [`MAX_NESTING_DEPTH_LIMIT`].
pub fn decode_with_settings<'a, T: ScanValue<'a> + ?Sized>(
    bytes: &'a [u8],
    dst: &mut T,
    settings: DecodeSettings,
) -> Result<(), DecodeError> {
    dst.reset();
    let mut cursor = Cursor::new_custom(bytes, settings);
    cursor.skip_whitespace();

    dst.scan(&mut cursor).map_err(|e| {
        dst.reset();
        debug!(
            "failed decoding {}: {} at offset {}",
            type_name::<T>(),
            e.kind,
            e.offset
        );
        DecodeError::new(bytes, e)
    })
}

/// Decodes `bytes` into a new value of type `T`, using default settings
///
/// # Examples
/// ```
/// # use fieldscan::from_slice;
/// let levels: Vec<[f64; 2]> = from_slice(b"[[1.5, 2], [3, 0.25]]")?;
/// assert_eq!(vec![[1.5, 2.0], [3.0, 0.25]], levels);
/// # Ok::<(), fieldscan::DecodeError>(())
/// ```
pub fn from_slice<'a, T: ScanValue<'a> + Default>(bytes: &'a [u8]) -> Result<T, DecodeError> {
    let mut value = T::default();
    decode(bytes, &mut value)?;
    Ok(value)
}
