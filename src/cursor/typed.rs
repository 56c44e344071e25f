//! Typed field reads
//!
//! One method per supported type, plus the sealed [`FieldValue`] and
//! [`BoundedValue`] traits that let generic code (and the
//! [`SequentialReader`](crate::SequentialReader)) pick the right converter at
//! compile time. The set of types is closed.

use super::FieldCursor;
use super::scan::{scan_float, scan_integer};
use crate::constants::{LATITUDE_MAX, LATITUDE_MIN, LONGITUDE_MAX, LONGITUDE_MIN};
use crate::error::{ErrorKind, FieldResult};
use serde::{Deserialize, Serialize};

/// Inclusive bounds for a (longitude, latitude)-like pair of doubles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordBounds {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl Default for CoordBounds {
    /// `[-180, 180]` for the first value, `[-90, 90]` for the second
    fn default() -> Self {
        Self {
            lon_min: LONGITUDE_MIN,
            lon_max: LONGITUDE_MAX,
            lat_min: LATITUDE_MIN,
            lat_max: LATITUDE_MAX,
        }
    }
}

/// Integer read that failed; `clamped` is the violated bound when a value was parsed
#[derive(Debug, Clone, Copy)]
struct Rejection {
    kind: ErrorKind,
    clamped: Option<i128>,
}

impl From<ErrorKind> for Rejection {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            clamped: None,
        }
    }
}

impl FieldCursor {
    fn reject(&mut self, kind: ErrorKind, clamped: Option<i128>) -> Rejection {
        self.last_error = kind;
        Rejection { kind, clamped }
    }

    /// Shared integer path: pre-check, scan, inclusive bounds, post-check
    fn integer_field(&mut self, min: i128, max: i128, unsigned: bool) -> Result<i128, Rejection> {
        self.pre_check()?;
        let start = self.pos;

        // a bare scan would happily accept "-5" for an unsigned field
        if unsigned {
            let first = self.bytes()[start];
            if first == b'-' {
                return Err(self.reject(ErrorKind::OutOfRange, None));
            }
            if !(first.is_ascii_alphanumeric() || first == b'+') {
                return Err(self.reject(ErrorKind::InvalidFormat, None));
            }
        }

        let Some(scan) = scan_integer(self.bytes(), start, self.base) else {
            return Err(self.reject(ErrorKind::InvalidFormat, None));
        };
        if scan.value < min {
            return Err(self.reject(ErrorKind::OutOfRange, Some(min)));
        }
        if scan.value > max {
            return Err(self.reject(ErrorKind::OutOfRange, Some(max)));
        }

        let next = self.post_check(scan.end)?;
        self.commit(next);
        Ok(scan.value)
    }

    fn integer_value(&mut self, min: i128, max: i128, unsigned: bool) -> FieldResult<i128> {
        self.integer_field(min, max, unsigned)
            .map_err(|rejected| rejected.kind)
    }

    /// Read an `i32` within `[min, max]`
    pub fn read_i32_in(&mut self, min: i32, max: i32) -> FieldResult<i32> {
        self.integer_value(min.into(), max.into(), false)
            .map(|v| v as i32)
    }

    pub fn read_i32(&mut self) -> FieldResult<i32> {
        self.read_i32_in(i32::MIN, i32::MAX)
    }

    /// Read an `i64` within `[min, max]`
    pub fn read_i64_in(&mut self, min: i64, max: i64) -> FieldResult<i64> {
        self.integer_value(min.into(), max.into(), false)
            .map(|v| v as i64)
    }

    pub fn read_i64(&mut self) -> FieldResult<i64> {
        self.read_i64_in(i64::MIN, i64::MAX)
    }

    /// Read an `i16` within `[min, max]` (goes through the 32-bit path)
    pub fn read_i16_in(&mut self, min: i16, max: i16) -> FieldResult<i16> {
        self.read_i32_in(min.into(), max.into()).map(|v| v as i16)
    }

    pub fn read_i16(&mut self) -> FieldResult<i16> {
        self.read_i16_in(i16::MIN, i16::MAX)
    }

    /// Read a `u32` within `[min, max]`; a leading `-` is `OutOfRange`
    pub fn read_u32_in(&mut self, min: u32, max: u32) -> FieldResult<u32> {
        self.integer_value(min.into(), max.into(), true)
            .map(|v| v as u32)
    }

    pub fn read_u32(&mut self) -> FieldResult<u32> {
        self.read_u32_in(u32::MIN, u32::MAX)
    }

    /// Read a `u64` within `[min, max]`; a leading `-` is `OutOfRange`
    pub fn read_u64_in(&mut self, min: u64, max: u64) -> FieldResult<u64> {
        self.integer_value(min.into(), max.into(), true)
            .map(|v| v as u64)
    }

    pub fn read_u64(&mut self) -> FieldResult<u64> {
        self.read_u64_in(u64::MIN, u64::MAX)
    }

    /// Read a `u16` within `[min, max]` (goes through the 32-bit path)
    pub fn read_u16_in(&mut self, min: u16, max: u16) -> FieldResult<u16> {
        self.read_u32_in(min.into(), max.into()).map(|v| v as u16)
    }

    pub fn read_u16(&mut self) -> FieldResult<u16> {
        self.read_u16_in(u16::MIN, u16::MAX)
    }

    /// Scan and post-check a double without committing it
    fn float_field(&mut self) -> FieldResult<(f64, usize)> {
        self.pre_check()?;

        let Some(scan) = scan_float(self.bytes(), self.pos) else {
            return self.fail(ErrorKind::InvalidFormat);
        };
        if scan.range_error {
            return self.fail(ErrorKind::OutOfRange);
        }

        let next = self.post_check(scan.end)?;
        Ok((scan.value, next))
    }

    /// Read a double; NaN and infinity are rejected unless
    /// [`allow_nan_or_inf`](Self::allow_nan_or_inf) is set
    pub fn read_f64(&mut self) -> FieldResult<f64> {
        let (value, next) = self.float_field()?;
        if !self.allow_nan_or_inf && !value.is_finite() {
            return self.fail(ErrorKind::NotANumberOrInfinite);
        }
        self.commit(next);
        Ok(value)
    }

    /// Read a double within `[min, max]`; NaN is always rejected
    pub fn read_f64_in(&mut self, min: f64, max: f64) -> FieldResult<f64> {
        let (value, next) = self.float_field()?;
        if value.is_nan() {
            return self.fail(ErrorKind::NotANumberOrInfinite);
        }
        // NaN bounds compare false and therefore accept everything
        if value < min || value > max {
            return self.fail(ErrorKind::OutOfRange);
        }
        self.commit(next);
        Ok(value)
    }

    /// Read two doubles as a pair
    pub fn read_coords(&mut self) -> FieldResult<(f64, f64)> {
        let x = self.read_f64()?;
        let y = self.read_f64()?;
        Ok((x, y))
    }

    /// Read two doubles as a pair, each within its own bounds
    pub fn read_coords_in(&mut self, bounds: CoordBounds) -> FieldResult<(f64, f64)> {
        let x = self.read_f64_in(bounds.lon_min, bounds.lon_max)?;
        let y = self.read_f64_in(bounds.lat_min, bounds.lat_max)?;
        Ok((x, y))
    }

    // ---------------------------------------------------------------------
    // Generic access
    // ---------------------------------------------------------------------

    /// Read the next field as `T` using `T`'s natural range
    pub fn read<T: FieldValue>(&mut self) -> FieldResult<T> {
        T::read_from(self)
    }

    /// Read the next field as `T` within `[min, max]`
    pub fn read_in<T: BoundedValue>(&mut self, min: T, max: T) -> FieldResult<T> {
        T::read_bounded(self, min, max)
    }

    /// Read the next field into `out`; `out` is untouched on failure
    pub fn read_into<T: FieldValue>(&mut self, out: &mut T) -> FieldResult<()> {
        *out = T::read_from(self)?;
        Ok(())
    }

    /// Read the next field into `out` within `[min, max]`
    ///
    /// When an integer parses but violates a bound, `out` receives that
    /// bound while the read still fails with [`ErrorKind::OutOfRange`].
    pub fn read_into_bounded<T: BoundedValue>(
        &mut self,
        out: &mut T,
        min: T,
        max: T,
    ) -> FieldResult<()> {
        T::store_bounded(self, out, min, max)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A type the cursor knows how to convert a field into
pub trait FieldValue: Sized + sealed::Sealed {
    fn read_from(cursor: &mut FieldCursor) -> FieldResult<Self>;
}

/// A [`FieldValue`] that also supports inclusive bounds
pub trait BoundedValue: FieldValue + Copy {
    fn read_bounded(cursor: &mut FieldCursor, min: Self, max: Self) -> FieldResult<Self>;

    /// Bounded read into an existing location
    fn store_bounded(
        cursor: &mut FieldCursor,
        out: &mut Self,
        min: Self,
        max: Self,
    ) -> FieldResult<()> {
        *out = Self::read_bounded(cursor, min, max)?;
        Ok(())
    }
}

macro_rules! integer_value {
    ($ty:ty, $read:ident, $read_in:ident, $unsigned:expr) => {
        impl sealed::Sealed for $ty {}

        impl FieldValue for $ty {
            fn read_from(cursor: &mut FieldCursor) -> FieldResult<Self> {
                cursor.$read()
            }
        }

        impl BoundedValue for $ty {
            fn read_bounded(cursor: &mut FieldCursor, min: Self, max: Self) -> FieldResult<Self> {
                cursor.$read_in(min, max)
            }

            fn store_bounded(
                cursor: &mut FieldCursor,
                out: &mut Self,
                min: Self,
                max: Self,
            ) -> FieldResult<()> {
                match cursor.integer_field(min.into(), max.into(), $unsigned) {
                    Ok(value) => {
                        *out = value as $ty;
                        Ok(())
                    }
                    Err(Rejection { kind, clamped }) => {
                        if let Some(bound) = clamped {
                            *out = bound as $ty;
                        }
                        Err(kind)
                    }
                }
            }
        }
    };
}

integer_value!(i16, read_i16, read_i16_in, false);
integer_value!(u16, read_u16, read_u16_in, true);
integer_value!(i32, read_i32, read_i32_in, false);
integer_value!(u32, read_u32, read_u32_in, true);
integer_value!(i64, read_i64, read_i64_in, false);
integer_value!(u64, read_u64, read_u64_in, true);

impl sealed::Sealed for f64 {}

impl FieldValue for f64 {
    fn read_from(cursor: &mut FieldCursor) -> FieldResult<Self> {
        cursor.read_f64()
    }
}

impl BoundedValue for f64 {
    fn read_bounded(cursor: &mut FieldCursor, min: Self, max: Self) -> FieldResult<Self> {
        cursor.read_f64_in(min, max)
    }
}

impl sealed::Sealed for (f64, f64) {}

impl FieldValue for (f64, f64) {
    fn read_from(cursor: &mut FieldCursor) -> FieldResult<Self> {
        cursor.read_coords()
    }
}

impl BoundedValue for (f64, f64) {
    /// `min` and `max` hold the lower and upper bound of each component
    fn read_bounded(cursor: &mut FieldCursor, min: Self, max: Self) -> FieldResult<Self> {
        cursor.read_coords_in(CoordBounds {
            lon_min: min.0,
            lon_max: max.0,
            lat_min: min.1,
            lat_max: max.1,
        })
    }
}

impl sealed::Sealed for String {}

impl FieldValue for String {
    fn read_from(cursor: &mut FieldCursor) -> FieldResult<Self> {
        cursor.read_string()
    }
}
