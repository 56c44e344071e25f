//! Ordered multi-field reads
//!
//! A [`SequentialReader`] takes an ordered list of [`Field`] requests and
//! reads them left to right from one [`FieldCursor`], stopping at the first
//! failure. Outputs assigned before the failure keep their values; there is
//! no rollback.
//!
//! ```rust
//! use read_table::{Field, FieldCursor};
//!
//! let mut cursor = FieldCursor::with_line("42 -12.5 hello 7");
//! let (mut id, mut lon, mut level) = (0u32, 0.0f64, 0i16);
//! cursor
//!     .read_fields([
//!         Field::u32_in(&mut id, 0, 100),
//!         Field::f64_in(&mut lon, -180.0, 180.0),
//!         Field::Skip,
//!         Field::i16_in(&mut level, -3000, 4000),
//!     ])
//!     .unwrap();
//! assert_eq!((id, lon, level), (42, -12.5, 7));
//! ```

use crate::cursor::{CoordBounds, FieldCursor};
use crate::error::FieldResult;

/// One typed read request with its output location
#[derive(Debug)]
pub enum Field<'a> {
    I16 { out: &'a mut i16, min: i16, max: i16 },
    U16 { out: &'a mut u16, min: u16, max: u16 },
    I32 { out: &'a mut i32, min: i32, max: i32 },
    U32 { out: &'a mut u32, min: u32, max: u32 },
    I64 { out: &'a mut i64, min: i64, max: i64 },
    U64 { out: &'a mut u64, min: u64, max: u64 },
    /// Double; without bounds the NaN/infinity setting of the cursor applies
    F64 {
        out: &'a mut f64,
        bounds: Option<(f64, f64)>,
    },
    /// Two doubles, counted as two columns
    Coords {
        out: &'a mut (f64, f64),
        bounds: Option<CoordBounds>,
    },
    Text(&'a mut String),
    Skip,
}

macro_rules! integer_field {
    ($ty:ty, $variant:ident, $ctor:ident) => {
        impl<'a> From<&'a mut $ty> for Field<'a> {
            /// Read over the natural range of the type
            fn from(out: &'a mut $ty) -> Self {
                Field::$variant {
                    out,
                    min: <$ty>::MIN,
                    max: <$ty>::MAX,
                }
            }
        }

        impl<'a> Field<'a> {
            pub fn $ctor(out: &'a mut $ty, min: $ty, max: $ty) -> Self {
                Field::$variant { out, min, max }
            }
        }
    };
}

integer_field!(i16, I16, i16_in);
integer_field!(u16, U16, u16_in);
integer_field!(i32, I32, i32_in);
integer_field!(u32, U32, u32_in);
integer_field!(i64, I64, i64_in);
integer_field!(u64, U64, u64_in);

impl<'a> From<&'a mut f64> for Field<'a> {
    fn from(out: &'a mut f64) -> Self {
        Field::F64 { out, bounds: None }
    }
}

impl<'a> From<&'a mut (f64, f64)> for Field<'a> {
    fn from(out: &'a mut (f64, f64)) -> Self {
        Field::Coords { out, bounds: None }
    }
}

impl<'a> From<&'a mut String> for Field<'a> {
    fn from(out: &'a mut String) -> Self {
        Field::Text(out)
    }
}

impl<'a> Field<'a> {
    pub fn f64_in(out: &'a mut f64, min: f64, max: f64) -> Self {
        Field::F64 {
            out,
            bounds: Some((min, max)),
        }
    }

    pub fn coords_in(out: &'a mut (f64, f64), bounds: CoordBounds) -> Self {
        Field::Coords {
            out,
            bounds: Some(bounds),
        }
    }

    /// Number of columns this request consumes on success
    pub fn width(&self) -> usize {
        match self {
            Field::Coords { .. } => 2,
            _ => 1,
        }
    }

    fn read_from(self, cursor: &mut FieldCursor) -> FieldResult<()> {
        match self {
            Field::I16 { out, min, max } => cursor.read_into_bounded(out, min, max),
            Field::U16 { out, min, max } => cursor.read_into_bounded(out, min, max),
            Field::I32 { out, min, max } => cursor.read_into_bounded(out, min, max),
            Field::U32 { out, min, max } => cursor.read_into_bounded(out, min, max),
            Field::I64 { out, min, max } => cursor.read_into_bounded(out, min, max),
            Field::U64 { out, min, max } => cursor.read_into_bounded(out, min, max),
            Field::F64 { out, bounds: None } => cursor.read_into(out),
            Field::F64 {
                out,
                bounds: Some((min, max)),
            } => cursor.read_into_bounded(out, min, max),
            Field::Coords { out, bounds: None } => cursor.read_into(out),
            Field::Coords {
                out,
                bounds: Some(bounds),
            } => {
                *out = cursor.read_coords_in(bounds)?;
                Ok(())
            }
            Field::Text(out) => {
                let text = cursor.read_str()?;
                out.clear();
                out.push_str(text);
                Ok(())
            }
            Field::Skip => cursor.skip(),
        }
    }
}

/// Reads an ordered list of fields from one cursor
#[derive(Debug)]
pub struct SequentialReader<'c> {
    cursor: &'c mut FieldCursor,
}

impl<'c> SequentialReader<'c> {
    pub fn new(cursor: &'c mut FieldCursor) -> Self {
        Self { cursor }
    }

    /// Read `fields` in order, stopping at the first failure
    ///
    /// An empty list succeeds without touching the cursor.
    pub fn read<'a>(&mut self, fields: impl IntoIterator<Item = Field<'a>>) -> FieldResult<()> {
        for field in fields {
            field.read_from(self.cursor)?;
        }
        Ok(())
    }

    pub fn cursor(&self) -> &FieldCursor {
        &*self.cursor
    }
}

impl FieldCursor {
    /// Shorthand for [`SequentialReader::read`] on this cursor
    pub fn read_fields<'a>(
        &mut self,
        fields: impl IntoIterator<Item = Field<'a>>,
    ) -> FieldResult<()> {
        SequentialReader::new(self).read(fields)
    }
}
