//! Runtime column schemas.
//!
//! A [`Schema`] is the run-time counterpart of a [`Field`](crate::Field)
//! list: a comma-separated description of the columns of a table, parsed
//! once and applied to every line.
//!
//! ```text
//! u32[1,100],coords!,str,skip,f64[0,1e3],i16
//! ```
//!
//! Type names are `i16 u16 i32 u32 i64 u64 f64 coords str skip`. Numeric
//! types take optional inclusive `[min,max]` bounds; `coords` takes
//! `[lon_min,lon_max,lat_min,lat_max]`, and `coords!` selects the default
//! longitude/latitude bounds. Any other name is kept as an unsupported column
//! and fails with [`ErrorKind::UnsupportedConversion`] when a row reaches it.

use crate::constants::presets;
use crate::cursor::{CoordBounds, FieldCursor};
use crate::error::{ErrorKind, FieldResult};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Type and bounds of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnSpec {
    I16 { min: i16, max: i16 },
    U16 { min: u16, max: u16 },
    I32 { min: i32, max: i32 },
    U32 { min: u32, max: u32 },
    I64 { min: i64, max: i64 },
    U64 { min: u64, max: u64 },
    F64 { bounds: Option<(f64, f64)> },
    Coords { bounds: Option<CoordBounds> },
    Str,
    Skip,
    /// Type name with no converter
    Unsupported(String),
}

impl ColumnSpec {
    /// Number of fields the column occupies on a line
    pub fn width(&self) -> usize {
        match self {
            ColumnSpec::Coords { .. } => 2,
            _ => 1,
        }
    }

    /// Whether reading the column yields a value
    pub fn produces_value(&self) -> bool {
        !matches!(self, ColumnSpec::Skip)
    }
}

/// One converted field of a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F64(f64),
    Coords(f64, f64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I16(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Coords(x, y) => write!(f, "{}\t{}", x, y),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// Ordered column list applied to every line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    /// Parse a schema description such as `"u32[1,100],f64,skip"`
    pub fn parse(text: &str) -> Result<Self> {
        let parts = split_columns(text)?;
        let columns = parts
            .iter()
            .enumerate()
            .map(|(column, part)| parse_column(column, part))
            .collect::<Result<Vec<_>>>()?;

        debug!("Parsed schema with {} columns: {}", columns.len(), text);
        Ok(Self { columns })
    }

    /// Schema of a numbered CLI preset (1-based)
    pub fn preset(number: usize) -> Result<Self> {
        let text = number
            .checked_sub(1)
            .and_then(|i| presets::ALL.get(i))
            .ok_or_else(|| {
                Error::configuration(format!(
                    "Unknown preset {}, expected 1 to {}",
                    number,
                    presets::ALL.len()
                ))
            })?;
        Self::parse(text)
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of fields a matching line has (coordinate pairs count twice)
    pub fn field_count(&self) -> usize {
        self.columns.iter().map(ColumnSpec::width).sum()
    }

    /// Names of columns that cannot be converted
    pub fn unsupported_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter_map(|spec| match spec {
                ColumnSpec::Unsupported(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Read one row from `cursor`, stopping at the first failing column
    ///
    /// Skipped columns produce no value.
    pub fn read_row(&self, cursor: &mut FieldCursor) -> FieldResult<Vec<Value>> {
        let width = self.columns.iter().filter(|c| c.produces_value()).count();
        let mut row = Vec::with_capacity(width);

        for spec in &self.columns {
            let value = match spec {
                ColumnSpec::I16 { min, max } => Value::I16(cursor.read_i16_in(*min, *max)?),
                ColumnSpec::U16 { min, max } => Value::U16(cursor.read_u16_in(*min, *max)?),
                ColumnSpec::I32 { min, max } => Value::I32(cursor.read_i32_in(*min, *max)?),
                ColumnSpec::U32 { min, max } => Value::U32(cursor.read_u32_in(*min, *max)?),
                ColumnSpec::I64 { min, max } => Value::I64(cursor.read_i64_in(*min, *max)?),
                ColumnSpec::U64 { min, max } => Value::U64(cursor.read_u64_in(*min, *max)?),
                ColumnSpec::F64 { bounds: None } => Value::F64(cursor.read_f64()?),
                ColumnSpec::F64 {
                    bounds: Some((min, max)),
                } => Value::F64(cursor.read_f64_in(*min, *max)?),
                ColumnSpec::Coords { bounds } => {
                    let (x, y) = match bounds {
                        Some(bounds) => cursor.read_coords_in(*bounds)?,
                        None => cursor.read_coords()?,
                    };
                    Value::Coords(x, y)
                }
                ColumnSpec::Str => Value::Str(cursor.read_string()?),
                ColumnSpec::Skip => {
                    cursor.skip()?;
                    continue;
                }
                ColumnSpec::Unsupported(_) => return cursor.unsupported(),
            };
            row.push(value);
        }

        Ok(row)
    }
}

impl FromStr for Schema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Split on commas that are not inside brackets
fn split_columns(text: &str) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::schema(parts.len(), "unbalanced ']' in schema")
                })?;
            }
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Error::schema(parts.len(), "unclosed '[' in schema"));
    }
    parts.push(text[start..].trim());

    if let Some(column) = parts.iter().position(|p| p.is_empty()) {
        return Err(Error::schema(column, "empty column type"));
    }
    Ok(parts)
}

fn parse_column(column: usize, text: &str) -> Result<ColumnSpec> {
    let (name, bounds, default_bounds) = if let Some(name) = text.strip_suffix('!') {
        (name.trim(), None, true)
    } else if let Some(open) = text.find('[') {
        let inner = text[open + 1..]
            .strip_suffix(']')
            .ok_or_else(|| Error::schema(column, format!("text after bounds in '{}'", text)))?;
        let bounds: Vec<&str> = inner.split(',').map(str::trim).collect();
        (text[..open].trim(), Some(bounds), false)
    } else {
        (text, None, false)
    };

    if default_bounds && name != "coords" {
        return Err(Error::schema(
            column,
            format!("'!' is only valid after coords, got '{}'", text),
        ));
    }

    let spec = match name {
        "i16" => {
            let (min, max) = int_bounds(column, bounds, i16::MIN, i16::MAX)?;
            ColumnSpec::I16 { min, max }
        }
        "u16" => {
            let (min, max) = int_bounds(column, bounds, u16::MIN, u16::MAX)?;
            ColumnSpec::U16 { min, max }
        }
        "i32" => {
            let (min, max) = int_bounds(column, bounds, i32::MIN, i32::MAX)?;
            ColumnSpec::I32 { min, max }
        }
        "u32" => {
            let (min, max) = int_bounds(column, bounds, u32::MIN, u32::MAX)?;
            ColumnSpec::U32 { min, max }
        }
        "i64" => {
            let (min, max) = int_bounds(column, bounds, i64::MIN, i64::MAX)?;
            ColumnSpec::I64 { min, max }
        }
        "u64" => {
            let (min, max) = int_bounds(column, bounds, u64::MIN, u64::MAX)?;
            ColumnSpec::U64 { min, max }
        }
        "f64" => ColumnSpec::F64 {
            bounds: match bounds {
                Some(b) => Some(parse_pair::<f64>(column, &b)?),
                None => None,
            },
        },
        "coords" => ColumnSpec::Coords {
            bounds: match bounds {
                Some(b) => Some(coord_bounds(column, &b)?),
                None if default_bounds => Some(CoordBounds::default()),
                None => None,
            },
        },
        "str" | "skip" if bounds.is_some() => {
            return Err(Error::schema(
                column,
                format!("'{}' columns take no bounds", name),
            ));
        }
        "str" => ColumnSpec::Str,
        "skip" => ColumnSpec::Skip,
        other => ColumnSpec::Unsupported(other.to_string()),
    };

    Ok(spec)
}

fn int_bounds<T>(column: usize, bounds: Option<Vec<&str>>, min: T, max: T) -> Result<(T, T)>
where
    T: FromStr + PartialOrd + fmt::Display,
{
    match bounds {
        Some(b) => parse_pair(column, &b),
        None => Ok((min, max)),
    }
}

/// Parse `[min,max]` and check that `min <= max`
fn parse_pair<T>(column: usize, bounds: &[&str]) -> Result<(T, T)>
where
    T: FromStr + PartialOrd + fmt::Display,
{
    let [min, max] = bounds else {
        return Err(Error::schema(
            column,
            format!("expected 2 bounds, got {}", bounds.len()),
        ));
    };
    let min = parse_bound::<T>(column, min)?;
    let max = parse_bound::<T>(column, max)?;
    if min > max {
        return Err(Error::schema(
            column,
            format!("lower bound {} is greater than upper bound {}", min, max),
        ));
    }
    Ok((min, max))
}

fn coord_bounds(column: usize, bounds: &[&str]) -> Result<CoordBounds> {
    let [lon_min, lon_max, lat_min, lat_max] = bounds else {
        return Err(Error::schema(
            column,
            format!("coords expects 4 bounds, got {}", bounds.len()),
        ));
    };
    let (lon_min, lon_max) = parse_pair::<f64>(column, &[*lon_min, *lon_max])?;
    let (lat_min, lat_max) = parse_pair::<f64>(column, &[*lat_min, *lat_max])?;
    Ok(CoordBounds {
        lon_min,
        lon_max,
        lat_min,
        lat_max,
    })
}

fn parse_bound<T: FromStr>(column: usize, text: &str) -> Result<T> {
    text.parse::<T>()
        .map_err(|_| Error::schema(column, format!("invalid bound '{}'", text)))
}
