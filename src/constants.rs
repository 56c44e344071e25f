//! Application constants for read_table
//!
//! Default configuration values, coordinate bounds and the schema presets
//! used by the command-line tool.

// =============================================================================
// Parsing Defaults
// =============================================================================

/// Radix used for integer conversions unless configured otherwise
pub const DEFAULT_NUMERIC_BASE: u32 = 10;

/// Smallest and largest accepted integer radix
pub const MIN_NUMERIC_BASE: u32 = 2;
pub const MAX_NUMERIC_BASE: u32 = 36;

/// NaN and infinity are accepted by plain double reads by default
pub const DEFAULT_ALLOW_NAN_OR_INF: bool = true;

/// Blank and comment-only lines are skipped by default
pub const DEFAULT_SKIP_BLANK_LINES: bool = true;

/// Source identifier used in diagnostics when no file name is known
pub const DEFAULT_SOURCE_NAME: &str = "input";

/// Prefix of every formatted diagnostic
pub const DIAGNOSTIC_PREFIX: &str = "read_table";

// =============================================================================
// Coordinate Bounds
// =============================================================================

/// Default longitude bounds (first value of a coordinate pair)
pub const LONGITUDE_MIN: f64 = -180.0;
pub const LONGITUDE_MAX: f64 = 180.0;

/// Default latitude bounds (second value of a coordinate pair)
pub const LATITUDE_MIN: f64 = -90.0;
pub const LATITUDE_MAX: f64 = 90.0;

// =============================================================================
// CLI Presets
// =============================================================================

/// Named schemas reproducing the classic test programs
pub mod presets {
    /// Bounded id followed by a coordinate pair
    pub const ID_AND_COORDS: &str = "u32[1,100],coords!";

    /// Mixed integer widths with skipped columns
    pub const MIXED_WIDTHS: &str = "i32,skip,u64,skip,u16,f64";

    /// Bounded id, bounded measurement, two skipped columns, bounded code
    pub const BOUNDED_WITH_SKIPS: &str =
        "u32[1234,1234567890],f64[1e-10,123],skip,skip,i16[-3000,4000]";

    /// Bounded id, measurement, free-text label, bounded code
    pub const WITH_LABEL: &str = "u32[1234,1234567890],f64,str,i16[-3000,4000]";

    /// All presets in CLI order (`--preset 1` is the first entry)
    pub const ALL: &[&str] = &[ID_AND_COORDS, MIXED_WIDTHS, BOUNDED_WITH_SKIPS, WITH_LABEL];
}
