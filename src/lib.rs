//! Read Table Library
//!
//! A strict, line-oriented field parser for fixed-schema numeric and text
//! tables (TSV/CSV-like input without quoting).
//!
//! Every format error that naive conversion routines let through is reported:
//! missing fields, a sign on an unsigned value, out-of-range values, trailing
//! garbage after a number, NaN or infinity where they are not wanted.
//!
//! This library provides:
//! - [`FieldCursor`]: one line plus a scan position, with typed reads
//! - [`ErrorKind`]: the closed, partly sticky error model of every read
//! - [`SequentialReader`] and [`Field`]: ordered multi-field reads
//! - [`TableReader`] over any [`LineSource`]: line acquisition and diagnostics
//! - [`Schema`]: column types described at run time

pub mod config;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod reader;
pub mod schema;
pub mod sequence;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod stats;
}

// Re-export commonly used types
pub use config::ReaderConfig;
pub use cursor::{BoundedValue, CoordBounds, FieldCursor, FieldValue};
pub use error::{ErrorCategory, ErrorKind, FieldResult};
pub use reader::{BufReadSource, Diagnostic, FileTableReader, LineSource, ReaderState, TableReader};
pub use schema::{ColumnSpec, Schema, Value};
pub use sequence::{Field, SequentialReader};

/// Result type alias for fallible setup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors outside of individual field reads
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Schema text could not be parsed
    #[error("Schema error in column {column}: {message}")]
    Schema { column: usize, message: String },

    /// A row failed to parse
    #[error(transparent)]
    Parse(#[from] Diagnostic),
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a schema error for the zero-based `column`
    pub fn schema(column: usize, message: impl Into<String>) -> Self {
        Self::Schema {
            column,
            message: message.into(),
        }
    }

    /// The field-level kind behind a parse error, if any
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Parse(diagnostic) => Some(diagnostic.kind),
            _ => None,
        }
    }
}
