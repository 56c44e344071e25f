//! Configuration management and validation.
//!
//! Provides the parsing parameters shared by [`FieldCursor`](crate::FieldCursor)
//! and [`TableReader`](crate::TableReader): field delimiter, comment marker,
//! integer radix, NaN/infinity admission and blank-line skipping.

use crate::constants::{
    DEFAULT_ALLOW_NAN_OR_INF, DEFAULT_NUMERIC_BASE, DEFAULT_SKIP_BLANK_LINES, MAX_NUMERIC_BASE,
    MIN_NUMERIC_BASE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Parsing parameters for a table reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Field delimiter; `None` means any run of spaces/tabs separates fields
    pub delimiter: Option<char>,

    /// Comment marker; the rest of the line is ignored from a field boundary on
    pub comment: Option<char>,

    /// Radix for integer conversions (2..=36)
    pub numeric_base: u32,

    /// Accept NaN and infinity in plain (unbounded) double reads
    pub allow_nan_or_inf: bool,

    /// Skip lines that are blank or contain only a comment
    pub skip_blank_lines: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            comment: None,
            numeric_base: DEFAULT_NUMERIC_BASE,
            allow_nan_or_inf: DEFAULT_ALLOW_NAN_OR_INF,
            skip_blank_lines: DEFAULT_SKIP_BLANK_LINES,
        }
    }
}

impl ReaderConfig {
    /// Use an explicit field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Treat everything from `comment` on as a comment
    pub fn with_comment(mut self, comment: char) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Set the integer radix
    pub fn with_numeric_base(mut self, base: u32) -> Self {
        self.numeric_base = base;
        self
    }

    /// Reject NaN and infinity in plain double reads
    pub fn without_nan_or_inf(mut self) -> Self {
        self.allow_nan_or_inf = false;
        self
    }

    /// Hand blank and comment-only lines to the caller instead of skipping them
    pub fn keep_blank_lines(mut self) -> Self {
        self.skip_blank_lines = false;
        self
    }

    /// Check that every parameter can be used by the cursor
    pub fn validate(&self) -> Result<()> {
        marker_byte("delimiter", self.delimiter)?;
        marker_byte("comment", self.comment)?;
        validate_numeric_base(self.numeric_base)?;

        if self.delimiter.is_some() && self.delimiter == self.comment {
            return Err(Error::configuration(format!(
                "delimiter and comment marker must differ (both are {:?})",
                self.delimiter.unwrap_or_default()
            )));
        }

        Ok(())
    }

    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: ReaderConfig = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        config.validate()?;
        debug!("Loaded reader configuration from {}", path.display());
        Ok(config)
    }
}

/// Convert a delimiter or comment character into the byte the cursor scans for
pub(crate) fn marker_byte(what: &str, marker: Option<char>) -> Result<Option<u8>> {
    let Some(c) = marker else {
        return Ok(None);
    };

    if !c.is_ascii() {
        return Err(Error::configuration(format!(
            "{} must be a single ASCII character, got {:?}",
            what, c
        )));
    }
    if c == '\n' || c == '\r' || c == '\0' {
        return Err(Error::configuration(format!(
            "{} cannot be a line terminator or NUL, got {:?}",
            what, c
        )));
    }

    Ok(Some(c as u8))
}

pub(crate) fn validate_numeric_base(base: u32) -> Result<()> {
    if !(MIN_NUMERIC_BASE..=MAX_NUMERIC_BASE).contains(&base) {
        return Err(Error::configuration(format!(
            "numeric base must be between {} and {}, got {}",
            MIN_NUMERIC_BASE, MAX_NUMERIC_BASE, base
        )));
    }
    Ok(())
}
