//! Command-line argument definitions for read-table
//!
//! This module defines the CLI interface using the clap derive API and turns
//! the parsed flags into a [`ReaderConfig`] and a [`Schema`].

use crate::config::ReaderConfig;
use crate::schema::Schema;
use crate::{Error, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the strict table reader
///
/// Reads a whitespace- or delimiter-separated table, converts every line
/// according to a column schema and reports each rejected line with its
/// position and reason.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "read-table",
    version,
    about = "Strictly parse fixed-schema text tables and report every bad field",
    long_about = "Reads a table line by line and converts each line according to a column schema. \
                  Lines with missing fields, out-of-range numbers, signs on unsigned values, \
                  trailing garbage or unwanted NaN/infinity are reported with file, line, position \
                  and column; parsing continues with the next line."
)]
pub struct Args {
    /// Input file; standard input when omitted
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input file (default: standard input)"
    )]
    pub input: Option<PathBuf>,

    /// Column schema, e.g. "u32[1,100],coords!,str,skip"
    #[arg(
        short = 's',
        long = "schema",
        value_name = "SCHEMA",
        conflicts_with = "preset",
        help = "Column schema such as \"u32[1,100],f64,skip,i16[-3000,4000]\"",
        long_help = "Comma-separated column types: i16 u16 i32 u32 i64 u64 f64 coords str skip.\n\
                     Numeric types take optional inclusive bounds, e.g. u32[1,100] or f64[0,1e3].\n\
                     coords reads two doubles; bounds are [lon_min,lon_max,lat_min,lat_max] and\n\
                     coords! uses [-180,180] / [-90,90]."
    )]
    pub schema: Option<String>,

    /// Built-in schema
    #[arg(
        short = 'p',
        long = "preset",
        value_name = "N",
        value_parser = clap::value_parser!(u8).range(1..=4),
        help = "Use a built-in schema (1-4)",
        long_help = "Built-in schemas:\n  \
                     1: u32[1,100],coords!\n  \
                     2: i32,skip,u64,skip,u16,f64\n  \
                     3: u32[1234,1234567890],f64[1e-10,123],skip,skip,i16[-3000,4000]\n  \
                     4: u32[1234,1234567890],f64,str,i16[-3000,4000]"
    )]
    pub preset: Option<u8>,

    /// Field delimiter; fields are separated by blanks when omitted
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Comment character
    #[arg(short = 'c', long = "comment", value_name = "CHAR")]
    pub comment: Option<char>,

    /// Radix for integer columns
    #[arg(long = "base", value_name = "N")]
    pub base: Option<u32>,

    /// Reject NaN and infinity in unbounded double columns
    #[arg(long = "no-nan")]
    pub no_nan: bool,

    /// Parse blank and comment-only lines instead of skipping them
    #[arg(long = "keep-blank-lines")]
    pub keep_blank_lines: bool,

    /// JSON file with reader settings; flags given on the command line win
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress logging except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for parsed rows
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for parsed rows"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for parsed rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// "Read: " followed by tab-separated values
    Human,
    /// One JSON array per row
    Json,
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.schema.is_none() && self.preset.is_none() {
            return Err(Error::configuration(
                "Either --schema or --preset must be given".to_string(),
            ));
        }

        if let Some(input) = &self.input {
            if !input.exists() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    input.display()
                )));
            }
            if input.is_dir() {
                return Err(Error::configuration(format!(
                    "Input path is a directory: {}",
                    input.display()
                )));
            }
        }

        Ok(())
    }

    /// Reader settings: config file first, then command-line flags
    pub fn reader_config(&self) -> Result<ReaderConfig> {
        let mut config = match &self.config_file {
            Some(path) => ReaderConfig::from_json_file(path)?,
            None => ReaderConfig::default(),
        };

        if let Some(delimiter) = self.delimiter {
            config = config.with_delimiter(delimiter);
        }
        if let Some(comment) = self.comment {
            config = config.with_comment(comment);
        }
        if let Some(base) = self.base {
            config = config.with_numeric_base(base);
        }
        if self.no_nan {
            config = config.without_nan_or_inf();
        }
        if self.keep_blank_lines {
            config = config.keep_blank_lines();
        }

        config.validate()?;
        Ok(config)
    }

    /// Column schema from `--schema` or `--preset`
    pub fn schema(&self) -> Result<Schema> {
        match (&self.schema, self.preset) {
            (Some(text), _) => Schema::parse(text),
            (None, Some(number)) => Schema::preset(number.into()),
            (None, None) => Err(Error::configuration(
                "Either --schema or --preset must be given".to_string(),
            )),
        }
    }

    /// Get the log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
