//! Test utilities for field cursor testing
//!
//! Helpers shared by the tokenization, integer, float and string test modules.

use crate::FieldCursor;
use crate::config::ReaderConfig;

mod integer_tests;
mod string_tests;

/// Cursor over `line` with whitespace-separated fields
pub fn blank_cursor(line: &str) -> FieldCursor {
    FieldCursor::with_line(line)
}

/// Cursor over `line` with an explicit delimiter and no comment marker
pub fn delimited_cursor(line: &str, delimiter: char) -> FieldCursor {
    let config = ReaderConfig::default().with_delimiter(delimiter);
    let mut cursor = FieldCursor::from_config(&config).unwrap();
    cursor.set_line(line).unwrap();
    cursor
}

/// Cursor over `line` using `config`
pub fn configured_cursor(line: &str, config: &ReaderConfig) -> FieldCursor {
    let mut cursor = FieldCursor::from_config(config).unwrap();
    cursor.set_line(line).unwrap();
    cursor
}
