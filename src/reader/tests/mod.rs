//! Test utilities for the table reader
//!
//! Builds readers over in-memory input so that line handling can be tested
//! without touching the filesystem.

use super::*;
use std::io::Cursor;

mod source_tests;

/// Reader over `input` with default settings
pub fn memory_reader(input: &str) -> TableReader<BufReadSource<Cursor<Vec<u8>>>> {
    TableReader::from_reader(Cursor::new(input.as_bytes().to_vec()))
}

/// Reader over `input` using `config`
pub fn configured_reader(
    input: &str,
    config: &ReaderConfig,
) -> TableReader<BufReadSource<Cursor<Vec<u8>>>> {
    memory_reader(input).with_config(config).unwrap()
}

/// Reader over raw bytes, for input that is not valid UTF-8
pub fn byte_reader(input: &[u8]) -> TableReader<BufReadSource<Cursor<Vec<u8>>>> {
    TableReader::from_reader(Cursor::new(input.to_vec()))
}
