//! Table reader
//!
//! [`TableReader`] owns a [`LineSource`] and a [`FieldCursor`] and drives the
//! line acquisition state machine:
//!
//! ```text
//! Fresh -> HasLine -> HasLine -> ... -> EndOfInput | ReadFailure
//!   \                                    (or Invalidated after transfer)
//!    -> OpenFailure
//! ```
//!
//! Terminal states are sticky: [`TableReader::next_line`] and every field
//! read keep failing with the same [`ErrorKind`].
//!
//! ## Usage
//!
//! ```rust
//! use read_table::{Field, ReaderConfig, TableReader};
//!
//! let config = ReaderConfig::default().with_comment('#');
//! let input = "# id value\n1 2.5\n\n2 3.5\n";
//! let mut reader = TableReader::from_reader(input.as_bytes())
//!     .with_config(&config)
//!     .unwrap();
//!
//! let mut total = 0.0;
//! while reader.next_line().is_ok() {
//!     let (mut id, mut value) = (0u32, 0.0f64);
//!     reader.read([Field::from(&mut id), Field::from(&mut value)]).unwrap();
//!     total += value;
//! }
//! assert_eq!(total, 6.0);
//! assert_eq!(reader.line_number(), 4);
//! ```

mod diagnostic;
mod source;

#[cfg(test)]
mod tests;

pub use diagnostic::Diagnostic;
pub use source::{BufReadSource, LineSource};

use crate::config::ReaderConfig;
use crate::cursor::FieldCursor;
use crate::error::{ErrorKind, FieldResult};
use crate::sequence::Field;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Where a [`TableReader`] is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReaderState {
    /// No line has been requested yet
    Fresh,
    /// A line is loaded into the cursor
    HasLine,
    EndOfInput,
    Invalidated,
    OpenFailure,
    ReadFailure,
}

/// Reads a table line by line from a [`LineSource`]
#[derive(Debug)]
pub struct TableReader<S> {
    source: Option<S>,
    cursor: FieldCursor,
    name: Option<String>,
    line_number: u64,
    skip_blank_lines: bool,
    has_line: bool,
}

/// Table reader over a file opened by [`TableReader::open`]
pub type FileTableReader = TableReader<BufReadSource<BufReader<File>>>;

impl<S: LineSource> TableReader<S> {
    /// Create a reader over `source` with default settings
    pub fn new(source: S) -> Self {
        Self::from_parts(Some(source), FieldCursor::new(), None)
    }

    fn from_parts(source: Option<S>, cursor: FieldCursor, name: Option<String>) -> Self {
        Self {
            source,
            cursor,
            name,
            line_number: 0,
            skip_blank_lines: crate::constants::DEFAULT_SKIP_BLANK_LINES,
            has_line: false,
        }
    }

    /// Apply `config` to the reader and its cursor
    ///
    /// A reader that already failed to open keeps its `OpenFailure` state.
    pub fn with_config(mut self, config: &ReaderConfig) -> crate::Result<Self> {
        let mut cursor = FieldCursor::from_config(config)?;
        if self.cursor.last_error().is_sticky() {
            cursor.terminate(self.cursor.last_error());
        }
        self.cursor = cursor;
        self.skip_blank_lines = config.skip_blank_lines;
        Ok(self)
    }

    /// Name used in diagnostics in place of `input`
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Load the next line, discarding whatever is left of the current one
    ///
    /// With blank-line skipping enabled, lines that are empty, contain only
    /// blanks, or start (after blanks) with the comment marker are passed
    /// over. The line number counts every physical line.
    pub fn next_line(&mut self) -> FieldResult<()> {
        let state = self.cursor.last_error();
        if state.is_sticky() {
            return Err(state);
        }
        let Some(source) = self.source.as_mut() else {
            self.cursor.terminate(ErrorKind::Invalidated);
            return Err(ErrorKind::Invalidated);
        };

        loop {
            if !source.next_line(self.cursor.buffer_mut()) {
                let kind = if source.failed() {
                    warn!(
                        "Read failure in {} after line {}",
                        self.name.as_deref().unwrap_or(crate::constants::DEFAULT_SOURCE_NAME),
                        self.line_number
                    );
                    ErrorKind::ReadFailure
                } else {
                    debug!(
                        "Reached end of {} after {} lines",
                        self.name.as_deref().unwrap_or(crate::constants::DEFAULT_SOURCE_NAME),
                        self.line_number
                    );
                    ErrorKind::EndOfInput
                };
                self.has_line = false;
                self.cursor.terminate(kind);
                return Err(kind);
            }

            self.line_number += 1;
            self.cursor.strip_terminator();
            self.cursor.rewind();

            if self.skip_blank_lines && self.cursor.is_blank_line() {
                trace!("Skipping blank line {}", self.line_number);
                continue;
            }

            self.has_line = true;
            return Ok(());
        }
    }

    pub fn state(&self) -> ReaderState {
        match self.cursor.last_error() {
            ErrorKind::EndOfInput => ReaderState::EndOfInput,
            ErrorKind::Invalidated => ReaderState::Invalidated,
            ErrorKind::OpenFailure => ReaderState::OpenFailure,
            ErrorKind::ReadFailure => ReaderState::ReadFailure,
            _ if self.has_line => ReaderState::HasLine,
            _ => ReaderState::Fresh,
        }
    }

    /// Move the reader, its source and its position into a new value
    ///
    /// `self` is left `Invalidated`.
    pub fn transfer(&mut self) -> Self {
        let moved = Self {
            source: self.source.take(),
            cursor: self.cursor.take(),
            name: self.name.clone(),
            line_number: self.line_number,
            skip_blank_lines: self.skip_blank_lines,
            has_line: self.has_line,
        };
        self.has_line = false;
        moved
    }

    /// Read `fields` in order from the current line
    pub fn read<'a>(&mut self, fields: impl IntoIterator<Item = Field<'a>>) -> FieldResult<()> {
        self.cursor.read_fields(fields)
    }

    pub fn cursor(&self) -> &FieldCursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut FieldCursor {
        &mut self.cursor
    }

    pub fn last_error(&self) -> ErrorKind {
        self.cursor.last_error()
    }

    /// 1-based number of the current line; 0 before the first line
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn skip_blank_lines(&self) -> bool {
        self.skip_blank_lines
    }

    pub fn set_skip_blank_lines(&mut self, skip: bool) {
        self.skip_blank_lines = skip;
    }

    /// Snapshot of the current location and last outcome
    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic {
            name: self.name.clone(),
            line: self.line_number,
            position: self.cursor.position(),
            column: self.cursor.column(),
            kind: self.cursor.last_error(),
        }
    }

    /// Write the diagnostic line for the last outcome to `out`
    pub fn write_error(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "{}", self.diagnostic())
    }
}

impl<R: std::io::BufRead> TableReader<BufReadSource<R>> {
    /// Create an unnamed reader over any buffered reader
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufReadSource::new(reader))
    }
}

impl FileTableReader {
    /// Open `path` for reading
    ///
    /// Failure to open is not an `Err`: the reader starts in the sticky
    /// `OpenFailure` state so that the caller's read loop ends immediately
    /// and the diagnostic names the file.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path.display().to_string();

        match File::open(path) {
            Ok(file) => {
                debug!("Opened {} for reading", name);
                Self::from_parts(
                    Some(BufReadSource::new(BufReader::new(file))),
                    FieldCursor::new(),
                    Some(name),
                )
            }
            Err(e) => {
                warn!("Failed to open {}: {}", name, e);
                let mut cursor = FieldCursor::new();
                cursor.terminate(ErrorKind::OpenFailure);
                Self::from_parts(None, cursor, Some(name))
            }
        }
    }
}
