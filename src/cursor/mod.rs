//! Per-line field cursor
//!
//! A [`FieldCursor`] owns the text of one line and a scan position into it.
//! Every typed read follows the same contract:
//!
//! 1. **pre-check** - refuse if the cursor is in a sticky state, skip blanks,
//!    report `UnexpectedEndOfLine` at line end or comment and `MissingValue`
//!    on an empty delimited field;
//! 2. **conversion** - the type-specific scanner in [`scan`];
//! 3. **post-check** - the value must be followed by blanks, the delimiter,
//!    or the end of the line.
//!
//! Failed reads never commit: the position stays at the start of the
//! offending field and the column counter is unchanged.
//!
//! ## Usage
//!
//! ```rust
//! use read_table::{ErrorKind, FieldCursor};
//!
//! let mut cursor = FieldCursor::with_line("42 -12.5 hello 7");
//! assert_eq!(cursor.read_u32_in(0, 100), Ok(42));
//! assert_eq!(cursor.read_f64_in(-180.0, 180.0), Ok(-12.5));
//! cursor.skip().unwrap();
//! assert_eq!(cursor.read_i16_in(-3000, 4000), Ok(7));
//! assert_eq!(cursor.column(), 4);
//! assert_eq!(cursor.read_u32(), Err(ErrorKind::UnexpectedEndOfLine));
//! ```

pub(crate) mod scan;
mod typed;

#[cfg(test)]
mod tests;

pub use typed::{BoundedValue, CoordBounds, FieldValue};

use crate::config::{ReaderConfig, marker_byte, validate_numeric_base};
use crate::constants::{DEFAULT_ALLOW_NAN_OR_INF, DEFAULT_NUMERIC_BASE};
use crate::error::{ErrorKind, FieldResult};

/// Raw field located by a string scan
#[derive(Debug, Clone, Copy)]
struct Token {
    start: usize,
    end: usize,
    /// Where the following field starts
    next: usize,
    /// The line is used up after this field
    last: bool,
}

/// Scan state for one line of input
#[derive(Debug, Clone)]
pub struct FieldCursor {
    line: String,
    pos: usize,
    col: usize,
    delimiter: Option<u8>,
    comment: Option<u8>,
    base: u32,
    allow_nan_or_inf: bool,
    last_error: ErrorKind,
    /// The last field of the line was consumed by a delimited string read
    exhausted: bool,
}

impl Default for FieldCursor {
    fn default() -> Self {
        Self {
            line: String::new(),
            pos: 0,
            col: 0,
            delimiter: None,
            comment: None,
            base: DEFAULT_NUMERIC_BASE,
            allow_nan_or_inf: DEFAULT_ALLOW_NAN_OR_INF,
            last_error: ErrorKind::Ok,
            exhausted: false,
        }
    }
}

impl FieldCursor {
    /// Create an empty cursor with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cursor positioned at the start of `line`
    pub fn with_line(line: &str) -> Self {
        let mut cursor = Self::default();
        cursor.load(line);
        cursor
    }

    /// Create an empty cursor using the parameters in `config`
    pub fn from_config(config: &ReaderConfig) -> crate::Result<Self> {
        config.validate()?;
        let mut cursor = Self::default();
        cursor.delimiter = marker_byte("delimiter", config.delimiter)?;
        cursor.comment = marker_byte("comment", config.comment)?;
        cursor.base = config.numeric_base;
        cursor.allow_nan_or_inf = config.allow_nan_or_inf;
        Ok(cursor)
    }

    /// Replace the current line and rewind to its start
    ///
    /// Fails without changing anything when the cursor is in a sticky state.
    pub fn set_line(&mut self, line: &str) -> FieldResult<()> {
        self.ensure_live()?;
        self.load(line);
        Ok(())
    }

    fn load(&mut self, line: &str) {
        self.line.clear();
        self.line.push_str(line);
        self.strip_terminator();
        self.rewind();
    }

    /// Reset position, column and error state for the text now in the buffer
    pub(crate) fn rewind(&mut self) {
        self.pos = 0;
        self.col = 0;
        self.exhausted = false;
        self.last_error = ErrorKind::Ok;
    }

    /// Buffer a line source writes the next line into
    pub(crate) fn buffer_mut(&mut self) -> &mut String {
        &mut self.line
    }

    pub(crate) fn strip_terminator(&mut self) {
        while self.line.ends_with('\n') || self.line.ends_with('\r') {
            self.line.pop();
        }
    }

    /// Move every bit of state into a new cursor and invalidate this one
    ///
    /// Any later read or `set_line` on `self` fails with
    /// [`ErrorKind::Invalidated`].
    pub fn take(&mut self) -> FieldCursor {
        let taken = std::mem::take(self);
        self.delimiter = taken.delimiter;
        self.comment = taken.comment;
        self.base = taken.base;
        self.allow_nan_or_inf = taken.allow_nan_or_inf;
        self.last_error = ErrorKind::Invalidated;
        taken
    }

    /// Put the cursor into a sticky terminal state
    pub(crate) fn terminate(&mut self, kind: ErrorKind) {
        debug_assert!(kind.is_sticky());
        self.last_error = kind;
    }

    // ---------------------------------------------------------------------
    // Accessors and settings
    // ---------------------------------------------------------------------

    /// Text of the current line, terminator stripped
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Byte offset of the scan position
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Zero-based index of the next field
    pub fn column(&self) -> usize {
        self.col
    }

    /// Unread remainder of the line
    pub fn remaining(&self) -> &str {
        &self.line[self.pos..]
    }

    pub fn last_error(&self) -> ErrorKind {
        self.last_error
    }

    /// Whether no further field can be read from this line
    ///
    /// Blanks are skipped logically; the position does not move.
    pub fn at_end_of_line(&self) -> bool {
        self.exhausted || self.at_line_end(self.skip_blanks_from(self.pos))
    }

    pub fn delimiter(&self) -> Option<char> {
        self.delimiter.map(char::from)
    }

    /// Set the field delimiter; `None` selects whitespace-separated fields
    pub fn set_delimiter(&mut self, delimiter: Option<char>) -> crate::Result<()> {
        let byte = marker_byte("delimiter", delimiter)?;
        if byte.is_some() && byte == self.comment {
            return Err(crate::Error::configuration(
                "delimiter and comment marker must differ",
            ));
        }
        self.delimiter = byte;
        Ok(())
    }

    pub fn comment(&self) -> Option<char> {
        self.comment.map(char::from)
    }

    /// Set the comment marker; `None` disables comments
    pub fn set_comment(&mut self, comment: Option<char>) -> crate::Result<()> {
        let byte = marker_byte("comment", comment)?;
        if byte.is_some() && byte == self.delimiter {
            return Err(crate::Error::configuration(
                "delimiter and comment marker must differ",
            ));
        }
        self.comment = byte;
        Ok(())
    }

    pub fn numeric_base(&self) -> u32 {
        self.base
    }

    pub fn set_numeric_base(&mut self, base: u32) -> crate::Result<()> {
        validate_numeric_base(base)?;
        self.base = base;
        Ok(())
    }

    pub fn allow_nan_or_inf(&self) -> bool {
        self.allow_nan_or_inf
    }

    pub fn set_allow_nan_or_inf(&mut self, allow: bool) {
        self.allow_nan_or_inf = allow;
    }

    // ---------------------------------------------------------------------
    // Peek
    // ---------------------------------------------------------------------

    /// Read the next field as `T` without consuming it
    pub fn peek<T: FieldValue>(&mut self) -> FieldResult<T> {
        self.peek_with(T::read_from)
    }

    /// Run any read without consuming input
    ///
    /// Position, column and end-of-line state are restored whatever the
    /// outcome; only [`last_error`](Self::last_error) reflects the attempt.
    pub fn peek_with<T>(
        &mut self,
        read: impl FnOnce(&mut FieldCursor) -> FieldResult<T>,
    ) -> FieldResult<T> {
        let (pos, col, exhausted) = (self.pos, self.col, self.exhausted);
        let result = read(self);
        self.pos = pos;
        self.col = col;
        self.exhausted = exhausted;
        result
    }

    // ---------------------------------------------------------------------
    // Tokenization
    // ---------------------------------------------------------------------

    fn ensure_live(&self) -> FieldResult<()> {
        if self.last_error.is_sticky() {
            Err(self.last_error)
        } else {
            Ok(())
        }
    }

    /// Record a failed read
    pub(crate) fn fail<T>(&mut self, kind: ErrorKind) -> FieldResult<T> {
        self.last_error = kind;
        Err(kind)
    }

    /// Report a requested conversion the cursor has no converter for
    pub(crate) fn unsupported<T>(&mut self) -> FieldResult<T> {
        self.ensure_live()?;
        self.fail(ErrorKind::UnsupportedConversion)
    }

    fn bytes(&self) -> &[u8] {
        self.line.as_bytes()
    }

    /// Space or tab, unless that character is the delimiter
    fn is_blank(&self, b: u8) -> bool {
        (b == b' ' || b == b'\t') && Some(b) != self.delimiter
    }

    fn skip_blanks_from(&self, mut pos: usize) -> usize {
        let bytes = self.bytes();
        while pos < bytes.len() && self.is_blank(bytes[pos]) {
            pos += 1;
        }
        pos
    }

    /// Whether the line holds only spaces and tabs, optionally followed by a
    /// comment; the delimiter setting plays no part
    pub(crate) fn is_blank_line(&self) -> bool {
        let rest = self.line.trim_start_matches([' ', '\t']);
        rest.is_empty() || rest.as_bytes().first().copied() == self.comment
    }

    /// Whether the scan position directly follows a consumed delimiter
    fn after_delimiter(&self) -> bool {
        self.pos > 0 && self.bytes().get(self.pos - 1).copied() == self.delimiter
    }

    /// End of text, newline, or comment marker
    fn at_line_end(&self, pos: usize) -> bool {
        match self.bytes().get(pos) {
            None => true,
            Some(&b) => b == b'\n' || Some(b) == self.comment,
        }
    }

    /// Checks run before any conversion; leaves the position on the first
    /// significant byte of the field
    pub(crate) fn pre_check(&mut self) -> FieldResult<()> {
        self.ensure_live()?;
        if self.exhausted {
            return self.fail(ErrorKind::UnexpectedEndOfLine);
        }

        self.pos = self.skip_blanks_from(self.pos);
        if self.at_line_end(self.pos) {
            return self.fail(ErrorKind::UnexpectedEndOfLine);
        }
        if self.delimiter.is_some() && self.bytes().get(self.pos).copied() == self.delimiter {
            return self.fail(ErrorKind::MissingValue);
        }

        Ok(())
    }

    /// Validate what follows a converted value ending at `end`
    ///
    /// Returns where the next field starts; nothing is committed.
    pub(crate) fn post_check(&mut self, end: usize) -> FieldResult<usize> {
        if end == self.pos {
            return self.fail(ErrorKind::InvalidFormat);
        }

        let next = self.skip_blanks_from(end);
        if self.at_line_end(next) {
            return Ok(next);
        }

        let delimiter = self.delimiter;
        match delimiter {
            None if next == end => self.fail(ErrorKind::InvalidFormat),
            None => Ok(next),
            Some(d) if self.bytes()[next] == d => Ok(next + 1),
            Some(_) => self.fail(ErrorKind::InvalidFormat),
        }
    }

    /// Accept the current field and move to `next`
    pub(crate) fn commit(&mut self, next: usize) {
        self.pos = next;
        self.col += 1;
        self.last_error = ErrorKind::Ok;
    }

    /// Locate the next raw (string) field without interpreting it
    fn scan_token(&mut self) -> FieldResult<Token> {
        if self.delimiter.is_none() {
            self.pre_check()?;
            let start = self.pos;
            let bytes = self.bytes();
            let mut end = start;
            while end < bytes.len() && !self.is_blank(bytes[end]) && !self.at_line_end(end) {
                end += 1;
            }
            return Ok(Token {
                start,
                end,
                next: self.skip_blanks_from(end),
                last: false,
            });
        }

        self.ensure_live()?;
        if self.exhausted {
            return self.fail(ErrorKind::UnexpectedEndOfLine);
        }

        let start = self.skip_blanks_from(self.pos);
        // An empty field at line end only exists right after a delimiter
        if self.at_line_end(start) && !self.after_delimiter() {
            self.pos = start;
            return self.fail(ErrorKind::UnexpectedEndOfLine);
        }

        let bytes = self.bytes();
        let mut stop = start;
        while stop < bytes.len() && Some(bytes[stop]) != self.delimiter && !self.at_line_end(stop)
        {
            stop += 1;
        }

        let mut end = stop;
        while end > start && self.is_blank(bytes[end - 1]) {
            end -= 1;
        }

        // No delimiter after the field means it was the last one
        let last = bytes.get(stop).copied() != self.delimiter;
        Ok(Token {
            start,
            end,
            next: if last { stop } else { stop + 1 },
            last,
        })
    }

    /// Read the next field as a byte range into [`line`](Self::line)
    ///
    /// With a delimiter the field may be empty; without one it is the next
    /// run of non-blank characters.
    pub fn read_span(&mut self) -> FieldResult<std::ops::Range<usize>> {
        let token = self.scan_token()?;
        self.commit(token.next);
        self.exhausted = token.last;
        Ok(token.start..token.end)
    }

    /// Read the next field as a view into the line buffer
    ///
    /// The view borrows the cursor, so it has to be dropped before the next
    /// read or line change.
    pub fn read_str(&mut self) -> FieldResult<&str> {
        let span = self.read_span()?;
        Ok(&self.line[span])
    }

    /// Read the next field as an owned string
    pub fn read_string(&mut self) -> FieldResult<String> {
        self.read_str().map(str::to_owned)
    }

    /// Step over the next field without converting it
    pub fn skip(&mut self) -> FieldResult<()> {
        self.read_span().map(|_| ())
    }
}
