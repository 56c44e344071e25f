//! Line acquisition
//!
//! A [`LineSource`] hands out one line at a time with its terminator
//! stripped. [`BufReadSource`] adapts anything that implements
//! [`std::io::BufRead`]: files, stdin, in-memory buffers.

use std::io::BufRead;
use tracing::warn;

/// Supplier of input lines
pub trait LineSource {
    /// Replace `line` with the next line, `\n` / `\r\n` removed
    ///
    /// Returns `false` at end of input or on a fault; `line` is left alone
    /// in that case.
    fn next_line(&mut self, line: &mut String) -> bool;

    /// Whether the last `false` from [`next_line`](Self::next_line) was a fault
    fn failed(&self) -> bool;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(&mut self, line: &mut String) -> bool {
        (**self).next_line(line)
    }

    fn failed(&self) -> bool {
        (**self).failed()
    }
}

/// [`LineSource`] over a buffered reader
///
/// The last line is returned even without a trailing newline. Bytes that
/// are not valid UTF-8 count as a read fault.
#[derive(Debug)]
pub struct BufReadSource<R> {
    reader: R,
    raw: Vec<u8>,
    failed: bool,
}

impl<R: BufRead> BufReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            raw: Vec::new(),
            failed: false,
        }
    }
}

impl<R: BufRead> LineSource for BufReadSource<R> {
    fn next_line(&mut self, line: &mut String) -> bool {
        if self.failed {
            return false;
        }

        self.raw.clear();
        match self.reader.read_until(b'\n', &mut self.raw) {
            Ok(0) => false,
            Ok(_) => {
                while matches!(self.raw.last(), Some(b'\n' | b'\r')) {
                    self.raw.pop();
                }
                match std::str::from_utf8(&self.raw) {
                    Ok(text) => {
                        line.clear();
                        line.push_str(text);
                        true
                    }
                    Err(e) => {
                        warn!("Input line is not valid UTF-8: {}", e);
                        self.failed = true;
                        false
                    }
                }
            }
            Err(e) => {
                warn!("Failed to read input line: {}", e);
                self.failed = true;
                false
            }
        }
    }

    fn failed(&self) -> bool {
        self.failed
    }
}
