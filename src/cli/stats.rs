//! Run statistics for the read-table command
//!
//! Tracks how many rows were converted or rejected and why, so the command
//! can log a summary and report it in JSON mode.

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Statistics for one pass over an input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Physical lines read, including skipped blank and comment lines
    pub lines_read: u64,

    /// Rows converted without error
    pub rows_parsed: usize,

    /// Rows rejected because a field failed
    pub rows_rejected: usize,

    /// Rejected rows per error kind
    pub rejections: HashMap<ErrorKind, usize>,

    /// State the input ended in
    pub final_state: ErrorKind,

    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_row(&mut self) {
        self.rows_parsed += 1;
    }

    pub fn record_rejection(&mut self, kind: ErrorKind) {
        self.rows_rejected += 1;
        *self.rejections.entry(kind).or_insert(0) += 1;
    }

    /// Rows that reached field conversion
    pub fn total_rows(&self) -> usize {
        self.rows_parsed + self.rows_rejected
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.total_rows();
        if total == 0 {
            0.0
        } else {
            (self.rows_parsed as f64 / total as f64) * 100.0
        }
    }

    /// The input was read to the end, whatever happened to individual rows
    pub fn is_successful(&self) -> bool {
        self.final_state == ErrorKind::EndOfInput
    }

    /// Rejection counts, most frequent first
    pub fn rejections_sorted(&self) -> Vec<(ErrorKind, usize)> {
        let mut counts: Vec<(ErrorKind, usize)> =
            self.rejections.iter().map(|(k, n)| (*k, *n)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.description().cmp(b.0.description())));
        counts
    }
}
