//! Human-readable report of the last read outcome

use crate::constants::DIAGNOSTIC_PREFIX;
use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the last read stopped and why
///
/// Displays as
/// `read_table, file <name>, line <n>, position <p> / column <c>: <description>`,
/// with `input line <n>` in place of the file part when no name is known.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error(
    "{}, {}line {}, position {} / column {}: {}",
    DIAGNOSTIC_PREFIX,
    source_label(.name),
    .line,
    .position,
    .column,
    .kind
)]
pub struct Diagnostic {
    pub name: Option<String>,
    pub line: u64,
    pub position: usize,
    pub column: usize,
    pub kind: ErrorKind,
}

fn source_label(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("file {}, ", name),
        None => "input ".to_string(),
    }
}

impl Diagnostic {
    pub fn description(&self) -> &'static str {
        self.kind.description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_file_name() {
        let diagnostic = Diagnostic {
            name: Some("stations.txt".to_string()),
            line: 3,
            position: 5,
            column: 1,
            kind: ErrorKind::MissingValue,
        };
        assert_eq!(
            diagnostic.to_string(),
            "read_table, file stations.txt, line 3, position 5 / column 1: Missing value"
        );
    }

    #[test]
    fn test_display_without_file_name() {
        let diagnostic = Diagnostic {
            name: None,
            line: 12,
            position: 0,
            column: 0,
            kind: ErrorKind::EndOfInput,
        };
        assert_eq!(
            diagnostic.to_string(),
            "read_table, input line 12, position 0 / column 0: End of file"
        );
        assert_eq!(diagnostic.description(), "End of file");
    }
}
