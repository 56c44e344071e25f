//! Field-level error model.
//!
//! Every read on a [`FieldCursor`](crate::cursor::FieldCursor) reports exactly
//! one [`ErrorKind`] and records it as the cursor's last error. Four kinds are
//! sticky and terminal: once a cursor holds one of them, nothing short of
//! dropping it brings it back to life.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a single field operation
pub type FieldResult<T> = std::result::Result<T, ErrorKind>;

/// Outcome of the most recent read operation
///
/// `Err` values produced by this crate never carry [`ErrorKind::Ok`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorKind {
    #[default]
    #[error("No error")]
    Ok,

    #[error("End of file")]
    EndOfInput,

    #[error("Unexpected end of line")]
    UnexpectedEndOfLine,

    #[error("Missing value")]
    MissingValue,

    #[error("Invalid value")]
    InvalidFormat,

    #[error("Overflow or underflow")]
    OutOfRange,

    #[error("NaN or infinity read")]
    NotANumberOrInfinite,

    #[error("Unknown conversion requested")]
    UnsupportedConversion,

    #[error("Invalidated instance")]
    Invalidated,

    #[error("Error opening file")]
    OpenFailure,

    #[error("Error reading input")]
    ReadFailure,
}

/// Broad grouping of error kinds, used to decide how a caller reacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// The last operation succeeded
    None,
    /// Input ran out; the normal way a read loop ends
    Exhaustion,
    /// The line has fewer fields than requested
    Structural,
    /// The field exists but its content is unacceptable
    ValueLevel,
    /// A conversion the engine does not provide was requested
    Misuse,
    /// The reader can no longer be used
    Lifecycle,
}

impl ErrorKind {
    /// All kinds, in declaration order
    pub const ALL: [ErrorKind; 11] = [
        ErrorKind::Ok,
        ErrorKind::EndOfInput,
        ErrorKind::UnexpectedEndOfLine,
        ErrorKind::MissingValue,
        ErrorKind::InvalidFormat,
        ErrorKind::OutOfRange,
        ErrorKind::NotANumberOrInfinite,
        ErrorKind::UnsupportedConversion,
        ErrorKind::Invalidated,
        ErrorKind::OpenFailure,
        ErrorKind::ReadFailure,
    ];

    pub fn is_ok(self) -> bool {
        self == ErrorKind::Ok
    }

    /// Whether this kind blocks every further read and line fetch
    pub fn is_sticky(self) -> bool {
        matches!(
            self,
            ErrorKind::EndOfInput
                | ErrorKind::Invalidated
                | ErrorKind::OpenFailure
                | ErrorKind::ReadFailure
        )
    }

    pub fn category(self) -> ErrorCategory {
        match self {
            ErrorKind::Ok => ErrorCategory::None,
            ErrorKind::EndOfInput => ErrorCategory::Exhaustion,
            ErrorKind::UnexpectedEndOfLine | ErrorKind::MissingValue => ErrorCategory::Structural,
            ErrorKind::InvalidFormat | ErrorKind::OutOfRange | ErrorKind::NotANumberOrInfinite => {
                ErrorCategory::ValueLevel
            }
            ErrorKind::UnsupportedConversion => ErrorCategory::Misuse,
            ErrorKind::Invalidated | ErrorKind::OpenFailure | ErrorKind::ReadFailure => {
                ErrorCategory::Lifecycle
            }
        }
    }

    /// Stable human-readable description
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::Ok => "No error",
            ErrorKind::EndOfInput => "End of file",
            ErrorKind::UnexpectedEndOfLine => "Unexpected end of line",
            ErrorKind::MissingValue => "Missing value",
            ErrorKind::InvalidFormat => "Invalid value",
            ErrorKind::OutOfRange => "Overflow or underflow",
            ErrorKind::NotANumberOrInfinite => "NaN or infinity read",
            ErrorKind::UnsupportedConversion => "Unknown conversion requested",
            ErrorKind::Invalidated => "Invalidated instance",
            ErrorKind::OpenFailure => "Error opening file",
            ErrorKind::ReadFailure => "Error reading input",
        }
    }
}
