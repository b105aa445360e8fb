//! Index error types
//!
//! Error codes:
//! - ROWINDEX_EMPTY_SOURCE (REJECT)
//! - ROWINDEX_NULL_SOURCE (REJECT)
//! - ROWINDEX_DUPLICATE_KEY (REJECT)
//!
//! Lookup misses are not errors; they surface as `None`/`false`.

use std::fmt;

use thiserror::Error;

/// Severity levels for index errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The call is refused; the registry stays usable
    Reject,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Errors returned by `IndexRegistry` write operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("cannot build an index over an empty snapshot")]
    EmptySource,

    #[error("no snapshot supplied to update_source")]
    NullSource,

    #[error("index already exists: {0}")]
    DuplicateKey(String),
}

impl IndexError {
    /// Stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            IndexError::EmptySource => "ROWINDEX_EMPTY_SOURCE",
            IndexError::NullSource => "ROWINDEX_NULL_SOURCE",
            IndexError::DuplicateKey(_) => "ROWINDEX_DUPLICATE_KEY",
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Reject
    }

    /// Index errors only ever fail the call that raised them
    pub fn is_fatal(&self) -> bool {
        false
    }
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
