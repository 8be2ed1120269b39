//! Error types for confsync.
//!
//! Uses thiserror for derive macros. Each variant maps to a CLI exit code.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for confsync operations.
#[derive(Error, Debug)]
pub enum ConfsyncError {
    /// User provided invalid arguments or asked for something that does not exist.
    #[error("{0}")]
    UserError(String),

    /// Structurally invalid document text. No partial document is produced.
    #[error("malformed document at line {line}: {message}")]
    MalformedDocument { line: usize, message: String },

    /// Reading or writing a file failed.
    #[error("failed to {action} '{}': {source}", path.display())]
    IoFailure {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The on-disk file is not in sync with its template.
    #[error("{0}")]
    OutOfDate(String),
}

impl ConfsyncError {
    /// Build a [`ConfsyncError::MalformedDocument`] for a 1-based line number.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        ConfsyncError::MalformedDocument {
            line,
            message: message.into(),
        }
    }

    /// Build a [`ConfsyncError::IoFailure`] describing the attempted action.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfsyncError::IoFailure {
            action,
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from the filesystem rather than document content.
    pub fn is_io(&self) -> bool {
        matches!(self, ConfsyncError::IoFailure { .. })
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfsyncError::UserError(_) => exit_codes::USER_ERROR,
            ConfsyncError::MalformedDocument { .. } => exit_codes::MALFORMED_DOCUMENT,
            ConfsyncError::IoFailure { .. } => exit_codes::IO_FAILURE,
            ConfsyncError::OutOfDate(_) => exit_codes::OUT_OF_DATE,
        }
    }
}

/// Result type alias for confsync operations.
pub type Result<T> = std::result::Result<T, ConfsyncError>;
