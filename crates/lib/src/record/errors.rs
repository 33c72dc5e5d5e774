//! Error types for record operations.
//!
//! This module defines the structured error kinds a [`Record`](super::Record)
//! can report: rejected arguments to bulk operations, missing or unreadable
//! YAML files, unparseable YAML text and typed reads of mismatched values.
//! Plain access (get/set/exists/unset, iteration, stack operations) never fails.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Value;

/// Structured error types for record operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RecordError {
    /// A bulk operation was given something that is not a mapping or sequence
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A YAML file does not exist
    #[error("YAML not found on {}", path.display())]
    NotFound { path: PathBuf },

    /// A YAML file exists but could not be read
    #[error("Problem loading YAML file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Text could not be parsed as a YAML mapping or sequence
    #[error("{reason}")]
    InvalidFormat { reason: String },

    /// Emitting YAML text failed
    #[error("Failed to emit YAML: {reason}")]
    EmitFailed { reason: String },

    /// A typed read found a value of a different type
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl RecordError {
    pub(crate) fn type_mismatch(expected: &str, actual: &Value) -> Self {
        RecordError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
        }
    }

    /// Check if this error rejected an argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RecordError::InvalidArgument { .. })
    }

    /// Check if this error reports a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, RecordError::NotFound { .. })
    }

    /// Check if this error is an I/O failure
    pub fn is_io_error(&self) -> bool {
        matches!(self, RecordError::Io { .. })
    }

    /// Check if this error reports malformed input text
    pub fn is_format_error(&self) -> bool {
        matches!(self, RecordError::InvalidFormat { .. })
    }

    /// Check if this error is a failure to emit output text
    pub fn is_emit_error(&self) -> bool {
        matches!(self, RecordError::EmitFailed { .. })
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, RecordError::TypeMismatch { .. })
    }

    /// Get the file path if this is a file-related error
    pub fn path(&self) -> Option<&Path> {
        match self {
            RecordError::NotFound { path } | RecordError::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

// Conversion from RecordError to the main Error type
impl From<RecordError> for crate::Error {
    fn from(err: RecordError) -> Self {
        crate::Error::Record(err)
    }
}
