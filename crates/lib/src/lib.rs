//!
//! Recordkit: ordered, array-like data records.
//!
//! This library provides [`Record`](record::Record), a mutable, insertion-ordered
//! key-value container with convenience semantics layered on top:
//!
//! * **Access**: `get`/`set`/`exists`/`unset` plus `record[key]` indexing.
//! * **Bulk transforms**: recursive `merge`, `replace`, `filter_keys`, `remove_empty`.
//! * **Sequence operations**: `push`/`pop`/`shift`/`unshift`, `slice`, `implode`
//!   and key or value sorting.
//! * **Iteration**: lazy `(key, value)` iterators and a resettable cursor.
//! * **Serialization**: plain nested arrays (`to_array`), JSON, a `print_r`-style
//!   dump and YAML text or files (requires the "yaml" feature).
//!
//! ```
//! use recordkit::{array, record::Record};
//!
//! let mut record = Record::new();
//! record.set("name", "Alice").set("tags", array!["a", "b"]);
//! record.push("extra");
//!
//! assert_eq!(record.get("name").unwrap(), "Alice");
//! assert_eq!(record.to_json().unwrap(), r#"{"name":"Alice","tags":["a","b"],"0":"extra"}"#);
//! ```

pub mod record;

pub use record::Record;

/// Result type used throughout the recordkit library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the recordkit library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured record errors from the record module
    #[error(transparent)]
    Record(record::RecordError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Record(_) => "record",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Record(record_err) => record_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Record(record_err) => record_err.is_io_error(),
            _ => false,
        }
    }

    /// Check if this error rejected an invalid argument.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Record(record_err) => record_err.is_invalid_argument(),
            _ => false,
        }
    }

    /// Check if this error reports malformed input.
    pub fn is_format_error(&self) -> bool {
        match self {
            Error::Record(record_err) => record_err.is_format_error(),
            _ => false,
        }
    }

    /// Check if this error is a failure to emit output text.
    pub fn is_emit_error(&self) -> bool {
        match self {
            Error::Record(record_err) => record_err.is_emit_error(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Record(record_err) => record_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is a serialization failure.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }
}
