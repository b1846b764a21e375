//! Error types for arx_core.

use crate::hash::ObjectId;
use thiserror::Error;

/// Result type alias using arx_core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while producing an archive entry stream.
///
/// Attribute lookup failures are deliberately absent: the attribute gate
/// treats them as "attribute unspecified" and the walk continues.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred during object access.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// An object could not be read from the store. Fatal for the walk.
    #[error("cannot read object {id}: {reason}")]
    ObjectRead { id: ObjectId, reason: String },

    /// The consuming sink reported a failure for an entry. The underlying
    /// error is passed through unchanged.
    #[error("sink failed at {path}: {source}")]
    Sink {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Invalid object id format or encoding.
    #[error("invalid object id: {reason}")]
    InvalidId { reason: String },

    /// Invalid tree entry.
    #[error("invalid tree entry: {reason}")]
    InvalidTreeEntry { reason: String },

    /// An object had a different kind than the operation required.
    #[error("wrong object kind: expected {expected}, got {got}")]
    WrongObjectKind { expected: String, got: String },
}

impl Error {
    /// Create an ObjectRead error.
    pub fn object_read(id: ObjectId, reason: impl Into<String>) -> Self {
        Error::ObjectRead {
            id,
            reason: reason.into(),
        }
    }

    /// Create a Sink error wrapping the consumer's own error.
    pub fn sink(path: impl Into<String>, source: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Error::Sink {
            path: path.into(),
            source,
        }
    }

    /// Create an InvalidId error.
    pub fn invalid_id(reason: impl Into<String>) -> Self {
        Error::InvalidId {
            reason: reason.into(),
        }
    }

    /// Create an InvalidTreeEntry error.
    pub fn invalid_tree_entry(reason: impl Into<String>) -> Self {
        Error::InvalidTreeEntry {
            reason: reason.into(),
        }
    }

    /// Create a WrongObjectKind error.
    pub fn wrong_object_kind(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::WrongObjectKind {
            expected: expected.into(),
            got: got.into(),
        }
    }
}
