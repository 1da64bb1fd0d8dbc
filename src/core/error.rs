//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for engine operations.
///
/// Nothing here is fatal: every variant degrades to "previous state
/// preserved" at the engine level, and the host collaborator decides what to
/// surface to the user.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Represents an I/O error, typically from listing a directory through
    /// the host provider.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// Represents a path that was expected to be a directory but was not.
    #[error("Path is not a valid directory: {0}")]
    NotADirectory(PathBuf),

    /// An ignore-rule import whose top-level JSON value is not an array.
    /// The import is rejected whole; prior rules stay in place.
    #[error("Malformed ignore-rule import: {0}")]
    MalformedRuleImport(String),

    /// Represents a JSON serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
