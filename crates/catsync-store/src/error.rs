//! Error types for document store operations.

use std::path::PathBuf;

use catsync_types::{LocaleId, TypeError};

/// Errors from loading, saving, and locating catalog documents.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The file content could not be parsed as JSON.
    #[error("'{}' is not valid JSON: {source}", path.display())]
    MalformedDocument {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The file parsed, but its root is not an object.
    #[error("top level of '{}' must be a JSON object, found {found}", path.display())]
    NonObjectTopLevel { path: PathBuf, found: &'static str },

    /// A document required for a locale does not exist.
    #[error("[{locale}] {reason}")]
    MissingInput { locale: LocaleId, reason: String },

    /// A configuration file could not be read or is invalid.
    #[error("invalid configuration '{}': {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// Serializing a document failed.
    #[error("failed to serialize document for '{}': {source}", path.display())]
    Serialization {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// I/O error while touching the filesystem.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Type(#[from] TypeError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for failures a batch run should report and skip.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
