//! Error types for the merge crate.

use catsync_store::StoreError;

/// Errors that can occur while merging a locale.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Loading, locating, or saving a document failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A single explicit output file was requested for a multi-locale run.
    #[error("a single output file cannot be used when merging several locales")]
    SingleOutputInBatch,
}

impl MergeError {
    /// Returns `true` when a required input document does not exist.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_missing_input())
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
