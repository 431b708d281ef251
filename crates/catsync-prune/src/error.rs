//! Error types for the prune crate.

use catsync_store::StoreError;

/// Errors that abort a conformance run as a whole.
///
/// Failures on individual target documents do not abort the run; they are
/// recorded in the [`PruneReport`](crate::PruneReport).
#[derive(Debug, thiserror::Error)]
pub enum PruneError {
    /// The canonical document could not be located or loaded, or the
    /// directory could not be listed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias for prune results.
pub type PruneResult<T> = Result<T, PruneError>;
