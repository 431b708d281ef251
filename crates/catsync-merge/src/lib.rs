//! Merge engine for catsync.
//!
//! Folds a locale's new-data document into its base document under a
//! [`ConflictPolicy`], then writes the canonicalized result beside the
//! inputs, into an output directory, to an explicit file, or in place.
//!
//! # Key Types
//!
//! - [`merge`] / [`merge_tracked`]: the pure document merge
//! - [`MergeStats`]: per-merge accounting
//! - [`process`] / [`process_all`]: single-locale and bulk runs on disk

pub mod engine;
pub mod error;
pub mod process;

pub use engine::{merge, merge_tracked, ConflictPolicy, MergeStats};
pub use error::{MergeError, MergeResult};
pub use process::{process, process_all, MergeBatch, MergeOptions, MergeOutcome, OutputTarget};
