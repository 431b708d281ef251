//! Conformance engine for catsync.
//!
//! Forces sibling base documents to match the group/item structure of one
//! canonical base document by removing every group and item the canonical
//! document does not have. Nothing is ever added.
//!
//! # Key Types
//!
//! - [`StructuralReference`]: table-groups-only view of the canonical document
//! - [`prune`]: the pure prune of one document
//! - [`PruneStats`]: removed group and item counts
//! - [`process`]: prune every sibling on disk, optionally as a dry run

pub mod engine;
pub mod error;
pub mod process;

pub use engine::{prune, PruneStats, StructuralReference};
pub use error::{PruneError, PruneResult};
pub use process::{process, PruneOptions, PruneReport, TargetOutcome, TargetStatus};
