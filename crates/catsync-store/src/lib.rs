//! Document store for catsync.
//!
//! Maps two-letter locale identifiers to catalog documents on disk and moves
//! documents between disk and memory with structural validation.
//!
//! # Layout
//!
//! For a locale `ll` and extension `ext`, one directory holds:
//!
//! - `ll.ext`: new data
//! - `copy_ll.ext` or `ll_copy.ext`: the base document (first wins)
//! - `merged_ll.ext`: merge output when not merging in place
//!
//! # Design Rules
//!
//! 1. A load either returns a complete, object-rooted [`Document`] or fails.
//! 2. A save writes the whole document once; nothing is written incrementally.
//! 3. A missing base is `Ok(None)`, not an error; callers decide whether to
//!    skip or fail.
//! 4. Discovery is a pure function of the directory listing.
//!
//! [`Document`]: catsync_types::Document

pub mod config;
pub mod error;
pub mod io;
pub mod naming;
pub mod store;

pub use config::CatalogConfig;
pub use error::{StoreError, StoreResult};
pub use io::{load_document, parse_document, render_document, save_document};
pub use naming::BaseConvention;
pub use store::{display_name, BaseDocument, DocumentStore};
