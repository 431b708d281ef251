//! Foundation types for catsync.
//!
//! A catalog is a two-level tree: each document maps *group* keys to either
//! a table of *items* or an opaque non-table value. Every other catsync
//! crate depends on `catsync-types`.
//!
//! # Key Types
//!
//! - [`Value`]: closed sum of [`Scalar`], sequence, and [`Table`]
//! - [`Table`]: insertion-ordered string-keyed mapping
//! - [`Document`]: object-rooted catalog document
//! - [`LocaleId`]: two-letter, case-insensitive locale identifier
//! - [`canonicalize`]: recursive key sort for stable output

pub mod canonical;
pub mod document;
pub mod error;
pub mod locale;
pub mod value;

pub use canonical::{canonicalize, canonicalize_table, is_canonical};
pub use document::Document;
pub use error::{TypeError, TypeResult};
pub use locale::LocaleId;
pub use value::{Scalar, Table, Value};
