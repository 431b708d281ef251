//! The hierarchical merge of new data into a base document.
//!
//! For every group of the new data:
//!
//! | new group | base group  | keep-base           | take-new            |
//! |-----------|-------------|---------------------|---------------------|
//! | non-table | any         | skipped             | skipped             |
//! | table     | absent      | added wholesale     | added wholesale     |
//! | table     | non-table   | base kept           | replaced wholesale  |
//! | table     | table       | item-wise merge     | item-wise merge     |
//!
//! Item-wise, absent items are always added; colliding items take the new
//! value only under take-new.

use catsync_types::{Document, Table, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How collisions between base and new data are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Existing base values win.
    #[default]
    KeepBase,
    /// New values replace existing base values.
    TakeNew,
}

impl ConflictPolicy {
    pub fn from_overwrite(overwrite: bool) -> Self {
        if overwrite {
            Self::TakeNew
        } else {
            Self::KeepBase
        }
    }

    pub fn overwrites(self) -> bool {
        matches!(self, Self::TakeNew)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::KeepBase => "no-overwrite",
            Self::TakeNew => "overwrite",
        }
    }
}

/// What a merge did, group by group and item by item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// New table groups absent from the base.
    pub groups_added: usize,
    /// Non-table base groups replaced by a new table group.
    pub groups_replaced: usize,
    /// Non-table base groups left alone under keep-base.
    pub groups_kept: usize,
    /// Non-table groups of the new data, never merged.
    pub groups_skipped: usize,
    pub items_added: usize,
    pub items_overwritten: usize,
    /// Colliding items where the base value was kept.
    pub items_kept: usize,
}

impl MergeStats {
    /// Number of additions and replacements applied to the base.
    pub fn changes(&self) -> usize {
        self.groups_added + self.groups_replaced + self.items_added + self.items_overwritten
    }
}

/// Merge `new` into `base`; `overwrite` selects take-new over keep-base.
///
/// The returned document is the merged state. It is not canonicalized.
pub fn merge(base: Document, new: Document, overwrite: bool) -> Document {
    merge_tracked(base, new, ConflictPolicy::from_overwrite(overwrite)).0
}

/// [`merge`] with an explicit policy, also returning what changed.
pub fn merge_tracked(mut base: Document, new: Document, policy: ConflictPolicy) -> (Document, MergeStats) {
    let mut stats = MergeStats::default();
    let groups = base.groups_mut();

    for (group, incoming) in new.into_table() {
        // New data can only introduce or extend table groups.
        let Value::Table(items) = incoming else {
            debug!(%group, "skipping non-table group in new data");
            stats.groups_skipped += 1;
            continue;
        };

        match groups.get_mut(&group) {
            None => {
                debug!(%group, items = items.len(), "adding group");
                stats.groups_added += 1;
                groups.insert(group, Value::Table(items));
            }
            Some(Value::Table(base_items)) => merge_items(base_items, items, policy, &mut stats),
            Some(existing) if policy.overwrites() => {
                debug!(%group, "replacing non-table base group");
                stats.groups_replaced += 1;
                *existing = Value::Table(items);
            }
            Some(_) => {
                debug!(%group, "keeping non-table base group");
                stats.groups_kept += 1;
            }
        }
    }

    (base, stats)
}

fn merge_items(base_items: &mut Table, items: Table, policy: ConflictPolicy, stats: &mut MergeStats) {
    for (key, value) in items {
        match base_items.get_mut(&key) {
            None => {
                stats.items_added += 1;
                base_items.insert(key, value);
            }
            Some(slot) if policy.overwrites() => {
                stats.items_overwritten += 1;
                *slot = value;
            }
            Some(_) => stats.items_kept += 1,
        }
    }
}
