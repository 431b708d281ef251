//! Structural conformance: prune a target down to a canonical structure.
//!
//! Only the canonical document's table groups form the reference. A target
//! keeps a group only if the reference has it and the target's group is a
//! table; inside it, an item survives only if its key exists in the
//! reference group. Values are never compared. Groups left empty are
//! dropped, and nothing is ever added.

use catsync_types::{Document, Table, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The table-groups-only view of a canonical document.
#[derive(Clone, Debug)]
pub struct StructuralReference<'a> {
    groups: Vec<(&'a str, &'a Table)>,
}

impl<'a> StructuralReference<'a> {
    /// Build the reference; non-table groups of `canonical` are left out.
    pub fn from_canonical(canonical: &'a Document) -> Self {
        let groups = canonical
            .table_groups()
            .map(|(group, items)| (group.as_str(), items))
            .collect();
        Self { groups }
    }

    /// Number of groups that can gate target content.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Prune `target` to this reference. The result is a new document in
    /// reference group order, with items in target order.
    pub fn prune(&self, target: &Document) -> Document {
        let mut pruned = Document::new();
        for &(group, reference_items) in &self.groups {
            let Some(target_items) = target.get(group).and_then(Value::as_table) else {
                continue;
            };
            let kept: Table = target_items
                .iter()
                .filter(|(key, _)| reference_items.contains_key(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            if kept.is_empty() {
                debug!(%group, "dropping group with no conforming items");
                continue;
            }
            pruned.insert(group, Value::Table(kept));
        }
        pruned
    }

    /// [`prune`](Self::prune), also reporting what was removed.
    pub fn prune_tracked(&self, target: &Document) -> (Document, PruneStats) {
        let pruned = self.prune(target);
        let stats = PruneStats::measure(target, &pruned);
        (pruned, stats)
    }
}

/// Prune `target` to the group/item structure of `canonical`.
pub fn prune(canonical: &Document, target: &Document) -> Document {
    StructuralReference::from_canonical(canonical).prune(target)
}

/// Before/after sizes of a pruned document.
///
/// Every top-level key of the target counts as a group, so dropped
/// non-table groups show up as removed groups. Items are counted inside
/// table groups only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneStats {
    pub groups_before: usize,
    pub groups_after: usize,
    pub items_before: usize,
    pub items_after: usize,
}

impl PruneStats {
    pub fn measure(before: &Document, after: &Document) -> Self {
        Self {
            groups_before: before.len(),
            groups_after: after.len(),
            items_before: before.item_count(),
            items_after: after.item_count(),
        }
    }

    pub fn groups_removed(&self) -> usize {
        self.groups_before.saturating_sub(self.groups_after)
    }

    pub fn items_removed(&self) -> usize {
        self.items_before.saturating_sub(self.items_after)
    }

    /// `true` when pruning removed nothing.
    pub fn is_unchanged(&self) -> bool {
        self.groups_removed() == 0 && self.items_removed() == 0
    }
}
