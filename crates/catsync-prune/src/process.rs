//! Pruning every sibling base document of a directory on disk.

use catsync_store::{BaseDocument, DocumentStore, StoreError};
use catsync_types::LocaleId;
use tracing::{debug, info};

use crate::engine::{PruneStats, StructuralReference};
use crate::error::PruneResult;

/// Options for one conformance run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PruneOptions {
    /// Compute and report removals without writing anything.
    pub dry_run: bool,
}

/// What happened to one target document.
#[derive(Debug)]
pub enum TargetStatus {
    /// Already conforming; the file was not touched.
    Unchanged,
    /// Content was removed. `written` is `false` in dry-run mode.
    Pruned { stats: PruneStats, written: bool },
    /// The target could not be loaded or saved.
    Failed(StoreError),
}

#[derive(Debug)]
pub struct TargetOutcome {
    pub target: BaseDocument,
    pub status: TargetStatus,
}

/// Results of pruning every sibling of a canonical document.
#[derive(Debug)]
pub struct PruneReport {
    pub canonical: BaseDocument,
    /// Number of table groups in the canonical document.
    pub reference_groups: usize,
    pub dry_run: bool,
    pub targets: Vec<TargetOutcome>,
}

impl PruneReport {
    pub fn failed(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t.status, TargetStatus::Failed(_)))
            .count()
    }

    pub fn changed(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t.status, TargetStatus::Pruned { .. }))
            .count()
    }
}

/// Prune every other base document in the store's directory to the
/// structure of the base document of `canonical_locale`.
///
/// A missing or unreadable canonical document fails the whole run. A failing
/// target is recorded and the remaining targets are still processed. Each
/// target is written at most once, in place, and only when something was
/// removed.
pub fn process(
    store: &DocumentStore,
    canonical_locale: &LocaleId,
    options: PruneOptions,
) -> PruneResult<PruneReport> {
    let canonical = store.locate_base(canonical_locale)?.ok_or_else(|| StoreError::MissingInput {
        locale: canonical_locale.clone(),
        reason: format!(
            "base file not found (tried '{}')",
            store.base_candidates(canonical_locale).join("' and '")
        ),
    })?;
    let canonical_doc = store.load(&canonical.path)?;
    let reference = StructuralReference::from_canonical(&canonical_doc);
    debug!(path = %canonical.path.display(), groups = reference.len(), "built structural reference");

    let targets = store
        .sibling_bases(canonical_locale)?
        .into_iter()
        .map(|target| {
            let status = prune_target(store, &reference, &target, options);
            TargetOutcome { target, status }
        })
        .collect();

    Ok(PruneReport {
        reference_groups: reference.len(),
        canonical,
        dry_run: options.dry_run,
        targets,
    })
}

fn prune_target(
    store: &DocumentStore,
    reference: &StructuralReference<'_>,
    target: &BaseDocument,
    options: PruneOptions,
) -> TargetStatus {
    let document = match store.load(&target.path) {
        Ok(document) => document,
        Err(e) => {
            debug!(path = %target.path.display(), error = %e, "target not pruned");
            return TargetStatus::Failed(e);
        }
    };

    let (pruned, stats) = reference.prune_tracked(&document);
    if stats.is_unchanged() {
        return TargetStatus::Unchanged;
    }
    if options.dry_run {
        return TargetStatus::Pruned { stats, written: false };
    }
    match store.save(&target.path, &pruned) {
        Ok(()) => {
            info!(
                path = %target.path.display(),
                groups_removed = stats.groups_removed(),
                items_removed = stats.items_removed(),
                "pruned target"
            );
            TargetStatus::Pruned { stats, written: true }
        }
        Err(e) => TargetStatus::Failed(e),
    }
}
