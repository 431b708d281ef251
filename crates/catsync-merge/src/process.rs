//! Merging a locale's documents on disk.

use std::fs;
use std::path::{Path, PathBuf};

use catsync_store::{display_name, BaseDocument, DocumentStore, StoreError};
use catsync_types::LocaleId;
use tracing::{debug, info};

use crate::engine::{merge_tracked, ConflictPolicy, MergeStats};
use crate::error::{MergeError, MergeResult};

/// Where the merged document is written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// `merged_<ll>.<ext>` next to the inputs.
    #[default]
    BesideInputs,
    /// `merged_<ll>.<ext>` inside the given directory.
    Directory(PathBuf),
    /// Exactly this file. Only meaningful for a single locale.
    File(PathBuf),
    /// Over the located base document.
    InPlace,
}

/// Options for one merge run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub policy: ConflictPolicy,
    pub output: OutputTarget,
}

/// The result of merging one locale.
#[derive(Clone, Debug)]
pub struct MergeOutcome {
    pub locale: LocaleId,
    pub base: BaseDocument,
    pub new_path: PathBuf,
    pub output_path: PathBuf,
    pub policy: ConflictPolicy,
    pub in_place: bool,
    pub stats: MergeStats,
}

/// Merge the new-data document of `locale` into its base and write the
/// canonicalized result.
///
/// Fails with [`StoreError::MissingInput`] when either document is absent.
/// Nothing is written unless both documents load and the merge completes.
pub fn process(store: &DocumentStore, locale: &LocaleId, options: &MergeOptions) -> MergeResult<MergeOutcome> {
    let base = store.locate_base(locale)?.ok_or_else(|| {
        let tried = store.base_candidates(locale);
        StoreError::MissingInput {
            locale: locale.clone(),
            reason: format!("base file not found (tried '{}')", tried.join("' and '")),
        }
    })?;

    let new_path = store.locate_new(locale)?;
    if !new_path.is_file() {
        return Err(StoreError::MissingInput {
            locale: locale.clone(),
            reason: format!("new data file '{}' not found", display_name(&new_path)),
        }
        .into());
    }

    let base_doc = store.load(&base.path)?;
    let new_doc = store.load(&new_path)?;
    let (merged, stats) = merge_tracked(base_doc, new_doc, options.policy);
    let merged = merged.canonicalize();
    debug!(%locale, ?stats, "merged documents");

    let output_path = match &options.output {
        OutputTarget::InPlace => base.path.clone(),
        OutputTarget::File(path) => {
            ensure_parent(path)?;
            path.clone()
        }
        OutputTarget::Directory(dir) => store.merged_path(Some(dir), locale)?,
        OutputTarget::BesideInputs => store.merged_path(None, locale)?,
    };
    store.save(&output_path, &merged)?;
    info!(%locale, output = %output_path.display(), policy = options.policy.label(), "merge written");

    Ok(MergeOutcome {
        locale: locale.clone(),
        base,
        new_path,
        output_path,
        policy: options.policy,
        in_place: options.output == OutputTarget::InPlace,
        stats,
    })
}

fn ensure_parent(path: &Path) -> MergeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Per-locale results of a bulk merge.
#[derive(Debug, Default)]
pub struct MergeBatch {
    pub results: Vec<(LocaleId, MergeResult<MergeOutcome>)>,
}

impl MergeBatch {
    /// Number of locales attempted.
    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    pub fn locales(&self) -> impl Iterator<Item = &LocaleId> + '_ {
        self.results.iter().map(|(locale, _)| locale)
    }
}

/// Merge every discovered locale. A failing locale is recorded and the
/// sweep continues with the next one.
pub fn process_all(store: &DocumentStore, options: &MergeOptions) -> MergeResult<MergeBatch> {
    if matches!(options.output, OutputTarget::File(_)) {
        return Err(MergeError::SingleOutputInBatch);
    }
    let locales = store.discover_locales()?;
    let results = locales
        .into_iter()
        .map(|locale| {
            let result = process(store, &locale, options);
            if let Err(e) = &result {
                debug!(%locale, error = %e, "locale not merged");
            }
            (locale, result)
        })
        .collect();
    Ok(MergeBatch { results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use catsync_store::{BaseConvention, CatalogConfig};

    fn locale(s: &str) -> LocaleId {
        LocaleId::parse(s).unwrap()
    }

    fn setup(files: &[(&str, &str)]) -> (tempfile::TempDir, DocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let store = DocumentStore::new(dir.path(), CatalogConfig::default());
        (dir, store)
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    const BASE: &str = r#"{"common": {"hello": "hi"}}"#;
    const NEW: &str = r#"{"common": {"hello": "hey", "bye": "bye"}}"#;

    #[test]
    fn writes_merged_file_beside_inputs() {
        let (dir, store) = setup(&[("copy_ab.json", BASE), ("ab.json", NEW)]);
        let outcome = process(&store, &locale("ab"), &MergeOptions::default()).unwrap();

        assert_eq!(outcome.output_path, dir.path().join("merged_ab.json"));
        assert_eq!(
            read(&outcome.output_path),
            "{\n  \"common\": {\n    \"bye\": \"bye\",\n    \"hello\": \"hi\"\n  }\n}"
        );
        assert_eq!(read(&dir.path().join("copy_ab.json")), BASE);
        assert_eq!(outcome.stats.items_added, 1);
        assert_eq!(outcome.stats.items_kept, 1);
        assert!(!outcome.in_place);
    }

    #[test]
    fn overwrite_in_place_replaces_base() {
        let (dir, store) = setup(&[("ab_copy.json", BASE), ("ab.json", NEW)]);
        let options = MergeOptions {
            policy: ConflictPolicy::TakeNew,
            output: OutputTarget::InPlace,
        };
        let outcome = process(&store, &locale("ab"), &options).unwrap();

        assert_eq!(outcome.base.convention, BaseConvention::Suffixed);
        assert_eq!(outcome.output_path, dir.path().join("ab_copy.json"));
        assert!(read(&outcome.output_path).contains("\"hello\": \"hey\""));
        assert!(!dir.path().join("merged_ab.json").exists());
    }

    #[test]
    fn explicit_output_file_creates_parents() {
        let (dir, store) = setup(&[("copy_ab.json", BASE), ("ab.json", NEW)]);
        let out = dir.path().join("build").join("ab.merged.json");
        let options = MergeOptions {
            output: OutputTarget::File(out.clone()),
            ..Default::default()
        };
        let outcome = process(&store, &locale("ab"), &options).unwrap();
        assert_eq!(outcome.output_path, out);
        assert!(out.is_file());
    }

    #[test]
    fn output_directory_is_created() {
        let (dir, store) = setup(&[("copy_ab.json", BASE), ("ab.json", NEW)]);
        let out_dir = dir.path().join("merged");
        let options = MergeOptions {
            output: OutputTarget::Directory(out_dir.clone()),
            ..Default::default()
        };
        let outcome = process(&store, &locale("ab"), &options).unwrap();
        assert_eq!(outcome.output_path, out_dir.join("merged_ab.json"));
    }

    #[test]
    fn missing_base_names_both_candidates() {
        let (_dir, store) = setup(&[("ab.json", NEW)]);
        let err = process(&store, &locale("ab"), &MergeOptions::default()).unwrap_err();
        assert!(err.is_missing_input());
        let message = err.to_string();
        assert!(message.contains("copy_ab.json"));
        assert!(message.contains("ab_copy.json"));
    }

    #[test]
    fn missing_directory_is_missing_input() {
        let store = DocumentStore::new("/definitely/not/here", CatalogConfig::default());
        let err = process(&store, &locale("ab"), &MergeOptions::default()).unwrap_err();
        assert!(err.is_missing_input());
        assert!(err.to_string().contains("copy_ab.json"));
    }

    #[test]
    fn missing_new_data_is_missing_input() {
        let (_dir, store) = setup(&[("copy_ab.json", BASE)]);
        let err = process(&store, &locale("ab"), &MergeOptions::default()).unwrap_err();
        assert!(err.is_missing_input());
        assert!(err.to_string().contains("'ab.json'"));
    }

    #[test]
    fn non_object_input_fails_before_writing() {
        let (dir, store) = setup(&[("copy_ab.json", BASE), ("ab.json", "[1, 2]")]);
        let err = process(&store, &locale("ab"), &MergeOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::Store(StoreError::NonObjectTopLevel { .. })));
        assert!(!dir.path().join("merged_ab.json").exists());
    }

    #[test]
    fn malformed_base_fails_before_writing() {
        let (dir, store) = setup(&[("copy_ab.json", "{oops"), ("ab.json", NEW)]);
        let options = MergeOptions {
            output: OutputTarget::InPlace,
            ..Default::default()
        };
        let err = process(&store, &locale("ab"), &options).unwrap_err();
        assert!(matches!(err, MergeError::Store(StoreError::MalformedDocument { .. })));
        assert_eq!(read(&dir.path().join("copy_ab.json")), "{oops");
    }

    #[test]
    fn batch_isolates_failing_locales() {
        let (dir, store) = setup(&[
            ("copy_ab.json", BASE),
            ("ab.json", NEW),
            ("cd_copy.json", "not json"),
            ("cd.json", NEW),
            ("ef.json", NEW),
        ]);
        let batch = process_all(&store, &MergeOptions::default()).unwrap();

        let locales: Vec<_> = batch.locales().cloned().collect();
        assert_eq!(locales, vec![locale("ab"), locale("cd")]);
        assert_eq!(batch.attempted(), 2);
        assert_eq!(batch.succeeded(), 1);
        assert_eq!(batch.failed(), 1);
        assert!(dir.path().join("merged_ab.json").is_file());
        assert!(!dir.path().join("merged_cd.json").exists());
    }

    #[test]
    fn batch_rejects_single_output_file() {
        let (dir, store) = setup(&[]);
        let options = MergeOptions {
            output: OutputTarget::File(dir.path().join("x.json")),
            ..Default::default()
        };
        assert!(matches!(process_all(&store, &options), Err(MergeError::SingleOutputInBatch)));
    }

    #[test]
    fn rerun_is_stable() {
        let (_dir, store) = setup(&[("copy_ab.json", BASE), ("ab.json", NEW)]);
        let options = MergeOptions {
            output: OutputTarget::InPlace,
            ..Default::default()
        };
        let first = process(&store, &locale("ab"), &options).unwrap();
        let after_first = read(&first.output_path);
        let second = process(&store, &locale("ab"), &options).unwrap();
        assert_eq!(read(&second.output_path), after_first);
        assert_eq!(second.stats.changes(), 0);
    }
}
