use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use catsync_types::{Document, LocaleId};
use tracing::debug;

use crate::config::CatalogConfig;
use crate::error::{StoreError, StoreResult};
use crate::io::{load_document, save_document};
use crate::naming::{self, BaseConvention};

/// A located base document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseDocument {
    pub locale: LocaleId,
    pub path: PathBuf,
    pub convention: BaseConvention,
}

impl BaseDocument {
    /// File name component of the path, for display.
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

/// Resolves locale identifiers to catalog documents inside one directory.
///
/// The store holds no documents: every `load` reads fresh from disk and
/// every `save` writes the complete document.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    directory: PathBuf,
    config: CatalogConfig,
}

impl DocumentStore {
    pub fn new(directory: impl Into<PathBuf>, config: CatalogConfig) -> Self {
        Self {
            directory: directory.into(),
            config,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn load(&self, path: &Path) -> StoreResult<Document> {
        load_document(path)
    }

    pub fn save(&self, path: &Path, document: &Document) -> StoreResult<()> {
        save_document(path, document, self.config.indent)
    }

    /// Conventional base file names for `locale`, in lookup order.
    pub fn base_candidates(&self, locale: &LocaleId) -> Vec<String> {
        BaseConvention::ORDER
            .iter()
            .map(|convention| convention.file_name(locale, &self.config.extension))
            .collect()
    }

    /// Find the base document for `locale`: the first convention with an
    /// existing file wins. `Ok(None)` means no candidate exists, including
    /// when the directory itself is missing.
    pub fn locate_base(&self, locale: &LocaleId) -> StoreResult<Option<BaseDocument>> {
        let mut names: Option<Vec<String>> = None;
        for convention in BaseConvention::ORDER {
            let exact = self
                .directory
                .join(convention.file_name(locale, &self.config.extension));
            let path = if exact.is_file() {
                Some(exact)
            } else {
                if names.is_none() {
                    names = Some(self.existing_file_names()?);
                }
                names
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .find(|name| convention.parse(name, &self.config.extension).as_ref() == Some(locale))
                    .map(|name| self.directory.join(name))
            };
            if let Some(path) = path {
                debug!(%locale, path = %path.display(), ?convention, "located base document");
                return Ok(Some(BaseDocument {
                    locale: locale.clone(),
                    path,
                    convention,
                }));
            }
        }
        debug!(%locale, "no base document");
        Ok(None)
    }

    /// Path of the new-data document for `locale`. An existing file whose
    /// name differs only in case is preferred; otherwise the conventional
    /// path is returned whether or not it exists.
    pub fn locate_new(&self, locale: &LocaleId) -> StoreResult<PathBuf> {
        let exact = self
            .directory
            .join(naming::new_data_file_name(locale, &self.config.extension));
        if exact.is_file() {
            return Ok(exact);
        }
        let variant = self.existing_file_names()?.into_iter().find(|name| {
            naming::parse_new_data_file_name(name, &self.config.extension).as_ref() == Some(locale)
        });
        Ok(variant.map(|name| self.directory.join(name)).unwrap_or(exact))
    }

    /// Locales that have both a new-data document and at least one base
    /// candidate.
    pub fn discover_locales(&self) -> StoreResult<BTreeSet<LocaleId>> {
        let names = self.list_file_names()?;
        let extension = &self.config.extension;

        let with_base: BTreeSet<LocaleId> = names
            .iter()
            .filter_map(|name| {
                BaseConvention::ORDER
                    .iter()
                    .find_map(|convention| convention.parse(name, extension))
            })
            .collect();

        let locales: BTreeSet<LocaleId> = names
            .iter()
            .filter_map(|name| naming::parse_new_data_file_name(name, extension))
            .filter(|locale| with_base.contains(locale))
            .collect();

        debug!(directory = %self.directory.display(), count = locales.len(), "discovered locales");
        Ok(locales)
    }

    /// Every base document in the directory whose locale is not `exclude`,
    /// sorted by file name.
    pub fn sibling_bases(&self, exclude: &LocaleId) -> StoreResult<Vec<BaseDocument>> {
        let extension = &self.config.extension;
        let siblings = self
            .list_file_names()?
            .into_iter()
            .filter_map(|name| {
                BaseConvention::ORDER.iter().find_map(|&convention| {
                    convention
                        .parse(&name, extension)
                        .map(|locale| BaseDocument {
                            locale,
                            path: self.directory.join(&name),
                            convention,
                        })
                })
            })
            .filter(|base| &base.locale != exclude)
            .collect();
        Ok(siblings)
    }

    /// Output path `merged_<ll>.<ext>` inside `out_dir`, or beside the
    /// inputs when `out_dir` is `None`. The target directory is created.
    pub fn merged_path(&self, out_dir: Option<&Path>, locale: &LocaleId) -> StoreResult<PathBuf> {
        let target = out_dir.unwrap_or(self.directory.as_path());
        fs::create_dir_all(target).map_err(|e| StoreError::io(target, e))?;
        Ok(target.join(naming::merged_file_name(locale, &self.config.extension)))
    }

    /// Like [`list_file_names`](Self::list_file_names), but a missing
    /// directory holds no files.
    fn existing_file_names(&self) -> StoreResult<Vec<String>> {
        match self.list_file_names() {
            Err(StoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(directory = %self.directory.display(), "directory does not exist");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Regular file names in the directory, sorted.
    fn list_file_names(&self) -> StoreResult<Vec<String>> {
        let entries = fs::read_dir(&self.directory).map_err(|e| StoreError::io(&self.directory, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.directory, e))?;
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Last path component as a lossy string.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
