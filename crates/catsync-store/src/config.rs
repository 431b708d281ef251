use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Configuration for locating and writing catalog documents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory name searched for among the ancestors of the working
    /// directory when no directory is given explicitly.
    pub domain_name: String,
    /// Directory used when no ancestor matches `domain_name`. `None` means
    /// the current working directory.
    pub fallback: Option<PathBuf>,
    /// File extension of catalog documents, without the leading dot.
    pub extension: String,
    /// Spaces per indentation level when saving; `0` writes compact JSON.
    pub indent: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            domain_name: "messages".into(),
            fallback: None,
            extension: "json".into(),
            indent: 2,
        }
    }
}

impl CatalogConfig {
    /// Parse a TOML configuration. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(text)?;
        config.extension = config.extension.trim_start_matches('.').to_string();
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let config = Self::from_toml_str(&text).map_err(|e| StoreError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate().map_err(|reason| StoreError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        tracing::debug!(path = %path.display(), "loaded catalog configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.domain_name.trim().is_empty() {
            return Err("domain_name must not be empty".into());
        }
        if self.extension.is_empty() {
            return Err("extension must not be empty".into());
        }
        if self.extension.contains(['/', '\\']) {
            return Err(format!("extension must not contain a path separator: {:?}", self.extension));
        }
        Ok(())
    }

    /// Pick the catalog directory starting the ancestor search at `start`.
    ///
    /// Returns the nearest ancestor of `start` (inclusive) whose name equals
    /// `domain_name` ignoring case, else `fallback`, else `start`.
    pub fn resolve_directory(&self, start: &Path) -> PathBuf {
        let found = start.ancestors().find(|dir| {
            dir.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.eq_ignore_ascii_case(&self.domain_name))
                .unwrap_or(false)
        });
        match found {
            Some(dir) => dir.to_path_buf(),
            None => self.fallback.clone().unwrap_or_else(|| start.to_path_buf()),
        }
    }

    /// [`resolve_directory`](Self::resolve_directory) from the current
    /// working directory.
    pub fn default_directory(&self) -> StoreResult<PathBuf> {
        let cwd = std::env::current_dir().map_err(|e| StoreError::io(".", e))?;
        Ok(self.resolve_directory(&cwd))
    }
}
