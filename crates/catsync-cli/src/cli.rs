use std::path::PathBuf;

use catsync_merge::{ConflictPolicy, MergeOptions, OutputTarget};
use catsync_types::LocaleId;
use clap::{Args, Parser, Subcommand};

use crate::error::CliError;

#[derive(Parser)]
#[command(
    name = "catsync",
    about = "Keep per-locale translation catalogs structurally in sync",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge <ll>.json into copy_<ll>.json or <ll>_copy.json
    Merge(MergeArgs),
    /// Prune every other base document to the structure of one base
    Prune(PruneArgs),
    /// List locales that have both new data and a base document
    Locales(LocalesArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// Two letters identifying the locale, e.g. 'ab'
    pub locale: Option<String>,
    /// Merge every locale found in the directory
    #[arg(long)]
    pub all: bool,
    /// Replace existing base values with new data
    #[arg(long)]
    pub overwrite: bool,
    /// Catalog directory (default: nearest 'messages' ancestor)
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// Output file, single locale only
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Output directory for merged_<ll>.json files, with --all only
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Overwrite the base document instead of writing merged_<ll>.json
    #[arg(long)]
    pub in_place: bool,
}

/// Which locales a merge run covers.
#[derive(Debug, PartialEq, Eq)]
pub enum MergeMode {
    Single(LocaleId),
    Bulk,
}

impl MergeArgs {
    /// Check flag combinations before any file is touched.
    pub fn mode(&self) -> Result<MergeMode, CliError> {
        let invalid = |msg: &str| Err(CliError::InvalidArgumentCombination(msg.into()));

        if self.in_place && (self.out.is_some() || self.out_dir.is_some()) {
            return invalid("--in-place cannot be combined with --out or --out-dir");
        }
        if self.all {
            if self.locale.is_some() {
                return invalid("a locale and --all are mutually exclusive");
            }
            if self.out.is_some() {
                return invalid("--out cannot be used with --all; use --out-dir or --in-place instead");
            }
            return Ok(MergeMode::Bulk);
        }
        if self.out_dir.is_some() {
            return invalid("--out-dir is only valid with --all; use --out for a single locale");
        }
        match &self.locale {
            Some(locale) => Ok(MergeMode::Single(LocaleId::parse(locale)?)),
            None => invalid("provide two letters (e.g. 'ab') or use --all"),
        }
    }

    pub fn options(&self) -> MergeOptions {
        let output = if self.in_place {
            OutputTarget::InPlace
        } else if let Some(out) = &self.out {
            OutputTarget::File(out.clone())
        } else if let Some(dir) = &self.out_dir {
            OutputTarget::Directory(dir.clone())
        } else {
            OutputTarget::BesideInputs
        };
        MergeOptions {
            policy: ConflictPolicy::from_overwrite(self.overwrite),
            output,
        }
    }
}

#[derive(Args)]
pub struct PruneArgs {
    /// Two letters identifying the canonical base document
    pub locale: String,
    /// Catalog directory (default: nearest 'messages' ancestor)
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// Report planned removals without modifying files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct LocalesArgs {
    /// Catalog directory (default: nearest 'messages' ancestor)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}
