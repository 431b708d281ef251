use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use catsync_merge::{MergeOptions, MergeOutcome};
use catsync_prune::{PruneOptions, PruneReport, TargetStatus};
use catsync_store::{display_name, CatalogConfig, DocumentStore};
use catsync_types::LocaleId;
use colored::Colorize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Merge(args) => cmd_merge(&config, args),
        Command::Prune(args) => cmd_prune(&config, args),
        Command::Locales(args) => cmd_locales(&config, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CatalogConfig> {
    match path {
        Some(path) => Ok(CatalogConfig::load(path)?),
        None => Ok(CatalogConfig::default()),
    }
}

fn open_store(config: &CatalogConfig, dir: Option<PathBuf>) -> anyhow::Result<DocumentStore> {
    let directory = match dir {
        Some(dir) => dir,
        None => config
            .default_directory()
            .context("cannot determine the catalog directory")?,
    };
    Ok(DocumentStore::new(directory, config.clone()))
}

fn cmd_merge(config: &CatalogConfig, args: MergeArgs) -> anyhow::Result<()> {
    let mode = args.mode()?;
    let options = args.options();
    let store = open_store(config, args.dir)?;

    match mode {
        MergeMode::Single(locale) => {
            let outcome = catsync_merge::process(&store, &locale, &options)?;
            print_merged(&outcome);
            Ok(())
        }
        MergeMode::Bulk => merge_all(&store, &options),
    }
}

fn merge_all(store: &DocumentStore, options: &MergeOptions) -> anyhow::Result<()> {
    let batch = catsync_merge::process_all(store, options)?;
    if batch.attempted() == 0 {
        println!("No locales with both new data and a base file found. Nothing to do.");
        return Ok(());
    }

    let names: Vec<&str> = batch.locales().map(LocaleId::as_str).collect();
    println!("Found {} locale(s): {}", batch.attempted(), names.join(", ").bold());
    for (_, result) in &batch.results {
        match result {
            Ok(outcome) => print_merged(outcome),
            Err(e) => eprintln!("{} {}", "Skipped:".red(), e),
        }
    }

    println!("\nDone. {}/{} merged.", batch.succeeded(), batch.attempted());
    if batch.failed() > 0 {
        bail!("{} of {} locale(s) could not be merged", batch.failed(), batch.attempted());
    }
    Ok(())
}

fn print_merged(outcome: &MergeOutcome) {
    let saved = if outcome.in_place {
        "in place".to_string()
    } else {
        format!("→ {}", outcome.output_path.display())
    };
    println!(
        "{} [{}] Merged '{}' → base '{}' ({}), saved {}",
        "✓".green().bold(),
        outcome.locale.as_str().yellow(),
        display_name(&outcome.new_path),
        outcome.base.file_name(),
        outcome.policy.label().cyan(),
        saved,
    );
    tracing::debug!(locale = %outcome.locale, stats = ?outcome.stats, "merge stats");
}

fn cmd_prune(config: &CatalogConfig, args: PruneArgs) -> anyhow::Result<()> {
    let locale = LocaleId::parse(&args.locale)?;
    let store = open_store(config, args.dir)?;
    println!("Working directory: {}", store.directory().display());

    let options = PruneOptions { dry_run: args.dry_run };
    let report = catsync_prune::process(&store, &locale, options)?;
    print_prune_report(&report);

    if report.failed() > 0 {
        bail!("{} of {} file(s) could not be pruned", report.failed(), report.targets.len());
    }
    Ok(())
}

fn print_prune_report(report: &PruneReport) {
    println!("Base file: {}", report.canonical.file_name().bold());
    if report.targets.is_empty() {
        println!("No other base files found to prune. Nothing to do.");
        return;
    }
    println!("Found {} other base file(s) to check.\n", report.targets.len());

    for outcome in &report.targets {
        let name = outcome.target.file_name();
        match &outcome.status {
            TargetStatus::Unchanged => println!("- {}: {}", name, "no changes".dimmed()),
            TargetStatus::Pruned { stats, written } => {
                let suffix = if *written { "✓".green().to_string() } else { "(dry-run)".yellow().to_string() };
                println!(
                    "- {}: remove {} groups, {} items {}",
                    name,
                    stats.groups_removed(),
                    stats.items_removed(),
                    suffix,
                );
            }
            TargetStatus::Failed(e) => eprintln!("- {}: {} {}", name, "failed:".red(), e),
        }
    }

    if report.dry_run {
        println!("\nDry run complete. No files were modified.");
    } else {
        println!("\nDone.");
    }
}

fn cmd_locales(config: &CatalogConfig, args: LocalesArgs) -> anyhow::Result<()> {
    let store = open_store(config, args.dir)?;
    let locales = store.discover_locales()?;
    if locales.is_empty() {
        println!("No locales found in {}.", store.directory().display());
    }
    for locale in locales {
        println!("{locale}");
    }
    Ok(())
}
