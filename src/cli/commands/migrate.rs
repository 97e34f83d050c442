//! The migrate command: scan, rewrite, extract.
//!
//! Dry-run by default. `--apply` writes the rewritten sources, the updated
//! store, and newly added locale keys in one pass; without it the command
//! reports what would change and discards everything. Any per-file failure
//! (parse error, unsupported replacement position) aborts the remaining
//! queue; files written before the failure stay on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use regex::Regex;

use crate::cli::args::MigrateCommand;
use crate::cli::exit_status::ExitStatus;
use crate::config::Config;
use crate::engine::rewrite_source;
use crate::file_scanner::scan_files;
use crate::reporter;
use crate::store::{ResourceStore, locale::sync_locale_file};

use super::CommandContext;

struct MigrateSummary {
    changed_files: usize,
    new_keys: usize,
    warning_count: usize,
}

pub fn migrate(cmd: MigrateCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::build(&cmd.args.common)?;
    let config = &ctx.config;
    let date_patterns = config.date_regexes()?;

    let store_path = ctx.store_path();
    let mut store = ResourceStore::load(&store_path, &config.key_prefix)?;

    let files: Vec<PathBuf> = if cmd.paths.is_empty() {
        scan_files(
            &ctx.base_dir.to_string_lossy(),
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
            ctx.verbose,
        )
        .files
    } else {
        cmd.paths.clone()
    };

    let summary = process_files(
        &files,
        &ctx.base_dir,
        config,
        &date_patterns,
        &mut store,
        cmd.args.apply,
        ctx.verbose,
    )?;

    if cmd.args.apply {
        store.save(&store_path)?;
        let projection = store.project();
        for locale_file in &config.locale_files {
            let report = sync_locale_file(&ctx.locale_path(locale_file), &projection, false)?;
            if ctx.verbose || !report.is_unchanged() {
                reporter::print_sync_report(locale_file, &report);
            }
        }
    }

    reporter::print_migrate_summary(
        files.len(),
        summary.changed_files,
        summary.new_keys,
        summary.warning_count,
        cmd.args.apply,
    );

    if summary.warning_count > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

/// Rewrite every file in order. Errors abort the queue immediately; outputs
/// written for earlier files are kept.
fn process_files(
    files: &[PathBuf],
    base_dir: &Path,
    config: &Config,
    date_patterns: &[Regex],
    store: &mut ResourceStore,
    apply: bool,
    verbose: bool,
) -> Result<MigrateSummary> {
    let mut summary = MigrateSummary {
        changed_files: 0,
        new_keys: 0,
        warning_count: 0,
    };

    for file in files {
        let source = fs::read_to_string(file)
            .with_context(|| format!("Failed to read source file: {:?}", file))?;
        let rel = file
            .strip_prefix(base_dir)
            .unwrap_or(file)
            .to_string_lossy()
            .into_owned();

        let outcome = rewrite_source(&source, &rel, config, date_patterns, store)
            .with_context(|| format!("Failed to process {}", rel))?;

        if !outcome.warnings.is_empty() {
            summary.warning_count += outcome.warnings.len();
            reporter::print_warnings(&rel, &outcome.warnings);
        }

        if let Some(code) = outcome.code {
            summary.changed_files += 1;
            if verbose {
                println!(
                    "  {} ({} new {})",
                    rel,
                    outcome.entries.len(),
                    if outcome.entries.len() == 1 {
                        "key"
                    } else {
                        "keys"
                    }
                );
            }
            if apply {
                let target = if config.rewrite_in_place {
                    file.clone()
                } else {
                    base_dir.join(&config.output_dir).join(&rel)
                };
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create directory: {:?}", parent))?;
                }
                fs::write(&target, code)
                    .with_context(|| format!("Failed to write rewritten file: {:?}", target))?;
            }
        }

        summary.new_keys += outcome.entries.len();
        store.merge_entries(outcome.entries);
    }

    Ok(summary)
}
