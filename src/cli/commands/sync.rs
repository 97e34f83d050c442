//! The sync command: reconcile store and locale files with the sources.
//!
//! Locale files gain every key the store projection has; with `--clean`,
//! store entries whose keys no longer appear in any source are pruned first
//! and stale locale keys are removed.

use std::fs;

use anyhow::Result;
use colored::Colorize;
use indexmap::IndexSet;

use crate::cli::args::SyncCommand;
use crate::cli::exit_status::ExitStatus;
use crate::engine::used_keys::collect_used_keys;
use crate::file_scanner::scan_files;
use crate::reporter::{self, SUCCESS_MARK};
use crate::store::{ResourceStore, locale::sync_locale_file};

use super::CommandContext;

pub fn sync(cmd: SyncCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::build(&cmd.args.common)?;
    let config = &ctx.config;

    let store_path = ctx.store_path();
    let mut store = ResourceStore::load(&store_path, &config.key_prefix)?;

    let mut parse_error_count = 0;

    if cmd.args.clean {
        let scan = scan_files(
            &ctx.base_dir.to_string_lossy(),
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
            ctx.verbose,
        );

        let mut used: IndexSet<String> = IndexSet::new();
        for file in &scan.files {
            let source = match fs::read_to_string(file) {
                Ok(source) => source,
                Err(err) => {
                    parse_error_count += 1;
                    if ctx.verbose {
                        eprintln!(
                            "{} Cannot read {}: {}",
                            "warning:".bold().yellow(),
                            file.display(),
                            err
                        );
                    }
                    continue;
                }
            };
            match collect_used_keys(&source, &file.to_string_lossy(), &config.call_name) {
                Ok(keys) => used.extend(keys),
                Err(err) => {
                    parse_error_count += 1;
                    if ctx.verbose {
                        eprintln!("{} {:#}", "warning:".bold().yellow(), err);
                    }
                }
            }
        }

        // Unparseable files may still reference keys, so pruning on a
        // partial view would delete live entries.
        if parse_error_count > 0 {
            reporter::print_parse_warning(parse_error_count, ctx.verbose);
            anyhow::bail!("refusing to prune: {} file(s) unreadable", parse_error_count);
        }

        let removed = store.retain_keys(&used);
        if !removed.is_empty() {
            store.save(&store_path)?;
        }
        println!(
            "{} store: {} {} pruned",
            SUCCESS_MARK.green(),
            removed.len(),
            if removed.len() == 1 { "entry" } else { "entries" }
        );
        if ctx.verbose {
            for key in &removed {
                println!("  {} {}", "-".red(), key);
            }
        }
    }

    let projection = store.project();
    let locale_files: Vec<String> = match &cmd.args.locale_file {
        Some(file) => vec![file.clone()],
        None => config.locale_files.clone(),
    };
    for locale_file in &locale_files {
        let report = sync_locale_file(&ctx.locale_path(locale_file), &projection, cmd.args.clean)?;
        reporter::print_sync_report(locale_file, &report);
    }

    Ok(ExitStatus::Success)
}
