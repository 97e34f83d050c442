//! Report formatting and printing utilities.
//!
//! This module is separate from the core library logic to allow zhlift
//! to be used as a library without printing side effects.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

/// Success mark for consistent output formatting
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Failure mark for consistent output formatting
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

use crate::engine::{RewriteWarning, WarningKind};
use crate::store::locale::SyncReport;

/// Print the warnings collected while rewriting one file, cargo-style:
/// severity line, clickable location, source context with a caret.
pub fn print_warnings(file: &str, warnings: &[RewriteWarning]) {
    let max_line_width = warnings
        .iter()
        .map(|w| w.line.to_string().len())
        .max()
        .unwrap_or(1);

    for warning in warnings {
        let label = match warning.kind {
            WarningKind::UnresolvedExpression => "unresolved-expression",
            WarningKind::NoRootFound => "no-root-found",
        };
        println!(
            "{}: {}  {}",
            "warning".bold().yellow(),
            warning.message,
            label.dimmed().cyan()
        );
        println!(
            "  {} {}:{}:{}",
            "-->".blue(),
            file,
            warning.line,
            warning.col
        );

        println!("{:>width$} {}", "", "|".blue(), width = max_line_width);
        println!(
            "{:>width$} {} {}",
            warning.line.to_string().blue(),
            "|".blue(),
            warning.source_line,
            width = max_line_width
        );
        // Caret positioning uses display width, so CJK text lines up.
        let prefix: String = warning
            .source_line
            .chars()
            .take(warning.col.saturating_sub(1))
            .collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        println!(
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            "^".yellow(),
            width = max_line_width,
            padding = caret_padding
        );
        println!();
    }
}

/// Print the migrate summary line.
pub fn print_migrate_summary(
    scanned_files: usize,
    changed_files: usize,
    new_keys: usize,
    warnings: usize,
    applied: bool,
) {
    let mode = if applied {
        String::new()
    } else {
        format!(" {}", "(dry run, use --apply to write)".dimmed())
    };
    println!(
        "{} {}{}",
        SUCCESS_MARK.green(),
        format!(
            "Scanned {} {}: {} rewritten, {} new {}",
            scanned_files,
            if scanned_files == 1 { "file" } else { "files" },
            changed_files,
            new_keys,
            if new_keys == 1 { "key" } else { "keys" },
        )
        .green(),
        mode
    );
    if warnings > 0 {
        println!(
            "{} {} {} skipped (see above)",
            FAILURE_MARK.yellow(),
            warnings,
            if warnings == 1 {
                "expression"
            } else {
                "expressions"
            }
        );
    }
}

/// Print what a sync pass did to one locale file.
pub fn print_sync_report(locale_file: &str, report: &SyncReport) {
    if report.is_unchanged() {
        println!("{} {}: up to date", SUCCESS_MARK.green(), locale_file);
        return;
    }
    println!(
        "{} {}: {} added, {} removed",
        SUCCESS_MARK.green(),
        locale_file,
        report.added.len(),
        report.removed.len()
    );
    for key in &report.added {
        println!("  {} {}", "+".green(), key);
    }
    for key in &report.removed {
        println!("  {} {}", "-".red(), key);
    }
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(parse_error_count: usize, verbose: bool) {
    if parse_error_count > 0 && !verbose {
        eprintln!(
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            parse_error_count,
            "-v".cyan()
        );
    }
}
