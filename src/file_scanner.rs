//! Source file discovery.
//!
//! Walks the configured include roots and returns every JS/TS/JSX/TSX file
//! not matched by an ignore pattern. Results are sorted: key allocation
//! follows file order, so the scan must be deterministic across runs.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Patterns without `*` or `?` wildcards are literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub struct ScanOutcome {
    /// Scannable files in deterministic (sorted) order.
    pub files: Vec<PathBuf>,
    /// Paths the walker could not access.
    pub skipped_count: usize,
}

pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
    verbose: bool,
) -> ScanOutcome {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    // node_modules is never scanned, configured or not.
    if let Ok(pattern) = Pattern::new("**/node_modules/**") {
        glob_patterns.push(pattern);
    }

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            // Literal path mode: ignored by prefix match.
            literal_ignore_paths.push(Path::new(base_dir).join(p));
        }
    }

    if ignore_test_files {
        for p in TEST_FILE_PATTERNS {
            if let Ok(pattern) = Pattern::new(p) {
                glob_patterns.push(pattern);
            }
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![Path::new(base_dir).to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = Path::new(base_dir).join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => {
                        paths.extend(entries.flatten().filter(|entry| entry.is_dir()));
                    }
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid include pattern '{}': {}",
                                "warning:".bold().yellow(),
                                inc,
                                e
                            );
                        }
                    }
                }
            } else {
                let path = Path::new(base_dir).join(inc);
                if path.exists() {
                    paths.push(path);
                } else if verbose {
                    eprintln!(
                        "{} Include path does not exist: {}",
                        "warning:".bold().yellow(),
                        path.display()
                    );
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignored| path.starts_with(ignored))
            {
                continue;
            }
            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_scannable_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanOutcome {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js")
    )
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn names(outcome: &ScanOutcome) -> Vec<String> {
        outcome
            .files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_scan_source_extensions_only() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("app.tsx")).unwrap();
        File::create(dir.path().join("utils.ts")).unwrap();
        File::create(dir.path().join("style.css")).unwrap();
        File::create(dir.path().join("zh-CN.json")).unwrap();

        let result = scan_files(dir.path().to_str().unwrap(), &[], &[], false, false);
        assert_eq!(names(&result), vec!["app.tsx", "utils.ts"]);
    }

    #[test]
    fn test_scan_order_is_sorted() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("zebra.ts")).unwrap();
        File::create(dir.path().join("alpha.ts")).unwrap();
        File::create(dir.path().join("middle.ts")).unwrap();

        let result = scan_files(dir.path().to_str().unwrap(), &[], &[], false, false);
        assert_eq!(names(&result), vec!["alpha.ts", "middle.ts", "zebra.ts"]);
    }

    #[test]
    fn test_node_modules_always_ignored() {
        let dir = tempdir().unwrap();
        let node_modules = dir.path().join("node_modules");
        fs::create_dir(&node_modules).unwrap();
        File::create(node_modules.join("lib.ts")).unwrap();
        File::create(dir.path().join("app.tsx")).unwrap();

        let result = scan_files(dir.path().to_str().unwrap(), &[], &[], false, false);
        assert_eq!(names(&result), vec!["app.tsx"]);
    }

    #[test]
    fn test_scan_with_includes() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();
        File::create(src.join("app.tsx")).unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir(&lib).unwrap();
        File::create(lib.join("utils.ts")).unwrap();

        let result = scan_files(
            dir.path().to_str().unwrap(),
            &["src".to_owned()],
            &[],
            false,
            false,
        );
        assert_eq!(names(&result), vec!["app.tsx"]);
    }

    #[test]
    fn test_scan_with_glob_include() {
        let dir = tempdir().unwrap();
        let src_app = dir.path().join("src").join("app");
        fs::create_dir_all(&src_app).unwrap();
        File::create(src_app.join("page.tsx")).unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir(&lib).unwrap();
        File::create(lib.join("utils.ts")).unwrap();

        let result = scan_files(
            dir.path().to_str().unwrap(),
            &["src/*".to_owned()],
            &[],
            false,
            false,
        );
        assert_eq!(names(&result), vec!["page.tsx"]);
    }

    #[test]
    fn test_scan_ignores_test_files() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("app.tsx")).unwrap();
        File::create(dir.path().join("app.test.tsx")).unwrap();
        File::create(dir.path().join("utils.spec.jsx")).unwrap();
        let tests_dir = dir.path().join("__tests__");
        fs::create_dir(&tests_dir).unwrap();
        File::create(tests_dir.join("helper.test.ts")).unwrap();

        let result = scan_files(dir.path().to_str().unwrap(), &[], &[], true, false);
        assert_eq!(names(&result), vec!["app.tsx"]);
    }

    #[test]
    fn test_scan_keeps_test_files_when_disabled() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("app.tsx")).unwrap();
        File::create(dir.path().join("app.test.tsx")).unwrap();

        let result = scan_files(dir.path().to_str().unwrap(), &[], &[], false, false);
        assert_eq!(result.files.len(), 2);
    }

    #[test]
    fn test_scan_literal_ignore_path() {
        let dir = tempdir().unwrap();
        let components = dir.path().join("src").join("components");
        fs::create_dir_all(&components).unwrap();
        File::create(components.join("Button.tsx")).unwrap();
        let generated = dir.path().join("src").join("generated");
        fs::create_dir_all(&generated).unwrap();
        File::create(generated.join("types.ts")).unwrap();

        let result = scan_files(
            dir.path().to_str().unwrap(),
            &["src".to_owned()],
            &["src/generated".to_owned()],
            false,
            false,
        );
        assert_eq!(names(&result), vec!["Button.tsx"]);
    }

    #[test]
    fn test_scan_mixed_ignore_patterns() {
        let dir = tempdir().unwrap();
        let components = dir.path().join("src").join("components");
        fs::create_dir_all(&components).unwrap();
        File::create(components.join("Button.tsx")).unwrap();
        File::create(components.join("Button.stories.tsx")).unwrap();

        let result = scan_files(
            dir.path().to_str().unwrap(),
            &["src".to_owned()],
            &["**/*.stories.tsx".to_owned()],
            false,
            false,
        );
        assert_eq!(names(&result), vec!["Button.tsx"]);
    }

    #[test]
    fn test_scan_literal_bracket_path() {
        let dir = tempdir().unwrap();
        let locale_dir = dir.path().join("app").join("[locale]");
        fs::create_dir_all(&locale_dir).unwrap();
        File::create(locale_dir.join("page.tsx")).unwrap();
        let other_dir = dir.path().join("app").join("other");
        fs::create_dir_all(&other_dir).unwrap();
        File::create(other_dir.join("other.tsx")).unwrap();

        let result = scan_files(
            dir.path().to_str().unwrap(),
            &["app/[locale]".to_owned()],
            &[],
            false,
            false,
        );
        assert_eq!(names(&result), vec!["page.tsx"]);
    }

    #[test]
    fn test_overlapping_includes_deduplicate() {
        let dir = tempdir().unwrap();
        let components = dir.path().join("src").join("components");
        fs::create_dir_all(&components).unwrap();
        File::create(components.join("Button.tsx")).unwrap();

        let result = scan_files(
            dir.path().to_str().unwrap(),
            &["src".to_owned(), "src/components".to_owned()],
            &[],
            false,
            false,
        );
        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("src/*"));
        assert!(is_glob_pattern("file?.ts"));
        assert!(!is_glob_pattern("src"));
        assert!(!is_glob_pattern("app/[locale]"));
    }
}
