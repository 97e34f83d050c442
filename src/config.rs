use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".zhliftrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

/// Placeholder delimiters used when embedding variables in templates,
/// e.g. `{` + `val0` + `}` produces `{val0}`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Interpolation {
    #[serde(default = "default_interp_prefix")]
    pub prefix: String,
    #[serde(default = "default_interp_suffix")]
    pub suffix: String,
}

fn default_interp_prefix() -> String {
    "{".to_string()
}

fn default_interp_suffix() -> String {
    "}".to_string()
}

impl Default for Interpolation {
    fn default() -> Self {
        Self {
            prefix: default_interp_prefix(),
            suffix: default_interp_suffix(),
        }
    }
}

/// Whether the rewritten call carries a trailing comment with the
/// untranslated template.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CommentMode {
    /// No comment is emitted.
    #[default]
    None,
    /// Append `/* <template> */` after the call.
    Template,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,

    /// Directory holding the source map and locale resource files.
    #[serde(default = "default_resource_dir")]
    pub resource_dir: String,
    /// File name (under `resourceDir`) of the persisted key/template store.
    #[serde(default = "default_source_map_file")]
    pub source_map_file: String,
    /// Locale resource files (under `resourceDir`) kept in sync with the scan.
    #[serde(default = "default_locale_files")]
    pub locale_files: Vec<String>,

    /// Name of the runtime translation function emitted in rewrites.
    #[serde(default = "default_call_name")]
    pub call_name: String,
    /// Prefix for generated keys (`k` produces `k1`, `k2`, ...).
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    #[serde(default)]
    pub interpolation: Interpolation,

    /// Fuse adjacent JSX text and expression children into one extraction.
    #[serde(default = "default_fuse_jsx_children")]
    pub fuse_jsx_children: bool,
    /// Rewrite files in place. When false, output goes to `outputDir`.
    #[serde(default = "default_rewrite_in_place")]
    pub rewrite_in_place: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub comment_mode: CommentMode,

    /// String literals matching any of these regexes are treated as date
    /// format patterns and never extracted.
    #[serde(default = "default_date_patterns")]
    pub date_patterns: Vec<String>,
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_resource_dir() -> String {
    "./locales".to_string()
}

fn default_source_map_file() -> String {
    "source-map.json".to_string()
}

fn default_locale_files() -> Vec<String> {
    vec!["zh-CN.json".to_string()]
}

fn default_call_name() -> String {
    "i18n.t".to_string()
}

fn default_key_prefix() -> String {
    "k".to_string()
}

fn default_fuse_jsx_children() -> bool {
    true
}

fn default_rewrite_in_place() -> bool {
    true
}

fn default_output_dir() -> String {
    "./zhlift-out".to_string()
}

fn default_date_patterns() -> Vec<String> {
    // Moment-style format strings: `YYYY-MM-DD`, `YYYY年MM月DD日`, `HH:mm:ss`.
    // Requires at least one ASCII format letter so ordinary Chinese text
    // containing 年/月/日 is not swallowed.
    vec![
        "^[\\sYMDdHhmsSAaZ0-9:/.\\-年月日时分秒]*[YMDdHms][\\sYMDdHhmsSAaZ0-9:/.\\-年月日时分秒]*$"
            .to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: default_includes(),
            source_root: default_source_root(),
            ignore_test_files: default_ignore_test_files(),
            resource_dir: default_resource_dir(),
            source_map_file: default_source_map_file(),
            locale_files: default_locale_files(),
            call_name: default_call_name(),
            key_prefix: default_key_prefix(),
            interpolation: Interpolation::default(),
            fuse_jsx_children: default_fuse_jsx_children(),
            rewrite_in_place: default_rewrite_in_place(),
            output_dir: default_output_dir(),
            comment_mode: CommentMode::default(),
            date_patterns: default_date_patterns(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores`/`includes` or any
    /// regex in `datePatterns` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Include patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        for pattern in &self.date_patterns {
            Regex::new(pattern)
                .with_context(|| format!("Invalid regex in 'datePatterns': \"{}\"", pattern))?;
        }

        Ok(())
    }

    pub fn source_map_path(&self) -> PathBuf {
        Path::new(&self.resource_dir).join(&self.source_map_file)
    }

    pub fn locale_paths(&self) -> Vec<PathBuf> {
        self.locale_files
            .iter()
            .map(|f| Path::new(&self.resource_dir).join(f))
            .collect()
    }

    /// Compile the date-format exclusion patterns. `validate` must have
    /// succeeded, but compilation errors are still propagated rather than
    /// panicking.
    pub fn date_regexes(&self) -> Result<Vec<Regex>> {
        self.date_patterns
            .iter()
            .map(|p| {
                Regex::new(p).with_context(|| format!("Invalid regex in 'datePatterns': \"{}\"", p))
            })
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignores.is_empty());
        assert_eq!(config.call_name, "i18n.t");
        assert_eq!(config.key_prefix, "k");
        assert_eq!(config.interpolation.prefix, "{");
        assert_eq!(config.interpolation.suffix, "}");
        assert!(config.fuse_jsx_children);
        assert!(config.rewrite_in_place);
        assert_eq!(config.comment_mode, CommentMode::None);
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "ignores": ["**/dist/**"],
              "includes": ["src/**"],
              "callName": "t",
              "commentMode": "template"
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ignores, vec!["**/dist/**"]);
        assert_eq!(config.includes, vec!["src/**"]);
        assert_eq!(config.call_name, "t");
        assert_eq!(config.comment_mode, CommentMode::Template);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "keyPrefix": "msg" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.key_prefix, "msg");
        assert_eq!(config.includes, default_includes());
        assert_eq!(config.locale_files, vec!["zh-CN.json"]);
    }

    #[test]
    fn test_resource_paths() {
        let config = Config::default();
        assert_eq!(
            config.source_map_path(),
            Path::new("./locales/source-map.json")
        );
        assert_eq!(config.locale_paths(), vec![Path::new("./locales/zh-CN.json")]);
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()], // unclosed bracket
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_invalid_date_pattern() {
        let config = Config {
            date_patterns: vec!["([unclosed".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("datePatterns"));
    }

    #[test]
    fn test_default_date_pattern_matches_formats() {
        let config = Config::default();
        let regexes = config.date_regexes().unwrap();
        let matches = |s: &str| regexes.iter().any(|r| r.is_match(s));

        assert!(matches("YYYY-MM-DD"));
        assert!(matches("YYYY年MM月DD日"));
        assert!(matches("HH:mm:ss"));

        assert!(!matches("共MM条")); // format letters inside ordinary text still need a real shape
        assert!(!matches("你好"));
        assert!(!matches("日期"));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "ignores": ["**/test/**"] }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.ignores, vec!["**/test/**"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert!(result.config.ignores.is_empty());
    }
}
