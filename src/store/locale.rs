//! Locale resource file synchronization.
//!
//! Brings each locale JSON file in line with the store projection: missing
//! keys are added with the template as the starting value, and with pruning
//! enabled, keys the projection no longer has are removed. Existing
//! translations are never overwritten.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// What one sync pass changed in a locale file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl SyncReport {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Sync one in-memory locale map against the projection.
pub fn sync_locale_map(
    locale: &mut Map<String, Value>,
    projection: &IndexMap<String, String>,
    prune: bool,
) -> SyncReport {
    let mut report = SyncReport::default();

    for (key, template) in projection {
        if !locale.contains_key(key) {
            locale.insert(key.clone(), Value::String(template.clone()));
            report.added.push(key.clone());
        }
    }

    if prune {
        let stale: Vec<String> = locale
            .keys()
            .filter(|k| !projection.contains_key(*k))
            .cloned()
            .collect();
        for key in &stale {
            // shift_remove keeps the remaining keys in their file order.
            locale.shift_remove(key);
        }
        report.removed = stale;
    }

    report
}

/// Sync one locale file on disk. A missing file starts from an empty map;
/// an unparseable or non-object file is fatal, since rewriting it would
/// destroy translations.
pub fn sync_locale_file(
    path: &Path,
    projection: &IndexMap<String, String>,
    prune: bool,
) -> Result<SyncReport> {
    let mut locale = if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read locale file: {:?}", path))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in locale file: {:?}", path))?;
        match value {
            Value::Object(map) => map,
            _ => anyhow::bail!("Locale file is not a JSON object: {:?}", path),
        }
    } else {
        Map::new()
    };

    let report = sync_locale_map(&mut locale, projection, prune);
    if report.is_unchanged() && path.exists() {
        return Ok(report);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let mut content = serde_json::to_string_pretty(&Value::Object(locale))
        .context("Failed to serialize locale file")?;
    content.push('\n');
    fs::write(path, content).with_context(|| format!("Failed to write locale file: {:?}", path))?;
    Ok(report)
}
