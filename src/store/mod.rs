//! The persisted key/template store.
//!
//! One JSON file maps every allocated key to its template and the location
//! it was first extracted at, plus a counter that makes keys monotonic
//! across runs. Keys are never reused, even after their entries are pruned.

pub mod locale;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One stored translation unit.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TranslationEntry {
    pub template: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
struct StoreMeta {
    #[serde(rename = "nextKeyNum")]
    next_key_num: u64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ResourceStore {
    /// Insertion order is preserved so the serialized file diffs cleanly.
    data: IndexMap<String, TranslationEntry>,
    meta: StoreMeta,
}

impl ResourceStore {
    pub fn empty() -> Self {
        Self {
            data: IndexMap::new(),
            meta: StoreMeta { next_key_num: 1 },
        }
    }

    /// Load the store from disk. A missing file yields an empty store; an
    /// unreadable or internally inconsistent one is fatal, because silently
    /// starting over would reallocate keys that translations already use.
    pub fn load(path: &Path, key_prefix: &str) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::empty());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read store file: {:?}", path))?;
        let store: ResourceStore = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt store file: {:?}", path))?;
        store
            .check_consistency(key_prefix)
            .with_context(|| format!("Corrupt store file: {:?}", path))?;
        Ok(store)
    }

    /// Every key number must be below the counter; a key at or past it means
    /// the counter was rolled back and future allocations would collide.
    fn check_consistency(&self, key_prefix: &str) -> Result<()> {
        if self.meta.next_key_num == 0 {
            bail!("nextKeyNum must be at least 1");
        }
        for key in self.data.keys() {
            let Some(num) = key
                .strip_prefix(key_prefix)
                .and_then(|rest| rest.parse::<u64>().ok())
            else {
                bail!("key \"{}\" does not match prefix \"{}\"", key, key_prefix);
            };
            if num >= self.meta.next_key_num {
                bail!(
                    "key \"{}\" is not below nextKeyNum {}",
                    key,
                    self.meta.next_key_num
                );
            }
        }
        Ok(())
    }

    /// Hand out the next key and advance the counter. The counter moves even
    /// if the caller ends up discarding the entry; gaps are harmless,
    /// collisions are not.
    pub fn allocate_key(&mut self, prefix: &str) -> String {
        let key = format!("{}{}", prefix, self.meta.next_key_num);
        self.meta.next_key_num += 1;
        key
    }

    /// Merge freshly extracted entries. Additive only: existing entries keep
    /// their templates, new keys append in allocation order.
    pub fn merge_entries(&mut self, entries: Vec<(String, TranslationEntry)>) {
        for (key, entry) in entries {
            self.data.entry(key).or_insert(entry);
        }
    }

    /// Drop every entry whose key is not in `used`. Returns the removed keys
    /// in store order. The counter never moves backwards.
    pub fn retain_keys(&mut self, used: &indexmap::IndexSet<String>) -> Vec<String> {
        let removed: Vec<String> = self
            .data
            .keys()
            .filter(|k| !used.contains(*k))
            .cloned()
            .collect();
        self.data.retain(|k, _| used.contains(k));
        removed
    }

    /// The key → template view that locale files are synced against.
    pub fn project(&self) -> IndexMap<String, String> {
        self.data
            .iter()
            .map(|(k, e)| (k.clone(), e.template.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&TranslationEntry> {
        self.data.get(key)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let mut content =
            serde_json::to_string_pretty(self).context("Failed to serialize store")?;
        content.push('\n');
        fs::write(path, content).with_context(|| format!("Failed to write store: {:?}", path))
    }
}
