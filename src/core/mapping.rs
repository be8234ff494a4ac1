//! Session mapping store: a strict bijection between original values and
//! placeholders.
//!
//! Counters are allocated per placeholder prefix, start at 1, and are never
//! reused within a session. Prefixes are fixed per pattern type, so this is the
//! same as counting per type, and stays collision-free when a custom prefix
//! shadows a built-in one.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::models::{MappingEntry, PatternType};
use crate::error::MappingError;

/// Format a placeholder: `[PREFIX_NNN]`, counter zero-padded to three digits
pub fn format_placeholder(prefix: &str, counter: u64) -> String {
    format!("[{}_{:03}]", prefix, counter)
}

/// Split a placeholder into prefix and counter, if it is well formed
pub fn parse_placeholder(s: &str) -> Option<(&str, u64)> {
    let inner = s.strip_prefix('[')?.strip_suffix(']')?;
    let (prefix, digits) = inner.rsplit_once('_')?;
    if prefix.is_empty()
        || !prefix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    {
        return None;
    }
    if digits.len() < 3 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|n| (prefix, n))
}

/// Serialized form of a mapping store
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MappingExport {
    entries: Vec<MappingEntry>,
    #[serde(default)]
    counters: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    entries: Vec<MappingEntry>,
    by_value: HashMap<(PatternType, String), usize>,
    by_placeholder: HashMap<String, usize>,
    counters: BTreeMap<String, u64>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder for `value`, allocating the next counter on first sight
    pub fn placeholder_for(&mut self, pattern_type: &PatternType, value: &str) -> String {
        let key = (pattern_type.clone(), value.to_string());
        if let Some(&index) = self.by_value.get(&key) {
            return self.entries[index].placeholder.clone();
        }

        let prefix = pattern_type.prefix();
        let placeholder = self.allocate(&prefix);

        let index = self.entries.len();
        self.entries.push(MappingEntry {
            pattern_type: pattern_type.clone(),
            original: value.to_string(),
            placeholder: placeholder.clone(),
        });
        self.by_value.insert(key, index);
        self.by_placeholder.insert(placeholder.clone(), index);

        placeholder
    }

    /// Existing placeholder for `value`, without allocating
    pub fn get(&self, pattern_type: &PatternType, value: &str) -> Option<&str> {
        self.by_value
            .get(&(pattern_type.clone(), value.to_string()))
            .map(|&i| self.entries[i].placeholder.as_str())
    }

    fn allocate(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format_placeholder(prefix, *counter);
            if !self.by_placeholder.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Original value behind a placeholder
    pub fn reverse_lookup(&self, placeholder: &str) -> Option<&str> {
        self.by_placeholder
            .get(placeholder)
            .map(|&i| self.entries[i].original.as_str())
    }

    /// Replace every known placeholder in `text` with its original value.
    ///
    /// Unknown or malformed placeholders are left verbatim.
    pub fn restore(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find('[') {
            result.push_str(&rest[..open]);
            let tail = &rest[open..];

            // A placeholder holds no brackets, so only the next one matters
            let restored = tail[1..]
                .find(|c| c == '[' || c == ']')
                .map(|i| i + 1)
                .filter(|&close| tail.as_bytes()[close] == b']')
                .and_then(|close| {
                    let candidate = &tail[..=close];
                    parse_placeholder(candidate)?;
                    self.reverse_lookup(candidate).map(|orig| (orig, close))
                });

            match restored {
                Some((original, close)) => {
                    result.push_str(original);
                    rest = &tail[close + 1..];
                }
                None => {
                    result.push('[');
                    rest = &tail[1..];
                }
            }
        }
        result.push_str(rest);

        result
    }

    /// Entries in allocation order
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Last counter issued for a prefix
    pub fn counter(&self, prefix: &str) -> u64 {
        self.counters.get(prefix).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_value.clear();
        self.by_placeholder.clear();
        self.counters.clear();
    }

    /// JSON export: entries plus counters, so an import keeps numbering
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&MappingExport {
            entries: self.entries.clone(),
            counters: self.counters.clone(),
        })
    }

    /// Human-readable table sorted by placeholder
    pub fn export_text(&self) -> String {
        let mut sorted: Vec<&MappingEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.placeholder.cmp(&b.placeholder));

        let mut lines = vec![
            "# Mapping Table (Placeholder -> Original)".to_string(),
            "=".repeat(60),
        ];
        for entry in sorted {
            lines.push(format!("{} -> {}", entry.placeholder, entry.original));
        }
        lines.join("\n")
    }

    /// Rebuild a store from [`export_json`](Self::export_json) output.
    ///
    /// Rejects exports that would break the bijection.
    pub fn import_json(data: &str) -> Result<Self, MappingError> {
        let export: MappingExport = serde_json::from_str(data)?;
        let mut store = Self::new();

        for entry in export.entries {
            let Some((prefix, n)) = parse_placeholder(&entry.placeholder) else {
                return Err(MappingError::InvalidPlaceholder {
                    placeholder: entry.placeholder,
                });
            };
            let key = (entry.pattern_type.clone(), entry.original.clone());
            if store.by_placeholder.contains_key(&entry.placeholder)
                || store.by_value.contains_key(&key)
            {
                return Err(MappingError::DuplicatePlaceholder {
                    placeholder: entry.placeholder,
                });
            }

            let counter = store.counters.entry(prefix.to_string()).or_insert(0);
            *counter = (*counter).max(n);

            let index = store.entries.len();
            store.by_value.insert(key, index);
            store.by_placeholder.insert(entry.placeholder.clone(), index);
            store.entries.push(entry);
        }

        for (prefix, n) in export.counters {
            let counter = store.counters.entry(prefix).or_insert(0);
            *counter = (*counter).max(n);
        }

        Ok(store)
    }
}
