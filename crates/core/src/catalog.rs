use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCatalogEntry {
    pub name: String,
    pub description: String,
}

impl SpellCatalogEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Read-only spell metadata, keyed by the source's own keys.
///
/// Lookups match on [`SpellCatalogEntry::name`], not on the key. Keys are kept
/// sorted, so when two entries share a name the one with the smaller key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellCatalog {
    entries: BTreeMap<String, SpellCatalogEntry>,
}

impl SpellCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SpellCatalogEntry)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, entry)| (key.into(), entry))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: SpellCatalogEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SpellCatalogEntry> {
        self.entries.values().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &SpellCatalogEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
