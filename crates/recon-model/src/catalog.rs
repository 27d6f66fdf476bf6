//! Reference catalogs used as matching bases.
//!
//! A [`Catalog`] is ordered longest-first so that specific multi-word entries
//! ("Coca Cola Light") are tried before shorter entries they contain
//! ("Coca Cola"). A [`SupplierIndex`] maps normalized supplier keys back to the
//! raw master names.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Deduplicated catalog ordered by descending length (in characters).
///
/// Entries of equal length keep their first-appearance order, so building a
/// catalog twice from the same input yields the same order.
///
/// Serializes as a plain list; deserializing goes through
/// [`Catalog::from_values`] so the ordering holds for any input list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Catalog {
    entries: Vec<String>,
}

impl Catalog {
    /// Build a catalog from raw values.
    ///
    /// Values are trimmed; empty values are dropped and duplicates (exact,
    /// case-sensitive equality) are kept once.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let mut entries = Vec::new();
        for value in values {
            let trimmed = value.as_ref().trim();
            if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
                continue;
            }
            entries.push(trimmed.to_string());
        }
        // sort_by_key is stable: ties keep first-appearance order.
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.chars().count()));
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|entry| entry == value)
    }
}

impl From<Vec<String>> for Catalog {
    fn from(values: Vec<String>) -> Self {
        Self::from_values(values)
    }
}

impl From<Catalog> for Vec<String> {
    fn from(catalog: Catalog) -> Self {
        catalog.entries
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Insertion-ordered string map where re-inserting a key overwrites the value
/// but keeps the key's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedLookup {
    keys: Vec<String>,
    values: HashMap<String, String>,
}

impl OrderedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair; returns the previous value for the key, if any.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.values.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .filter_map(|key| self.values.get(key).map(|v| (key.as_str(), v.as_str())))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Master supplier list indexed by normalized name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierIndex {
    by_key: OrderedLookup,
    raw: BTreeSet<String>,
}

impl SupplierIndex {
    /// Build the index from raw master supplier names.
    ///
    /// Blank names are skipped. Names whose normalized form is empty stay in
    /// the exact-membership set but get no fuzzy key. When two names share a
    /// normalized key the later one wins.
    pub fn build<I, S, F>(names: I, normalize: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> String,
    {
        let mut index = Self::default();
        for name in names {
            let name = name.as_ref();
            if name.trim().is_empty() || !index.raw.insert(name.to_string()) {
                continue;
            }
            let key = normalize(name);
            if key.is_empty() {
                continue;
            }
            index.by_key.insert(key, name.to_string());
        }
        index
    }

    /// Exact (raw, case-sensitive) membership in the master list.
    pub fn contains_exact(&self, name: &str) -> bool {
        self.raw.contains(name)
    }

    /// Raw master name for a normalized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key.get(key)
    }

    /// Normalized keys in first-insertion order.
    pub fn keys(&self) -> &[String] {
        self.by_key.keys()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
