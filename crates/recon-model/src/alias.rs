//! Supplier alias records and the lookup table built from them.

use serde::{Deserialize, Serialize};

use crate::catalog::OrderedLookup;
use crate::error::{ModelError, Result};

/// One user-registered rule: `alias` should be read as `canonical`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub alias: String,
    pub canonical: String,
}

impl AliasRecord {
    /// Create a validated record. Both fields are trimmed and must be non-empty.
    pub fn new(alias: impl Into<String>, canonical: impl Into<String>) -> Result<Self> {
        let alias = alias.into().trim().to_string();
        let canonical = canonical.into().trim().to_string();
        if alias.is_empty() {
            return Err(ModelError::EmptyField { field: "alias" });
        }
        if canonical.is_empty() {
            return Err(ModelError::EmptyField { field: "canonical" });
        }
        Ok(Self { alias, canonical })
    }
}

/// Normalized alias -> normalized canonical name.
///
/// Later records overwrite earlier ones with the same normalized alias.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    lookup: OrderedLookup,
}

impl AliasTable {
    pub fn build<'a, I, F>(records: I, normalize: F) -> Self
    where
        I: IntoIterator<Item = &'a AliasRecord>,
        F: Fn(&str) -> String,
    {
        let mut lookup = OrderedLookup::new();
        for record in records {
            let alias = normalize(&record.alias);
            let canonical = normalize(&record.canonical);
            if alias.is_empty() || canonical.is_empty() {
                continue;
            }
            lookup.insert(alias, canonical);
        }
        Self { lookup }
    }

    pub fn target(&self, alias_key: &str) -> Option<&str> {
        self.lookup.get(alias_key)
    }

    pub fn keys(&self) -> &[String] {
        self.lookup.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lookup.iter()
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}
