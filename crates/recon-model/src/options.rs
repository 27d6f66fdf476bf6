//! Tunable thresholds for matching.

use serde::{Deserialize, Serialize};

/// Thresholds used by the entity scanner, action classifier and supplier
/// resolver. All scores are on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Minimum partial ratio for a long catalog entry to count as found.
    pub entity_threshold: f64,
    /// Token ratio at or above which a token is consumed by a match.
    pub removal_threshold: f64,
    /// Entries up to this many characters require an exact word match.
    pub short_entry_max_len: usize,
    /// Keyword scores must be strictly above this to suggest an action.
    pub action_threshold: f64,
    /// Tokens shorter than this are ignored for action classification.
    pub min_token_len: usize,
    /// Minimum token-sort ratio for an alias to rewrite the query.
    pub alias_threshold: f64,
    /// Minimum token-set ratio for a master supplier match.
    pub supplier_threshold: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            entity_threshold: 85.0,
            removal_threshold: 80.0,
            short_entry_max_len: 3,
            action_threshold: 85.0,
            min_token_len: 3,
            alias_threshold: 85.0,
            supplier_threshold: 60.0,
        }
    }
}

impl MatchOptions {
    pub fn with_entity_threshold(mut self, threshold: f64) -> Self {
        self.entity_threshold = threshold;
        self
    }

    pub fn with_alias_threshold(mut self, threshold: f64) -> Self {
        self.alias_threshold = threshold;
        self
    }

    pub fn with_supplier_threshold(mut self, threshold: f64) -> Self {
        self.supplier_threshold = threshold;
        self
    }
}
