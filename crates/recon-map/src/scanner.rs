//! Catalog-driven entity extraction with text consumption.
//!
//! The scanner walks a [`Catalog`] in its longest-first order and stops at the
//! first entry that is found in the text. It does not look for the best entry:
//! a later, higher-scoring entry never replaces an earlier qualifying one.
//!
//! A match consumes the matched words so the next extraction stage (and the
//! quantity/action passes) no longer see them.

use recon_model::{Catalog, MatchOptions};
use regex::Regex;
use tracing::{debug, warn};

use crate::fuzzy::{partial_ratio, ratio};

/// A catalog hit (if any) and the text left for the next stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub matched: Option<String>,
    pub residual: String,
}

impl ScanOutcome {
    fn miss(text: &str) -> Self {
        Self {
            matched: None,
            residual: text.to_string(),
        }
    }
}

/// One catalog entry with its whole-word pattern compiled up front.
#[derive(Debug, Clone)]
struct ScanEntry<'a> {
    entry: &'a str,
    needle: String,
    short: bool,
    pattern: Option<Regex>,
}

/// Scanner bound to one catalog.
///
/// Whole-word patterns are compiled once when the scanner is built, so a
/// batch reuses them for every row.
#[derive(Debug, Clone)]
pub struct EntityScanner<'a> {
    threshold: f64,
    removal_threshold: f64,
    entries: Vec<ScanEntry<'a>>,
}

impl<'a> EntityScanner<'a> {
    pub fn new(catalog: &'a Catalog, options: &MatchOptions) -> Self {
        let entries = catalog
            .iter()
            .map(|entry| {
                let needle = entry.to_lowercase();
                ScanEntry {
                    entry: entry.as_str(),
                    short: entry.chars().count() <= options.short_entry_max_len,
                    pattern: word_pattern(&needle),
                    needle,
                }
            })
            .collect();
        Self {
            threshold: options.entity_threshold,
            removal_threshold: options.removal_threshold,
            entries,
        }
    }

    /// Find the first catalog entry present in `text` and remove it.
    ///
    /// `text` is expected to be lower-case already (see
    /// [`clean_comment`](crate::normalize::clean_comment)).
    ///
    /// - Short entries need an exact whole-word match; every occurrence is
    ///   replaced with a space.
    /// - Longer entries are accepted when their partial ratio against the text
    ///   reaches the threshold. Exact whole-phrase occurrences are removed,
    ///   then every remaining token that is close to the entry is dropped.
    pub fn scan(&self, text: &str) -> ScanOutcome {
        for entry in &self.entries {
            if entry.short {
                let Some(pattern) = &entry.pattern else {
                    continue;
                };
                if pattern.is_match(text) {
                    debug!(entry = %entry.entry, "short catalog entry matched");
                    return ScanOutcome {
                        matched: Some(entry.entry.to_string()),
                        residual: pattern.replace_all(text, " ").into_owned(),
                    };
                }
            } else {
                let score = partial_ratio(&entry.needle, text);
                if score >= self.threshold {
                    debug!(entry = %entry.entry, score, "catalog entry matched");
                    return ScanOutcome {
                        matched: Some(entry.entry.to_string()),
                        residual: self.consume(text, entry),
                    };
                }
            }
        }
        ScanOutcome::miss(text)
    }

    fn consume(&self, text: &str, entry: &ScanEntry<'_>) -> String {
        let without_phrase = match &entry.pattern {
            Some(pattern) => pattern.replace_all(text, " ").into_owned(),
            None => text.to_string(),
        };
        without_phrase
            .split_whitespace()
            .filter(|token| ratio(token, &entry.needle) < self.removal_threshold)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Case-sensitive whole-word pattern for an already lower-cased needle.
fn word_pattern(needle: &str) -> Option<Regex> {
    match Regex::new(&format!(r"\b{}\b", regex::escape(needle))) {
        Ok(pattern) => Some(pattern),
        Err(error) => {
            warn!(%error, "skipping catalog entry with unusable pattern");
            None
        }
    }
}
