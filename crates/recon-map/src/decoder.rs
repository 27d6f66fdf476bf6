//! Comment decoding: brand, type, quantity and action from one free-text cell.

use std::sync::LazyLock;

use recon_model::{Catalog, DecodeResult, MatchOptions};
use regex::Regex;
use tracing::debug;

use crate::action::ActionClassifier;
use crate::normalize::clean_comment;
use crate::scanner::EntityScanner;

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\b").expect("integer token pattern"));

/// Decodes comments against a brand catalog and a type catalog.
///
/// Stages run strictly in order and each one works on what the previous one
/// left: clean, brand, type, quantity, action.
#[derive(Debug, Clone)]
pub struct CommentDecoder<'a> {
    brands: EntityScanner<'a>,
    kinds: EntityScanner<'a>,
    classifier: ActionClassifier,
}

impl<'a> CommentDecoder<'a> {
    pub fn new(brands: &'a Catalog, kinds: &'a Catalog, options: &MatchOptions) -> Self {
        Self {
            brands: EntityScanner::new(brands, options),
            kinds: EntityScanner::new(kinds, options),
            classifier: ActionClassifier::new(options),
        }
    }

    pub fn decode(&self, text: &str) -> DecodeResult {
        let working = clean_comment(text);
        if working.is_empty() {
            return DecodeResult::default();
        }

        let brand = self.brands.scan(&working);
        let kind = self.kinds.scan(&brand.residual);
        let residual = kind.residual;

        let result = DecodeResult {
            action: self.classifier.classify(&residual),
            quantity: first_integer(&residual),
            brand: brand.matched,
            kind: kind.matched,
        };
        debug!(
            action = %result.action,
            quantity = ?result.quantity,
            brand = ?result.brand,
            kind = ?result.kind,
            "comment decoded"
        );
        result
    }

    /// [`decode`](Self::decode) for a cell that may be missing.
    pub fn decode_value(&self, text: Option<&str>) -> DecodeResult {
        text.map(|t| self.decode(t)).unwrap_or_default()
    }
}

/// Decode with default thresholds.
pub fn decode(text: &str, brands: &Catalog, kinds: &Catalog) -> DecodeResult {
    CommentDecoder::new(brands, kinds, &MatchOptions::default()).decode(text)
}

/// First standalone integer, left to right. Tokens too large for `u64` are
/// skipped.
fn first_integer(text: &str) -> Option<u64> {
    INTEGER_RE
        .captures_iter(text)
        .find_map(|caps| caps.get(1).and_then(|m| m.as_str().parse().ok()))
}
