//! Supplier resolution against the master list, with alias substitution.

use recon_model::{AliasTable, MatchOptions, SupplierIndex, SupplierResolution};
use tracing::debug;

use crate::fuzzy::{extract_one, token_set_ratio, token_sort_ratio};
use crate::normalize::normalize;

/// Resolves raw supplier strings to master entries.
///
/// The alias step uses a strict token-sort match because it silently rewrites
/// the query; the master step uses a looser token-set match.
#[derive(Debug, Clone, Copy)]
pub struct SupplierResolver<'a> {
    suppliers: &'a SupplierIndex,
    aliases: &'a AliasTable,
    alias_threshold: f64,
    supplier_threshold: f64,
}

impl<'a> SupplierResolver<'a> {
    pub fn new(
        suppliers: &'a SupplierIndex,
        aliases: &'a AliasTable,
        options: &MatchOptions,
    ) -> Self {
        Self {
            suppliers,
            aliases,
            alias_threshold: options.alias_threshold,
            supplier_threshold: options.supplier_threshold,
        }
    }

    /// Fuzzy-resolve `raw` to a master entry.
    ///
    /// An alias hit only replaces the query; the result still has to come from
    /// the master list. When the alias target is not a master key it is fuzzy
    /// matched like any other query, and `None` is returned if nothing clears
    /// the supplier threshold.
    pub fn resolve(&self, raw: &str) -> Option<&'a str> {
        let mut query = normalize(raw);
        if query.is_empty() {
            return None;
        }

        if !self.aliases.is_empty()
            && let Some(alias) = extract_one(&query, self.aliases.keys(), token_sort_ratio)
            && alias.score >= self.alias_threshold
            && let Some(target) = self.aliases.target(alias.choice)
        {
            debug!(alias = alias.choice, target, score = alias.score, "alias applied");
            query = target.to_string();
        }

        let best = extract_one(&query, self.suppliers.keys(), token_set_ratio)?;
        if best.score >= self.supplier_threshold {
            debug!(key = best.choice, score = best.score, "supplier resolved");
            self.suppliers.get(best.choice)
        } else {
            debug!(key = best.choice, score = best.score, "supplier below threshold");
            None
        }
    }

    /// Exact master membership first, fuzzy resolution otherwise.
    ///
    /// Missing or blank values are unresolved.
    pub fn reconcile(&self, raw: Option<&str>) -> SupplierResolution {
        let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
            return SupplierResolution::Unresolved;
        };
        if self.suppliers.contains_exact(raw) {
            return SupplierResolution::Exact(raw.to_string());
        }
        match self.resolve(raw) {
            Some(name) => SupplierResolution::Resolved(name.to_string()),
            None => SupplierResolution::Unresolved,
        }
    }
}

/// Resolve with default thresholds.
pub fn resolve<'a>(
    raw: &str,
    suppliers: &'a SupplierIndex,
    aliases: &'a AliasTable,
) -> Option<&'a str> {
    SupplierResolver::new(suppliers, aliases, &MatchOptions::default()).resolve(raw)
}
