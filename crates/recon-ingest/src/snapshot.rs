//! Immutable reference snapshots and the store that swaps them.
//!
//! Readers take an `Arc<ReferenceSnapshot>` and keep using it for as long as
//! they need; a reload builds a complete new snapshot before swapping it in,
//! so nobody ever sees a half-loaded catalog.

use std::sync::{Arc, RwLock};

use recon_map::{CommentDecoder, SupplierResolver, normalize};
use recon_model::{AliasRecord, AliasTable, Catalog, MatchOptions, SupplierIndex};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::source::{AliasSink, MasterRecord, ReferenceSource};

/// Everything decoding and resolution need, built once from a source.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSnapshot {
    pub suppliers: SupplierIndex,
    pub aliases: AliasTable,
    /// Alias records as stored, in registration order.
    pub alias_records: Vec<AliasRecord>,
    pub brands: Catalog,
    pub kinds: Catalog,
}

impl ReferenceSnapshot {
    pub fn build(master: &[MasterRecord], alias_records: Vec<AliasRecord>) -> Self {
        let suppliers =
            SupplierIndex::build(master.iter().filter_map(|r| r.supplier.as_deref()), normalize);
        let brands = Catalog::from_values(master.iter().filter_map(|r| r.brand.as_deref()));
        let kinds = Catalog::from_values(master.iter().filter_map(|r| r.kind.as_deref()));
        let aliases = AliasTable::build(&alias_records, normalize);
        Self {
            suppliers,
            aliases,
            alias_records,
            brands,
            kinds,
        }
    }

    pub fn load<S: ReferenceSource + ?Sized>(source: &S) -> Result<Self> {
        let master = source.load_master()?;
        let aliases = source.load_aliases()?;
        let snapshot = Self::build(&master, aliases);
        info!(
            suppliers = snapshot.suppliers.len(),
            brands = snapshot.brands.len(),
            kinds = snapshot.kinds.len(),
            aliases = snapshot.aliases.len(),
            "reference snapshot built"
        );
        Ok(snapshot)
    }

    pub fn decoder<'a>(&'a self, options: &MatchOptions) -> CommentDecoder<'a> {
        CommentDecoder::new(&self.brands, &self.kinds, options)
    }

    pub fn resolver<'a>(&'a self, options: &MatchOptions) -> SupplierResolver<'a> {
        SupplierResolver::new(&self.suppliers, &self.aliases, options)
    }
}

/// Lazily loaded, explicitly invalidated reference data.
#[derive(Debug)]
pub struct ReferenceStore<S> {
    source: S,
    current: RwLock<Option<Arc<ReferenceSnapshot>>>,
}

impl<S: ReferenceSource> ReferenceStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The current snapshot, loading it on first use or after an
    /// invalidation.
    pub fn snapshot(&self) -> Result<Arc<ReferenceSnapshot>> {
        {
            let current = self.current.read().map_err(|_| IngestError::LockPoisoned)?;
            if let Some(snapshot) = current.as_ref() {
                return Ok(Arc::clone(snapshot));
            }
        }
        self.reload()
    }

    /// Build a fresh snapshot from the source and swap it in.
    ///
    /// On error the previous snapshot (if any) stays in place.
    pub fn reload(&self) -> Result<Arc<ReferenceSnapshot>> {
        let snapshot = Arc::new(ReferenceSnapshot::load(&self.source)?);
        let mut current = self
            .current
            .write()
            .map_err(|_| IngestError::LockPoisoned)?;
        *current = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Drop the cached snapshot; the next [`snapshot`](Self::snapshot) call
    /// reloads.
    pub fn invalidate(&self) -> Result<()> {
        let mut current = self
            .current
            .write()
            .map_err(|_| IngestError::LockPoisoned)?;
        *current = None;
        debug!("reference snapshot invalidated");
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_ok_and(|current| current.is_some())
    }
}

impl<S: ReferenceSource + AliasSink> ReferenceStore<S> {
    /// Validate and persist a new alias, then invalidate the snapshot so the
    /// next load sees it.
    ///
    /// Nothing is written when validation fails, and the snapshot is left as
    /// it was when the write fails.
    pub fn register_alias(&self, alias: &str, canonical: &str) -> Result<AliasRecord> {
        let record = AliasRecord::new(alias, canonical)?;
        self.source.append_alias(&record)?;
        self.invalidate()?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_splits_master_columns() {
        let master = vec![
            MasterRecord::new("Backus", "Pilsen", "Cerveza"),
            MasterRecord::new("Backus", "Cristal", "Cerveza"),
            MasterRecord::new("", "Guarana", "Gaseosa"),
            MasterRecord::new("Gloria S.A.", "", ""),
        ];
        let snapshot = ReferenceSnapshot::build(&master, Vec::new());

        assert_eq!(snapshot.suppliers.len(), 2);
        assert!(snapshot.suppliers.contains_exact("Gloria S.A."));
        assert_eq!(snapshot.suppliers.get("gloria"), Some("Gloria S.A."));
        assert_eq!(snapshot.brands.entries(), ["Cristal", "Guarana", "Pilsen"]);
        assert_eq!(snapshot.kinds.entries(), ["Cerveza", "Gaseosa"]);
        assert!(snapshot.aliases.is_empty());
    }

    #[test]
    fn build_normalizes_aliases() {
        let aliases = vec![AliasRecord::new("Coca-Cola", "Coca Cola S.A.C.").unwrap()];
        let snapshot = ReferenceSnapshot::build(&[], aliases);
        assert_eq!(snapshot.aliases.target("cocacola"), Some("coca cola"));
        assert_eq!(snapshot.alias_records.len(), 1);
    }
}
