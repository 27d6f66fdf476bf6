//! Collaborator traits for reference data.

use recon_model::AliasRecord;

use crate::error::Result;

/// One master row. Columns are independent: a row may carry a supplier with
/// no brand, or only a type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterRecord {
    pub supplier: Option<String>,
    pub brand: Option<String>,
    pub kind: Option<String>,
}

impl MasterRecord {
    pub fn new(supplier: &str, brand: &str, kind: &str) -> Self {
        Self {
            supplier: non_blank(supplier),
            brand: non_blank(brand),
            kind: non_blank(kind),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// Where master rows and alias records come from.
pub trait ReferenceSource {
    fn load_master(&self) -> Result<Vec<MasterRecord>>;

    /// Alias records in registration order. A source with no aliases yet
    /// returns an empty list rather than an error.
    fn load_aliases(&self) -> Result<Vec<AliasRecord>>;
}

/// Where new alias records are persisted.
pub trait AliasSink {
    /// Append one record. Either the whole record is stored or nothing is.
    fn append_alias(&self, record: &AliasRecord) -> Result<()>;
}
