//! Column names expected in reference and input files.
//!
//! Header matching is case-insensitive everywhere.

/// Alias file header for the alias value.
pub const ALIAS_COLUMN: &str = "alias";
/// Alias file header for the canonical supplier name.
pub const CANONICAL_COLUMN: &str = "nombre_real";

/// Columns of the master reference file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceColumns {
    pub supplier: String,
    pub brand: String,
    pub kind: String,
}

impl Default for ReferenceColumns {
    fn default() -> Self {
        Self {
            supplier: "Proveedor".to_string(),
            brand: "Marca".to_string(),
            kind: "Tipo".to_string(),
        }
    }
}

/// Columns of a batch input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputColumns {
    pub supplier: String,
    pub comment: String,
}

impl Default for InputColumns {
    fn default() -> Self {
        Self {
            supplier: "Proveedor".to_string(),
            comment: "Comentario".to_string(),
        }
    }
}
