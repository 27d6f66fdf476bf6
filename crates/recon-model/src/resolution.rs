use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of reconciling a raw supplier value against the master list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum SupplierResolution {
    /// The raw value already is a master entry.
    Exact(String),
    /// The raw value was resolved to this master entry.
    Resolved(String),
    /// No master entry found; keep the original value.
    Unresolved,
}

impl SupplierResolution {
    /// The value to write back: the master entry, or `raw` when unresolved.
    pub fn final_name<'a>(&'a self, raw: &'a str) -> &'a str {
        match self {
            Self::Exact(name) | Self::Resolved(name) => name,
            Self::Unresolved => raw,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Exact(_) => "exact",
            Self::Resolved(_) => "resolved",
            Self::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for SupplierResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => write!(f, "{name} (exact)"),
            Self::Resolved(name) => write!(f, "{name} (resolved)"),
            Self::Unresolved => f.write_str("unresolved"),
        }
    }
}
