//! Structured intent extracted from a free-text comment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Inventory adjustment suggested by a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Action {
    /// Increase (add, restock, bonus).
    #[serde(rename = "SUMAR")]
    Sumar,
    /// Decrease (discount, return, shortfall, error).
    #[serde(rename = "RESTAR")]
    Restar,
    /// No adjustment detected.
    #[default]
    #[serde(rename = "NEUTRO")]
    Neutro,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Restar, Action::Sumar, Action::Neutro];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sumar => "SUMAR",
            Self::Restar => "RESTAR",
            Self::Neutro => "NEUTRO",
        }
    }

    /// Review priority: decreases first, then increases, then neutral rows.
    pub fn review_priority(&self) -> u8 {
        match self {
            Self::Restar => 0,
            Self::Sumar => 1,
            Self::Neutro => 2,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SUMAR" => Ok(Self::Sumar),
            "RESTAR" => Ok(Self::Restar),
            "NEUTRO" => Ok(Self::Neutro),
            other => Err(format!("unknown action: {other}")),
        }
    }
}

/// Result of decoding one comment.
///
/// `brand` and `kind` are always verbatim catalog entries when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeResult {
    pub action: Action,
    pub quantity: Option<u64>,
    pub brand: Option<String>,
    pub kind: Option<String>,
}

impl DecodeResult {
    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.action == Action::Neutro
            && self.quantity.is_none()
            && self.brand.is_none()
            && self.kind.is_none()
    }
}
