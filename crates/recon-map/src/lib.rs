//! Comment decoding and supplier resolution.
//!
//! - [`normalize`](mod@normalize): canonical text for names and comments
//! - [`fuzzy`]: 0–100 similarity scorers
//! - [`scanner`]: greedy catalog extraction with text consumption
//! - [`action`]: keyword classification of residual words
//! - [`decoder`]: the per-comment pipeline
//! - [`resolver`]: supplier resolution via aliases and the master list

#![deny(unsafe_code)]

pub mod action;
pub mod decoder;
pub mod fuzzy;
pub mod normalize;
pub mod resolver;
pub mod scanner;

pub use action::{ActionClassifier, ActionEvidence, RESTAR_KEYWORDS, SUMAR_KEYWORDS};
pub use decoder::{CommentDecoder, decode};
pub use normalize::{clean_comment, normalize, normalize_value};
pub use resolver::{SupplierResolver, resolve};
pub use scanner::{EntityScanner, ScanOutcome};
