#![deny(unsafe_code)]

pub mod alias;
pub mod catalog;
pub mod decode;
pub mod error;
pub mod options;
pub mod resolution;

pub use alias::{AliasRecord, AliasTable};
pub use catalog::{Catalog, OrderedLookup, SupplierIndex};
pub use decode::{Action, DecodeResult};
pub use error::{ModelError, Result};
pub use options::MatchOptions;
pub use resolution::SupplierResolution;
