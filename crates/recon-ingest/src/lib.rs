//! Reference data and batch input loading.
//!
//! The master file provides suppliers, brands and types; the alias file
//! provides user-registered supplier aliases. Both are read into an immutable
//! [`ReferenceSnapshot`] held by a [`ReferenceStore`].

#![deny(unsafe_code)]

pub mod columns;
pub mod csv_source;
pub mod error;
pub mod input;
pub mod snapshot;
pub mod source;
pub mod table;

pub use columns::{ALIAS_COLUMN, CANONICAL_COLUMN, InputColumns, ReferenceColumns};
pub use csv_source::{CsvReferenceSource, append_alias_record, read_alias_records, write_atomic};
pub use error::{IngestError, Result};
pub use input::{InputRow, InputTable, read_input_rows};
pub use snapshot::{ReferenceSnapshot, ReferenceStore};
pub use source::{AliasSink, MasterRecord, ReferenceSource};
pub use table::{CsvTable, read_csv_table, write_csv_table};
