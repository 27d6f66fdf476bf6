use std::path::Path;

use tracing::info;

use crate::columns::InputColumns;
use crate::error::Result;
use crate::table::{CsvTable, read_csv_table};

/// A batch input file with its supplier and comment columns located.
#[derive(Debug, Clone)]
pub struct InputTable {
    pub table: CsvTable,
    supplier: usize,
    comment: usize,
}

/// One input row, borrowed from its table.
#[derive(Debug, Clone, Copy)]
pub struct InputRow<'a> {
    pub cells: &'a [String],
    pub supplier: &'a str,
    pub comment: &'a str,
}

impl InputTable {
    /// Locate the required columns in an already-read table.
    pub fn from_table(path: &Path, table: CsvTable, columns: &InputColumns) -> Result<Self> {
        let supplier = table.require_column(path, &columns.supplier)?;
        let comment = table.require_column(path, &columns.comment)?;
        Ok(Self {
            table,
            supplier,
            comment,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    pub fn supplier_column(&self) -> usize {
        self.supplier
    }

    pub fn comment_column(&self) -> usize {
        self.comment
    }

    pub fn rows(&self) -> impl Iterator<Item = InputRow<'_>> {
        self.table.rows.iter().map(|cells| InputRow {
            cells,
            supplier: &cells[self.supplier],
            comment: &cells[self.comment],
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Read a batch input CSV. The supplier and comment columns must exist;
/// every other column is carried through untouched.
pub fn read_input_rows(path: &Path, columns: &InputColumns) -> Result<InputTable> {
    let table = read_csv_table(path)?;
    let input = InputTable::from_table(path, table, columns)?;
    info!(path = %path.display(), rows = input.len(), "input loaded");
    Ok(input)
}
