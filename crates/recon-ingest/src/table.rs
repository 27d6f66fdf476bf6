use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use crate::csv_source::write_atomic;
use crate::error::{IngestError, Result};

/// A CSV file read into memory: one header row, then data rows padded or
/// truncated to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Index of `column`, ignoring ASCII case.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(column))
    }

    /// Like [`column_index`](Self::column_index) but a missing column is an
    /// error naming `path`.
    pub fn require_column(&self, path: &Path, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| IngestError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })
    }

    /// Values of one column, in row order.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Read a CSV file with a header row.
///
/// Headers are trimmed (including a UTF-8 BOM) and inner whitespace is
/// collapsed. Cells are kept as written. Fully blank lines are skipped.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| csv_error(path, source))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match &headers {
            None => headers = Some(record.iter().map(normalize_header).collect()),
            Some(headers) => {
                let row = (0..headers.len())
                    .map(|idx| record.get(idx).unwrap_or("").to_string())
                    .collect();
                rows.push(row);
            }
        }
    }

    Ok(CsvTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

/// Write a header row and data rows to `path` atomically.
pub fn write_csv_table<H, R, C>(path: &Path, headers: &[H], rows: R) -> Result<()>
where
    H: AsRef<str>,
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: AsRef<[u8]>,
{
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer
            .write_record(headers.iter().map(|header| header.as_ref()))
            .map_err(|source| csv_error(path, source))?;
        for row in rows {
            writer
                .write_record(row)
                .map_err(|source| csv_error(path, source))?;
        }
        writer.flush().map_err(|source| IngestError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source,
        })?;
    }
    write_atomic(path, &buffer)
}

pub(crate) fn csv_error(path: &Path, source: csv::Error) -> IngestError {
    IngestError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn header_bom_and_spacing_are_trimmed() {
        assert_eq!(normalize_header("\u{feff}Proveedor "), "Proveedor");
        assert_eq!(normalize_header("  Nombre   Real "), "Nombre Real");
    }

    #[test]
    fn reads_and_pads_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "\u{feff}A, b ,C\n1,x\n\n2,y,z,extra\n").unwrap();

        let table = read_csv_table(&path).unwrap();
        assert_eq!(table.headers, vec!["A", "b", "C"]);
        assert_eq!(table.rows, vec![vec!["1", "x", ""], vec!["2", "y", "z"]]);
        assert_eq!(table.column_index("B"), Some(1));
        assert_eq!(table.column_values(2).collect::<Vec<_>>(), vec!["", "z"]);
    }

    #[test]
    fn written_table_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("t.csv");
        let rows = vec![vec!["1", "a, b"], vec!["2", ""]];
        write_csv_table(&path, &["N", "Texto"], rows).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "N,Texto\n1,\"a, b\"\n2,\n"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = read_csv_table(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io { operation: "read", .. }));
    }

    #[test]
    fn missing_column_names_the_file() {
        let table = CsvTable {
            headers: vec!["Marca".to_string()],
            rows: Vec::new(),
        };
        let err = table.require_column(Path::new("base.csv"), "Proveedor").unwrap_err();
        assert_eq!(err.to_string(), "column 'Proveedor' not found in base.csv");
    }
}
