//! CSV-backed reference source and alias file.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use recon_model::AliasRecord;
use tracing::{debug, info, warn};

use crate::columns::{ALIAS_COLUMN, CANONICAL_COLUMN, ReferenceColumns};
use crate::error::{IngestError, Result};
use crate::source::{AliasSink, MasterRecord, ReferenceSource};
use crate::table::{csv_error, read_csv_table};

/// Master CSV plus an optional alias CSV.
///
/// The alias file may not exist yet; it is created on the first
/// registration.
#[derive(Debug, Clone)]
pub struct CsvReferenceSource {
    master_path: PathBuf,
    alias_path: Option<PathBuf>,
    columns: ReferenceColumns,
}

impl CsvReferenceSource {
    pub fn new(master_path: impl Into<PathBuf>) -> Self {
        Self {
            master_path: master_path.into(),
            alias_path: None,
            columns: ReferenceColumns::default(),
        }
    }

    pub fn with_aliases(mut self, alias_path: impl Into<PathBuf>) -> Self {
        self.alias_path = Some(alias_path.into());
        self
    }

    pub fn with_columns(mut self, columns: ReferenceColumns) -> Self {
        self.columns = columns;
        self
    }

    pub fn master_path(&self) -> &Path {
        &self.master_path
    }

    pub fn alias_path(&self) -> Option<&Path> {
        self.alias_path.as_deref()
    }
}

impl ReferenceSource for CsvReferenceSource {
    fn load_master(&self) -> Result<Vec<MasterRecord>> {
        let path = self.master_path.as_path();
        let table = read_csv_table(path)?;
        let supplier = table.require_column(path, &self.columns.supplier)?;
        let brand = table.require_column(path, &self.columns.brand)?;
        let kind = table.require_column(path, &self.columns.kind)?;

        let records: Vec<MasterRecord> = table
            .rows
            .iter()
            .map(|row| MasterRecord::new(&row[supplier], &row[brand], &row[kind]))
            .collect();
        info!(path = %path.display(), rows = records.len(), "master loaded");
        Ok(records)
    }

    fn load_aliases(&self) -> Result<Vec<AliasRecord>> {
        match self.alias_path.as_deref() {
            Some(path) => read_alias_records(path),
            None => Ok(Vec::new()),
        }
    }
}

/// Read the alias CSV at `path`. A file that does not exist yet holds no
/// aliases; rows with a blank alias or canonical name are skipped.
pub fn read_alias_records(path: &Path) -> Result<Vec<AliasRecord>> {
    if !path.exists() {
        debug!(path = %path.display(), "alias file not found, starting empty");
        return Ok(Vec::new());
    }

    let table = read_csv_table(path)?;
    let alias = table.require_column(path, ALIAS_COLUMN)?;
    let canonical = table.require_column(path, CANONICAL_COLUMN)?;

    let mut records = Vec::with_capacity(table.len());
    for (line, row) in table.rows.iter().enumerate() {
        match AliasRecord::new(row[alias].as_str(), row[canonical].as_str()) {
            Ok(record) => records.push(record),
            Err(err) => warn!(path = %path.display(), row = line + 1, %err, "skipping alias record"),
        }
    }
    info!(path = %path.display(), aliases = records.len(), "aliases loaded");
    Ok(records)
}

impl AliasSink for CsvReferenceSource {
    fn append_alias(&self, record: &AliasRecord) -> Result<()> {
        let path = self
            .alias_path
            .as_deref()
            .ok_or(IngestError::AliasFileNotConfigured)?;
        append_alias_record(path, record)
    }
}

/// Append `record` to the alias CSV at `path`, writing the header when the
/// file is new.
///
/// An existing file keeps its own header: the new row follows that header's
/// column order and width, with any extra columns left blank.
///
/// The current content plus the new row goes to a temp file that is synced
/// and renamed over `path`, so a failure leaves the old file intact.
pub fn append_alias_record(path: &Path, record: &AliasRecord) -> Result<()> {
    let mut buffer = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
        Err(source) => {
            return Err(IngestError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let needs_header = buffer.iter().all(u8::is_ascii_whitespace);
    let row = if needs_header {
        buffer.clear();
        vec![record.alias.clone(), record.canonical.clone()]
    } else {
        if !buffer.ends_with(b"\n") {
            buffer.push(b'\n');
        }
        let table = read_csv_table(path)?;
        let alias = table.require_column(path, ALIAS_COLUMN)?;
        let canonical = table.require_column(path, CANONICAL_COLUMN)?;
        let mut row = vec![String::new(); table.headers.len()];
        row[alias].clone_from(&record.alias);
        row[canonical].clone_from(&record.canonical);
        row
    };

    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        if needs_header {
            writer
                .write_record([ALIAS_COLUMN, CANONICAL_COLUMN])
                .map_err(|source| csv_error(path, source))?;
        }
        writer
            .write_record(&row)
            .map_err(|source| csv_error(path, source))?;
        writer.flush().map_err(|source| IngestError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source,
        })?;
    }

    write_atomic(path, &buffer)?;
    info!(path = %path.display(), alias = %record.alias, canonical = %record.canonical, "alias registered");
    Ok(())
}

/// Write `bytes` to `path` via a temp file and rename.
///
/// Either the full content lands at `path` or the previous file is left as
/// it was.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let result = write_temp(&temp_path, bytes).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|source| IngestError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source,
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|source| IngestError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source,
    })?;
    file.write_all(bytes).map_err(|source| IngestError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source,
    })?;
    file.sync_all().map_err(|source| IngestError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source,
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
