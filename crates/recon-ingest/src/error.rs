//! Ingest error types.
//!
//! Reference data failures are fatal for a run; every variant carries the
//! path involved so callers can report it.

use std::path::PathBuf;

use recon_model::ModelError;
use thiserror::Error;

/// Reference data or input table error.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("invalid CSV in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is not present in the header row.
    #[error("column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// No alias file was configured, so aliases cannot be registered.
    #[error("no alias file configured")]
    AliasFileNotConfigured,

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to complete write to {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rejected record.
    #[error(transparent)]
    Validation(#[from] ModelError),

    /// The snapshot lock was poisoned by a panicking writer.
    #[error("reference snapshot lock poisoned")]
    LockPoisoned,
}

impl IngestError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the file at {}", operation, path.display()),
            Self::Csv { path, source } => {
                format!("The file at {} is not valid CSV: {}", path.display(), source)
            }
            Self::MissingColumn { path, column } => format!(
                "The file at {} has no '{}' column. Check the header row.",
                path.display(),
                column
            ),
            Self::AliasFileNotConfigured => {
                "No alias file was given; pass --aliases to register aliases.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save the file to {}. Please check disk space and permissions.",
                target_path.display()
            ),
            Self::Validation(err) => format!("Invalid record: {err}"),
            Self::LockPoisoned => {
                "Reference data is unavailable after an earlier failure; restart the run."
                    .to_string()
            }
        }
    }
}

/// Result type alias for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
