use std::path::PathBuf;

use recon_cli::pipeline::BatchSummary;

/// Outcome of a `process` run, for the summary printout.
#[derive(Debug)]
pub struct ProcessResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub summary: BatchSummary,
}
