//! Library side of the `recon` CLI: logging setup and the batch pipeline.

pub mod logging;
pub mod pipeline;
