//! CLI argument definitions for `recon`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "recon",
    version,
    about = "Reconcile supplier names and decode adjustment comments",
    long_about = "Reconcile free-text supplier names against a master list and decode\n\
                  adjustment comments into action, quantity, brand and type.\n\n\
                  Supplier aliases registered with `recon alias add` are used on the next run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow supplier names and comments to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process an input CSV and write the reconciled file.
    Process(ProcessArgs),

    /// Decode a single comment.
    Decode(DecodeArgs),

    /// Resolve a single supplier name.
    Resolve(ResolveArgs),

    /// Manage supplier aliases.
    #[command(subcommand)]
    Alias(AliasCommand),
}

/// Reference files shared by the commands that need the master list.
#[derive(Args)]
pub struct ReferenceArgs {
    /// Master CSV with Proveedor, Marca and Tipo columns.
    #[arg(long = "master", value_name = "CSV")]
    pub master: PathBuf,

    /// Alias CSV with alias and nombre_real columns (may not exist yet).
    #[arg(long = "aliases", value_name = "CSV")]
    pub aliases: Option<PathBuf>,
}

#[derive(Args)]
pub struct ThresholdArgs {
    /// Minimum partial-ratio score for brand and type matches (0-100).
    #[arg(long = "entity-threshold", value_name = "N")]
    pub entity_threshold: Option<f64>,

    /// Minimum token-set score for a master supplier match (0-100).
    #[arg(long = "supplier-threshold", value_name = "N")]
    pub supplier_threshold: Option<f64>,

    /// Minimum token-sort score for applying an alias (0-100).
    #[arg(long = "alias-threshold", value_name = "N")]
    pub alias_threshold: Option<f64>,
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Input CSV with Proveedor and Comentario columns.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Output CSV (default: <INPUT stem>_procesado.csv next to the input).
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Sort rows RESTAR, SUMAR, NEUTRO and then by supplier.
    #[arg(long = "review-order")]
    pub review_order: bool,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// Comment text.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Master CSV providing the brand and type catalogs.
    #[arg(long = "master", value_name = "CSV")]
    pub master: PathBuf,

    /// Minimum partial-ratio score for brand and type matches (0-100).
    #[arg(long = "entity-threshold", value_name = "N")]
    pub entity_threshold: Option<f64>,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Supplier name as written in the input.
    #[arg(value_name = "SUPPLIER")]
    pub supplier: String,

    #[command(flatten)]
    pub reference: ReferenceArgs,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

#[derive(Subcommand)]
pub enum AliasCommand {
    /// Register a new alias for a master supplier.
    Add(AliasAddArgs),

    /// List registered aliases.
    List(AliasListArgs),
}

#[derive(Args)]
pub struct AliasAddArgs {
    /// Name as it appears in input files.
    #[arg(value_name = "ALIAS")]
    pub alias: String,

    /// Master supplier it stands for.
    #[arg(value_name = "CANONICAL")]
    pub canonical: String,

    /// Master CSV used to check the canonical name.
    #[arg(long = "master", value_name = "CSV")]
    pub master: PathBuf,

    /// Alias CSV to append to (created with a header if missing).
    #[arg(long = "aliases", value_name = "CSV")]
    pub aliases: PathBuf,

    /// Register even if CANONICAL is not a master supplier.
    #[arg(long = "allow-unknown")]
    pub allow_unknown: bool,
}

#[derive(Args)]
pub struct AliasListArgs {
    /// Alias CSV to read.
    #[arg(long = "aliases", value_name = "CSV")]
    pub aliases: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
