//! Supplier and comment reconciliation CLI.

use clap::{ColorChoice, Parser};
use recon_cli::logging::{LogConfig, LogFormat, init_logging};
use recon_ingest::IngestError;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{AliasCommand, Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_alias_add, run_alias_list, run_decode, run_process, run_resolve};
use crate::summary::{
    print_alias_added, print_aliases, print_decode, print_resolution, print_summary,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Process(args) => run_process(args).map(|result| print_summary(&result)),
        Command::Decode(args) => run_decode(args).map(|result| print_decode(&args.text, &result)),
        Command::Resolve(args) => {
            run_resolve(args).map(|resolution| print_resolution(&args.supplier, &resolution))
        }
        Command::Alias(AliasCommand::Add(args)) => {
            run_alias_add(args).map(|record| print_alias_added(&record))
        }
        Command::Alias(AliasCommand::List(args)) => {
            run_alias_list(args).map(|records| print_aliases(&records))
        }
    };
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) {
    eprintln!("error: {error:#}");
    if let Some(ingest) = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<IngestError>())
    {
        eprintln!("hint: {}", ingest.user_message());
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
