mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};

fn main() -> ExitCode {
    match run_app() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ljbaseline: error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!(version = env!("CARGO_PKG_VERSION"), "ljbaseline starting.");
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(threads = num_threads, "Sizing the evaluation thread pool.");
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| CliError::Other(anyhow::anyhow!("cannot size thread pool: {e}")))?;
    }

    let (name, command_result) = match cli.command {
        Commands::Evaluate(args) => ("evaluate", commands::evaluate::run(args)),
        Commands::Pairs(args) => ("pairs", commands::pairs::run(args)),
    };

    match &command_result {
        Ok(()) => info!(command = name, "Done."),
        Err(e) => error!(command = name, exit_code = e.exit_code(), "{e}"),
    }
    command_result
}
