//! cfgbind CLI
//!
//! Generates dependency-injection units that bind scanned config records.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the command succeeded.
fn run() -> Result<bool> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(config = %cli.config.display(), "starting cfgbind");

    match cli.command {
        Commands::Generate {
            input,
            dry_run,
            json,
        } => commands::run_generate(&cli.config, &input, dry_run, json),
        Commands::Check { input, json, diff } => commands::run_check(&cli.config, &input, json, diff),
        Commands::Plan { input, json } => commands::run_plan(&cli.config, &input, json),
    }
}
