//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cfgbind_meta::DiTarget;

/// cfgbind - Generate DI modules binding configuration declarations
#[derive(Parser, Debug)]
#[command(name = "cfgbind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Generator config file
    #[arg(short, long, global = true, env = "CFGBIND_CONFIG", default_value = cfgbind_meta::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the generator config shared by every command
#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct InputArgs {
    /// Record manifest to read (repeatable); replaces the configured manifests
    #[arg(short, long = "manifest", value_name = "PATH")]
    pub manifests: Vec<PathBuf>,

    /// DI framework to generate for (dagger or guice)
    #[arg(short, long)]
    pub target: Option<DiTarget>,

    /// Output directory for generated units
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate one unit per materialized namespace
    ///
    /// Examples:
    ///   cfgbind generate                         # Use cfgbind.toml
    ///   cfgbind generate -m records.toml -t guice
    ///   cfgbind generate --dry-run               # Show what would change
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Report what would be written without writing
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Check generated units on disk for drift
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Show a unified diff for every drifted unit
        #[arg(long)]
        diff: bool,
    },

    /// List the units that would be generated and the records they bind
    Plan {
        #[command(flatten)]
        input: InputArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
