//! stylefix CLI tool.
//!
//! Usage:
//! ```bash
//! stylefix check [OPTIONS] [PATH]
//! stylefix fix [OPTIONS] [PATH]
//! stylefix list-analyzers
//! stylefix init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod loader;

/// Code-style checker and fixer for source trees
#[derive(Parser)]
#[command(name = "stylefix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report style diagnostics without changing files
    Check {
        /// Path to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific analyzers (comma-separated names or codes)
        #[arg(long)]
        analyzers: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Emit diagnostics with error severity and a failing exit code
        #[arg(long)]
        as_errors: bool,
    },

    /// Apply automatic fixes and write changed files back to disk
    Fix {
        /// Path to fix (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only run specific analyzers (comma-separated names or codes)
        #[arg(long)]
        analyzers: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Compute fixes but do not write files
        #[arg(long)]
        dry_run: bool,
    },

    /// List available analyzers
    ListAnalyzers,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for diagnostics.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-diagnostic compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            analyzers,
            exclude,
            as_errors,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::check::run(&path, format, analyzers, exclude, as_errors, &source)
        }
        Commands::Fix {
            path,
            analyzers,
            exclude,
            dry_run,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::fix::run(&path, analyzers, exclude, dry_run, &source)
        }
        Commands::ListAnalyzers => {
            commands::list_analyzers::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
