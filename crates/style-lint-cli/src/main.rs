//! style-lint CLI tool.
//!
//! Usage:
//! ```bash
//! style-lint lint [OPTIONS] [PATHS]...
//! style-lint autocorrect [--dry-run] [PATHS]...
//! style-lint rules
//! style-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

use config_resolver::ConfigResolver;

/// Style linter for Swift sources
#[derive(Parser)]
#[command(name = "style-lint")]
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
    /// Report style violations
    Lint {
        /// Files or directories to lint (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,
    },

    /// Rewrite files to fix correctable violations
    Autocorrect {
        /// Files or directories to correct (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Report corrections without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// List available rules
    Rules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Source snippets with labels.
    Fancy,
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
        .with_writer(std::io::stderr)
        .init();

    let resolver = ConfigResolver::new(cli.config.as_deref());

    match cli.command {
        Commands::Lint {
            paths,
            format,
            strict,
        } => commands::lint::run(resolver.resolve(&paths)?, format, strict),
        Commands::Autocorrect { paths, dry_run } => {
            commands::autocorrect::run(resolver.resolve(&paths)?, dry_run)
        }
        Commands::Rules => {
            commands::rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(Path::new("."), force),
    }
}
