//! CLI entry point for the `bidx` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use book_index::cli::commands;
use book_index::IndexError;

#[derive(Parser)]
#[command(
    name = "bidx",
    about = "Back-of-book index builder for content-tree documents"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan entry documents and expand the index documents
    Build {
        /// Path to the build config (TOML)
        #[arg(long)]
        config: PathBuf,
        /// Build only this index document
        #[arg(long)]
        index: Option<PathBuf>,
    },
    /// Print the resolved and sorted indexes as JSON
    Dump {
        /// Path to the build config (TOML)
        #[arg(long)]
        config: PathBuf,
        /// Dump only this index document
        #[arg(long)]
        index: Option<PathBuf>,
        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Scan documents standalone and report their index commands
    Check {
        /// Documents to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Build { config, index } => commands::cmd_build(&config, index.as_deref(), json),
        Commands::Dump {
            config,
            index,
            pretty,
        } => commands::cmd_dump(&config, index.as_deref(), pretty),
        Commands::Check { files } => commands::cmd_check(&files, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            IndexError::Io(_) => 1,
            IndexError::Json(_) => 2,
            IndexError::Config(_) | IndexError::UnknownDocument(_) => 3,
            IndexError::AnchorPath(_) => 4,
        };
        process::exit(code);
    }
}
