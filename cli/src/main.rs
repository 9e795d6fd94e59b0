//! # zipdir Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the zipdir CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system (filtered through `RUST_LOG`)
//! - Printing usage when no source directory is given
//! - Running the pack command and turning fatal errors into exit status 1
//!
//! ## Examples
//!
//! ```bash
//! # Archive a folder into ./xxx.zip
//! zipdir ../xxx
//!
//! # Choose the output path
//! zipdir ../xxx ../xxx.zip
//!
//! # Skip the target and dist directories, with debug logging
//! RUST_LOG=debug zipdir --ignore="target,dist" ../xxx ../xxx.zip
//! ```
//!
use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (the pack pipeline)
mod common; // Pipeline building blocks (filter, fs, archive, ui)
mod core; // Core infrastructure (errors, run configuration)

/// Log level used when `RUST_LOG` is not set.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Defines the command-line arguments using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "zipdir",
    about = "Archive a directory into a ZIP file, honoring .zipignore rules",
    long_about = "Archive a directory tree into a single ZIP file.\n\
                  Files and directories matching the gitignore-style rules in the \
                  source directory's .zipignore, plus any --ignore patterns, are left out.",
    after_help = "Examples:\n  \
                  zipdir ../xxx\n  \
                  zipdir ../xxx ../xxx.zip\n  \
                  zipdir --ignore=\"target,dist\" ../xxx ../xxx.zip",
    version
)]
struct Cli {
    #[command(flatten)]
    pack: commands::pack::PackArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    // No source directory: show usage and exit normally.
    if cli.pack.source.is_none() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    if let Err(e) = commands::pack::handle_pack(cli.pack) {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
