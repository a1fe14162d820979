// Copyright 2026 Dropbox (created by Andrew Yates <ayates@dropbox.com>)
// Allow clippy warnings for CLI application
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::clone_on_ref_ptr)]
#![allow(clippy::needless_pass_by_value, clippy::redundant_clone)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{analyze, record};
use output::print_error;

/// dashtriage CLI - test diagnostics recording and failure pattern analysis
///
/// **Recording** (invoked by the test runner after a suite run):
///   record
///
/// **Analysis** (on demand, exits non-zero when mismatches are found):
///   analyze
#[derive(Parser)]
#[command(name = "dashtriage")]
#[command(author = "Andrew Yates")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "dashtriage - test diagnostics and failure pattern analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a runner-emitted JSON run payload into the record store
    Record(record::RecordArgs),

    /// Analyze recorded failures for ranked mismatch patterns
    Analyze(analyze::AnalyzeArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(err) = dispatch(cli) {
        print_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Record(args) => record::run(args),
        Commands::Analyze(args) => analyze::run(args),
    }
}
