// Copyright 2026 Dropbox (created by Andrew Yates <ayates@dropbox.com>)
//! Offline failure pattern analysis over the record store and test sources.

use crate::output::{print_analysis, print_info};
use anyhow::Result;
use clap::Args;
use dashtriage::analyzer::FailureAnalyzer;
use dashtriage::report;
use std::path::PathBuf;

/// Analyze recorded failures and test sources for mismatch patterns
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Test-source root scanned for declared expectations
    #[arg(long, default_value = "tests")]
    sources: PathBuf,

    /// Record store root directory
    #[arg(long, default_value = "diagnostics")]
    store: PathBuf,

    /// Output directory for the report artifacts
    #[arg(long, default_value = "reports")]
    out: PathBuf,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let analyzer = FailureAnalyzer::new(&args.sources, &args.store, &args.out);
    let analysis = analyzer.run()?;

    print_analysis(&analysis);
    print_info(&format!(
        "reports written to {} and {}",
        analyzer.json_report_path().display(),
        analyzer.text_report_path().display(),
    ));

    let code = report::exit_code(&analysis);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
