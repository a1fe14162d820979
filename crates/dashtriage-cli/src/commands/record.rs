// Copyright 2026 Dropbox (created by Andrew Yates <ayates@dropbox.com>)
//! Ingest a runner-emitted JSON run payload into the record store.
//!
//! The test runner (or a thin reporter shim) serializes its run-level result
//! event - per-file diagnostic logs plus aggregate counts - to JSON; this
//! command replays that payload through the recorder lifecycle.

use crate::output::{print_success, print_warning};
use anyhow::{Context, Result};
use clap::Args;
use dashtriage::record::RunResults;
use dashtriage::recorder::DiagnosticRecorder;
use dashtriage::store::RecordStore;
use std::path::PathBuf;

/// Record test diagnostics from a runner result payload
#[derive(Args)]
pub struct RecordArgs {
    /// Path to the runner's JSON run payload
    #[arg(short, long)]
    input: PathBuf,

    /// Record store root directory
    #[arg(long, default_value = "diagnostics")]
    store: PathBuf,
}

pub fn run(args: RecordArgs) -> Result<()> {
    let payload = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read run payload {}", args.input.display()))?;
    let results: RunResults = serde_json::from_str(&payload)
        .with_context(|| format!("failed to parse run payload {}", args.input.display()))?;

    let recorder = DiagnosticRecorder::new(RecordStore::new(&args.store));
    recorder.begin_run();
    for file_result in &results.files {
        recorder.record_file(file_result);
    }
    recorder.end_run(&results);

    print_success(&format!(
        "recorded {} test file(s) to {}",
        results.files.len(),
        args.store.display(),
    ));
    if results.failed > 0 {
        print_warning(&format!(
            "{} failed test(s) in this run; artifacts in {}",
            results.failed,
            args.store.join("fail").display(),
        ));
    }
    Ok(())
}
