//! Diagnostic recorder - durable, categorized capture of test-run context.
//!
//! Replaces ephemeral console output with one self-contained text artifact
//! per test file (bucketed by outcome) plus a run-level summary, so failures
//! can be inspected long after the run and mined by the analyzer.
//!
//! The recorder is strictly best-effort: every I/O failure is caught and
//! logged, and never fails the test run it describes. The lifecycle is
//! explicit so it can be tested independent of construction:
//!
//! ```no_run
//! use dashtriage::recorder::DiagnosticRecorder;
//! use dashtriage::store::RecordStore;
//!
//! # fn example(file_result: dashtriage::record::DiagnosticLog, run: dashtriage::record::RunResults) {
//! let recorder = DiagnosticRecorder::new(RecordStore::new("diagnostics"));
//! recorder.begin_run();
//! recorder.record_file(&file_result);
//! recorder.end_run(&run);
//! # }
//! ```

use crate::record::{DiagnosticLog, RunResults, RunSummary, TestExecutionRecord, TestStatus};
use crate::store::{Outcome, RecordStore};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::fmt::Write as FmtWrite;

const RULE: &str =
    "================================================================================";

/// Records per-file diagnostics and the run summary into a [`RecordStore`].
#[derive(Debug)]
pub struct DiagnosticRecorder {
    store: RecordStore,
}

impl DiagnosticRecorder {
    /// Create a recorder over the given store. No filesystem side effects;
    /// those start at [`DiagnosticRecorder::begin_run`].
    #[must_use]
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Start of run: announce the target directory and clear the previous
    /// run's artifacts. Clearing happens fully before any write of this run.
    pub fn begin_run(&self) {
        println!(
            "dashtriage: recording diagnostics to {}",
            self.store.root().display()
        );
        if let Err(err) = self.store.prepare() {
            tracing::warn!(error = %format!("{err:#}"), "could not prepare record store; diagnostics will be incomplete");
        }
    }

    /// Persist one test-file result. Validation and I/O failures are logged
    /// and swallowed - diagnostics never abort the suite they describe.
    pub fn record_file(&self, log: &DiagnosticLog) {
        match self.try_record_file(log) {
            Ok(outcome) => {
                let failed = log.with_status(TestStatus::Failed).count();
                let passed = log.with_status(TestStatus::Passed).count();
                println!(
                    "dashtriage: [{}] {} ({} passed, {} failed)",
                    if outcome == Outcome::Fail { "FAIL" } else { "PASS" },
                    log.test_file_path.display(),
                    passed,
                    failed,
                );
            }
            Err(err) => {
                tracing::warn!(
                    file = %log.test_file_path.display(),
                    error = %format!("{err:#}"),
                    "failed to record diagnostics for test file"
                );
            }
        }
    }

    /// End of run: write the fixed-name summary artifact and print a
    /// condensed console summary.
    pub fn end_run(&self, results: &RunResults) {
        let summary = RunSummary::from_results(results, Utc::now());
        let body = render_summary(&summary);
        if let Err(err) = self.store.write_summary(&body) {
            tracing::warn!(error = %format!("{err:#}"), "failed to write run summary");
        }
        println!(
            "dashtriage: run complete - {}/{} passed ({:.1}% success) in {}ms",
            summary.passed,
            summary.total,
            summary.success_rate * 100.0,
            summary.duration_ms,
        );
    }

    fn try_record_file(&self, log: &DiagnosticLog) -> Result<Outcome> {
        if log.test_file_path.as_os_str().is_empty() {
            bail!("test file path is empty");
        }

        let outcome = if log.has_failures() {
            Outcome::Fail
        } else {
            Outcome::Pass
        };

        let body = render_diagnostic_log(log);
        self.store
            .write_artifact(&log.test_file_path, outcome, &body)
            .context("record store write failed")?;
        Ok(outcome)
    }
}

/// Render the fully self-contained artifact for one test file.
#[must_use]
pub fn render_diagnostic_log(log: &DiagnosticLog) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "DASHTRIAGE DIAGNOSTIC LOG");
    let _ = writeln!(out, "Test file: {}", log.test_file_path.display());
    let _ = writeln!(out, "Recorded:  {}", Utc::now().to_rfc3339());
    let _ = writeln!(out, "{RULE}");

    render_environment(&mut out, log);
    render_timing(&mut out, log);
    render_breakdown(&mut out, log, TestStatus::Passed, "PASSING TESTS");
    render_failing(&mut out, log);
    render_skipped(&mut out, log);
    render_raw_payload(&mut out, log);

    out
}

fn render_environment(out: &mut String, log: &DiagnosticLog) {
    let env = &log.environment;
    let _ = writeln!(out, "\n-- ENVIRONMENT --");
    let _ = writeln!(out, "Platform:    {}", env.platform);
    let _ = writeln!(out, "Runtime:     {}", env.runtime);
    let _ = writeln!(out, "Working dir: {}", env.working_dir);
    let _ = writeln!(out, "Memory:      {} bytes", env.memory_bytes);
    let _ = writeln!(out, "Process:     pid {} (up {}s)", env.pid, env.uptime_secs);
}

fn render_timing(out: &mut String, log: &DiagnosticLog) {
    let _ = writeln!(out, "\n-- TIMING --");
    let _ = writeln!(
        out,
        "Window:  {} -> {} (elapsed {}ms)",
        log.timing.start_ms,
        log.timing.end_ms,
        log.timing.elapsed_ms()
    );

    let durations: Vec<u64> = log.records.iter().filter_map(|r| r.duration_ms).collect();
    if durations.is_empty() {
        let _ = writeln!(out, "Per-test durations: none reported");
        return;
    }

    let total: u64 = durations.iter().sum();
    let max = durations.iter().copied().max().unwrap_or(0);
    let min = durations.iter().copied().min().unwrap_or(0);
    let avg = total as f64 / durations.len() as f64;
    let _ = writeln!(
        out,
        "Per-test durations ({} timed): total {}ms, avg {:.1}ms, max {}ms, min {}ms",
        durations.len(),
        total,
        avg,
        max,
        min
    );
}

fn render_record_line(out: &mut String, record: &TestExecutionRecord) {
    let duration = record
        .duration_ms
        .map_or_else(|| "-".to_string(), |d| format!("{d}ms"));
    let location = record.location.as_ref().map_or_else(String::new, |loc| {
        format!("  @ {}:{}:{}", loc.file, loc.line, loc.column)
    });
    let _ = writeln!(
        out,
        "  [{}] {} ({duration}; asserts {} pass / {} fail){location}",
        record.status.label(),
        record.full_name,
        record.passing_asserts,
        record.failing_asserts,
    );
}

fn render_breakdown(out: &mut String, log: &DiagnosticLog, status: TestStatus, header: &str) {
    let records: Vec<&TestExecutionRecord> = log.with_status(status).collect();
    let _ = writeln!(out, "\n-- {header} ({}) --", records.len());
    for record in records {
        render_record_line(out, record);
    }
}

fn render_failing(out: &mut String, log: &DiagnosticLog) {
    let records: Vec<&TestExecutionRecord> = log.with_status(TestStatus::Failed).collect();
    let _ = writeln!(out, "\n-- FAILING TESTS ({}) --", records.len());
    for record in records {
        render_record_line(out, record);
        for (idx, message) in record.failure_messages.iter().enumerate() {
            let _ = writeln!(out, "  failure message {}:", idx + 1);
            for line in message.lines() {
                let _ = writeln!(out, "    {line}");
            }
            let hints = annotate_failure(message);
            if !hints.is_empty() {
                let _ = writeln!(out, "    hints: {}", hints.join(", "));
            }
        }
    }
}

fn render_skipped(out: &mut String, log: &DiagnosticLog) {
    let records: Vec<&TestExecutionRecord> = log
        .records
        .iter()
        .filter(|r| matches!(r.status, TestStatus::Skipped | TestStatus::Pending))
        .collect();
    let _ = writeln!(out, "\n-- SKIPPED TESTS ({}) --", records.len());
    for record in records {
        render_record_line(out, record);
    }
}

fn render_raw_payload(out: &mut String, log: &DiagnosticLog) {
    let _ = writeln!(out, "\n-- RAW PAYLOAD --");
    // Lossless fallback: Debug rendering when JSON serialization fails.
    match serde_json::to_string_pretty(log) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
        }
        Err(err) => {
            tracing::warn!(error = %err, "payload not JSON-serializable; emitting debug form");
            let _ = writeln!(out, "{log:#?}");
        }
    }
}

/// Light pattern hints for a raw failure message. Hints only - category
/// classification happens later in the analyzer, never here.
#[must_use]
pub fn annotate_failure(message: &str) -> Vec<&'static str> {
    let mut hints = Vec::new();
    if message.contains("expect(") {
        hints.push("assertion call");
    }
    if message.contains("Expected:") && message.contains("Received:") {
        hints.push("expected/received pair");
    }
    if message
        .lines()
        .any(|line| line.trim_start().starts_with("at "))
    {
        hints.push("stack trace");
    }
    hints
}

fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "DASHTRIAGE RUN SUMMARY");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Passed:       {}", summary.passed);
    let _ = writeln!(out, "Failed:       {}", summary.failed);
    let _ = writeln!(out, "Total:        {}", summary.total);
    let _ = writeln!(out, "Duration:     {}ms", summary.duration_ms);
    let _ = writeln!(out, "Success rate: {:.1}%", summary.success_rate * 100.0);
    let _ = writeln!(out, "\n-- ENVIRONMENT --");
    let _ = writeln!(out, "Platform:    {}", summary.environment.platform);
    let _ = writeln!(out, "Runtime:     {}", summary.environment.runtime);
    let _ = writeln!(out, "Working dir: {}", summary.environment.working_dir);
    out
}
