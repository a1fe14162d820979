//! Test execution records - the data model shared by the recorder and analyzer.
//!
//! These types mirror the per-test and per-file result events emitted by the
//! test runner. The recorder consumes them read-only; it never mutates a
//! record after the runner hands it over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Test ran and all assertions held.
    Passed,
    /// Test ran and at least one assertion failed.
    Failed,
    /// Test was explicitly skipped.
    Skipped,
    /// Test was declared but not yet implemented.
    Pending,
}

impl TestStatus {
    /// Human-readable label used in diagnostic artifacts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
            Self::Pending => "PENDING",
        }
    }
}

/// Source position of a test declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

/// One executed test case, as reported by the runner.
///
/// `failure_messages` is verbatim and ordered - the recorder dumps it
/// unmodified so the analyzer (and humans) see exactly what the assertion
/// framework printed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestExecutionRecord {
    /// Fully qualified test name (describe path + title).
    pub full_name: String,

    /// Leaf test title.
    pub title: String,

    /// Outcome status.
    pub status: TestStatus,

    /// Wall-clock duration in milliseconds, if the runner measured one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Number of passing assertions.
    #[serde(default)]
    pub passing_asserts: u32,

    /// Number of failing assertions.
    #[serde(default)]
    pub failing_asserts: u32,

    /// Where the test is declared, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,

    /// Raw failure messages, verbatim and in emission order.
    #[serde(default)]
    pub failure_messages: Vec<String>,
}

/// Snapshot of the process environment at record time.
///
/// Capture never fails: anything the platform refuses to report degrades to
/// zero or `unknown` rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    /// Operating system family (`linux`, `macos`, ...).
    pub platform: String,

    /// Runtime identifier (tool name + version).
    pub runtime: String,

    /// Working directory at capture time.
    pub working_dir: String,

    /// Resident memory of this process in bytes.
    pub memory_bytes: u64,

    /// Process id.
    pub pid: u32,

    /// Process uptime in seconds.
    pub uptime_secs: u64,
}

impl EnvironmentSnapshot {
    /// Capture the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        let working_dir = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let (memory_bytes, uptime_secs) = match sysinfo::get_current_pid() {
            Ok(pid) => {
                let sys = sysinfo::System::new_all();
                sys.process(pid)
                    .map_or((0, 0), |p| (p.memory(), p.run_time()))
            }
            Err(_) => (0, 0),
        };

        Self {
            platform: std::env::consts::OS.to_string(),
            runtime: format!("dashtriage/{}", env!("CARGO_PKG_VERSION")),
            working_dir,
            memory_bytes,
            pid: std::process::id(),
            uptime_secs,
        }
    }
}

/// Timing stats for one test-file run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimingStats {
    /// Run start, epoch milliseconds.
    pub start_ms: i64,

    /// Run end, epoch milliseconds.
    pub end_ms: i64,
}

impl TimingStats {
    /// Elapsed wall-clock time in milliseconds (clamped at zero).
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        (self.end_ms - self.start_ms).max(0)
    }
}

/// Per-test-file result event: everything the recorder persists for one file.
///
/// Created when the runner finishes a test file, serialized to the record
/// store immediately, and never mutated afterwards. The next run of the same
/// file overwrites the artifact wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticLog {
    /// Absolute path of the test file. Must be non-empty.
    pub test_file_path: PathBuf,

    /// Ordered per-test records for this file.
    pub records: Vec<TestExecutionRecord>,

    /// Environment at record time.
    pub environment: EnvironmentSnapshot,

    /// Timing stats for this file.
    pub timing: TimingStats,
}

impl DiagnosticLog {
    /// True when any record in this file failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.records.iter().any(|r| r.status == TestStatus::Failed)
    }

    /// Records with the given status, in order.
    pub fn with_status(&self, status: TestStatus) -> impl Iterator<Item = &TestExecutionRecord> {
        self.records.iter().filter(move |r| r.status == status)
    }
}

/// Run-level result event: aggregate counts plus every per-file payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResults {
    /// Total passed tests across the run.
    pub passed: u32,

    /// Total failed tests across the run.
    pub failed: u32,

    /// Total tests across the run.
    pub total: u32,

    /// Run start time.
    pub started_at: DateTime<Utc>,

    /// Per-file payloads, in completion order.
    pub files: Vec<DiagnosticLog>,
}

/// Condensed per-run summary, written once at run completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub passed: u32,
    pub failed: u32,
    pub total: u32,

    /// Whole-suite duration in milliseconds.
    pub duration_ms: i64,

    /// Passed / total, 0.0-1.0. Zero when the run had no tests.
    pub success_rate: f64,

    pub environment: EnvironmentSnapshot,
}

impl RunSummary {
    /// Build a summary from the run-level event.
    #[must_use]
    pub fn from_results(results: &RunResults, completed_at: DateTime<Utc>) -> Self {
        let success_rate = if results.total == 0 {
            0.0
        } else {
            f64::from(results.passed) / f64::from(results.total)
        };

        Self {
            passed: results.passed,
            failed: results.failed,
            total: results.total,
            duration_ms: (completed_at - results.started_at).num_milliseconds().max(0),
            success_rate,
            environment: EnvironmentSnapshot::capture(),
        }
    }
}
