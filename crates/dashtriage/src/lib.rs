//! dashtriage - test-diagnostics pipeline for dTOOL suites.
//!
//! Turns raw test-execution results and test-source assertions into
//! structured, ranked, actionable failure analysis. Two stages:
//!
//! - **Diagnostic recorder** ([`recorder`]): captures every test file's full
//!   execution context (environment, timing, assertion failures, raw result
//!   payload) into durable artifacts in a categorized [`store`], replacing
//!   ephemeral console output.
//! - **Failure pattern analyzer** ([`analyzer`]): mines those artifacts and
//!   the test sources for expected/received pairs ([`extract`]), classifies
//!   each mismatch ([`classify`]), aggregates repeats into ranked patterns
//!   ([`aggregate`]), and emits prioritized remediation ([`recommend`]) in
//!   machine- and human-readable [`report`]s.
//!
//! The recorder runs during the suite and is strictly best-effort; the
//! analyzer runs on demand and is idempotent over fixed inputs.
//!
//! # Example
//!
//! ```no_run
//! use dashtriage::analyzer::FailureAnalyzer;
//! use dashtriage::report;
//!
//! # fn main() -> anyhow::Result<()> {
//! let analysis = FailureAnalyzer::new("tests", "diagnostics", "reports").run()?;
//! std::process::exit(report::exit_code(&analysis))
//! # }
//! ```

pub mod aggregate;
pub mod analyzer;
pub mod classify;
pub mod extract;
pub mod recommend;
pub mod record;
pub mod recorder;
pub mod report;
pub mod store;

pub use aggregate::Pattern;
pub use analyzer::{AnalysisReport, FailureAnalyzer, ReportSummary};
pub use classify::{classify, Mismatch, MismatchCategory};
pub use extract::{Comparison, SourceExpectation};
pub use recommend::{Priority, Recommendation};
pub use record::{DiagnosticLog, RunResults, RunSummary, TestExecutionRecord, TestStatus};
pub use recorder::DiagnosticRecorder;
pub use store::RecordStore;
