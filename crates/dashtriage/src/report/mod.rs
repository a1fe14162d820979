//! Reporting module for failure analysis results.
//!
//! Two output formats for different consumers:
//! - **JSON**: machine-readable output for CI/CD pipelines
//! - **Text**: human-readable triage report
//!
//! # Examples
//!
//! ```no_run
//! use dashtriage::report::json::JsonReportGenerator;
//! # use dashtriage::analyzer::AnalysisReport;
//! # fn example(analysis: AnalysisReport) -> anyhow::Result<()> {
//! JsonReportGenerator::generate(&analysis, "failure-analysis.json")?;
//! # Ok(())
//! # }
//! ```

pub mod json;
pub mod text;

use crate::analyzer::AnalysisReport;

/// Fixed filename of the structured report artifact.
pub const JSON_REPORT_FILE: &str = "failure-analysis.json";

/// Fixed filename of the human-readable report artifact.
pub const TEXT_REPORT_FILE: &str = "failure-analysis.txt";

/// Generate exit code based on analysis results.
///
/// Returns 0 when no mismatches were found, non-zero otherwise. Useful for
/// CI/CD pipelines.
#[must_use]
pub fn exit_code(analysis: &AnalysisReport) -> i32 {
    i32::from(analysis.has_mismatches())
}
