//! Failure pattern analyzer - orchestrates extraction through reporting.
//!
//! Runs on demand, independently of the recorder, over whatever the test
//! sources and record store currently contain. Idempotent: rerunning with
//! the same inputs reproduces the same report (timestamps aside).
//!
//! ```no_run
//! use dashtriage::analyzer::FailureAnalyzer;
//!
//! # fn example() -> anyhow::Result<()> {
//! let report = FailureAnalyzer::new("tests", "diagnostics", "reports").run()?;
//! if report.has_mismatches() {
//!     eprintln!("{} mismatches found", report.mismatches.len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::aggregate::{aggregate, Pattern};
use crate::classify::{Mismatch, MismatchCategory};
use crate::extract::{
    extract_failure_comparisons, scan_source_expectations, Comparison, SourceExpectation,
};
use crate::recommend::{recommend, Recommendation};
use crate::report;
use crate::store::RecordStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary counters over the mismatch population.
///
/// Always recomputable from the mismatch list via
/// [`ReportSummary::from_mismatches`]; no counter is mutated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_comparisons: usize,
    pub classification_issues: usize,
    pub field_issues: usize,
    pub format_issues: usize,
    pub status_issues: usize,
    pub type_issues: usize,
}

impl ReportSummary {
    /// Recompute the counters by scanning the mismatch list.
    #[must_use]
    pub fn from_mismatches(mismatches: &[Mismatch], total_comparisons: usize) -> Self {
        let count = |category: MismatchCategory| {
            mismatches.iter().filter(|m| m.category == category).count()
        };
        Self {
            total_comparisons,
            classification_issues: count(MismatchCategory::Classification),
            field_issues: count(MismatchCategory::Field),
            format_issues: count(MismatchCategory::Format),
            status_issues: count(MismatchCategory::Status),
            type_issues: count(MismatchCategory::Type),
        }
    }

    /// Total mismatches across all categories.
    #[must_use]
    pub fn total_mismatches(&self) -> usize {
        self.classification_issues
            + self.field_issues
            + self.format_issues
            + self.status_issues
            + self.type_issues
    }
}

/// Root aggregate persisted to both report formats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// When the analysis ran.
    pub timestamp: DateTime<Utc>,

    /// Declared expectations found in test sources (context, not compared).
    pub source_expectations: Vec<SourceExpectation>,

    /// Every extracted expected/received pair.
    pub comparisons: Vec<Comparison>,

    /// Every classified mismatch, append-only, never deduplicated here.
    pub mismatches: Vec<Mismatch>,

    /// Counters recomputed from the mismatch list.
    pub summary: ReportSummary,

    /// Ranked patterns, descending by count.
    pub patterns: Vec<Pattern>,

    /// Prioritized remediation entries.
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    /// True when at least one mismatch was found. Drives the exit signal.
    #[must_use]
    pub fn has_mismatches(&self) -> bool {
        !self.mismatches.is_empty()
    }

    /// Build a report from extraction results. Pure given its inputs, apart
    /// from the timestamp.
    #[must_use]
    pub fn build(
        source_expectations: Vec<SourceExpectation>,
        comparisons: Vec<Comparison>,
    ) -> Self {
        let mismatches: Vec<Mismatch> =
            comparisons.iter().map(Mismatch::from_comparison).collect();
        let summary = ReportSummary::from_mismatches(&mismatches, comparisons.len());
        let patterns = aggregate(&mismatches);
        let recommendations = recommend(&mismatches);

        Self {
            timestamp: Utc::now(),
            source_expectations,
            comparisons,
            mismatches,
            summary,
            patterns,
            recommendations,
        }
    }
}

/// Orchestrates the analysis pipeline end to end.
#[derive(Debug)]
pub struct FailureAnalyzer {
    sources_root: PathBuf,
    store: RecordStore,
    output_dir: PathBuf,
}

impl FailureAnalyzer {
    /// Configure an analyzer over a test-source root, a record-store root,
    /// and a report output directory.
    #[must_use]
    pub fn new(
        sources_root: impl Into<PathBuf>,
        store_root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sources_root: sources_root.into(),
            store: RecordStore::new(store_root.into()),
            output_dir: output_dir.into(),
        }
    }

    /// Path of the structured report artifact this analyzer writes.
    #[must_use]
    pub fn json_report_path(&self) -> PathBuf {
        self.output_dir.join(report::JSON_REPORT_FILE)
    }

    /// Path of the human-readable report artifact this analyzer writes.
    #[must_use]
    pub fn text_report_path(&self) -> PathBuf {
        self.output_dir.join(report::TEXT_REPORT_FILE)
    }

    /// Run the full pipeline: extract, classify, aggregate, recommend, and
    /// write both report artifacts.
    ///
    /// Extraction absence degrades to an empty (successful) report; a report
    /// write failure is pipeline-fatal and propagates to the caller.
    pub fn run(&self) -> Result<AnalysisReport> {
        tracing::debug!(
            sources = %self.sources_root.display(),
            store = %self.store.root().display(),
            "starting failure pattern analysis"
        );

        let source_expectations = scan_source_expectations(&self.sources_root);
        let comparisons = extract_failure_comparisons(&self.store);
        let analysis = AnalysisReport::build(source_expectations, comparisons);

        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "failed to create report directory {}",
                self.output_dir.display()
            )
        })?;
        report::json::JsonReportGenerator::generate(&analysis, self.json_report_path())?;
        report::text::TextReportGenerator::generate(&analysis, self.text_report_path())?;

        tracing::debug!(
            comparisons = analysis.comparisons.len(),
            mismatches = analysis.mismatches.len(),
            patterns = analysis.patterns.len(),
            "analysis complete"
        );
        Ok(analysis)
    }
}
