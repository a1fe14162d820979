//! Human-readable text report for triage sessions.
//!
//! One sectioned plain-text artifact: header, timestamp, summary counters,
//! the top 10 ranked patterns (with occurrence and distinct-file counts),
//! and the full recommendation list with every step enumerated.

use crate::analyzer::AnalysisReport;
use anyhow::{Context, Result};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

/// How many ranked patterns the text report shows.
const TOP_PATTERNS: usize = 10;

/// Text report generator.
pub struct TextReportGenerator;

impl TextReportGenerator {
    /// Render the analysis to `output_path` as plain text.
    pub fn generate(analysis: &AnalysisReport, output_path: impl AsRef<Path>) -> Result<()> {
        let body = Self::generate_string(analysis);
        fs::write(output_path.as_ref(), body).with_context(|| {
            format!(
                "failed to write text report to {}",
                output_path.as_ref().display()
            )
        })?;
        Ok(())
    }

    /// Render the report body without writing to a file.
    #[must_use]
    pub fn generate_string(analysis: &AnalysisReport) -> String {
        let mut out = String::new();
        let rule = "=".repeat(72);

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "DASHTRIAGE FAILURE ANALYSIS");
        let _ = writeln!(out, "Generated: {}", analysis.timestamp.to_rfc3339());
        let _ = writeln!(out, "{rule}");

        let s = &analysis.summary;
        let _ = writeln!(out, "\n-- SUMMARY --");
        let _ = writeln!(out, "Comparisons analyzed:      {}", s.total_comparisons);
        let _ = writeln!(out, "Total mismatches:          {}", s.total_mismatches());
        let _ = writeln!(out, "  classification:          {}", s.classification_issues);
        let _ = writeln!(out, "  field:                   {}", s.field_issues);
        let _ = writeln!(out, "  format:                  {}", s.format_issues);
        let _ = writeln!(out, "  status:                  {}", s.status_issues);
        let _ = writeln!(out, "  type:                    {}", s.type_issues);
        let _ = writeln!(
            out,
            "Source expectations found: {}",
            analysis.source_expectations.len()
        );

        let _ = writeln!(
            out,
            "\n-- TOP PATTERNS (showing {} of {}) --",
            analysis.patterns.len().min(TOP_PATTERNS),
            analysis.patterns.len()
        );
        for (rank, pattern) in analysis.patterns.iter().take(TOP_PATTERNS).enumerate() {
            let _ = writeln!(
                out,
                "{:>2}. [{}] expected {:?} => received {:?}  (x{}, {} file{})",
                rank + 1,
                pattern.category,
                pattern.expected,
                pattern.received,
                pattern.count,
                pattern.provenance.len(),
                if pattern.provenance.len() == 1 { "" } else { "s" },
            );
        }

        let _ = writeln!(
            out,
            "\n-- RECOMMENDATIONS ({}) --",
            analysis.recommendations.len()
        );
        for rec in &analysis.recommendations {
            let _ = writeln!(out, "[{}] {}", rec.priority.label(), rec.issue);
            let _ = writeln!(out, "  Action:  {}", rec.action);
            let _ = writeln!(out, "  Details: {}", rec.details);
            for (idx, step) in rec.steps.iter().enumerate() {
                let _ = writeln!(out, "  {}. {step}", idx + 1);
            }
        }

        out
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Comparison;
    use tempfile::TempDir;

    fn comparison(expected: &str, received: &str, source: &str) -> Comparison {
        Comparison {
            expected: expected.to_string(),
            received: received.to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn text_report_has_all_sections() {
        let analysis = AnalysisReport::build(
            vec![],
            vec![comparison("200", "404", "convert.test.txt")],
        );
        let body = TextReportGenerator::generate_string(&analysis);

        assert!(body.contains("DASHTRIAGE FAILURE ANALYSIS"));
        assert!(body.contains("-- SUMMARY --"));
        assert!(body.contains("-- TOP PATTERNS"));
        assert!(body.contains("-- RECOMMENDATIONS (1) --"));
        assert!(body.contains("1 status code mismatches found"));
    }

    #[test]
    fn text_report_caps_patterns_at_ten() {
        let comparisons: Vec<Comparison> = (0..15)
            .map(|i| comparison(&format!("value-{i}"), "other", "a.txt"))
            .collect();
        let analysis = AnalysisReport::build(vec![], comparisons);
        let body = TextReportGenerator::generate_string(&analysis);

        assert!(body.contains("showing 10 of 15"));
        assert!(body.contains("10. "));
        assert!(!body.contains("11. "));
    }

    #[test]
    fn text_report_writes_to_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("failure-analysis.txt");
        let analysis = AnalysisReport::build(vec![], vec![]);

        TextReportGenerator::generate(&analysis, &path).unwrap();
        let body = fs::read_to_string(&path).unwrap();
        assert!(body.contains("Total mismatches:          0"));
        assert!(body.contains("-- RECOMMENDATIONS (0) --"));
    }

    #[test]
    fn recommendation_priorities_use_uppercase_labels() {
        let analysis = AnalysisReport::build(
            vec![],
            vec![
                comparison("{\"a\":1}", "plain", "a.txt"),
                comparison("200", "404", "b.txt"),
            ],
        );
        let body = TextReportGenerator::generate_string(&analysis);

        // Same vocabulary as the JSON artifact's serialized `Priority`.
        assert!(body.contains("[HIGH] Response format mismatch"));
        assert!(body.contains("[MEDIUM] Status code mismatch"));
        assert!(!body.contains("[High]"));
        assert!(!body.contains("[Medium]"));
    }

    #[test]
    fn steps_are_enumerated() {
        let analysis = AnalysisReport::build(
            vec![],
            vec![comparison("{\"a\":1}", "plain", "a.txt")],
        );
        let body = TextReportGenerator::generate_string(&analysis);
        assert!(body.contains("  1. "));
        assert!(body.contains("  2. "));
    }
}
