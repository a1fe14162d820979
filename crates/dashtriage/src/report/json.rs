//! JSON output for CI/CD integration and programmatic consumption.
//!
//! The structured artifact is the full [`AnalysisReport`], pretty-printed.
//! All data-model fields are present; key ordering is whatever serde emits.

use crate::analyzer::AnalysisReport;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// JSON report generator.
pub struct JsonReportGenerator;

impl JsonReportGenerator {
    /// Serialize the analysis to `output_path` as pretty-printed JSON.
    pub fn generate(analysis: &AnalysisReport, output_path: impl AsRef<Path>) -> Result<()> {
        let json = Self::generate_string(analysis)?;
        fs::write(output_path.as_ref(), json).with_context(|| {
            format!(
                "failed to write JSON report to {}",
                output_path.as_ref().display()
            )
        })?;
        Ok(())
    }

    /// Generate the JSON string without writing to a file.
    pub fn generate_string(analysis: &AnalysisReport) -> Result<String> {
        serde_json::to_string_pretty(analysis).context("failed to serialize analysis report")
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Comparison;
    use tempfile::TempDir;

    fn sample_analysis() -> AnalysisReport {
        AnalysisReport::build(
            vec![],
            vec![
                Comparison {
                    expected: "200".to_string(),
                    received: "404".to_string(),
                    source: "convert.test.txt".to_string(),
                },
                Comparison {
                    expected: "ok".to_string(),
                    received: "undefined".to_string(),
                    source: "health.test.txt".to_string(),
                },
            ],
        )
    }

    #[test]
    fn json_round_trips_all_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("failure-analysis.json");

        JsonReportGenerator::generate(&sample_analysis(), &path).unwrap();
        assert!(path.exists());

        let parsed: AnalysisReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.comparisons.len(), 2);
        assert_eq!(parsed.mismatches.len(), 2);
        assert_eq!(parsed.summary.total_comparisons, 2);
        assert_eq!(parsed.patterns.len(), 2);
        assert!(!parsed.recommendations.is_empty());
    }

    #[test]
    fn json_contains_category_labels() {
        let json = JsonReportGenerator::generate_string(&sample_analysis()).unwrap();
        assert!(json.contains("\"category\": \"status\""));
        assert!(json.contains("\"category\": \"field\""));
        assert!(json.contains("\"timestamp\""));
    }
}
