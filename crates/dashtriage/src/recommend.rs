//! Recommendation generator - maps mismatch populations to remediation.
//!
//! Each category is evaluated independently, so a run emits zero to four
//! recommendations. The mapping is deterministic: the same mismatch
//! population always yields the same entries, and each entry's `details`
//! states the triggering count literally.

use crate::classify::{Mismatch, MismatchCategory};
use serde::{Deserialize, Serialize};

/// Remediation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Short human label, matching the serialized report vocabulary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// One prioritized, human-actionable remediation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,

    /// Short issue name.
    pub issue: String,

    /// What to do about it.
    pub action: String,

    /// Literally states the triggering count.
    pub details: String,

    /// Ordered remediation steps.
    pub steps: Vec<String>,
}

/// Count mismatches in the given category.
#[must_use]
pub fn count_category(mismatches: &[Mismatch], category: MismatchCategory) -> usize {
    mismatches.iter().filter(|m| m.category == category).count()
}

/// Generate the recommendation set for a mismatch population.
#[must_use]
pub fn recommend(mismatches: &[Mismatch]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let format = count_category(mismatches, MismatchCategory::Format);
    if format > 0 {
        recommendations.push(Recommendation {
            priority: Priority::High,
            issue: "Response format mismatch".to_string(),
            action: "Review response construction logic".to_string(),
            details: format!("{format} format mismatches found"),
            steps: vec![
                "Compare the serialized response shape against the expected schema".to_string(),
                "Fix field ordering, nesting, or envelope differences at the construction site"
                    .to_string(),
                "Re-run the failing suite and re-validate: dashtriage analyze".to_string(),
            ],
        });
    }

    let classification = count_category(mismatches, MismatchCategory::Classification);
    if classification > 0 {
        recommendations.push(Recommendation {
            priority: Priority::High,
            issue: "Error classification mismatch".to_string(),
            action: "Review error classification rules".to_string(),
            details: format!("{classification} classification mismatches found"),
            steps: vec![
                "Locate where validation failures are mapped to error kinds".to_string(),
                "Ensure client-input problems classify as validation errors, not server errors"
                    .to_string(),
                "Add a regression test for each misclassified case".to_string(),
            ],
        });
    }

    let field = count_category(mismatches, MismatchCategory::Field);
    if field > 0 {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            issue: "Missing response field".to_string(),
            action: "Review response field completeness".to_string(),
            details: format!("{field} field mismatches found"),
            steps: vec![
                "Check that correlation identifiers are attached to every response".to_string(),
                "Audit serializer allow-lists for dropped fields".to_string(),
            ],
        });
    }

    let status = count_category(mismatches, MismatchCategory::Status);
    if status > 0 {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            issue: "Status code mismatch".to_string(),
            action: "Review routing and middleware".to_string(),
            details: format!("{status} status code mismatches found"),
            steps: vec![
                "Verify route registration for the endpoints under test".to_string(),
                "Check middleware ordering for handlers that short-circuit to 404".to_string(),
            ],
        });
    }

    recommendations
}

#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch(category: MismatchCategory) -> Mismatch {
        Mismatch {
            category,
            expected: "e".to_string(),
            received: "r".to_string(),
            source: "a.txt".to_string(),
        }
    }

    #[test]
    fn empty_population_yields_no_recommendations() {
        assert!(recommend(&[]).is_empty());
    }

    #[test]
    fn type_only_population_yields_no_recommendations() {
        assert!(recommend(&[mismatch(MismatchCategory::Type)]).is_empty());
    }

    #[test]
    fn status_mismatch_is_medium_with_literal_count() {
        let recs = recommend(&[mismatch(MismatchCategory::Status)]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].details.contains("1 status code mismatches found"));
    }

    #[test]
    fn format_mismatch_is_high_with_literal_count() {
        let recs = recommend(&[
            mismatch(MismatchCategory::Format),
            mismatch(MismatchCategory::Format),
        ]);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].details, "2 format mismatches found");
        assert!(!recs[0].steps.is_empty());
    }

    #[test]
    fn all_categories_yield_four_entries() {
        let recs = recommend(&[
            mismatch(MismatchCategory::Format),
            mismatch(MismatchCategory::Classification),
            mismatch(MismatchCategory::Field),
            mismatch(MismatchCategory::Status),
            mismatch(MismatchCategory::Type),
        ]);
        assert_eq!(recs.len(), 4);
        // HIGH entries come before MEDIUM ones.
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[1].priority, Priority::High);
        assert_eq!(recs[2].priority, Priority::Medium);
        assert_eq!(recs[3].priority, Priority::Medium);
    }

    #[test]
    fn generation_is_deterministic() {
        let input = vec![mismatch(MismatchCategory::Field), mismatch(MismatchCategory::Status)];
        assert_eq!(recommend(&input), recommend(&input));
    }

    #[test]
    fn priority_serde_is_uppercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"HIGH\"");
    }

    #[test]
    fn priority_label_matches_serialized_form() {
        for priority in [Priority::High, Priority::Medium, Priority::Low] {
            let serialized = serde_json::to_string(&priority).unwrap();
            assert_eq!(serialized, format!("{:?}", priority.label()));
        }
    }
}
