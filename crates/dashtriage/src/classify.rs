//! Mismatch classifier - assigns each expected/received pair one category.
//!
//! Classification is an ordered rule chain: a literal slice of
//! (predicate, category) pairs evaluated first-match-wins. Order matters -
//! the categories are not mutually exclusive under naive text matching
//! (a structured validation-error payload would also match the `format`
//! rule), so earlier rules deliberately shadow later ones.

use crate::extract::{Comparison, UNDEFINED_SENTINEL};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of disagreement between an expected and a received value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchCategory {
    /// Validation error expected, server error received.
    Classification,
    /// Correlation field expected but absent from the response.
    Field,
    /// Structured-payload shape mismatch.
    Format,
    /// Success status expected, not-found status received.
    Status,
    /// Fallback: value disagreement with no more specific signature.
    Type,
}

impl MismatchCategory {
    /// Short human label, matching the report vocabulary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Field => "field",
            Self::Format => "format",
            Self::Status => "status",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for MismatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A comparison annotated with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub category: MismatchCategory,
    pub expected: String,
    pub received: String,

    /// Artifact or source file the comparison came from.
    pub source: String,
}

impl Mismatch {
    /// Classify a comparison. Mismatches are append-only; deduplication
    /// happens at aggregation, never here.
    #[must_use]
    pub fn from_comparison(comparison: &Comparison) -> Self {
        Self {
            category: classify(&comparison.expected, &comparison.received),
            expected: comparison.expected.clone(),
            received: comparison.received.clone(),
            source: comparison.source.clone(),
        }
    }
}

type Rule = (fn(&str, &str) -> bool, MismatchCategory);

/// Ordered rule chain. First match wins; the trailing `type` fallback makes
/// classification total.
const RULES: [Rule; 4] = [
    (
        |expected, received| expected.contains("validation_error") && received.contains("server_error"),
        MismatchCategory::Classification,
    ),
    // One-sided extractions are padded with the undefined sentinel, so this
    // rule also fires for values that merely read "undefined" - preserved
    // for artifact compatibility. The canonical instance is a correlation
    // identifier (request_id) expected with nothing received.
    (
        |_expected, received| received == UNDEFINED_SENTINEL,
        MismatchCategory::Field,
    ),
    (
        |expected, received| expected.contains('{') || received.contains('{'),
        MismatchCategory::Format,
    ),
    (
        |expected, received| expected.contains("200") && received.contains("404"),
        MismatchCategory::Status,
    ),
];

/// Assign exactly one category to an expected/received pair.
///
/// Deterministic and total: equal inputs always classify identically, and
/// every input gets a category (`type` when no rule matches).
#[must_use]
pub fn classify(expected: &str, received: &str) -> MismatchCategory {
    RULES
        .iter()
        .find(|(predicate, _)| predicate(expected, received))
        .map_or(MismatchCategory::Type, |(_, category)| *category)
}

#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_rule_matches_marker_pair() {
        assert_eq!(
            classify("validation_error", "server_error"),
            MismatchCategory::Classification
        );
    }

    #[test]
    fn classification_precedes_format() {
        // Both sides carry structural delimiters, but rule 1 runs first.
        assert_eq!(
            classify("{\"error\":\"validation_error\"}", "server_error"),
            MismatchCategory::Classification
        );
    }

    #[test]
    fn field_rule_requires_exact_sentinel() {
        assert_eq!(classify("request_id", "undefined"), MismatchCategory::Field);
        // Padding conflation: any missing received value classifies as field.
        assert_eq!(classify("ok", "undefined"), MismatchCategory::Field);
        // A non-sentinel received value is not a missing field.
        assert_eq!(classify("request_id", "abc-123"), MismatchCategory::Type);
        assert_eq!(classify("ok", "undefined!"), MismatchCategory::Type);
    }

    #[test]
    fn format_rule_matches_either_side() {
        assert_eq!(classify("{\"ok\":true}", "plain"), MismatchCategory::Format);
        assert_eq!(classify("plain", "{\"ok\":false}"), MismatchCategory::Format);
    }

    #[test]
    fn status_rule_matches_code_pair() {
        assert_eq!(classify("200", "404"), MismatchCategory::Status);
        assert_eq!(classify("HTTP 200 OK", "HTTP 404 Not Found"), MismatchCategory::Status);
    }

    #[test]
    fn fallback_is_type() {
        assert_eq!(classify("foo", "bar"), MismatchCategory::Type);
        assert_eq!(classify("", ""), MismatchCategory::Type);
    }

    #[test]
    fn field_precedes_format_and_status() {
        assert_eq!(
            classify("request_id in {body}", "undefined"),
            MismatchCategory::Field
        );
    }

    #[test]
    fn classification_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(classify("200", "404"), MismatchCategory::Status);
        }
    }

    #[test]
    fn category_serde_is_lowercase() {
        let json = serde_json::to_string(&MismatchCategory::Status).unwrap();
        assert_eq!(json, "\"status\"");
    }
}
