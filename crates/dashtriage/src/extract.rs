//! Pattern extractor - mines declared expectations and recorded failures.
//!
//! Two independent, read-only extraction paths feed the analyzer:
//!
//! - **Source expectations**: assertion lines about a response body/error in
//!   the test sources. Declared intent, carried as context in the report -
//!   these are not comparisons.
//! - **Failure comparisons**: quoted `Expected: "..."` / `Received: "..."`
//!   pairs mined from the record store's `fail/` artifacts. Same-index
//!   occurrences are paired; a one-sided occurrence is padded with the
//!   `"undefined"` sentinel so it stays comparable.
//!
//! Both paths are bounded-effort: a missing directory, an unreadable file,
//! or zero matches is an empty result, never an error.

use crate::store::RecordStore;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Literal stand-in for a missing expected or received value.
///
/// Kept for compatibility with the recorded artifact vocabulary even though
/// it conflates "no value" with the string `"undefined"` - a known source of
/// false `field` classifications downstream.
pub const UNDEFINED_SENTINEL: &str = "undefined";

/// Test-source extensions the expectation scan visits.
const TEST_SOURCE_SUFFIXES: [&str; 4] = [".test.js", ".test.ts", ".spec.js", ".spec.ts"];

/// Static extraction patterns (compiled once).
mod patterns {
    use super::*;

    static ASSERTION: OnceLock<Regex> = OnceLock::new();
    static EXPECTED: OnceLock<Regex> = OnceLock::new();
    static RECEIVED: OnceLock<Regex> = OnceLock::new();

    /// Assertion line about a response body or error.
    pub fn assertion() -> &'static Regex {
        ASSERTION.get_or_init(|| {
            Regex::new(r"expect\([^)]*(?:response\.body|body|error)")
                .expect("ASSERTION pattern is valid")
        })
    }

    pub fn expected() -> &'static Regex {
        EXPECTED.get_or_init(|| {
            Regex::new(r#"Expected: "([^"]*)""#).expect("EXPECTED pattern is valid")
        })
    }

    pub fn received() -> &'static Regex {
        RECEIVED.get_or_init(|| {
            Regex::new(r#"Received: "([^"]*)""#).expect("RECEIVED pattern is valid")
        })
    }
}

/// A declared expectation found in a test source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceExpectation {
    /// Source file the assertion lives in.
    pub file: String,

    /// 1-based line number.
    pub line: u32,

    /// The assertion text, trimmed.
    pub text: String,
}

/// A raw expected/received pair with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Expected value, or [`UNDEFINED_SENTINEL`] when absent.
    pub expected: String,

    /// Received value, or [`UNDEFINED_SENTINEL`] when absent.
    pub received: String,

    /// Artifact or source file this pair came from.
    pub source: String,
}

/// Scan test sources under `root` for assertion lines about a response body
/// or error. Missing root or unreadable files yield an empty result.
#[must_use]
pub fn scan_source_expectations(root: &Path) -> Vec<SourceExpectation> {
    let mut expectations = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_test_source(path) {
            continue;
        }

        let Ok(content) = std::fs::read_to_string(path) else {
            tracing::debug!(file = %path.display(), "skipping unreadable test source");
            continue;
        };

        for (idx, line) in content.lines().enumerate() {
            if patterns::assertion().is_match(line) {
                expectations.push(SourceExpectation {
                    file: path.display().to_string(),
                    line: (idx + 1) as u32,
                    text: line.trim().to_string(),
                });
            }
        }
    }

    expectations
}

/// Mine every `fail/` artifact in the store for expected/received pairs.
///
/// Occurrences are paired by index per artifact; when the two sides count
/// differently the shorter side is padded with [`UNDEFINED_SENTINEL`].
#[must_use]
pub fn extract_failure_comparisons(store: &RecordStore) -> Vec<Comparison> {
    let mut comparisons = Vec::new();

    for artifact in store.fail_artifacts() {
        let Ok(content) = std::fs::read_to_string(&artifact) else {
            tracing::debug!(file = %artifact.display(), "skipping unreadable fail artifact");
            continue;
        };

        let source = artifact
            .file_name()
            .map_or_else(|| artifact.display().to_string(), |n| n.to_string_lossy().to_string());
        comparisons.extend(pair_occurrences(&content, &source));
    }

    comparisons
}

/// Pair `Expected:`/`Received:` occurrences from one artifact body.
fn pair_occurrences(content: &str, source: &str) -> Vec<Comparison> {
    let expected: Vec<&str> = patterns::expected()
        .captures_iter(content)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    let received: Vec<&str> = patterns::received()
        .captures_iter(content)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    let len = expected.len().max(received.len());
    (0..len)
        .map(|i| Comparison {
            expected: expected.get(i).copied().unwrap_or(UNDEFINED_SENTINEL).to_string(),
            received: received.get(i).copied().unwrap_or(UNDEFINED_SENTINEL).to_string(),
            source: source.to_string(),
        })
        .collect()
}

fn is_test_source(path: &Path) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy().to_string());
    name.is_some_and(|n| TEST_SOURCE_SUFFIXES.iter().any(|suffix| n.ends_with(suffix)))
}
