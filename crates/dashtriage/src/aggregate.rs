//! Pattern aggregator - groups identical mismatches into ranked patterns.
//!
//! The aggregation key is `(category, expected, received)`. Count reflects
//! raw occurrences; provenance is a set of distinct files, so one file
//! repeating a pattern raises the count but not the provenance size.

use crate::classify::{Mismatch, MismatchCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::collections::HashMap;

/// A deduplicated, frequency-ranked grouping of identical mismatches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub category: MismatchCategory,
    pub expected: String,
    pub received: String,

    /// Raw occurrence count across all mismatches sharing this key.
    pub count: usize,

    /// Distinct files that produced this pattern.
    pub provenance: BTreeSet<String>,
}

impl Pattern {
    /// Composite key used for grouping and display.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}=>{}", self.category, self.expected, self.received)
    }
}

/// Group mismatches into patterns, ranked descending by count.
///
/// The sort is stable, so ties keep first-seen order. Invariant: the sum of
/// all pattern counts equals `mismatches.len()`.
#[must_use]
pub fn aggregate(mismatches: &[Mismatch]) -> Vec<Pattern> {
    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, Pattern> = HashMap::new();

    for mismatch in mismatches {
        let key = format!(
            "{}:{}=>{}",
            mismatch.category, mismatch.expected, mismatch.received
        );
        if let Some(pattern) = by_key.get_mut(&key) {
            pattern.count += 1;
            pattern.provenance.insert(mismatch.source.clone());
        } else {
            order.push(key.clone());
            by_key.insert(
                key,
                Pattern {
                    category: mismatch.category,
                    expected: mismatch.expected.clone(),
                    received: mismatch.received.clone(),
                    count: 1,
                    provenance: BTreeSet::from([mismatch.source.clone()]),
                },
            );
        }
    }

    // First-seen order before the stable ranking sort, so ties preserve it.
    let mut patterns: Vec<Pattern> = order
        .iter()
        .filter_map(|key| by_key.remove(key))
        .collect();
    patterns.sort_by(|a, b| b.count.cmp(&a.count));
    patterns
}
