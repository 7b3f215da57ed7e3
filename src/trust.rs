// src/trust.rs
//! # Trust Scorer
//! Pure, testable logic that maps classified signals → ranked author stats.
//! No I/O, suitable for unit tests and future offline evaluation.
//!
//! Grouping is insertion-ordered: authors tying on trust_score keep their
//! first-appearance order, so ranking never depends on hash iteration order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::outcome::ClassifiedSignal;

/// Per-author aggregate over one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorStats {
    pub author: String,
    pub total_posts: usize,
    pub successful_posts: usize,
    /// successful_posts / total_posts, rounded to 2 decimals. Only computed
    /// for authors with at least one classified signal.
    pub trust_score: f64,
}

/// Round half away from zero at 2 decimals.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Group by author, score each group, sort by trust_score descending
/// (stable; ties keep first-seen order) and truncate to `top_n`.
///
/// Empty input yields an empty ranking — "no report", not an error.
pub fn rank_authors(signals: &[ClassifiedSignal], top_n: usize) -> Vec<AuthorStats> {
    // (author, total, successful), in first-seen order; the map only holds
    // indexes into this Vec.
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, usize, usize)> = Vec::new();

    for s in signals {
        let i = match index.get(s.author.as_str()) {
            Some(&i) => i,
            None => {
                groups.push((s.author.clone(), 0, 0));
                index.insert(s.author.as_str(), groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[i].1 += 1;
        if s.success {
            groups[i].2 += 1;
        }
    }

    let mut stats: Vec<AuthorStats> = groups
        .into_iter()
        .map(|(author, total, successful)| AuthorStats {
            author,
            total_posts: total,
            successful_posts: successful,
            trust_score: round2(successful as f64 / total as f64),
        })
        .collect();

    // Vec::sort_by is stable, so equal scores retain insertion order.
    stats.sort_by(|a, b| b.trust_score.total_cmp(&a.trust_score));
    stats.truncate(top_n);
    stats
}
