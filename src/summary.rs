// src/summary.rs
//! # Summary Builder
//! One deterministic text block per ranked author, in ranking order.
//! The report's value is the ranking, so ordering is preserved end to end.

use serde::{Deserialize, Serialize};

use crate::outcome::ClassifiedSignal;
use crate::trust::AuthorStats;

/// Ordered per-author text blocks. Rendering joins them with a blank line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub blocks: Vec<String>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn render(&self) -> String {
        self.blocks.join("\n\n")
    }
}

/// Assemble one block per ranked author, in ranking order.
///
/// `signals` and `ranked` are accepted independently: a caller may hand the
/// builder a narrower (e.g. time-filtered) slice than the one the ranking
/// was computed from, in which case a ranked author can legitimately have
/// zero matching posts here.
pub fn build_summary(signals: &[ClassifiedSignal], ranked: &[AuthorStats]) -> Summary {
    Summary {
        blocks: ranked
            .iter()
            .map(|stats| author_block(signals, &stats.author))
            .collect(),
    }
}

fn author_block(signals: &[ClassifiedSignal], author: &str) -> String {
    let posts: Vec<&ClassifiedSignal> = signals.iter().filter(|s| s.author == author).collect();
    if posts.is_empty() {
        return format!("{author} did not post any tracked advice.");
    }

    // Unique tokens in first-occurrence order.
    let mut coins: Vec<&str> = Vec::new();
    for p in &posts {
        if !coins.contains(&p.token.as_str()) {
            coins.push(&p.token);
        }
    }

    let mut lines = Vec::with_capacity(posts.len() + 2);
    lines.push(format!("{author} posted {} times:", posts.len()));
    lines.push(format!("Coins mentioned: {}", coins.join(", ")));
    for p in &posts {
        lines.push(format!(
            "- {} (Token: {}, Change: {:+.2})",
            p.text, p.token, p.price_change
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trust::rank_authors;
    use chrono::{TimeZone, Utc};

    fn sig(author: &str, text: &str, token: &str, price_change: f64) -> ClassifiedSignal {
        ClassifiedSignal {
            author: author.to_string(),
            text: text.to_string(),
            token: token.to_string(),
            ts: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            price_change,
            success: price_change > 0.10,
        }
    }

    #[test]
    fn block_shape_and_signed_two_decimal_changes() {
        let signals = vec![
            sig("alice", "new signal BTC long", "BTC", 0.20),
            sig("alice", "buy ETH now", "ETH", -0.05),
            sig("alice", "enc BTC pump", "BTC", 0.15),
        ];
        let ranked = rank_authors(&signals, 10);
        let summary = build_summary(&signals, &ranked);
        assert_eq!(summary.blocks.len(), 1);
        assert_eq!(
            summary.blocks[0],
            "alice posted 3 times:\n\
             Coins mentioned: BTC, ETH\n\
             - new signal BTC long (Token: BTC, Change: +0.20)\n\
             - buy ETH now (Token: ETH, Change: -0.05)\n\
             - enc BTC pump (Token: BTC, Change: +0.15)"
        );
    }

    #[test]
    fn blocks_follow_ranking_order_and_join_with_blank_line() {
        let signals = vec![
            sig("loser", "buy DOGE", "DOGE", -0.30),
            sig("winner", "new signal SOL long", "SOL", 0.90),
        ];
        let ranked = rank_authors(&signals, 10);
        let summary = build_summary(&signals, &ranked);
        assert!(summary.blocks[0].starts_with("winner posted 1 times:"));
        assert!(summary.blocks[1].starts_with("loser posted 1 times:"));
        let text = summary.render();
        assert!(text.contains(")\n\nloser posted"));
    }

    #[test]
    fn ranked_author_missing_from_slice_gets_sentinel() {
        let full = vec![sig("alice", "buy BTC", "BTC", 0.50)];
        let ranked = rank_authors(&full, 10);
        // Summarizer fed a narrower slice than the scorer saw.
        let summary = build_summary(&[], &ranked);
        assert_eq!(
            summary.blocks,
            vec!["alice did not post any tracked advice.".to_string()]
        );
    }

    #[test]
    fn empty_ranking_renders_nothing() {
        let summary = build_summary(&[], &[]);
        assert!(summary.is_empty());
        assert_eq!(summary.render(), "");
    }
}
