// src/extract.rs
//! Signal extraction: keyword gate + token vocabulary scan.
//!
//! A post qualifies as trading advice only if its case-folded text contains
//! at least one configured trigger phrase AND mentions a recognized token
//! symbol. Rejection is the frequent, normal outcome — not a fault.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::TrustConfig;
use crate::ingest::types::RawPost;

/// Sentinel for posts whose account is deleted or missing.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// A single post classified as trading advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub author: String,
    /// Primary post text, as shown in the report (the title).
    pub text: String,
    /// First recognized symbol in vocabulary order.
    pub token: String,
    pub ts: DateTime<Utc>,
}

/// Pure function of the post plus the configured vocabularies.
/// `None` means rejected (dropped, not an error).
pub fn extract(post: &RawPost, cfg: &TrustConfig) -> Option<Signal> {
    let folded = post.folded_text();

    let keyword = cfg
        .keywords
        .iter()
        .find(|k| folded.contains(k.to_lowercase().as_str()))?;
    let token = match_token(&folded, &cfg.tokens)?;

    dev_log_extract(&folded, keyword, &token);

    Some(Signal {
        author: post
            .author
            .clone()
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        text: post.title.clone(),
        token,
        ts: post.created_utc,
    })
}

/// Scan the vocabulary in declared order and return the first symbol that
/// appears anywhere in the folded text. If several tokens are present, only
/// the first-in-vocabulary-order one is recorded; this is a deliberate
/// simplification, not multi-token tagging.
fn match_token(folded: &str, vocabulary: &[String]) -> Option<String> {
    vocabulary
        .iter()
        .find(|t| folded.contains(t.to_lowercase().as_str()))
        .cloned()
}

// Dev logging gate: TRUST_DEV_LOG=1 in a debug build.
fn dev_logging_enabled() -> bool {
    std::env::var("TRUST_DEV_LOG").ok().as_deref() == Some("1") && cfg!(debug_assertions)
}

pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Minimal, anonymized dev logger for accepted signals.
/// Never logs raw text; only a hashed id plus the matched terms.
fn dev_log_extract(folded: &str, keyword: &str, token: &str) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(folded);
    info!(target: "extract", %id, keyword, token, "signal accepted");
}
