// src/pipeline.rs
//! Pipeline wiring: raw posts → extract → correlate → score → summarize.
//! Data flows strictly forward; every stage produces a new immutable value.

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use tracing::info;

use crate::config::TrustConfig;
use crate::extract::{self, Signal};
use crate::ingest::{
    self,
    types::{PostSource, RawPost},
};
use crate::outcome::{correlate_all, OutcomeSource};
use crate::summary::{build_summary, Summary};
use crate::trust::rank_authors;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("extract_accepted_total", "Posts accepted as signals.");
        describe_counter!(
            "extract_rejected_total",
            "Posts rejected by the keyword/token gate."
        );
        describe_counter!(
            "outcome_failures_total",
            "Signals dropped on outcome lookup failure."
        );
    });
}

/// Run the extractor over a batch. Rejections are counted, never logged
/// per post.
pub fn extract_all(posts: &[RawPost], cfg: &TrustConfig) -> Vec<Signal> {
    ensure_metrics_described();

    let mut out = Vec::new();
    let mut rejected = 0usize;
    for p in posts {
        match extract::extract(p, cfg) {
            Some(s) => out.push(s),
            None => rejected += 1,
        }
    }

    counter!("extract_accepted_total").increment(out.len() as u64);
    counter!("extract_rejected_total").increment(rejected as u64);
    info!(
        target: "pipeline",
        accepted = out.len(),
        rejected,
        "extraction finished"
    );
    out
}

/// Synchronous pipeline over an already-fetched batch. Pure given its
/// inputs: identical posts and an identical outcome sequence yield a
/// byte-identical summary. `None` means nothing qualified.
pub fn run_posts(
    posts: &[RawPost],
    cfg: &TrustConfig,
    outcomes: &dyn OutcomeSource,
) -> Option<Summary> {
    let signals = extract_all(posts, cfg);
    let classified = correlate_all(signals, outcomes, cfg.success_threshold);
    let ranked = rank_authors(&classified, cfg.top_authors);
    if ranked.is_empty() {
        return None;
    }
    info!(
        target: "pipeline",
        classified = classified.len(),
        ranked = ranked.len(),
        "scoring finished"
    );
    Some(build_summary(&classified, &ranked))
}

/// Fetch once from the sources, then run the synchronous pipeline.
pub async fn run(
    sources: &[Box<dyn PostSource>],
    cfg: &TrustConfig,
    outcomes: &dyn OutcomeSource,
) -> Option<Summary> {
    let posts = ingest::run_once(sources, cfg.ingest.max_posts).await;
    info!(target: "pipeline", posts = posts.len(), "ingest finished");
    run_posts(&posts, cfg, outcomes)
}
