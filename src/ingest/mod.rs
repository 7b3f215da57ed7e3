// src/ingest/mod.rs
pub mod providers;
pub mod types;

use crate::ingest::types::{PostSource, RawPost};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series carry descriptions when a
/// recorder is installed).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_posts_total", "Total posts parsed from providers.");
        describe_counter!("ingest_kept_total", "Posts kept after the per-run cap.");
        describe_counter!(
            "ingest_provider_errors_total",
            "Provider fetch/parse errors."
        );
        describe_histogram!("ingest_parse_ms", "Provider parse time in milliseconds.");
        describe_gauge!(
            "ingest_pipeline_last_run_ts",
            "Unix ts when ingest pipeline last ran."
        );
    });
}

/// Normalize text: decode entities, strip tags, collapse whitespace, trim.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out = out.trim().to_string();

    // 5) Length cap: 1500 chars (long selftexts add nothing past the match window)
    if out.chars().count() > 1500 {
        out = out.chars().take(1500).collect();
    }

    out
}

/// Run ingest once using the provided sources. Posts arrive newest-first per
/// source; the combined stream is capped at `max_posts`.
///
/// A failing source contributes nothing; the run continues with the rest.
pub async fn run_once(sources: &[Box<dyn PostSource>], max_posts: usize) -> Vec<RawPost> {
    ensure_metrics_described();

    let mut raw: Vec<RawPost> = Vec::new();
    for s in sources {
        match s.fetch_latest().await {
            Ok(mut v) => raw.append(&mut v),
            Err(e) => {
                tracing::warn!(error = ?e, source = s.name(), "source error");
                counter!("ingest_provider_errors_total").increment(1);
            }
        }
    }

    if raw.len() > max_posts {
        raw.truncate(max_posts);
    }

    let now = chrono::Utc::now().timestamp().max(0) as u64;
    counter!("ingest_kept_total").increment(raw.len() as u64);
    gauge!("ingest_pipeline_last_run_ts").set(now as f64);

    raw
}
