// tests/pipeline_e2e.rs
use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crypto_trust_analyzer::config::TrustConfig;
use crypto_trust_analyzer::ingest::types::{PostSource, RawPost};
use crypto_trust_analyzer::outcome::FixedOutcome;
use crypto_trust_analyzer::pipeline;

struct MockSource {
    posts: Vec<RawPost>,
}

#[async_trait]
impl PostSource for MockSource {
    async fn fetch_latest(&self) -> Result<Vec<RawPost>> {
        Ok(self.posts.clone())
    }
    fn name(&self) -> &'static str {
        "MockSource"
    }
}

fn post(author: Option<&str>, title: &str) -> RawPost {
    RawPost {
        author: author.map(|a| a.to_string()),
        title: title.to_string(),
        body: None,
        created_utc: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

fn sources(posts: Vec<RawPost>) -> Vec<Box<dyn PostSource>> {
    vec![Box::new(MockSource { posts })]
}

#[tokio::test]
async fn alice_scenario_end_to_end() {
    let posts = vec![
        post(Some("alice"), "new signal BTC long"),
        post(Some("alice"), "buy ETH now"),
        post(Some("alice"), "enc DOGE pump"),
        // No keyword — never reaches the scorer or the summary.
        post(Some("bob"), "just chatting about BTC"),
    ];
    let cfg = TrustConfig::default_seed();
    let oracle = FixedOutcome::new([0.20, -0.05, 0.15]);

    let summary = pipeline::run(&sources(posts), &cfg, &oracle)
        .await
        .expect("summary");

    assert_eq!(
        summary.render(),
        "alice posted 3 times:\n\
         Coins mentioned: BTC, ETH, DOGE\n\
         - new signal BTC long (Token: BTC, Change: +0.20)\n\
         - buy ETH now (Token: ETH, Change: -0.05)\n\
         - enc DOGE pump (Token: DOGE, Change: +0.15)"
    );
}

#[tokio::test]
async fn summary_is_byte_identical_across_reruns() {
    let mk_posts = || {
        vec![
            post(Some("alice"), "new signal BTC long"),
            post(Some("bob"), "buy SOL today"),
            post(Some("alice"), "enc XRP entry"),
        ]
    };
    let cfg = TrustConfig::default_seed();

    let first = pipeline::run(&sources(mk_posts()), &cfg, &FixedOutcome::new([0.3, -0.2, 0.9]))
        .await
        .expect("summary");
    let second = pipeline::run(&sources(mk_posts()), &cfg, &FixedOutcome::new([0.3, -0.2, 0.9]))
        .await
        .expect("summary");

    assert_eq!(first.render(), second.render());
}

#[tokio::test]
async fn no_qualifying_posts_yield_no_report() {
    let posts = vec![
        post(Some("alice"), "gm everyone"),
        post(Some("bob"), "what a market"),
    ];
    let cfg = TrustConfig::default_seed();
    let out = pipeline::run(&sources(posts), &cfg, &FixedOutcome::new([])).await;
    assert!(out.is_none());
}

#[tokio::test]
async fn outcome_failure_drops_signal_but_run_continues() {
    let posts = vec![
        post(Some("alice"), "buy BTC now"),
        post(Some("bob"), "buy ETH now"),
    ];
    let cfg = TrustConfig::default_seed();
    // bob's lookup fails; his only signal is dropped.
    let oracle = FixedOutcome::with_slots(vec![Some(0.5), None]);

    let summary = pipeline::run(&sources(posts), &cfg, &oracle)
        .await
        .expect("summary");
    let text = summary.render();
    assert!(text.contains("alice posted 1 times:"));
    assert!(!text.contains("bob"));
}

#[tokio::test]
async fn missing_author_is_reported_as_unknown() {
    let posts = vec![post(None, "new signal ADA long")];
    let cfg = TrustConfig::default_seed();
    let summary = pipeline::run(&sources(posts), &cfg, &FixedOutcome::new([0.8]))
        .await
        .expect("summary");
    assert!(summary.render().starts_with("unknown posted 1 times:"));
}

#[tokio::test]
async fn ingest_cap_limits_posts_per_run() {
    let posts = vec![
        post(Some("a"), "buy BTC"),
        post(Some("b"), "buy ETH"),
        post(Some("c"), "buy SOL"),
    ];
    let mut cfg = TrustConfig::default_seed();
    cfg.ingest.max_posts = 2;

    let summary = pipeline::run(&sources(posts), &cfg, &FixedOutcome::new([0.5, 0.5]))
        .await
        .expect("summary");
    let text = summary.render();
    assert!(text.contains("a posted"));
    assert!(text.contains("b posted"));
    assert!(!text.contains("c posted"));
}
