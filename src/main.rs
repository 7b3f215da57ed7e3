//! Crypto Trust Analyzer — Binary Entrypoint
//! One-shot run: fetch the newest posts, score signal authors, write the
//! ranked digest to a text file.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crypto_trust_analyzer::config::TrustConfig;
use crypto_trust_analyzer::ingest::providers::reddit::RedditNewProvider;
use crypto_trust_analyzer::ingest::types::PostSource;
use crypto_trust_analyzer::outcome::SimulatedOutcome;
use crypto_trust_analyzer::pipeline;
use crypto_trust_analyzer::report::{ReportSink, TextFileSink};

const DEFAULT_REPORT_PATH: &str = "daily_crypto_summary.txt";
const ENV_REPORT_PATH: &str = "TRUST_REPORT_PATH";
const ENV_REDDIT_USER_AGENT: &str = "REDDIT_USER_AGENT";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("crypto_trust_analyzer=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = TrustConfig::load_default().context("loading trust config")?;

    // Reddit rejects anonymous default user agents on the public listing.
    let user_agent = std::env::var(ENV_REDDIT_USER_AGENT)
        .unwrap_or_else(|_| concat!("crypto-trust-analyzer/", env!("CARGO_PKG_VERSION")).to_string());
    let reddit =
        RedditNewProvider::from_subreddits(&cfg.ingest.subreddits, cfg.ingest.max_posts, &user_agent)?;
    let sources: Vec<Box<dyn PostSource>> = vec![Box::new(reddit)];

    match pipeline::run(&sources, &cfg, &SimulatedOutcome).await {
        Some(summary) => {
            let path =
                std::env::var(ENV_REPORT_PATH).unwrap_or_else(|_| DEFAULT_REPORT_PATH.to_string());
            TextFileSink::new(path).write(&summary)?;
        }
        None => {
            tracing::info!("no posts matched; nothing to report");
        }
    }

    Ok(())
}
