use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::ingest::types::{PostSource, RawPost};

/// Reddit `new` listing envelope (the public `.json` endpoint).
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}
#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}
#[derive(Debug, Deserialize)]
struct Child {
    data: Submission,
}
#[derive(Debug, Deserialize)]
struct Submission {
    author: Option<String>,
    title: Option<String>,
    #[serde(default)]
    selftext: Option<String>,
    created_utc: Option<f64>,
}

pub struct RedditNewProvider {
    mode: Mode,
}

enum Mode {
    // Own copy, so tests can hand in decoded fixture strings.
    Fixture(String),
    Http {
        url: String,
        client: reqwest::Client,
    },
}

impl RedditNewProvider {
    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    /// Live listing over the public JSON endpoint. Reddit rejects the default
    /// library user agent, so one must be supplied.
    pub fn from_subreddits(subreddits: &[String], limit: usize, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .build()
            .context("building reddit http client")?;
        Ok(Self {
            mode: Mode::Http {
                url: Self::listing_url(subreddits, limit),
                client,
            },
        })
    }

    fn listing_url(subreddits: &[String], limit: usize) -> String {
        format!(
            "https://www.reddit.com/r/{}/new.json?limit={}",
            subreddits.join("+"),
            limit
        )
    }

    fn parse_listing_str(s: &str) -> Result<Vec<RawPost>> {
        let t0 = std::time::Instant::now();
        let listing: Listing = serde_json::from_str(s).context("parsing reddit listing json")?;

        let mut out = Vec::with_capacity(listing.data.children.len());
        for child in listing.data.children {
            let sub = child.data;
            let title = crate::ingest::normalize_text(sub.title.as_deref().unwrap_or_default());
            if title.is_empty() {
                continue;
            }
            let body = sub
                .selftext
                .as_deref()
                .map(crate::ingest::normalize_text)
                .filter(|b| !b.is_empty());

            out.push(RawPost {
                author: sub.author.filter(|a| !a.is_empty() && a != "[deleted]"),
                title,
                body,
                created_utc: sub
                    .created_utc
                    .and_then(|secs| DateTime::from_timestamp(secs as i64, 0))
                    .unwrap_or(DateTime::UNIX_EPOCH),
            });
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("ingest_parse_ms").record(ms);
        counter!("ingest_posts_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl PostSource for RedditNewProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawPost>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_listing_str(s),

            Mode::Http { url, client } => {
                let body = match client.get(url).send().await {
                    Ok(resp) => resp.text().await.context("reddit http .text()")?,
                    Err(e) => {
                        tracing::warn!(error = ?e, provider = "Reddit", "provider http error");
                        counter!("ingest_provider_errors_total").increment(1);
                        return Err(e).context("reddit http get()");
                    }
                };
                Self::parse_listing_str(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "Reddit"
    }
}
