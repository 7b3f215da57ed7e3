// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};

/// One raw social post as delivered by a provider, already normalized
/// (entities decoded, tags stripped, whitespace collapsed).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct RawPost {
    /// Author handle; `None` when the account is deleted or suspended.
    pub author: Option<String>,
    /// Primary text (submission title).
    pub title: String,
    /// Secondary body text, when the post has one.
    pub body: Option<String>,
    /// Publication instant, normalized to UTC.
    pub created_utc: DateTime<Utc>,
}

impl RawPost {
    /// The case-folded matching corpus: title and body concatenated.
    pub fn folded_text(&self) -> String {
        match self.body.as_deref() {
            Some(b) if !b.is_empty() => format!("{} {}", self.title, b).to_lowercase(),
            _ => self.title.to_lowercase(),
        }
    }
}

#[async_trait::async_trait]
pub trait PostSource {
    async fn fetch_latest(&self) -> Result<Vec<RawPost>>;
    fn name(&self) -> &'static str;
}
