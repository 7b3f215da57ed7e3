// src/config.rs
//! Pipeline configuration: keyword set, token vocabulary, success threshold,
//! top-N limit, and ingest caps.
//!
//! Loaded from TOML with env overrides so the pipeline is testable with
//! alternate vocabularies. Falls back to a built-in seed when no file is
//! present.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

// --- env defaults & names ---
pub const DEFAULT_TRUST_CONFIG_PATH: &str = "config/trust.toml";
pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 0.10;

pub const ENV_TRUST_CONFIG_PATH: &str = "TRUST_CONFIG_PATH";
pub const ENV_SUCCESS_THRESHOLD: &str = "TRUST_SUCCESS_THRESHOLD";

/// Runtime configuration shared by all pipeline stages.
///
/// Components receive this by reference at call time; there is no global
/// mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct TrustConfig {
    /// Trigger phrases denoting trading advice; matched as case-folded substrings.
    pub keywords: Vec<String>,
    /// Recognized token symbols in priority order. The first symbol present
    /// in a post wins, regardless of where it appears in the text.
    pub tokens: Vec<String>,
    /// Strict success threshold: `price_change > success_threshold`.
    pub success_threshold: f64,
    /// The ranking is truncated to this many authors.
    pub top_authors: usize,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IngestConfig {
    /// Subreddits joined into one multireddit listing.
    #[serde(default = "default_subreddits")]
    pub subreddits: Vec<String>,
    /// Cap on posts taken per run (the listing limit).
    #[serde(default = "default_max_posts")]
    pub max_posts: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            subreddits: default_subreddits(),
            max_posts: default_max_posts(),
        }
    }
}

fn default_subreddits() -> Vec<String> {
    ["CryptoCurrency", "CryptoMoonShots", "Altcoin"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_max_posts() -> usize {
    100
}

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Deserialize)]
struct TrustRoot {
    signals: SignalsSection,
    #[serde(default)]
    ingest: IngestConfig,
}

#[derive(Debug, Deserialize)]
struct SignalsSection {
    keywords: Vec<String>,
    tokens: Vec<String>,
    #[serde(default = "default_threshold_field")]
    success_threshold: f64,
    #[serde(default = "default_top_authors_field")]
    top_authors: usize,
}

fn default_threshold_field() -> f64 {
    DEFAULT_SUCCESS_THRESHOLD
}

fn default_top_authors_field() -> usize {
    10
}

impl TrustConfig {
    /// Built-in seed mirroring the stock vocabulary. Used as fallback if no
    /// config file is found.
    pub fn default_seed() -> Self {
        Self {
            keywords: ["new signal", "long", "buy", "enc"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            tokens: ["BTC", "ETH", "DOGE", "SOL", "SHIB", "XRP", "ADA"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
            top_authors: 10,
            ingest: IngestConfig::default(),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let root: TrustRoot = toml::from_str(s).context("parsing trust config toml")?;
        let cfg = Self {
            keywords: clean_list(root.signals.keywords),
            tokens: clean_list(root.signals.tokens),
            success_threshold: root.signals.success_threshold,
            top_authors: root.signals.top_authors,
            ingest: root.ingest,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading trust config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load using env var + fallbacks:
    /// 1) $TRUST_CONFIG_PATH (must exist when set)
    /// 2) config/trust.toml
    /// 3) built-in `default_seed()`
    ///
    /// $TRUST_SUCCESS_THRESHOLD, when parseable, overrides the file value.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_TRUST_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("TRUST_CONFIG_PATH points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_TRUST_CONFIG_PATH);
            if default_p.exists() {
                Self::load_from(&default_p)?
            } else {
                Self::default_seed()
            }
        };

        if let Some(t) = parse_threshold_env(std::env::var(ENV_SUCCESS_THRESHOLD).ok()) {
            cfg.success_threshold = t;
        }
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.keywords.is_empty() {
            return Err(anyhow!("trust config: keywords must not be empty"));
        }
        if self.tokens.is_empty() {
            return Err(anyhow!("trust config: tokens must not be empty"));
        }
        if self.top_authors == 0 {
            return Err(anyhow!("trust config: top_authors must be >= 1"));
        }
        Ok(())
    }
}

// parse optional float env; any finite value is accepted (the threshold is a
// signed percent change, not a probability)
fn parse_threshold_env(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|x| x == t) {
            out.push(t.to_string());
        }
    }
    out
}
