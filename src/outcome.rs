// src/outcome.rs
//! Outcome correlation: attach a price-change value to each signal and
//! classify it against the strict success threshold.
//!
//! The price source is an injected collaborator; nothing here assumes the
//! value reflects a real elapsed-time measurement, and determinism across
//! calls is not required.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use metrics::counter;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extract::Signal;

/// External source of the price-change value (signed percent) for a signal.
/// Called once per accepted signal.
pub trait OutcomeSource {
    fn price_change(&self, signal: &Signal) -> Result<f64>;
}

/// A signal plus its observed outcome. `success` is a pure function of
/// `price_change`; no hidden state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSignal {
    pub author: String,
    pub text: String,
    pub token: String,
    pub ts: DateTime<Utc>,
    /// Signed percent change supplied by the outcome collaborator.
    pub price_change: f64,
    /// `price_change > threshold`, strict.
    pub success: bool,
}

/// Attach an outcome to one signal. A collaborator failure drops the signal
/// (a partial record must never reach the scorer).
pub fn correlate(
    signal: Signal,
    outcomes: &dyn OutcomeSource,
    threshold: f64,
) -> Option<ClassifiedSignal> {
    let price_change = match outcomes.price_change(&signal) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                error = ?e,
                author = %signal.author,
                token = %signal.token,
                "outcome lookup failed; dropping signal"
            );
            counter!("outcome_failures_total").increment(1);
            return None;
        }
    };

    Some(ClassifiedSignal {
        author: signal.author,
        text: signal.text,
        token: signal.token,
        ts: signal.ts,
        price_change,
        success: price_change > threshold,
    })
}

/// Correlate a whole batch, preserving order; failed lookups are dropped.
pub fn correlate_all(
    signals: Vec<Signal>,
    outcomes: &dyn OutcomeSource,
    threshold: f64,
) -> Vec<ClassifiedSignal> {
    signals
        .into_iter()
        .filter_map(|s| correlate(s, outcomes, threshold))
        .collect()
}

/// Production default: a simulated outcome, uniform in [-0.5, 1.5),
/// rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedOutcome;

impl OutcomeSource for SimulatedOutcome {
    fn price_change(&self, _signal: &Signal) -> Result<f64> {
        let v: f64 = rand::rng().random_range(-0.5..1.5);
        Ok((v * 100.0).round() / 100.0)
    }
}

/// Deterministic replay for tests: each slot is either a value or a
/// scripted lookup failure (`None`).
#[derive(Debug)]
pub struct FixedOutcome {
    slots: Mutex<VecDeque<Option<f64>>>,
}

impl FixedOutcome {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self::with_slots(values.into_iter().map(Some).collect())
    }

    pub fn with_slots(slots: Vec<Option<f64>>) -> Self {
        Self {
            slots: Mutex::new(slots.into_iter().collect()),
        }
    }
}

impl OutcomeSource for FixedOutcome {
    fn price_change(&self, _signal: &Signal) -> Result<f64> {
        let next = self
            .slots
            .lock()
            .expect("fixed outcome mutex poisoned")
            .pop_front();
        match next {
            Some(Some(v)) => Ok(v),
            Some(None) => Err(anyhow!("scripted outcome failure")),
            None => Err(anyhow!("fixed outcome exhausted")),
        }
    }
}
