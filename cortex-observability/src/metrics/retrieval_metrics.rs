//! Per-intent counts, token efficiency, dedup savings and latency.

use std::collections::BTreeMap;

use cortex_core::Intent;
use serde::{Deserialize, Serialize};

/// What one retrieval call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievalSample {
    pub intent: Intent,
    pub candidates: usize,
    pub delivered: usize,
    pub tokens_used: usize,
    pub budget: usize,
    pub deduplicated: usize,
    pub tokens_saved_by_dedup: usize,
    pub latency_ms: u64,
}

/// Tracks retrieval effectiveness for one engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalMetrics {
    pub total_retrievals: u64,
    /// Retrieval count per intent name.
    pub retrievals_by_intent: BTreeMap<String, u64>,
    /// Retrievals that delivered nothing.
    pub empty_retrievals: u64,
    pub candidates_gathered: u64,
    pub memories_delivered: u64,
    pub total_tokens_used: u64,
    pub total_tokens_budgeted: u64,
    pub memories_deduplicated: u64,
    pub tokens_saved_by_dedup: u64,
    pub total_latency_ms: u64,
}

impl RetrievalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sample: &RetrievalSample) {
        self.total_retrievals += 1;
        *self
            .retrievals_by_intent
            .entry(sample.intent.as_str().to_string())
            .or_default() += 1;
        if sample.delivered == 0 {
            self.empty_retrievals += 1;
        }
        self.candidates_gathered += sample.candidates as u64;
        self.memories_delivered += sample.delivered as u64;
        self.total_tokens_used += sample.tokens_used as u64;
        self.total_tokens_budgeted += sample.budget as u64;
        self.memories_deduplicated += sample.deduplicated as u64;
        self.tokens_saved_by_dedup += sample.tokens_saved_by_dedup as u64;
        self.total_latency_ms += sample.latency_ms;
    }

    /// Overall token efficiency (used / budgeted).
    pub fn token_efficiency(&self) -> f64 {
        if self.total_tokens_budgeted == 0 {
            return 0.0;
        }
        self.total_tokens_used as f64 / self.total_tokens_budgeted as f64
    }

    pub fn avg_latency_ms(&self) -> f64 {
        if self.total_retrievals == 0 {
            return 0.0;
        }
        self.total_latency_ms as f64 / self.total_retrievals as f64
    }

    pub fn retrievals_for(&self, intent: Intent) -> u64 {
        self.retrievals_by_intent
            .get(intent.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Reset all counters (useful for periodic rotation).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
