//! Request and result shapes of the retrieval orchestrator.

use chrono::{DateTime, Utc};
use cortex_core::models::CompressedMemory;
use cortex_core::Intent;
use cortex_prediction::PredictionSignals;
use serde::{Deserialize, Serialize};

/// What the caller needs context for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalRequest {
    pub intent: Intent,
    /// Free text describing the task. May be empty.
    pub query: String,
    pub active_file: Option<String>,
    #[serde(default)]
    pub detected_patterns: Vec<String>,
    /// Token budget. The configured default applies when absent.
    pub max_tokens: Option<usize>,
    /// Context snapshot used to look up, or compute, predictions.
    #[serde(default)]
    pub signals: Option<PredictionSignals>,
}

impl RetrievalRequest {
    pub fn new(intent: Intent, query: impl Into<String>) -> Self {
        Self {
            intent,
            query: query.into(),
            active_file: None,
            detected_patterns: Vec::new(),
            max_tokens: None,
            signals: None,
        }
    }

    pub fn with_active_file(mut self, path: impl Into<String>) -> Self {
        self.active_file = Some(path.into());
        self
    }

    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.detected_patterns = patterns;
        self
    }

    pub fn with_budget(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_signals(mut self, signals: PredictionSignals) -> Self {
        self.signals = Some(signals);
        self
    }
}

/// One delivered memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedMemory {
    pub compressed: CompressedMemory,
    /// In [0, 1].
    pub relevance_score: f64,
    pub relevance_reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Active session, if there was one.
    pub session_id: Option<String>,
    /// Candidates skipped because the session already had them.
    pub deduplicated: usize,
    pub tokens_saved_by_dedup: usize,
    /// Tokens sent in the session so far, this call included.
    pub cumulative_tokens_sent: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub cache_hit_rate: f64,
    /// Candidates contributed by predictions.
    pub predicted_candidates: usize,
    /// Whether predictions came from the cache. `None` when predictions were not consulted.
    pub cache_hit: Option<bool>,
}

/// Output of one retrieval call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub memories: Vec<RetrievedMemory>,
    /// Distinct candidates gathered before fitting.
    pub total_candidates: usize,
    pub tokens_used: usize,
    pub retrieval_time_ms: u64,
    pub session: SessionSummary,
    pub prediction: PredictionSummary,
    /// Candidates that did not fit the budget.
    pub excluded: Vec<String>,
    pub retrieved_at: DateTime<Utc>,
}

impl RetrievalResult {
    pub fn memory_ids(&self) -> Vec<&str> {
        self.memories
            .iter()
            .map(|m| m.compressed.memory_id.as_str())
            .collect()
    }
}
