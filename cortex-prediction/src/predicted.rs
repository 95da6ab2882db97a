use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use cortex_core::constants::{ELLIPSIS, MAX_PREDICTION_SUMMARY_CHARS};
use cortex_core::memory::{BaseMemory, MemoryType};
use serde::{Deserialize, Serialize};

/// The strategy that produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStrategy {
    FileBased,
    PatternBased,
    Temporal,
    Behavioral,
}

impl PredictionStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileBased => "file_based",
            Self::PatternBased => "pattern_based",
            Self::Temporal => "temporal",
            Self::Behavioral => "behavioral",
        }
    }
}

impl fmt::Display for PredictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a prediction came from and how its confidence was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSource {
    pub strategy: PredictionStrategy,
    pub reason: String,
    pub contributing_signals: BTreeSet<String>,
    /// Named components summing to the confidence. Always has a `base` entry.
    pub confidence_breakdown: BTreeMap<String, f64>,
}

/// A memory a strategy expects to be needed soon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedMemory {
    pub memory_id: String,
    pub memory_type: MemoryType,
    pub summary: String,
    pub confidence: f64,
    pub source: PredictionSource,
    /// Prediction confidence weighted by the memory's own confidence.
    pub relevance_score: f64,
    pub embedding_preloaded: bool,
}

impl PredictedMemory {
    /// Build a prediction for `memory` with a `base` confidence and a first signal.
    pub fn new(
        memory: &BaseMemory,
        strategy: PredictionStrategy,
        reason: impl Into<String>,
        base: f64,
        signal: impl Into<String>,
    ) -> Self {
        let mut breakdown = BTreeMap::new();
        breakdown.insert("base".to_string(), base);
        let mut prediction = Self {
            memory_id: memory.id.clone(),
            memory_type: memory.memory_type(),
            summary: truncate_summary(&memory.summary),
            confidence: 0.0,
            source: PredictionSource {
                strategy,
                reason: reason.into(),
                contributing_signals: BTreeSet::from([signal.into()]),
                confidence_breakdown: breakdown,
            },
            relevance_score: 0.0,
            embedding_preloaded: false,
        };
        prediction.recompute(memory.confidence.value());
        prediction
    }

    /// Add a named confidence component.
    pub fn with_component(mut self, name: &str, value: f64, memory_confidence: f64) -> Self {
        self.source
            .confidence_breakdown
            .insert(name.to_string(), value);
        self.recompute(memory_confidence);
        self
    }

    /// Number of distinct signals behind this prediction.
    pub fn signal_count(&self) -> usize {
        self.source.contributing_signals.len()
    }

    fn recompute(&mut self, memory_confidence: f64) {
        let total: f64 = self.source.confidence_breakdown.values().sum();
        self.confidence = total.clamp(0.0, 1.0);
        self.relevance_score = (self.confidence * memory_confidence).clamp(0.0, 1.0);
    }
}

fn truncate_summary(summary: &str) -> String {
    if summary.chars().count() <= MAX_PREDICTION_SUMMARY_CHARS {
        return summary.to_string();
    }
    let keep = MAX_PREDICTION_SUMMARY_CHARS - ELLIPSIS.len();
    let mut out: String = summary.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
