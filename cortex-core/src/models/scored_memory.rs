use serde::{Deserialize, Serialize};

use crate::memory::BaseMemory;

/// A retrieval candidate with its score and a human-readable explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMemory {
    pub memory: BaseMemory,
    pub score: f64,
    pub relevance_reason: String,
}

impl ScoredMemory {
    pub fn new(memory: BaseMemory, score: f64, relevance_reason: impl Into<String>) -> Self {
        Self {
            memory,
            score,
            relevance_reason: relevance_reason.into(),
        }
    }
}
