use serde::{Deserialize, Serialize};

use cortex_core::models::CompressedMemory;

/// One memory chosen for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatedMemory {
    pub compressed: CompressedMemory,
    /// Candidate score as supplied, before any preference boost.
    pub score: f64,
    pub relevance_reason: String,
}

/// Result of fitting candidates into a budget.
///
/// `tokens_used + tokens_remaining == available_budget`, and
/// `available_budget == total_budget - reserved_tokens` (saturating).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetAllocation {
    /// Delivered memories, in the order they were admitted.
    pub memories: Vec<AllocatedMemory>,
    pub tokens_used: usize,
    pub tokens_remaining: usize,
    pub available_budget: usize,
    pub total_budget: usize,
    pub reserved_tokens: usize,
    /// `tokens_used / available_budget`, 0.0 when nothing was available.
    pub utilization: f64,
    /// Delivered count per compression level, indexed by level.
    pub by_level: [usize; 4],
    /// Candidates that did not fit.
    pub excluded: Vec<String>,
    /// Candidates skipped because the session already has them.
    pub deduplicated: Vec<String>,
    pub tokens_saved_by_dedup: usize,
}

impl BudgetAllocation {
    pub(crate) fn empty(total_budget: usize, reserved_tokens: usize) -> Self {
        let available = total_budget.saturating_sub(reserved_tokens);
        Self {
            tokens_remaining: available,
            available_budget: available,
            total_budget,
            reserved_tokens,
            ..Self::default()
        }
    }

    pub(crate) fn admit(&mut self, memory: AllocatedMemory) {
        let tokens = memory.compressed.token_count;
        self.tokens_used += tokens;
        self.tokens_remaining = self.available_budget.saturating_sub(self.tokens_used);
        if let Some(count) = self.by_level.get_mut(memory.compressed.level as usize) {
            *count += 1;
        }
        self.utilization = if self.available_budget == 0 {
            0.0
        } else {
            self.tokens_used as f64 / self.available_budget as f64
        };
        self.memories.push(memory);
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    pub fn memory_ids(&self) -> impl Iterator<Item = &str> {
        self.memories.iter().map(|m| m.compressed.memory_id.as_str())
    }
}
