use serde::{Deserialize, Serialize};

/// Token budget for one retrieval call.
///
/// `available_for_memories` is what is left after the reservation;
/// `used + remaining == available_for_memories` at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBudget {
    pub total: usize,
    pub reserved: usize,
    pub available_for_memories: usize,
    pub used: usize,
    pub remaining: usize,
}

impl TokenBudget {
    pub fn new(total: usize, reserved: usize) -> Self {
        let available = total.saturating_sub(reserved);
        Self {
            total,
            reserved,
            available_for_memories: available,
            used: 0,
            remaining: available,
        }
    }

    pub fn fits(&self, tokens: usize) -> bool {
        tokens <= self.remaining
    }

    /// Spend `tokens` if they fit. Returns false and changes nothing otherwise.
    pub fn consume(&mut self, tokens: usize) -> bool {
        if !self.fits(tokens) {
            return false;
        }
        self.used += tokens;
        self.remaining -= tokens;
        true
    }

    /// `used / available_for_memories`, 0.0 for an empty budget.
    pub fn utilization(&self) -> f64 {
        if self.available_for_memories == 0 {
            0.0
        } else {
            self.used as f64 / self.available_for_memories as f64
        }
    }
}
