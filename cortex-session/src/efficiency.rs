use serde::{Deserialize, Serialize};

/// Token accounting for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenEfficiency {
    pub tokens_sent: usize,
    pub memories_sent: usize,
    /// Tokens not spent because the memory was already loaded.
    pub tokens_saved_by_dedup: usize,
}

impl TokenEfficiency {
    pub fn record_sent(&mut self, tokens: usize) {
        self.tokens_sent += tokens;
        self.memories_sent += 1;
    }

    pub fn record_saved(&mut self, tokens: usize) {
        self.tokens_saved_by_dedup += tokens;
    }

    /// Share of would-be traffic avoided by deduplication, in [0, 1].
    pub fn dedup_ratio(&self) -> f64 {
        let total = self.tokens_sent + self.tokens_saved_by_dedup;
        if total == 0 {
            0.0
        } else {
            self.tokens_saved_by_dedup as f64 / total as f64
        }
    }
}
