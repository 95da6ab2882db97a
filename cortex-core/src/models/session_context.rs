use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a session: what it has already been sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// Memory IDs already delivered in this session.
    pub loaded_memories: HashSet<String>,
    /// Total tokens delivered in this session.
    pub tokens_sent: usize,
    pub queries_made: u64,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            created_at: now,
            last_activity: now,
            loaded_memories: HashSet::new(),
            tokens_sent: 0,
            queries_made: 0,
        }
    }

    pub fn is_loaded(&self, memory_id: &str) -> bool {
        self.loaded_memories.contains(memory_id)
    }

    /// Record a delivery. Returns false if the memory was already loaded.
    pub fn mark_loaded(&mut self, memory_id: &str, tokens: usize) -> bool {
        self.last_activity = Utc::now();
        self.tokens_sent += tokens;
        self.loaded_memories.insert(memory_id.to_string())
    }
}
