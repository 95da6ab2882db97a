use cortex_core::Intent;
use serde::{Deserialize, Serialize};

/// Signals derived from what the user has been doing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehavioralSignals {
    /// Most recent first.
    pub recent_queries: Vec<String>,
    pub recent_intents: Vec<Intent>,
    /// Memory ids the user keeps coming back to.
    pub frequent_memories: Vec<String>,
    /// Tags describing the user's habitual areas of work.
    pub user_patterns: Vec<String>,
}
