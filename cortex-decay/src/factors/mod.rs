pub mod citation;
pub mod importance;
pub mod pattern;
pub mod temporal;
pub mod usage;

use std::collections::HashSet;

use chrono::{DateTime, Utc};

/// Inputs to a decay calculation beyond the memory itself.
#[derive(Debug, Clone)]
pub struct DecayContext {
    /// Point in time decay is evaluated at.
    pub now: DateTime<Utc>,
    /// Patterns known to be active. `None` means liveness is not checked and
    /// every linked pattern counts.
    pub active_patterns: Option<HashSet<String>>,
}

impl DecayContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            active_patterns: None,
        }
    }
}

impl Default for DecayContext {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}
