use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::memory::{half_life_days, MemoryType};

/// Decay subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Per-type half-life overrides (days). Key is memory type name.
    pub half_life_overrides: HashMap<String, u64>,
    /// Confidence below which a memory is eligible for archival.
    pub archival_threshold: f64,
    /// Per-type archival thresholds. Key is memory type name.
    pub min_confidence_overrides: HashMap<String, f64>,
}

impl DecayConfig {
    /// Half-life for `memory_type`, honouring overrides. `None` means no decay.
    /// Core memories never decay, whatever the overrides say.
    pub fn half_life_days(&self, memory_type: MemoryType) -> Option<u64> {
        if memory_type == MemoryType::Core {
            return None;
        }
        match self.half_life_overrides.get(memory_type.as_str()) {
            Some(days) => Some(*days),
            None => half_life_days(memory_type),
        }
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            half_life_overrides: HashMap::new(),
            archival_threshold: defaults::DEFAULT_ARCHIVAL_THRESHOLD,
            min_confidence_overrides: HashMap::new(),
        }
    }
}
