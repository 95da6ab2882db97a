use cortex_core::memory::{BaseMemory, MemoryType};
use serde::{Deserialize, Serialize};

/// Built-in per-type minimum confidence. Core memories are never archived.
pub fn default_min_confidence(memory_type: MemoryType, fallback: f64) -> f64 {
    match memory_type {
        MemoryType::Core => 0.0,
        MemoryType::Episodic => 0.25,
        MemoryType::ConstraintOverride | MemoryType::CodeSmell => 0.2,
        MemoryType::Tribal
        | MemoryType::Procedural
        | MemoryType::Semantic
        | MemoryType::PatternRationale
        | MemoryType::DecisionContext => fallback,
    }
}

/// Archival decision with metadata for audit logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivalDecision {
    pub memory_id: String,
    pub should_archive: bool,
    pub decayed_confidence: f64,
    pub threshold: f64,
    pub reason: String,
}

/// A memory is eligible for archival when its decayed confidence drops
/// below its type's threshold. Archiving itself is left to storage.
pub fn evaluate(memory: &BaseMemory, decayed_confidence: f64, threshold: f64) -> ArchivalDecision {
    let should_archive = decayed_confidence < threshold;
    let reason = if should_archive {
        format!(
            "confidence {:.3} below threshold {:.3} for type {}",
            decayed_confidence,
            threshold,
            memory.memory_type()
        )
    } else {
        "confidence above threshold".to_string()
    };

    ArchivalDecision {
        memory_id: memory.id.clone(),
        should_archive,
        decayed_confidence,
        threshold,
        reason,
    }
}
