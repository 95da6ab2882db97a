use super::types::MemoryType;

/// Half-life in days for each memory type. `None` means the type never decays.
pub fn half_life_days(memory_type: MemoryType) -> Option<u64> {
    match memory_type {
        MemoryType::Core => None,
        MemoryType::Tribal => Some(365),
        MemoryType::Procedural => Some(180),
        MemoryType::Semantic => Some(90),
        MemoryType::Episodic => Some(7),
        MemoryType::PatternRationale => Some(180),
        MemoryType::ConstraintOverride => Some(90),
        MemoryType::DecisionContext => Some(180),
        MemoryType::CodeSmell => Some(90),
    }
}
