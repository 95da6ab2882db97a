use cortex_core::memory::BaseMemory;
use cortex_core::models::Level0Output;

/// Level 0: identity only. ~5 tokens.
pub fn compress(memory: &BaseMemory) -> Level0Output {
    Level0Output {
        id: memory.id.clone(),
        memory_type: memory.memory_type(),
        importance: memory.importance,
    }
}
