use cortex_core::memory::BaseMemory;
use cortex_core::models::Level3Output;

use super::level2;

/// Level 3: full context. Lossless; all content preserved.
pub fn compress(memory: &BaseMemory) -> Level3Output {
    Level3Output {
        detail: level2::compress(memory),
        summary: memory.summary.clone(),
        content: memory.content.clone(),
        all_tags: memory.tags.clone(),
        linked_files: memory.linked_files.clone(),
        linked_patterns: memory.linked_patterns.clone(),
        citations: memory.citations.clone(),
        created_at: memory.created_at,
        last_accessed: memory.last_accessed,
        access_count: memory.access_count,
    }
}
