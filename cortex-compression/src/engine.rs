use chrono::Utc;
use cortex_core::errors::CortexResult;
use cortex_core::memory::{BaseMemory, Importance};
use cortex_core::models::{CompressedMemory, CompressedOutput, LevelRange};
use cortex_core::traits::ICompressor;
use cortex_tokens::TokenCounter;
use tracing::debug;

use crate::levels::{self, CompressionLevel};
use crate::packing::{self, PackItem, PackingStrategy};

/// Compression engine implementing 4-level hierarchical compression.
///
/// Token counts are always measured on the rendered payload, so
/// `token_count` and `compress` can never disagree.
#[derive(Debug, Clone, Default)]
pub struct CompressionEngine {
    counter: TokenCounter,
}

impl CompressionEngine {
    pub fn new() -> Self {
        Self {
            counter: TokenCounter::new(),
        }
    }

    fn measure(&self, output: &CompressedOutput) -> CortexResult<usize> {
        Ok(self.counter.estimate(&output.render()?))
    }

    fn full_token_count(&self, memory: &BaseMemory) -> CortexResult<usize> {
        self.measure(&levels::render(memory, CompressionLevel::L3))
    }

    fn build(
        &self,
        memory: &BaseMemory,
        level: CompressionLevel,
        original_token_count: usize,
    ) -> CortexResult<CompressedMemory> {
        let output = levels::render(memory, level);
        let token_count = self.measure(&output)?;
        let compression_ratio = if original_token_count == 0 {
            1.0
        } else {
            token_count as f64 / original_token_count as f64
        };

        Ok(CompressedMemory {
            memory_id: memory.id.clone(),
            memory_type: memory.memory_type(),
            importance: memory.importance,
            level: level.as_u8(),
            output,
            token_count,
            original_token_count,
            compression_ratio,
            compressed_at: Utc::now(),
        })
    }

    fn fit(
        &self,
        memory: &BaseMemory,
        budget_remaining: usize,
        range: LevelRange,
        original_token_count: usize,
    ) -> CortexResult<CompressedMemory> {
        for level in CompressionLevel::descending_within(range) {
            let compressed = self.build(memory, level, original_token_count)?;
            if compressed.token_count <= budget_remaining {
                return Ok(compressed);
            }
        }
        // Nothing fits: hand back the floor rendering and let the caller decide.
        self.build(
            memory,
            CompressionLevel::try_from(range.min)?,
            original_token_count,
        )
    }
}

impl ICompressor for CompressionEngine {
    fn compress(&self, memory: &BaseMemory, level: u8) -> CortexResult<CompressedMemory> {
        let level = CompressionLevel::try_from(level)?;
        let original = self.full_token_count(memory)?;
        self.build(memory, level, original)
    }

    fn compress_to_fit(
        &self,
        memory: &BaseMemory,
        budget_remaining: usize,
        range: LevelRange,
    ) -> CortexResult<CompressedMemory> {
        let range = LevelRange::new(range.min, range.max)?;
        let original = self.full_token_count(memory)?;
        self.fit(memory, budget_remaining, range, original)
    }

    fn token_count(&self, memory: &BaseMemory, level: u8) -> CortexResult<usize> {
        let level = CompressionLevel::try_from(level)?;
        self.measure(&levels::render(memory, level))
    }

    /// Pack `memories` by importance weight × confidence. Critical memories
    /// are kept at level 1 or above unless only level 0 fits.
    fn compress_batch_to_fit(
        &self,
        memories: &[BaseMemory],
        budget: usize,
    ) -> CortexResult<Vec<CompressedMemory>> {
        if memories.is_empty() || budget == 0 {
            return Ok(Vec::new());
        }

        let mut items = Vec::with_capacity(memories.len());
        for (index, memory) in memories.iter().enumerate() {
            items.push(PackItem::new(
                index.to_string(),
                self.token_count(memory, 0)?,
                memory.importance.weight() * memory.confidence.value(),
            ));
        }
        let plan = packing::pack(items, budget, PackingStrategy::Balanced);

        let mut remaining = budget;
        let mut result = Vec::with_capacity(plan.packed.len());
        for item in plan.packed.iter().chain(plan.remaining.iter()) {
            let Some(memory) = item.id.parse::<usize>().ok().and_then(|i| memories.get(i)) else {
                continue;
            };
            let floor = if memory.importance == Importance::Critical {
                1
            } else {
                0
            };
            let original = self.full_token_count(memory)?;
            let range = LevelRange { min: floor, max: 3 };
            let mut compressed = self.fit(memory, remaining, range, original)?;
            if compressed.token_count > remaining && floor > 0 {
                compressed = self.build(memory, CompressionLevel::L0, original)?;
            }
            if compressed.token_count <= remaining {
                remaining -= compressed.token_count;
                result.push(compressed);
            }
        }

        debug!(
            requested = memories.len(),
            packed = result.len(),
            budget,
            used = budget - remaining,
            "batch compression"
        );
        Ok(result)
    }
}
