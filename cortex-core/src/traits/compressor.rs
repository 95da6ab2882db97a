use crate::errors::CortexResult;
use crate::memory::BaseMemory;
use crate::models::{CompressedMemory, LevelRange};

/// Hierarchical compression: 4 levels from ID-only to full context.
pub trait ICompressor: Send + Sync {
    /// Render `memory` at exactly `level` (0..=3).
    fn compress(&self, memory: &BaseMemory, level: u8) -> CortexResult<CompressedMemory>;

    /// Highest level within `range` that fits `budget_remaining`.
    /// Returns the `range.min` rendering when nothing fits.
    fn compress_to_fit(
        &self,
        memory: &BaseMemory,
        budget_remaining: usize,
        range: LevelRange,
    ) -> CortexResult<CompressedMemory>;

    /// Token cost of rendering `memory` at `level`. Always equals
    /// `compress(memory, level)?.token_count`.
    fn token_count(&self, memory: &BaseMemory, level: u8) -> CortexResult<usize>;

    /// Compress several memories into a shared budget.
    fn compress_batch_to_fit(
        &self,
        memories: &[BaseMemory],
        budget: usize,
    ) -> CortexResult<Vec<CompressedMemory>>;
}
