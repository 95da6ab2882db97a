use crate::errors::CortexResult;
use crate::memory::BaseMemory;

/// Computes a memory's effective confidence.
pub trait IDecayEngine: Send + Sync {
    /// Decayed confidence in [0.0, 1.0], evaluated at the current time.
    fn calculate(&self, memory: &BaseMemory) -> CortexResult<f64>;
}
