use cortex_core::memory::BaseMemory;

/// Importance anchor: critical=2.0, high=1.5, normal=1.0, low=0.8.
pub fn calculate(memory: &BaseMemory) -> f64 {
    memory.importance.weight()
}
