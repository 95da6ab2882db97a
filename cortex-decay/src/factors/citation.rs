use cortex_core::memory::BaseMemory;

/// Share of citations that are still valid. 1.0 when there are none.
pub fn calculate(memory: &BaseMemory) -> f64 {
    let total = memory.citations.len();
    if total == 0 {
        return 1.0;
    }
    let valid = memory.citations.iter().filter(|c| c.valid).count();
    valid as f64 / total as f64
}
