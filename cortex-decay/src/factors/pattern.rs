use std::collections::HashSet;

use cortex_core::memory::BaseMemory;

pub const PATTERN_BOOST: f64 = 1.3;

/// 1.3 when the memory links at least one pattern, else 1.0.
///
/// With `active_patterns` supplied, only links to active patterns count.
pub fn calculate(memory: &BaseMemory, active_patterns: Option<&HashSet<String>>) -> f64 {
    let linked = match active_patterns {
        None => !memory.linked_patterns.is_empty(),
        Some(active) => memory.linked_patterns.iter().any(|p| active.contains(p)),
    };
    if linked {
        PATTERN_BOOST
    } else {
        1.0
    }
}
