use chrono::{DateTime, Utc};
use cortex_core::memory::BaseMemory;

/// Days between the last access and `now`, never negative.
pub fn days_since_access(memory: &BaseMemory, now: DateTime<Utc>) -> f64 {
    (now - memory.last_accessed).num_seconds().max(0) as f64 / 86_400.0
}

/// Temporal decay factor: `e^(-daysSinceAccess / halfLife)`.
///
/// Range: 0.0 – 1.0. A `None` half-life (core memories) returns 1.0.
pub fn calculate(memory: &BaseMemory, now: DateTime<Utc>, half_life_days: Option<u64>) -> f64 {
    let half_life = match half_life_days {
        Some(days) if days > 0 => days as f64,
        Some(_) => return 0.0,
        None => return 1.0,
    };
    (-days_since_access(memory, now) / half_life).exp()
}
