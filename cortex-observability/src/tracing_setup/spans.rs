//! Span definitions per operation: retrieval, prediction, decay.

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($intent:expr, $budget:expr) => {
        tracing::info_span!("cortex.retrieval", intent = %$intent, budget = $budget)
    };
}

/// Create a prediction span.
#[macro_export]
macro_rules! prediction_span {
    ($fingerprint:expr) => {
        tracing::debug_span!("cortex.prediction", fingerprint = %$fingerprint)
    };
}

/// Create a decay span.
#[macro_export]
macro_rules! decay_span {
    ($memory_count:expr) => {
        tracing::info_span!("cortex.decay", memory_count = $memory_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "cortex.retrieval";
    pub const PREDICTION: &str = "cortex.prediction";
    pub const DECAY: &str = "cortex.decay";
}
