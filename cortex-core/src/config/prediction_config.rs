use serde::{Deserialize, Serialize};

use super::defaults;

/// Predictor, prediction cache and embedding preloader settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub max_predictions: usize,
    /// Predictions below this confidence are dropped.
    pub min_confidence: f64,
    pub cache_ttl_ms: u64,
    pub cache_max_entries: usize,
    /// Run the behavioral strategy.
    pub enable_behavioral: bool,
    /// Only predictions at or above this confidence get embeddings preloaded.
    pub preload_confidence_floor: f64,
    pub preload_batch_size: usize,
    /// Maximum predictions considered for preloading per call.
    pub preload_max: usize,
    pub embedding_cache_capacity: u64,
    /// Seconds an unread vector stays cached. A vector dropped by idling or
    /// by the capacity bound is embedded again on its next preload.
    pub embedding_cache_idle_secs: u64,
    /// Usage records kept by the temporal strategy.
    pub usage_history_capacity: usize,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            max_predictions: defaults::DEFAULT_MAX_PREDICTIONS,
            min_confidence: defaults::DEFAULT_PREDICTION_MIN_CONFIDENCE,
            cache_ttl_ms: defaults::DEFAULT_PREDICTION_CACHE_TTL_MS,
            cache_max_entries: defaults::DEFAULT_PREDICTION_CACHE_MAX_ENTRIES,
            enable_behavioral: true,
            preload_confidence_floor: defaults::DEFAULT_PRELOAD_CONFIDENCE_FLOOR,
            preload_batch_size: defaults::DEFAULT_PRELOAD_BATCH_SIZE,
            preload_max: defaults::DEFAULT_PRELOAD_MAX,
            embedding_cache_capacity: defaults::DEFAULT_EMBEDDING_CACHE_CAPACITY,
            embedding_cache_idle_secs: defaults::DEFAULT_EMBEDDING_CACHE_IDLE_SECS,
            usage_history_capacity: defaults::DEFAULT_USAGE_HISTORY_CAPACITY,
        }
    }
}
