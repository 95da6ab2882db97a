use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval orchestrator and budget manager settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Budget used when a request does not name one.
    pub default_budget: usize,
    pub reserved_tokens: usize,
    pub max_candidates_per_source: usize,
    /// Fraction of the available budget after which fitting stops.
    pub stop_utilization: f64,
    pub min_level: u8,
    pub max_level: u8,
    /// Boost memories the session has not seen yet.
    pub prefer_new: bool,
    /// Consult the prediction cache while gathering.
    pub use_predictions: bool,
    /// Run the predictor when the cache has nothing for the request.
    pub predict_on_miss: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_budget: defaults::DEFAULT_TOKEN_BUDGET,
            reserved_tokens: defaults::DEFAULT_RESERVED_TOKENS,
            max_candidates_per_source: defaults::DEFAULT_MAX_CANDIDATES_PER_SOURCE,
            stop_utilization: defaults::DEFAULT_STOP_UTILIZATION,
            min_level: defaults::DEFAULT_MIN_LEVEL,
            max_level: defaults::DEFAULT_MAX_LEVEL,
            prefer_new: true,
            use_predictions: true,
            predict_on_miss: false,
        }
    }
}
