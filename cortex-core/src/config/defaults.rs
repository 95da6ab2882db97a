// Decay
pub const DEFAULT_ARCHIVAL_THRESHOLD: f64 = 0.15;

// Prediction
pub const DEFAULT_MAX_PREDICTIONS: usize = 20;
pub const DEFAULT_PREDICTION_MIN_CONFIDENCE: f64 = 0.3;
pub const DEFAULT_PREDICTION_CACHE_TTL_MS: u64 = 300_000;
pub const DEFAULT_PREDICTION_CACHE_MAX_ENTRIES: usize = 100;
pub const DEFAULT_PRELOAD_CONFIDENCE_FLOOR: f64 = 0.6;
pub const DEFAULT_PRELOAD_BATCH_SIZE: usize = 10;
pub const DEFAULT_PRELOAD_MAX: usize = 10;
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 1_000;
pub const DEFAULT_EMBEDDING_CACHE_IDLE_SECS: u64 = 3_600;
pub const DEFAULT_USAGE_HISTORY_CAPACITY: usize = 1_000;

// Retrieval
pub const DEFAULT_TOKEN_BUDGET: usize = 2_000;
pub const DEFAULT_RESERVED_TOKENS: usize = 0;
pub const DEFAULT_MAX_CANDIDATES_PER_SOURCE: usize = 20;
pub const DEFAULT_STOP_UTILIZATION: f64 = 0.95;
pub const DEFAULT_MIN_LEVEL: u8 = 0;
pub const DEFAULT_MAX_LEVEL: u8 = 3;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
