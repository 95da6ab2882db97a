/// Cortex system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed characters-per-token ratio used by every token estimate.
pub const CHARS_PER_TOKEN: usize = 4;

/// Highest compression level (full context).
pub const MAX_COMPRESSION_LEVEL: u8 = 3;

/// Maximum length of a Level 1 one-liner, in characters.
pub const MAX_ONE_LINER_CHARS: usize = 150;

/// Maximum number of tags carried by a Level 1 rendering.
pub const MAX_LEVEL1_TAGS: usize = 3;

/// Maximum length of a predicted memory's summary, in characters.
pub const MAX_PREDICTION_SUMMARY_CHARS: usize = 100;

/// Flat confidence boost applied when several strategies predict the same memory.
pub const MULTI_STRATEGY_BOOST: f64 = 0.05;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";
