//! # cortex-prediction
//!
//! Predictive memory preloading based on file, pattern, temporal, and behavioral signals.
//!
//! ## 4 Prediction Strategies
//!
//! | Strategy | Signal Source |
//! |----------|--------------|
//! | File-based | Memories linked to active file, imports, recent and git-modified files |
//! | Pattern-based | Memories linked to detected patterns, plus multi-pattern tag matches |
//! | Temporal | Time-of-day and day-of-week usage history |
//! | Behavioral | Recent queries, intents, frequent memories, branch keywords |
//!
//! ## Multi-Strategy Merge
//!
//! When a memory appears in multiple strategies: keep highest confidence,
//! union signals, apply a single +0.05 boost (capped at 1.0).

pub mod cache;
pub mod engine;
pub mod predicted;
pub mod preloader;
pub mod signals;
pub mod strategies;

pub use cache::{CacheStats, PredictionCache};
pub use engine::{CacheStatus, PredictionEngine, PredictionResult};
pub use predicted::{PredictedMemory, PredictionSource, PredictionStrategy};
pub use preloader::{EmbeddingPreloader, PreloadReport};
pub use signals::PredictionSignals;
