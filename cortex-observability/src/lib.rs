//! # cortex-observability
//!
//! Structured tracing with span definitions, and per-engine retrieval metrics.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{RetrievalMetrics, RetrievalSample};
pub use tracing_setup::init_tracing;
