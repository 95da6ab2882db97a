//! Metrics owned by engine instances. Nothing here is process-global.

pub mod retrieval_metrics;

pub use retrieval_metrics::{RetrievalMetrics, RetrievalSample};
