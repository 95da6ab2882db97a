//! # cortex-retrieval
//!
//! Decides which memories reach a token-bounded consumer, at which fidelity.
//!
//! Pipeline per call: gather (active file, patterns, predictions, intent search)
//! → score → compress and fit into the budget, skipping what the session already
//! has → record deliveries.

pub mod budget;
pub mod engine;
pub mod gather;
pub mod ranking;
pub mod request;

pub use budget::{
    calculate_budget, AllocatedMemory, BudgetAllocation, BudgetManager, FitOptions,
    LevelSuggestion,
};
pub use engine::RetrievalEngine;
pub use request::{
    PredictionSummary, RetrievalRequest, RetrievalResult, RetrievedMemory, SessionSummary,
};
