//! # cortex-tokens
//!
//! Deterministic token estimation at a fixed 4 characters per token,
//! plus the `TokenBudget` bookkeeping model used by retrieval.

pub mod budget;
pub mod counter;

pub use budget::TokenBudget;
pub use counter::TokenCounter;
