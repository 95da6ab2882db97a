//! # cortex-decay
//!
//! Effective confidence of a memory as a product of five factors:
//! time since last access, citation validity, usage, importance and
//! pattern linkage. Pure functions over a memory snapshot; nothing here
//! writes back to storage.

pub mod archival;
pub mod engine;
pub mod factors;
pub mod formula;

pub use archival::ArchivalDecision;
pub use engine::{DecayEngine, DecayOutcome};
pub use factors::DecayContext;
pub use formula::DecayFactors;
