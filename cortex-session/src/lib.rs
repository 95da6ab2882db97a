//! # cortex-session
//!
//! Tracks which memories each session has already received so retrieval
//! can avoid re-sending them, and how many tokens that saved.

pub mod efficiency;
pub mod manager;

pub use efficiency::TokenEfficiency;
pub use manager::SessionManager;
