//! # cortex-compression
//!
//! Renders memories at four fidelity levels and packs scored items into
//! a token budget.
//!
//! - Level 0: id, type, importance
//! - Level 1: + one-liner, top tags, confidence
//! - Level 2: + examples and linked files
//! - Level 3: everything
//!
//! Each level embeds the one below it, so token cost never decreases
//! with the level.

pub mod engine;
pub mod levels;
pub mod packing;

pub use engine::CompressionEngine;
pub use levels::CompressionLevel;
pub use packing::{pack, pack_with, PackItem, PackResult, PackingStrategy};
