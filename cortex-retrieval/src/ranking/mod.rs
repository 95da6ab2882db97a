//! Candidate ranking.

pub mod scorer;

pub use scorer::{score, ScorerWeights, ScoringContext};
