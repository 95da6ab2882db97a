use cortex_core::memory::BaseMemory;
use serde::{Deserialize, Serialize};

use crate::factors::{self, DecayContext};

/// Each decay factor for one memory, plus the combined result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayFactors {
    pub base_confidence: f64,
    pub days_since_access: f64,
    pub temporal_decay: f64,
    pub citation_decay: f64,
    pub usage_boost: f64,
    pub importance_anchor: f64,
    pub pattern_boost: f64,
    pub final_confidence: f64,
}

/// 5-factor multiplicative decay formula.
///
/// ```text
/// finalConfidence = baseConfidence
///   × temporalDecay
///   × citationDecay
///   × usageBoost
///   × importanceAnchor
///   × patternBoost
/// ```
///
/// Result is clamped to [0.0, 1.0].
pub fn compute(
    memory: &BaseMemory,
    ctx: &DecayContext,
    half_life_days: Option<u64>,
) -> DecayFactors {
    let base_confidence = memory.confidence.value();
    let temporal_decay = factors::temporal::calculate(memory, ctx.now, half_life_days);
    let citation_decay = factors::citation::calculate(memory);
    let usage_boost = factors::usage::calculate(memory);
    let importance_anchor = factors::importance::calculate(memory);
    let pattern_boost = factors::pattern::calculate(memory, ctx.active_patterns.as_ref());

    let product = base_confidence
        * temporal_decay
        * citation_decay
        * usage_boost
        * importance_anchor
        * pattern_boost;

    DecayFactors {
        base_confidence,
        days_since_access: factors::temporal::days_since_access(memory, ctx.now),
        temporal_decay,
        citation_decay,
        usage_boost,
        importance_anchor,
        pattern_boost,
        // Boosts can push the product above 1.0.
        final_confidence: product.clamp(0.0, 1.0),
    }
}
