//! Additive relevance scorer.
//!
//! Factors: confidence, intent-type match, active-file link, pattern overlap,
//! importance, access frequency. The sum is clamped to [0.0, 1.0].

use cortex_core::memory::BaseMemory;
use cortex_core::models::ScoredMemory;
use cortex_core::Intent;

/// Bonus weights added on top of a memory's confidence.
#[derive(Debug, Clone)]
pub struct ScorerWeights {
    pub intent_type_match: f64,
    pub active_file_link: f64,
    /// Per shared pattern.
    pub pattern_overlap: f64,
    pub high_access: f64,
    /// Access count above which `high_access` applies.
    pub high_access_threshold: u64,
}

impl Default for ScorerWeights {
    fn default() -> Self {
        Self {
            intent_type_match: 0.2,
            active_file_link: 0.3,
            pattern_overlap: 0.1,
            high_access: 0.1,
            high_access_threshold: 10,
        }
    }
}

/// What the caller is doing right now.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub intent: Intent,
    pub active_file: Option<&'a str>,
    pub patterns: &'a [String],
}

/// Score and sort memories, best first. Ties are broken by id.
pub fn score(
    memories: Vec<BaseMemory>,
    ctx: &ScoringContext<'_>,
    weights: &ScorerWeights,
) -> Vec<ScoredMemory> {
    let mut scored: Vec<ScoredMemory> = memories
        .into_iter()
        .map(|m| score_one(m, ctx, weights))
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.memory.id.cmp(&b.memory.id))
    });
    scored
}

fn score_one(
    memory: BaseMemory,
    ctx: &ScoringContext<'_>,
    weights: &ScorerWeights,
) -> ScoredMemory {
    let mut score = memory.confidence.value();
    let mut reasons: Vec<String> = Vec::new();

    if ctx.intent.relevant_types().contains(&memory.memory_type()) {
        score += weights.intent_type_match;
        reasons.push(format!("{} memory fits {}", memory.memory_type(), ctx.intent));
    }

    if ctx.active_file.is_some_and(|f| memory.is_linked_to_file(f)) {
        score += weights.active_file_link;
        reasons.push("linked to the active file".to_string());
    }

    let overlap = memory.pattern_overlap(ctx.patterns);
    if overlap > 0 {
        score += weights.pattern_overlap * overlap as f64;
        reasons.push(format!("shares {overlap} detected pattern(s)"));
    }

    let importance_bonus = memory.importance.retrieval_bonus();
    if importance_bonus > 0.0 {
        score += importance_bonus;
        reasons.push(format!("{} importance", memory.importance.as_str()));
    }

    if memory.access_count > weights.high_access_threshold {
        score += weights.high_access;
        reasons.push("frequently accessed".to_string());
    }

    let reason = if reasons.is_empty() {
        format!("confidence {}", memory.confidence)
    } else {
        reasons.join("; ")
    };
    ScoredMemory::new(memory, score.clamp(0.0, 1.0), reason)
}
