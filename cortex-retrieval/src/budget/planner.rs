use cortex_core::errors::CortexResult;
use cortex_core::models::ScoredMemory;
use cortex_core::traits::ICompressor;
use cortex_tokens::TokenBudget;
use serde::{Deserialize, Serialize};

/// Planned level for one memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSuggestion {
    pub memory_id: String,
    pub level: u8,
    pub tokens: usize,
    /// Whether `tokens` fit what was left when this memory was planned.
    pub fits: bool,
}

/// Budget left for memories after the system prompt and the response are reserved.
pub fn calculate_budget(
    total: usize,
    reserved_for_system: usize,
    reserved_for_response: usize,
) -> TokenBudget {
    TokenBudget::new(total, reserved_for_system.saturating_add(reserved_for_response))
}

fn target_level(score: f64) -> u8 {
    match score {
        s if s >= 0.8 => 3,
        s if s >= 0.6 => 2,
        s if s >= 0.4 => 1,
        _ => 0,
    }
}

pub(crate) fn suggest_level_distribution(
    compressor: &dyn ICompressor,
    memories: &[ScoredMemory],
    budget: usize,
) -> CortexResult<Vec<LevelSuggestion>> {
    let mut ordered: Vec<&ScoredMemory> = memories.iter().collect();
    ordered.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut remaining = budget;
    let mut plan = Vec::with_capacity(ordered.len());
    for scored in ordered {
        let mut level = target_level(scored.score);
        loop {
            let tokens = compressor.token_count(&scored.memory, level)?;
            let fits = tokens <= remaining;
            if fits || level == 0 {
                if fits {
                    remaining -= tokens;
                }
                plan.push(LevelSuggestion {
                    memory_id: scored.memory.id.clone(),
                    level,
                    tokens,
                    fits,
                });
                break;
            }
            level -= 1;
        }
    }
    Ok(plan)
}
