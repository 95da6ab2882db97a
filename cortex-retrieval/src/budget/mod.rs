//! Token budget manager: fits scored candidates into a budget, choosing each
//! memory's compression level.

mod allocation;
mod planner;

pub use allocation::{AllocatedMemory, BudgetAllocation};
pub use planner::{calculate_budget, LevelSuggestion};

use std::collections::{HashMap, HashSet};

use cortex_compression::{pack, PackItem, PackingStrategy};
use cortex_core::errors::{CortexError, CortexResult};
use cortex_core::models::{LevelRange, ScoredMemory, SessionContext};
use cortex_core::traits::ICompressor;
use tracing::debug;

/// Score multiplier for memories the session has not seen.
const PREFER_NEW_BOOST: f64 = 1.1;

/// Knobs for [`BudgetManager::fit_to_budget`].
#[derive(Debug, Clone)]
pub struct FitOptions<'s> {
    /// Boost not-yet-loaded memories by 10%.
    pub prefer_new: bool,
    pub levels: LevelRange,
    /// Session to deduplicate against.
    pub session: Option<&'s SessionContext>,
    pub reserved_tokens: usize,
    /// Drop candidates already loaded in `session`.
    pub deduplicate: bool,
    /// Stop admitting once this fraction of the available budget is used.
    pub stop_at_utilization: Option<f64>,
    pub strategy: PackingStrategy,
}

impl Default for FitOptions<'_> {
    fn default() -> Self {
        Self {
            prefer_new: true,
            levels: LevelRange::FULL,
            session: None,
            reserved_tokens: 0,
            deduplicate: true,
            stop_at_utilization: None,
            strategy: PackingStrategy::Balanced,
        }
    }
}

impl FitOptions<'_> {
    fn validate(&self) -> CortexResult<LevelRange> {
        if let Some(cap) = self.stop_at_utilization {
            if !(cap.is_finite() && cap > 0.0 && cap <= 1.0) {
                return Err(CortexError::ValidationError(format!(
                    "stop_at_utilization must be in (0, 1], got {cap}"
                )));
            }
        }
        LevelRange::new(self.levels.min, self.levels.max)
    }
}

/// Token budget manager.
pub struct BudgetManager<'a> {
    compressor: &'a dyn ICompressor,
}

impl<'a> BudgetManager<'a> {
    pub fn new(compressor: &'a dyn ICompressor) -> Self {
        Self { compressor }
    }

    /// Fit `candidates` into `budget`.
    ///
    /// Candidates are packed by their cost at the highest allowed level, then
    /// compressed in priority order, each at the highest level that fits what
    /// is left. A candidate that does not fit even at the lowest allowed level
    /// is excluded. Nothing is ever delivered past the available budget.
    pub fn fit_to_budget(
        &self,
        candidates: &[ScoredMemory],
        budget: usize,
        options: &FitOptions<'_>,
    ) -> CortexResult<BudgetAllocation> {
        let levels = options.validate()?;
        let mut allocation = BudgetAllocation::empty(budget, options.reserved_tokens);

        let mut seen = HashSet::new();
        let candidates: Vec<&ScoredMemory> = candidates
            .iter()
            .filter(|c| seen.insert(c.memory.id.as_str()))
            .collect();

        if allocation.available_budget == 0 || candidates.is_empty() {
            allocation.excluded = candidates.iter().map(|c| c.memory.id.clone()).collect();
            return Ok(allocation);
        }

        let loaded = |id: &str| options.session.is_some_and(|s| s.is_loaded(id));

        let mut fresh = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if options.deduplicate && loaded(&candidate.memory.id) {
                allocation.tokens_saved_by_dedup +=
                    self.compressor.token_count(&candidate.memory, levels.max)?;
                allocation.deduplicated.push(candidate.memory.id.clone());
            } else {
                fresh.push(candidate);
            }
        }

        let by_id: HashMap<&str, &ScoredMemory> = fresh
            .iter()
            .map(|c| (c.memory.id.as_str(), *c))
            .collect();
        let mut items = Vec::with_capacity(fresh.len());
        for candidate in &fresh {
            let priority = if options.prefer_new && !loaded(&candidate.memory.id) {
                candidate.score * PREFER_NEW_BOOST
            } else {
                candidate.score
            };
            let worst_case = self.compressor.token_count(&candidate.memory, levels.max)?;
            items.push(PackItem::new(candidate.memory.id.clone(), worst_case, priority));
        }

        let packed = pack(items, allocation.available_budget, options.strategy);
        debug!(
            packed = packed.packed.len(),
            remaining = packed.remaining.len(),
            available = allocation.available_budget,
            "candidates packed at max level"
        );

        let stop_at = options
            .stop_at_utilization
            .map(|cap| (cap * allocation.available_budget as f64).ceil() as usize)
            .unwrap_or(allocation.available_budget);

        for item in packed.packed.iter().chain(&packed.remaining) {
            let Some(candidate) = by_id.get(item.id.as_str()) else {
                continue;
            };
            if allocation.tokens_used >= stop_at {
                allocation.excluded.push(candidate.memory.id.clone());
                continue;
            }
            let compressed = self.compressor.compress_to_fit(
                &candidate.memory,
                allocation.tokens_remaining,
                levels,
            )?;
            if compressed.token_count > allocation.tokens_remaining {
                allocation.excluded.push(candidate.memory.id.clone());
                continue;
            }
            allocation.admit(AllocatedMemory {
                compressed,
                score: candidate.score,
                relevance_reason: candidate.relevance_reason.clone(),
            });
        }

        debug!(
            delivered = allocation.memories.len(),
            excluded = allocation.excluded.len(),
            deduplicated = allocation.deduplicated.len(),
            tokens_used = allocation.tokens_used,
            "budget fitted"
        );
        Ok(allocation)
    }

    /// Plan a level per memory by score, downgrading while a level does not fit.
    ///
    /// Planning only: nothing is compressed for delivery, and the plan need not
    /// match what [`fit_to_budget`](Self::fit_to_budget) would deliver.
    pub fn suggest_level_distribution(
        &self,
        memories: &[ScoredMemory],
        budget: usize,
    ) -> CortexResult<Vec<LevelSuggestion>> {
        planner::suggest_level_distribution(self.compressor, memories, budget)
    }
}
