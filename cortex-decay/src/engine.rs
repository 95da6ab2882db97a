use cortex_core::config::DecayConfig;
use cortex_core::errors::CortexResult;
use cortex_core::memory::{BaseMemory, MemoryType};
use cortex_core::traits::IDecayEngine;
use cortex_observability::decay_span;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::archival::{self, ArchivalDecision};
use crate::factors::DecayContext;
use crate::formula::{self, DecayFactors};

/// Result of decaying one memory in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayOutcome {
    pub memory_id: String,
    pub factors: DecayFactors,
    pub archival: ArchivalDecision,
}

/// Decay engine implementing the 5-factor multiplicative formula
/// with configurable half-lives and archival thresholds.
#[derive(Debug, Clone, Default)]
pub struct DecayEngine {
    config: DecayConfig,
}

impl DecayEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    /// Decayed confidence at `ctx.now`.
    pub fn calculate_with_context(
        &self,
        memory: &BaseMemory,
        ctx: &DecayContext,
    ) -> CortexResult<f64> {
        Ok(self.factors(memory, ctx).final_confidence)
    }

    /// Every factor, for debugging and observability.
    pub fn factors(&self, memory: &BaseMemory, ctx: &DecayContext) -> DecayFactors {
        let half_life = self.config.half_life_days(memory.memory_type());
        formula::compute(memory, ctx, half_life)
    }

    /// Archival threshold for `memory_type`, honouring config overrides.
    pub fn archival_threshold(&self, memory_type: MemoryType) -> f64 {
        match self.config.min_confidence_overrides.get(memory_type.as_str()) {
            Some(threshold) => *threshold,
            None => archival::default_min_confidence(memory_type, self.config.archival_threshold),
        }
    }

    pub fn evaluate_archival(
        &self,
        memory: &BaseMemory,
        decayed_confidence: f64,
    ) -> ArchivalDecision {
        let threshold = self.archival_threshold(memory.memory_type());
        archival::evaluate(memory, decayed_confidence, threshold)
    }

    /// Decay many memories in parallel. Output order matches input order.
    pub fn process_batch(&self, memories: &[BaseMemory], ctx: &DecayContext) -> Vec<DecayOutcome> {
        let _span = decay_span!(memories.len()).entered();
        let outcomes: Vec<DecayOutcome> = memories
            .par_iter()
            .map(|memory| {
                let factors = self.factors(memory, ctx);
                let archival = self.evaluate_archival(memory, factors.final_confidence);
                DecayOutcome {
                    memory_id: memory.id.clone(),
                    factors,
                    archival,
                }
            })
            .collect();

        let archivable = outcomes.iter().filter(|o| o.archival.should_archive).count();
        info!(processed = outcomes.len(), archivable, "decay batch complete");
        outcomes
    }
}

impl IDecayEngine for DecayEngine {
    fn calculate(&self, memory: &BaseMemory) -> CortexResult<f64> {
        self.calculate_with_context(memory, &DecayContext::default())
    }
}
