//! Prediction strategies and multi-strategy merge.
//!
//! When a memory appears in multiple strategies:
//! - Keep the highest confidence
//! - Union contributing signals
//! - Apply a single +0.05 boost (capped at 1.0)

pub mod behavioral;
pub mod file_based;
pub mod pattern_based;
pub mod temporal;

pub use behavioral::BehavioralStrategy;
pub use file_based::FileBasedStrategy;
pub use pattern_based::PatternBasedStrategy;
pub use temporal::{TemporalStrategy, UsageRecord};

use std::collections::{BTreeSet, HashMap};

use cortex_core::constants::MULTI_STRATEGY_BOOST;
use cortex_core::memory::{BaseMemory, Importance};

use crate::predicted::{PredictedMemory, PredictionStrategy};

/// Merge predictions that share a memory id.
///
/// Idempotent: the output has unique ids, so merging it again changes nothing.
/// The boost is applied once per merged group, and only when the group spans
/// more than one strategy.
pub fn merge(predictions: Vec<PredictedMemory>) -> Vec<PredictedMemory> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<PredictedMemory>> = HashMap::new();
    for prediction in predictions {
        groups
            .entry(prediction.memory_id.clone())
            .or_insert_with(|| {
                order.push(prediction.memory_id.clone());
                Vec::new()
            })
            .push(prediction);
    }
    order
        .into_iter()
        .filter_map(|id| groups.remove(&id))
        .filter_map(merge_group)
        .collect()
}

fn merge_group(mut group: Vec<PredictedMemory>) -> Option<PredictedMemory> {
    let strategies: BTreeSet<PredictionStrategy> =
        group.iter().map(|p| p.source.strategy).collect();
    if group.is_empty() {
        return None;
    }
    let mut best_idx = 0;
    for (idx, prediction) in group.iter().enumerate() {
        if prediction.confidence > group[best_idx].confidence {
            best_idx = idx;
        }
    }
    let mut best = group.swap_remove(best_idx);
    for other in group {
        best.source
            .contributing_signals
            .extend(other.source.contributing_signals);
        best.relevance_score = best.relevance_score.max(other.relevance_score);
        best.embedding_preloaded |= other.embedding_preloaded;
    }
    if strategies.len() > 1 {
        best.confidence = (best.confidence + MULTI_STRATEGY_BOOST).min(1.0);
        best.source
            .confidence_breakdown
            .insert("multi_strategy".to_string(), MULTI_STRATEGY_BOOST);
    }
    Some(best)
}

/// Order by confidence, then signal count, then relevance. Ties fall back to id.
pub fn rank(predictions: &mut [PredictedMemory]) {
    predictions.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.signal_count().cmp(&a.signal_count()))
            .then_with(|| b.relevance_score.total_cmp(&a.relevance_score))
            .then_with(|| a.memory_id.cmp(&b.memory_id))
    });
}

/// Per-strategy accumulator. Repeats keep the higher confidence and union signals,
/// without the cross-strategy boost.
#[derive(Debug, Default)]
pub(crate) struct CandidateSet {
    order: Vec<String>,
    by_id: HashMap<String, PredictedMemory>,
}

impl CandidateSet {
    pub(crate) fn offer(&mut self, mut prediction: PredictedMemory) {
        match self.by_id.get_mut(&prediction.memory_id) {
            Some(existing) => {
                if prediction.confidence > existing.confidence {
                    let signals = std::mem::take(&mut existing.source.contributing_signals);
                    prediction.source.contributing_signals.extend(signals);
                    *existing = prediction;
                } else {
                    existing
                        .source
                        .contributing_signals
                        .extend(prediction.source.contributing_signals);
                }
            }
            None => {
                self.order.push(prediction.memory_id.clone());
                self.by_id.insert(prediction.memory_id.clone(), prediction);
            }
        }
    }

    pub(crate) fn contains(&self, memory_id: &str) -> bool {
        self.by_id.contains_key(memory_id)
    }

    pub(crate) fn into_vec(mut self) -> Vec<PredictedMemory> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.remove(id))
            .collect()
    }
}

/// +0.05 for high and critical memories.
pub(crate) fn with_importance_bonus(
    prediction: PredictedMemory,
    memory: &BaseMemory,
) -> PredictedMemory {
    if memory.importance >= Importance::High {
        prediction.with_component("importance", 0.05, memory.confidence.value())
    } else {
        prediction
    }
}
