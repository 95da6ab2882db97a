use cortex_core::errors::CortexResult;
use cortex_core::memory::MemoryType;
use cortex_core::traits::{IMemoryStorage, MemoryFilter};

use crate::predicted::{PredictedMemory, PredictionStrategy};
use crate::signals::FileSignals;

use super::CandidateSet;

const PATTERN_BASE: f64 = 0.7;
const RATIONALE_BONUS: f64 = 0.15;
const TRIBAL_BONUS: f64 = 0.05;
const COMBINATION_BASE: f64 = 0.65;
const COMBINATION_STEP: f64 = 0.05;
const COMBINATION_CAP: f64 = 0.2;

/// Pattern-based prediction strategy.
///
/// Detected patterns pull in their rationale and tribal memories. When two or
/// more patterns are detected, memories tagged with several of them are also
/// predicted.
pub struct PatternBasedStrategy;

impl PatternBasedStrategy {
    pub async fn predict<S: IMemoryStorage>(
        signals: &FileSignals,
        storage: &S,
        limit: usize,
    ) -> CortexResult<Vec<PredictedMemory>> {
        let mut candidates = CandidateSet::default();
        let patterns = &signals.detected_patterns;

        for pattern in patterns {
            for memory in storage.find_by_pattern(pattern).await? {
                let (reason, bonus_name, bonus) = match memory.memory_type() {
                    MemoryType::PatternRationale => (
                        "rationale for a detected pattern",
                        "pattern_rationale",
                        RATIONALE_BONUS,
                    ),
                    MemoryType::Tribal => (
                        "tribal knowledge for a detected pattern",
                        "tribal",
                        TRIBAL_BONUS,
                    ),
                    _ => continue,
                };
                let prediction = PredictedMemory::new(
                    &memory,
                    PredictionStrategy::PatternBased,
                    reason,
                    PATTERN_BASE,
                    format!("pattern:{pattern}"),
                )
                .with_component(bonus_name, bonus, memory.confidence.value());
                candidates.offer(prediction);
            }
        }

        if patterns.len() >= 2 {
            let filter = MemoryFilter::tags(patterns.clone()).with_limit(limit);
            for memory in storage.search(&filter).await? {
                let matched: Vec<&String> =
                    patterns.iter().filter(|p| memory.tags.contains(p)).collect();
                if matched.len() < 2 {
                    continue;
                }
                let combination =
                    (COMBINATION_STEP * (matched.len() - 1) as f64).min(COMBINATION_CAP);
                let signal = format!(
                    "pattern_combination:{}",
                    matched.iter().map(|p| p.as_str()).collect::<Vec<_>>().join("+")
                );
                let prediction = PredictedMemory::new(
                    &memory,
                    PredictionStrategy::PatternBased,
                    "tagged with several detected patterns",
                    COMBINATION_BASE,
                    signal,
                )
                .with_component("combination", combination, memory.confidence.value());
                candidates.offer(prediction);
            }
        }

        Ok(candidates.into_vec())
    }
}
