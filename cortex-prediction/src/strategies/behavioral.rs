use std::collections::HashSet;

use cortex_core::errors::CortexResult;
use cortex_core::memory::BaseMemory;
use cortex_core::traits::{IMemoryStorage, MemoryFilter, QueryOptions};

use crate::predicted::{PredictedMemory, PredictionStrategy};
use crate::signals::PredictionSignals;

use super::CandidateSet;

const FREQUENT_BASE: f64 = 0.75;
const LATEST_QUERY_BASE: f64 = 0.6;
const OLDER_QUERY_BASE: f64 = 0.5;
const INTENT_BASE: f64 = 0.5;
const USER_PATTERN_BASE: f64 = 0.55;
const BRANCH_BASE: f64 = 0.45;
const MAX_QUERIES: usize = 3;

/// Behavioral prediction strategy.
///
/// Predicts from what the user has been doing: memories they return to, recent
/// queries and intents, habitual tags, and the current branch's keywords.
pub struct BehavioralStrategy;

impl BehavioralStrategy {
    pub async fn predict<S: IMemoryStorage>(
        signals: &PredictionSignals,
        storage: &S,
        limit: usize,
    ) -> CortexResult<Vec<PredictedMemory>> {
        let mut candidates = CandidateSet::default();
        let behavioral = &signals.behavioral;

        for memory_id in &behavioral.frequent_memories {
            if let Some(memory) = storage.read(memory_id).await? {
                candidates.offer(predict(
                    &memory,
                    "frequently used",
                    FREQUENT_BASE,
                    format!("frequent:{memory_id}"),
                ));
            }
        }

        for (idx, query) in behavioral.recent_queries.iter().take(MAX_QUERIES).enumerate() {
            let base = if idx == 0 {
                LATEST_QUERY_BASE
            } else {
                OLDER_QUERY_BASE
            };
            let filter = MemoryFilter::query(query.as_str()).with_limit(limit);
            for memory in storage.search(&filter).await? {
                candidates.offer(predict(
                    &memory,
                    "matches a recent query",
                    base,
                    format!("query:{query}"),
                ));
            }
        }

        let mut seen_intents = HashSet::new();
        let options = QueryOptions {
            limit: Some(limit),
            min_confidence: None,
        };
        for intent in &behavioral.recent_intents {
            if !seen_intents.insert(*intent) {
                continue;
            }
            for memory_type in intent.relevant_types() {
                for memory in storage.find_by_type(*memory_type, &options).await? {
                    candidates.offer(predict(
                        &memory,
                        "relevant to a recent intent",
                        INTENT_BASE,
                        format!("intent:{}", intent.as_str()),
                    ));
                }
            }
        }

        if !behavioral.user_patterns.is_empty() {
            let filter = MemoryFilter::tags(behavioral.user_patterns.clone()).with_limit(limit);
            for memory in storage.search(&filter).await? {
                let Some(tag) = behavioral
                    .user_patterns
                    .iter()
                    .find(|t| memory.tags.contains(t))
                else {
                    continue;
                };
                candidates.offer(predict(
                    &memory,
                    "matches the user's usual work",
                    USER_PATTERN_BASE,
                    format!("user_pattern:{tag}"),
                ));
            }
        }

        let keywords = signals.git.branch_keywords();
        if !keywords.is_empty() {
            let branch = signals.git.current_branch.as_deref().unwrap_or_default();
            let filter = MemoryFilter::tags(keywords).with_limit(limit);
            for memory in storage.search(&filter).await? {
                candidates.offer(predict(
                    &memory,
                    "related to the current branch",
                    BRANCH_BASE,
                    format!("branch:{branch}"),
                ));
            }
        }

        Ok(candidates.into_vec())
    }
}

fn predict(memory: &BaseMemory, reason: &str, base: f64, signal: String) -> PredictedMemory {
    PredictedMemory::new(memory, PredictionStrategy::Behavioral, reason, base, signal)
}
