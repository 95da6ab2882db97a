use std::collections::HashSet;

use cortex_compression::CompressionEngine;
use cortex_core::models::{ScoredMemory, SessionContext};
use cortex_retrieval::{BudgetManager, FitOptions};
use proptest::prelude::*;
use test_fixtures::MemoryBuilder;

fn arb_candidate() -> impl Strategy<Value = ScoredMemory> {
    (0usize..12, "[a-z ]{0,400}", 0.0f64..1.0).prop_map(|(id, summary, score)| {
        let memory = MemoryBuilder::tribal(&format!("mem-{id}"))
            .summary(&summary)
            .build();
        ScoredMemory::new(memory, score, "generated")
    })
}

proptest! {
    #[test]
    fn allocation_never_exceeds_the_available_budget(
        candidates in prop::collection::vec(arb_candidate(), 0..20),
        budget in 0usize..2_000,
        reserved in 0usize..500,
        cap in prop::option::of(0.1f64..=1.0),
    ) {
        let engine = CompressionEngine::new();
        let options = FitOptions {
            reserved_tokens: reserved,
            stop_at_utilization: cap,
            ..FitOptions::default()
        };
        let allocation = BudgetManager::new(&engine)
            .fit_to_budget(&candidates, budget, &options)
            .unwrap();

        prop_assert_eq!(allocation.available_budget, budget.saturating_sub(reserved));
        prop_assert!(allocation.tokens_used <= allocation.available_budget);
        prop_assert_eq!(
            allocation.tokens_used + allocation.tokens_remaining,
            allocation.available_budget
        );
        let delivered: usize = allocation.memories.iter().map(|m| m.compressed.token_count).sum();
        prop_assert_eq!(delivered, allocation.tokens_used);
        prop_assert_eq!(allocation.by_level.iter().sum::<usize>(), allocation.memories.len());
    }

    #[test]
    fn every_distinct_candidate_is_accounted_for_once(
        candidates in prop::collection::vec(arb_candidate(), 0..20),
        budget in 0usize..2_000,
        loaded in prop::collection::hash_set(0usize..12, 0..6),
    ) {
        let engine = CompressionEngine::new();
        let mut session = SessionContext::new("prop");
        for id in &loaded {
            session.mark_loaded(&format!("mem-{id}"), 1);
        }
        let options = FitOptions {
            session: Some(&session),
            ..FitOptions::default()
        };
        let allocation = BudgetManager::new(&engine)
            .fit_to_budget(&candidates, budget, &options)
            .unwrap();

        let distinct: HashSet<&str> = candidates.iter().map(|c| c.memory.id.as_str()).collect();
        let mut seen: Vec<&str> = allocation
            .memory_ids()
            .chain(allocation.excluded.iter().map(String::as_str))
            .chain(allocation.deduplicated.iter().map(String::as_str))
            .collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), total);
        prop_assert_eq!(seen.into_iter().collect::<HashSet<_>>(), distinct);

        for id in allocation.memory_ids() {
            prop_assert!(!session.is_loaded(id));
        }
    }
}
