use std::time::Duration;

use cortex_prediction::strategies::{merge, rank};
use cortex_prediction::{PredictedMemory, PredictionCache, PredictionStrategy};
use proptest::prelude::*;
use test_fixtures::MemoryBuilder;

const STRATEGIES: [PredictionStrategy; 4] = [
    PredictionStrategy::FileBased,
    PredictionStrategy::PatternBased,
    PredictionStrategy::Temporal,
    PredictionStrategy::Behavioral,
];

fn arb_prediction() -> impl Strategy<Value = PredictedMemory> {
    (0usize..6, 0usize..4, 0.0f64..1.0, 0usize..5).prop_map(|(id, strategy, base, signal)| {
        let memory = MemoryBuilder::tribal(&format!("mem-{id}")).build();
        PredictedMemory::new(
            &memory,
            STRATEGIES[strategy],
            "generated",
            base,
            format!("signal-{signal}"),
        )
    })
}

proptest! {
    #[test]
    fn merge_is_idempotent(predictions in prop::collection::vec(arb_prediction(), 0..30)) {
        let once = merge(predictions);
        let twice = merge(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_yields_unique_ids_and_bounded_confidence(
        predictions in prop::collection::vec(arb_prediction(), 0..30)
    ) {
        let input_max = predictions.iter().map(|p| p.confidence).fold(0.0, f64::max);
        let merged = merge(predictions);
        let mut ids: Vec<&str> = merged.iter().map(|p| p.memory_id.as_str()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
        for p in &merged {
            prop_assert!((0.0..=1.0).contains(&p.confidence));
            prop_assert!(p.confidence <= (input_max + 0.05).min(1.0) + 1e-12);
            prop_assert!(p.source.confidence_breakdown.contains_key("base"));
        }
    }

    #[test]
    fn rank_orders_by_confidence(predictions in prop::collection::vec(arb_prediction(), 0..30)) {
        let mut merged = merge(predictions);
        rank(&mut merged);
        for pair in merged.windows(2) {
            prop_assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn cache_never_exceeds_capacity(capacity in 1usize..8, inserts in 0usize..30) {
        let cache = PredictionCache::new(capacity, Duration::from_secs(60));
        for i in 0..inserts {
            cache.set(&format!("fp-{i}"), Vec::new(), None).unwrap();
        }
        prop_assert_eq!(cache.len(), inserts.min(capacity));
        if inserts > capacity {
            prop_assert!(cache.get("fp-0").unwrap().is_none());
        }
    }
}
