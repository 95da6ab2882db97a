use chrono::Duration;
use cortex_core::memory::{Importance, MemoryType};
use cortex_decay::{DecayContext, DecayEngine};
use proptest::prelude::*;
use test_fixtures::MemoryBuilder;

fn arb_importance() -> impl Strategy<Value = Importance> {
    prop_oneof![
        Just(Importance::Low),
        Just(Importance::Normal),
        Just(Importance::High),
        Just(Importance::Critical),
    ]
}

fn arb_type() -> impl Strategy<Value = MemoryType> {
    proptest::sample::select(MemoryType::ALL.to_vec())
}

proptest! {
    #[test]
    fn final_confidence_is_bounded(
        memory_type in arb_type(),
        importance in arb_importance(),
        confidence in 0.0f64..=1.0,
        access_count in 0u64..1_000_000,
        days in 0i64..5_000,
        valid in 0usize..5,
        invalid in 0usize..5,
        linked in any::<bool>(),
    ) {
        let patterns: &[&str] = if linked { &["p"] } else { &[] };
        let memory = MemoryBuilder::new("prop", memory_type)
            .importance(importance)
            .confidence(confidence)
            .access_count(access_count)
            .citations(valid, invalid)
            .patterns(patterns)
            .build();
        let ctx = DecayContext::at(memory.last_accessed + Duration::days(days));
        let factors = DecayEngine::new().factors(&memory, &ctx);
        prop_assert!((0.0..=1.0).contains(&factors.final_confidence));
        prop_assert!((0.0..=1.0).contains(&factors.temporal_decay));
        prop_assert!((1.0..=1.5).contains(&factors.usage_boost));
    }

    #[test]
    fn core_temporal_decay_is_always_one(days in 0i64..100_000) {
        let memory = MemoryBuilder::new("core", MemoryType::Core).build();
        let ctx = DecayContext::at(memory.last_accessed + Duration::days(days));
        prop_assert_eq!(DecayEngine::new().factors(&memory, &ctx).temporal_decay, 1.0);
    }

    #[test]
    fn more_time_never_raises_confidence(
        memory_type in arb_type(),
        a in 0i64..2_000,
        b in 0i64..2_000,
    ) {
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let memory = MemoryBuilder::new("prop", memory_type).build();
        let engine = DecayEngine::new();
        let at = |d: i64| DecayContext::at(memory.last_accessed + Duration::days(d));
        prop_assert!(
            engine.factors(&memory, &at(late)).final_confidence
                <= engine.factors(&memory, &at(early)).final_confidence
        );
    }
}
