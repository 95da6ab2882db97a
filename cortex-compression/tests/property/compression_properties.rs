use cortex_compression::{pack, CompressionEngine, CompressionLevel, PackItem, PackingStrategy};
use cortex_core::memory::{Importance, MemoryType};
use cortex_core::models::LevelRange;
use cortex_core::traits::ICompressor;
use proptest::prelude::*;
use test_fixtures::MemoryBuilder;

fn arb_type() -> impl Strategy<Value = MemoryType> {
    proptest::sample::select(MemoryType::ALL.to_vec())
}

fn arb_importance() -> impl Strategy<Value = Importance> {
    prop_oneof![
        Just(Importance::Low),
        Just(Importance::Normal),
        Just(Importance::High),
        Just(Importance::Critical),
    ]
}

proptest! {
    #[test]
    fn token_cost_never_decreases_with_level(
        memory_type in arb_type(),
        importance in arb_importance(),
        summary in ".{0,300}",
        tags in proptest::collection::vec("[a-z-]{1,12}", 0..8),
        confidence in 0.0f64..=1.0,
    ) {
        let tag_refs: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        let memory = MemoryBuilder::new("prop", memory_type)
            .summary(&summary)
            .tags(&tag_refs)
            .importance(importance)
            .confidence(confidence)
            .build();
        let engine = CompressionEngine::new();
        let counts: Vec<usize> = (0..=3)
            .map(|l| engine.token_count(&memory, l).unwrap())
            .collect();
        prop_assert!(counts.windows(2).all(|w| w[0] <= w[1]), "{:?}", counts);
    }

    #[test]
    fn brief_levels_respect_their_ceilings(
        memory_type in arb_type(),
        importance in arb_importance(),
        id in "[a-f0-9-]{1,40}",
        summary in ".{0,300}",
        tags in proptest::collection::vec(".{1,40}", 0..8),
    ) {
        let tag_refs: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        let memory = MemoryBuilder::new(&id, memory_type)
            .summary(&summary)
            .tags(&tag_refs)
            .importance(importance)
            .build();
        let engine = CompressionEngine::new();
        for level in [CompressionLevel::L0, CompressionLevel::L1] {
            let ceiling = level.max_tokens().unwrap();
            prop_assert!(engine.token_count(&memory, level.as_u8()).unwrap() <= ceiling);
        }
    }

    #[test]
    fn compress_to_fit_fits_whenever_the_floor_fits(
        memory_type in arb_type(),
        budget in 0usize..600,
    ) {
        let memory = MemoryBuilder::new("prop", memory_type).build();
        let engine = CompressionEngine::new();
        let floor = engine.token_count(&memory, 0).unwrap();
        let fitted = engine.compress_to_fit(&memory, budget, LevelRange::FULL).unwrap();
        if floor <= budget {
            prop_assert!(fitted.token_count <= budget);
        } else {
            prop_assert_eq!(fitted.level, 0);
        }
    }

    #[test]
    fn packing_never_exceeds_budget(
        sizes in proptest::collection::vec((0usize..200, 0.0f64..1.0), 0..40),
        budget in 0usize..1000,
    ) {
        let items: Vec<PackItem> = sizes
            .iter()
            .enumerate()
            .map(|(i, (tokens, priority))| PackItem::new(i.to_string(), *tokens, *priority))
            .collect();
        let total = items.len();
        let result = pack(items, budget, PackingStrategy::Balanced);
        let used: usize = result.packed.iter().map(|i| i.tokens).sum();
        prop_assert!(used <= budget);
        prop_assert_eq!(used, result.tokens_used);
        prop_assert_eq!(result.packed.len() + result.remaining.len(), total);
        prop_assert!(result.remaining.iter().filter(|i| i.tokens > budget).count()
            == sizes.iter().filter(|(t, _)| *t > budget).count());
    }

    #[test]
    fn packing_is_deterministic(
        sizes in proptest::collection::vec((0usize..100, 0.0f64..1.0), 0..30),
        budget in 0usize..500,
    ) {
        let items: Vec<PackItem> = sizes
            .iter()
            .enumerate()
            .map(|(i, (tokens, priority))| PackItem::new(i.to_string(), *tokens, *priority))
            .collect();
        let a = pack(items.clone(), budget, PackingStrategy::Balanced);
        let b = pack(items, budget, PackingStrategy::Balanced);
        prop_assert_eq!(a, b);
    }
}
