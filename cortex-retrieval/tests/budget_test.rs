use cortex_compression::CompressionEngine;
use cortex_core::models::{LevelRange, ScoredMemory, SessionContext};
use cortex_core::traits::ICompressor;
use cortex_core::{CortexError, MemoryType};
use cortex_retrieval::{calculate_budget, BudgetManager, FitOptions};
use test_fixtures::MemoryBuilder;

fn scored(id: &str, score: f64) -> ScoredMemory {
    let memory = MemoryBuilder::tribal(id)
        .summary("Always rotate the signing key before a release")
        .build();
    ScoredMemory::new(memory, score, "test")
}

#[test]
fn memory_larger_than_budget_at_level_zero_is_excluded() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);
    let candidate = scored("a-memory-with-a-long-identifier", 0.9);
    assert!(engine.token_count(&candidate.memory, 0).unwrap() > 3);

    let allocation = manager
        .fit_to_budget(&[candidate], 3, &FitOptions::default())
        .unwrap();

    assert!(allocation.memories.is_empty());
    assert_eq!(allocation.tokens_used, 0);
    assert_eq!(allocation.tokens_remaining, 3);
    assert_eq!(allocation.excluded, vec!["a-memory-with-a-long-identifier"]);
}

#[test]
fn generous_budget_delivers_everything_at_full_detail() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);
    let candidates = vec![scored("m1", 0.9), scored("m2", 0.7), scored("m3", 0.5)];

    let allocation = manager
        .fit_to_budget(&candidates, 100_000, &FitOptions::default())
        .unwrap();

    assert_eq!(allocation.memories.len(), 3);
    assert_eq!(allocation.by_level, [0, 0, 0, 3]);
    assert!(allocation.excluded.is_empty());
    assert_eq!(
        allocation.tokens_used + allocation.tokens_remaining,
        allocation.available_budget
    );
}

#[test]
fn tight_budget_downgrades_instead_of_dropping() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);
    let candidate = scored("m1", 0.9);
    let full = engine.token_count(&candidate.memory, 3).unwrap();
    let minimal = engine.token_count(&candidate.memory, 0).unwrap();
    assert!(minimal < full);

    let allocation = manager
        .fit_to_budget(&[candidate], full - 1, &FitOptions::default())
        .unwrap();

    assert_eq!(allocation.memories.len(), 1);
    assert!(allocation.memories[0].compressed.level < 3);
    assert!(allocation.tokens_used <= full - 1);
}

#[test]
fn reserved_tokens_shrink_the_available_budget() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);
    let options = FitOptions {
        reserved_tokens: 400,
        ..FitOptions::default()
    };

    let allocation = manager
        .fit_to_budget(&[scored("m1", 0.9)], 1_000, &options)
        .unwrap();
    assert_eq!(allocation.available_budget, 600);
    assert_eq!(allocation.total_budget, 1_000);

    let starved = manager
        .fit_to_budget(&[scored("m1", 0.9)], 300, &options)
        .unwrap();
    assert_eq!(starved.available_budget, 0);
    assert_eq!(starved.excluded, vec!["m1"]);
}

#[test]
fn loaded_memories_are_deduplicated_and_tallied() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);
    let mut session = SessionContext::new("s1");
    session.mark_loaded("m1", 10);
    let candidates = vec![scored("m1", 0.9), scored("m2", 0.8)];
    let saved = engine.token_count(&candidates[0].memory, 3).unwrap();

    let options = FitOptions {
        session: Some(&session),
        ..FitOptions::default()
    };
    let allocation = manager.fit_to_budget(&candidates, 10_000, &options).unwrap();

    assert_eq!(allocation.deduplicated, vec!["m1"]);
    assert_eq!(allocation.tokens_saved_by_dedup, saved);
    assert_eq!(allocation.memory_ids().collect::<Vec<_>>(), vec!["m2"]);
}

#[test]
fn dedup_can_be_turned_off() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);
    let mut session = SessionContext::new("s1");
    session.mark_loaded("m1", 10);

    let options = FitOptions {
        session: Some(&session),
        deduplicate: false,
        ..FitOptions::default()
    };
    let allocation = manager
        .fit_to_budget(&[scored("m1", 0.9)], 10_000, &options)
        .unwrap();

    assert!(allocation.deduplicated.is_empty());
    assert_eq!(allocation.memory_ids().collect::<Vec<_>>(), vec!["m1"]);
}

#[test]
fn duplicate_candidates_are_delivered_once() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);
    let candidates = vec![scored("m1", 0.9), scored("m1", 0.4)];

    let allocation = manager
        .fit_to_budget(&candidates, 10_000, &FitOptions::default())
        .unwrap();

    assert_eq!(allocation.memory_ids().collect::<Vec<_>>(), vec!["m1"]);
    assert_eq!(allocation.memories[0].score, 0.9);
}

#[test]
fn level_range_is_respected() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);
    let options = FitOptions {
        levels: LevelRange::new(1, 2).unwrap(),
        ..FitOptions::default()
    };

    let allocation = manager
        .fit_to_budget(&[scored("m1", 0.9), scored("m2", 0.8)], 100_000, &options)
        .unwrap();

    assert!(allocation
        .memories
        .iter()
        .all(|m| (1..=2).contains(&m.compressed.level)));
    assert_eq!(allocation.by_level[3], 0);
}

#[test]
fn invalid_options_are_rejected() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);

    let bad_levels = FitOptions {
        levels: LevelRange { min: 3, max: 1 },
        ..FitOptions::default()
    };
    assert!(manager
        .fit_to_budget(&[scored("m1", 0.9)], 1_000, &bad_levels)
        .is_err());

    let bad_cap = FitOptions {
        stop_at_utilization: Some(1.5),
        ..FitOptions::default()
    };
    let err = manager
        .fit_to_budget(&[scored("m1", 0.9)], 1_000, &bad_cap)
        .unwrap_err();
    assert!(matches!(err, CortexError::ValidationError(_)));
}

#[test]
fn utilization_cap_stops_admission() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);
    let candidates: Vec<ScoredMemory> = (0..10)
        .map(|i| scored(&format!("m{i}"), 0.9 - i as f64 * 0.01))
        .collect();
    let one = engine.token_count(&candidates[0].memory, 3).unwrap();
    let budget = one * 10;

    let options = FitOptions {
        stop_at_utilization: Some(0.25),
        ..FitOptions::default()
    };
    let allocation = manager.fit_to_budget(&candidates, budget, &options).unwrap();

    assert!(!allocation.memories.is_empty());
    assert!(!allocation.excluded.is_empty());
    assert_eq!(
        allocation.memories.len() + allocation.excluded.len(),
        candidates.len()
    );
    // Admission stops at the first memory that crosses the cap.
    let cap = (0.25 * budget as f64).ceil() as usize;
    assert!(allocation.tokens_used < cap + one);
}

#[test]
fn calculate_budget_reserves_system_and_response() {
    let budget = calculate_budget(8_000, 1_000, 2_000);
    assert_eq!(budget.total, 8_000);
    assert_eq!(budget.available_for_memories, 5_000);

    let overdrawn = calculate_budget(1_000, 800, 800);
    assert_eq!(overdrawn.available_for_memories, 0);
}

#[test]
fn level_distribution_follows_scores_and_budget() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);
    let memories = vec![
        scored("high", 0.85),
        scored("mid", 0.65),
        scored("low", 0.45),
        scored("floor", 0.1),
    ];

    let plan = manager
        .suggest_level_distribution(&memories, 100_000)
        .unwrap();
    let levels: Vec<(&str, u8)> = plan
        .iter()
        .map(|s| (s.memory_id.as_str(), s.level))
        .collect();
    assert_eq!(
        levels,
        vec![("high", 3), ("mid", 2), ("low", 1), ("floor", 0)]
    );
    assert!(plan.iter().all(|s| s.fits));

    let starved = manager.suggest_level_distribution(&memories, 0).unwrap();
    assert!(starved.iter().all(|s| s.level == 0 && !s.fits));
}

#[test]
fn other_memory_types_fit_too() {
    let engine = CompressionEngine::new();
    let manager = BudgetManager::new(&engine);
    let candidates: Vec<ScoredMemory> = [
        MemoryType::Core,
        MemoryType::Procedural,
        MemoryType::DecisionContext,
    ]
    .into_iter()
    .enumerate()
    .map(|(i, t)| ScoredMemory::new(MemoryBuilder::new(&format!("m{i}"), t).build(), 0.5, "x"))
    .collect();

    let allocation = manager
        .fit_to_budget(&candidates, 10_000, &FitOptions::default())
        .unwrap();
    assert_eq!(allocation.memories.len(), 3);
}
