use cortex_core::{Importance, Intent, MemoryType};
use cortex_retrieval::ranking::{score, ScorerWeights, ScoringContext};
use test_fixtures::MemoryBuilder;

fn ctx<'a>(
    intent: Intent,
    active_file: Option<&'a str>,
    patterns: &'a [String],
) -> ScoringContext<'a> {
    ScoringContext {
        intent,
        active_file,
        patterns,
    }
}

#[test]
fn intent_match_adds_its_bonus() {
    let tribal = MemoryBuilder::tribal("t").confidence(0.5).build();
    let episodic = MemoryBuilder::new("e", MemoryType::Episodic)
        .confidence(0.5)
        .build();

    let scored = score(
        vec![episodic, tribal],
        &ctx(Intent::FixBug, None, &[]),
        &ScorerWeights::default(),
    );

    assert_eq!(scored[0].memory.id, "t");
    assert!((scored[0].score - 0.7).abs() < 1e-9);
    assert!(scored[0].relevance_reason.contains("fix_bug"));
    assert!((scored[1].score - 0.5).abs() < 1e-9);
}

#[test]
fn active_file_and_patterns_stack() {
    let patterns = vec!["repository".to_string(), "builder".to_string()];
    let linked = MemoryBuilder::new("linked", MemoryType::Semantic)
        .confidence(0.2)
        .files(&["src/db/repo.rs"])
        .patterns(&["repository", "builder"])
        .build();

    let scored = score(
        vec![linked],
        &ctx(Intent::AddTest, Some("src/db/repo.rs"), &patterns),
        &ScorerWeights::default(),
    );

    // 0.2 + 0.3 file + 2 × 0.1 patterns
    assert!((scored[0].score - 0.7).abs() < 1e-9);
    assert!(scored[0].relevance_reason.contains("active file"));
    assert!(scored[0].relevance_reason.contains("2 detected pattern"));
}

#[test]
fn importance_and_access_frequency_count() {
    let busy = MemoryBuilder::new("busy", MemoryType::Semantic)
        .confidence(0.3)
        .importance(Importance::Critical)
        .access_count(11)
        .build();
    let quiet = MemoryBuilder::new("quiet", MemoryType::Semantic)
        .confidence(0.3)
        .access_count(10)
        .build();

    let scored = score(
        vec![quiet, busy],
        &ctx(Intent::AddFeature, None, &[]),
        &ScorerWeights::default(),
    );

    assert_eq!(scored[0].memory.id, "busy");
    assert!((scored[0].score - 0.6).abs() < 1e-9);
    assert!((scored[1].score - 0.3).abs() < 1e-9);
}

#[test]
fn scores_are_clamped_and_ties_break_by_id() {
    let a = MemoryBuilder::tribal("b-memory")
        .confidence(0.95)
        .importance(Importance::Critical)
        .files(&["src/lib.rs"])
        .build();
    let b = MemoryBuilder::tribal("a-memory")
        .confidence(0.95)
        .importance(Importance::Critical)
        .files(&["src/lib.rs"])
        .build();

    let scored = score(
        vec![a, b],
        &ctx(Intent::FixBug, Some("src/lib.rs"), &[]),
        &ScorerWeights::default(),
    );

    assert!(scored.iter().all(|s| s.score == 1.0));
    assert_eq!(scored[0].memory.id, "a-memory");
}

#[test]
fn plain_memory_explains_its_confidence() {
    let memory = MemoryBuilder::new("plain", MemoryType::Episodic)
        .confidence(0.4)
        .build();
    let scored = score(
        vec![memory],
        &ctx(Intent::Decide, None, &[]),
        &ScorerWeights::default(),
    );
    assert!(scored[0].relevance_reason.starts_with("confidence"));
}
