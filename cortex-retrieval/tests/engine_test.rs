use std::sync::Arc;

use chrono::Utc;
use cortex_core::config::{PredictionConfig, RetrievalConfig};
use cortex_core::errors::RetrievalError;
use cortex_core::traits::ISessionTracker;
use cortex_core::{CortexError, Intent, MemoryType};
use cortex_prediction::signals::{BehavioralSignals, FileSignals, GitSignals, TemporalSignals};
use cortex_prediction::{PredictionEngine, PredictionSignals};
use cortex_retrieval::{RetrievalEngine, RetrievalRequest};
use cortex_session::SessionManager;
use test_fixtures::{InMemoryStorage, MemoryBuilder, StorageOp};

fn storage() -> Arc<InMemoryStorage> {
    Arc::new(InMemoryStorage::with_memories([
        MemoryBuilder::tribal("hasher-tribal")
            .summary("bcrypt cost must stay at 12 for the auth hasher")
            .files(&["src/auth/hasher.rs"])
            .build(),
        MemoryBuilder::new("session-smell", MemoryType::CodeSmell)
            .summary("session tokens were once logged in plain text")
            .files(&["src/auth/session.rs"])
            .build(),
        MemoryBuilder::new("repo-rationale", MemoryType::PatternRationale)
            .patterns(&["repository"])
            .build(),
        MemoryBuilder::new("deploy-procedure", MemoryType::Procedural)
            .summary("run migrations before flipping the deploy flag")
            .build(),
    ]))
}

fn engine(
    storage: &Arc<InMemoryStorage>,
    sessions: &Arc<SessionManager>,
) -> RetrievalEngine<InMemoryStorage, SessionManager> {
    RetrievalEngine::new(
        Arc::clone(storage),
        Arc::clone(sessions),
        RetrievalConfig::default(),
    )
}

fn signals_for(active: &str) -> PredictionSignals {
    PredictionSignals::new(
        FileSignals::gather(Some(active), vec![], vec![], vec![], vec![]),
        TemporalSignals::gather(Utc::now(), Some(Utc::now()), Some(Utc::now())),
        BehavioralSignals::default(),
        GitSignals::default(),
    )
}

#[tokio::test]
async fn retrieves_file_linked_memories_within_budget() {
    let storage = storage();
    let sessions = Arc::new(SessionManager::new());
    let engine = engine(&storage, &sessions);

    let request = RetrievalRequest::new(Intent::FixBug, "")
        .with_active_file("src/auth/hasher.rs")
        .with_budget(500);
    let result = engine.retrieve(&request).await.unwrap();

    assert!(result.tokens_used <= 500);
    assert!(result
        .memories
        .iter()
        .all(|m| (0.0..=1.0).contains(&m.relevance_score)));
    let hasher = result
        .memories
        .iter()
        .find(|m| m.compressed.memory_id == "hasher-tribal")
        .unwrap();
    assert!(hasher.relevance_reason.contains("active file"));
    assert_eq!(result.prediction.cache_hit, None);
    assert_eq!(result.session.session_id, None);
}

#[tokio::test]
async fn second_call_in_a_session_skips_what_was_sent() {
    let storage = storage();
    let sessions = Arc::new(SessionManager::new());
    let sid = sessions.create_session("s1").unwrap();
    let engine = engine(&storage, &sessions);
    let request = RetrievalRequest::new(Intent::FixBug, "")
        .with_active_file("src/auth/hasher.rs")
        .with_budget(2_000);

    let first = engine.retrieve(&request).await.unwrap();
    assert!(first.memory_ids().contains(&"hasher-tribal"));
    assert_eq!(first.session.deduplicated, 0);
    assert_eq!(first.session.session_id.as_deref(), Some("s1"));
    assert_eq!(first.session.cumulative_tokens_sent, first.tokens_used);

    let second = engine.retrieve(&request).await.unwrap();
    assert!(!second.memory_ids().contains(&"hasher-tribal"));
    assert_eq!(second.session.deduplicated, first.memories.len());
    assert!(second.session.tokens_saved_by_dedup > 0);

    let session = sessions.get_session(&sid).unwrap();
    assert!(session.is_loaded("hasher-tribal"));
    let efficiency = sessions.efficiency(&sid).unwrap();
    assert_eq!(
        efficiency.tokens_saved_by_dedup,
        second.session.tokens_saved_by_dedup
    );
}

#[tokio::test]
async fn deliveries_are_recorded_as_accesses() {
    let storage = storage();
    let sessions = Arc::new(SessionManager::new());
    let engine = engine(&storage, &sessions);

    let request =
        RetrievalRequest::new(Intent::FixBug, "").with_active_file("src/auth/hasher.rs");
    engine.retrieve(&request).await.unwrap();

    assert_eq!(storage.get("hasher-tribal").unwrap().access_count, 1);
    assert_eq!(storage.get("deploy-procedure").unwrap().access_count, 0);
}

#[tokio::test]
async fn a_failing_source_is_skipped() {
    let storage = storage();
    storage.fail_on(StorageOp::FindByFile);
    let sessions = Arc::new(SessionManager::new());
    let engine = engine(&storage, &sessions);

    let request = RetrievalRequest::new(Intent::DeployMigrate, "migrations")
        .with_active_file("src/auth/hasher.rs");
    let result = engine.retrieve(&request).await.unwrap();

    assert_eq!(result.memory_ids(), vec!["deploy-procedure"]);
}

#[tokio::test]
async fn every_source_failing_is_an_error() {
    let storage = storage();
    storage.fail_on(StorageOp::FindByFile);
    storage.fail_on(StorageOp::FindByPattern);
    storage.fail_on(StorageOp::Search);
    let sessions = Arc::new(SessionManager::new());
    let engine = engine(&storage, &sessions);

    let request = RetrievalRequest::new(Intent::FixBug, "")
        .with_active_file("src/auth/hasher.rs")
        .with_patterns(vec!["repository".to_string()]);
    let err = engine.retrieve(&request).await.unwrap_err();

    assert!(matches!(
        err,
        CortexError::RetrievalError(RetrievalError::AllSourcesFailed { attempted: 3, .. })
    ));
}

#[tokio::test]
async fn nothing_relevant_is_an_empty_result() {
    let storage = Arc::new(InMemoryStorage::new());
    let sessions = Arc::new(SessionManager::new());
    let engine = engine(&storage, &sessions);

    let result = engine
        .retrieve(&RetrievalRequest::new(Intent::Learn, "anything"))
        .await
        .unwrap();

    assert!(result.memories.is_empty());
    assert_eq!(result.total_candidates, 0);
    assert_eq!(result.tokens_used, 0);
}

#[tokio::test]
async fn failing_access_recording_does_not_fail_retrieval() {
    let storage = storage();
    storage.fail_on(StorageOp::RecordAccess);
    let sessions = Arc::new(SessionManager::new());
    let engine = engine(&storage, &sessions);

    let request =
        RetrievalRequest::new(Intent::FixBug, "").with_active_file("src/auth/hasher.rs");
    let result = engine.retrieve(&request).await.unwrap();
    assert!(!result.memories.is_empty());
}

#[tokio::test]
async fn patterns_contribute_candidates() {
    let storage = storage();
    let sessions = Arc::new(SessionManager::new());
    let engine = engine(&storage, &sessions);

    let request = RetrievalRequest::new(Intent::Refactor, "unrelated words")
        .with_patterns(vec!["repository".to_string()]);
    let result = engine.retrieve(&request).await.unwrap();

    assert!(result.memory_ids().contains(&"repo-rationale"));
}

#[tokio::test]
async fn invalid_level_configuration_is_rejected() {
    let storage = storage();
    let sessions = Arc::new(SessionManager::new());
    let config = RetrievalConfig {
        min_level: 3,
        max_level: 1,
        ..RetrievalConfig::default()
    };
    let engine = RetrievalEngine::new(storage, sessions, config);

    let err = engine
        .retrieve(&RetrievalRequest::new(Intent::Recall, ""))
        .await
        .unwrap_err();
    assert!(matches!(err, CortexError::InvalidLevelRange { .. }));
}

#[tokio::test]
async fn predictions_feed_candidates_and_learn_usage() {
    let storage = storage();
    let sessions = Arc::new(SessionManager::new());
    let predictor = Arc::new(PredictionEngine::new(
        Arc::clone(&storage),
        PredictionConfig::default(),
    ));
    let config = RetrievalConfig {
        predict_on_miss: true,
        ..RetrievalConfig::default()
    };
    let engine = RetrievalEngine::new(Arc::clone(&storage), sessions, config)
        .with_predictor(Arc::clone(&predictor));

    let request =
        RetrievalRequest::new(Intent::Recall, "").with_signals(signals_for("src/auth/session.rs"));

    let first = engine.retrieve(&request).await.unwrap();
    assert_eq!(first.prediction.cache_hit, Some(false));
    assert!(first.prediction.predicted_candidates >= 1);
    assert!(first.memory_ids().contains(&"session-smell"));
    assert!(predictor.usage_history_len() >= 1);

    let second = engine.retrieve(&request).await.unwrap();
    assert_eq!(second.prediction.cache_hit, Some(true));
    assert!(second.prediction.cache_hit_rate > 0.0);
}

#[tokio::test]
async fn metrics_accumulate_across_calls() {
    let storage = storage();
    let sessions = Arc::new(SessionManager::new());
    let engine = engine(&storage, &sessions);

    let request =
        RetrievalRequest::new(Intent::FixBug, "").with_active_file("src/auth/hasher.rs");
    engine.retrieve(&request).await.unwrap();
    engine
        .retrieve(&RetrievalRequest::new(Intent::Learn, "zzqxv"))
        .await
        .unwrap();

    let metrics = engine.metrics().unwrap();
    assert_eq!(metrics.total_retrievals, 2);
    assert_eq!(metrics.retrievals_for(Intent::FixBug), 1);
    assert_eq!(metrics.empty_retrievals, 1);
    assert!(metrics.memories_delivered >= 1);
}

#[tokio::test]
async fn session_tracker_is_consulted_for_the_active_session() {
    let storage = storage();
    let sessions = Arc::new(SessionManager::new());
    sessions.create_session("s1").unwrap();
    sessions
        .record_memory_loaded("s1", "hasher-tribal", 25)
        .await
        .unwrap();
    let engine = engine(&storage, &sessions);

    let request =
        RetrievalRequest::new(Intent::FixBug, "").with_active_file("src/auth/hasher.rs");
    let result = engine.retrieve(&request).await.unwrap();

    assert!(!result.memory_ids().contains(&"hasher-tribal"));
    assert_eq!(result.session.deduplicated, 1);
    assert_eq!(
        result.session.cumulative_tokens_sent,
        25 + result.tokens_used
    );
}

#[tokio::test]
async fn requests_arrive_as_json() {
    let storage = storage();
    let sessions = Arc::new(SessionManager::new());
    let engine = engine(&storage, &sessions);

    let request: RetrievalRequest = serde_json::from_value(serde_json::json!({
        "intent": "fix_bug",
        "query": "",
        "active_file": "src/auth/hasher.rs",
        "max_tokens": 300
    }))
    .unwrap();
    assert!(request.detected_patterns.is_empty());

    let result = engine.retrieve(&request).await.unwrap();
    assert!(result.tokens_used <= 300);
    let rendered = serde_json::to_value(&result).unwrap();
    assert_eq!(rendered["tokens_used"], result.tokens_used);
}
