use std::sync::Arc;

use cortex_core::config::PredictionConfig;
use cortex_core::traits::IEmbeddingProvider;
use cortex_core::CortexConfig;
use cortex_prediction::{EmbeddingPreloader, PredictedMemory, PredictionStrategy};
use test_fixtures::{InMemoryStorage, MemoryBuilder, MockEmbeddingProvider};

fn prediction(id: &str, confidence: f64) -> PredictedMemory {
    let memory = MemoryBuilder::tribal(id).build();
    PredictedMemory::new(&memory, PredictionStrategy::FileBased, "test", confidence, "s")
}

fn setup(ids: &[&str]) -> (Arc<InMemoryStorage>, Arc<MockEmbeddingProvider>) {
    let storage = InMemoryStorage::with_memories(ids.iter().map(|id| {
        MemoryBuilder::tribal(id)
            .summary(&format!("about {id}"))
            .build()
    }));
    (Arc::new(storage), Arc::new(MockEmbeddingProvider::default()))
}

fn config(batch: usize) -> PredictionConfig {
    PredictionConfig {
        preload_batch_size: batch,
        ..PredictionConfig::default()
    }
}

#[tokio::test]
async fn preloads_confident_predictions_in_batches() {
    let (storage, provider) = setup(&["a", "b", "c", "low"]);
    let preloader = EmbeddingPreloader::new(storage, provider.clone(), &config(2));
    let mut predictions = vec![
        prediction("a", 0.9),
        prediction("b", 0.8),
        prediction("c", 0.7),
        prediction("low", 0.5),
    ];

    let report = preloader.preload(&mut predictions).await;
    assert_eq!(report.preloaded, vec!["a", "b", "c"]);
    assert!(report.failed.is_empty());
    assert_eq!(provider.batch_sizes(), vec![2, 1]);
    assert!(predictions[..3].iter().all(|p| p.embedding_preloaded));
    assert!(!predictions[3].embedding_preloaded);
    assert!(!preloader.is_preloaded("low"));
    assert_eq!(
        preloader.get_embedding("a").map(|v| v.len()),
        Some(provider.dimensions())
    );
}

#[tokio::test]
async fn already_preloaded_ids_are_not_embedded_again() {
    let (storage, provider) = setup(&["a"]);
    let preloader = EmbeddingPreloader::new(storage, provider.clone(), &config(10));

    preloader.preload(&mut [prediction("a", 0.9)]).await;
    let mut again = [prediction("a", 0.9)];
    let report = preloader.preload(&mut again).await;

    assert_eq!(report.skipped, vec!["a"]);
    assert!(report.preloaded.is_empty());
    assert!(again[0].embedding_preloaded);
    assert_eq!(provider.texts_embedded(), 1);
}

#[tokio::test]
async fn predictions_flagged_preloaded_are_not_embedded() {
    let (storage, provider) = setup(&["a", "b"]);
    let preloader = EmbeddingPreloader::new(storage, provider.clone(), &config(10));

    let mut flagged = prediction("a", 0.9);
    flagged.embedding_preloaded = true;
    let mut predictions = [flagged, prediction("b", 0.9)];
    let report = preloader.preload(&mut predictions).await;

    assert_eq!(report.skipped, vec!["a"]);
    assert_eq!(report.preloaded, vec!["b"]);
    assert!(predictions[0].embedding_preloaded);
    assert_eq!(provider.texts_embedded(), 1);
}

#[test]
fn embedding_idle_time_is_configurable() {
    let config = CortexConfig::from_toml("[prediction]\nembedding_cache_idle_secs = 60\n").unwrap();
    assert_eq!(config.prediction.embedding_cache_idle_secs, 60);
    assert_eq!(PredictionConfig::default().embedding_cache_idle_secs, 3_600);
}

#[tokio::test]
async fn missing_memories_fail_without_aborting() {
    let (storage, provider) = setup(&["a"]);
    let preloader = EmbeddingPreloader::new(storage, provider, &config(10));

    let report = preloader
        .preload(&mut [prediction("ghost", 0.9), prediction("a", 0.9)])
        .await;
    assert_eq!(report.failed, vec!["ghost"]);
    assert_eq!(report.preloaded, vec!["a"]);
}

#[tokio::test]
async fn failing_batch_is_reported_and_others_continue() {
    let (storage, provider) = setup(&["a", "b", "c"]);
    provider.poison_texts_containing("about b");
    let preloader = EmbeddingPreloader::new(storage, provider, &config(1));

    let mut predictions = [prediction("a", 0.9), prediction("b", 0.9), prediction("c", 0.9)];
    let report = preloader.preload(&mut predictions).await;
    assert_eq!(report.preloaded, vec!["a", "c"]);
    assert_eq!(report.failed, vec!["b"]);
    assert!(!predictions[1].embedding_preloaded);
}

#[tokio::test]
async fn preload_count_is_capped() {
    let ids: Vec<String> = (0..15).map(|i| format!("m{i:02}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let (storage, provider) = setup(&id_refs);
    let preloader = EmbeddingPreloader::new(storage, provider, &config(10));

    let mut predictions: Vec<PredictedMemory> =
        ids.iter().map(|id| prediction(id, 0.9)).collect();
    let report = preloader.preload(&mut predictions).await;
    assert_eq!(report.preloaded.len(), PredictionConfig::default().preload_max);
}
