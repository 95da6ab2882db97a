//! Embedding preloader: warms vectors for the strongest predictions.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use cortex_core::config::PredictionConfig;
use cortex_core::traits::{IEmbeddingProvider, IMemoryStorage};
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::predicted::PredictedMemory;

/// Outcome of one preload call, by memory id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadReport {
    pub preloaded: Vec<String>,
    /// Already preloaded by an earlier call, or flagged so by the caller.
    pub skipped: Vec<String>,
    /// Missing from storage, unreadable, or in a batch the provider rejected.
    pub failed: Vec<String>,
}

/// Fetches and embeds memory bodies ahead of time.
///
/// The embedding store doubles as the preloaded-id set: an id is preloaded
/// exactly when its vector is held here. Vectors leave the store after
/// `embedding_cache_idle_secs` unread or when capacity is reached; a
/// prediction already flagged `embedding_preloaded` is never re-embedded.
pub struct EmbeddingPreloader<S: IMemoryStorage, E: IEmbeddingProvider> {
    storage: Arc<S>,
    provider: Arc<E>,
    embeddings: Cache<String, Arc<Vec<f32>>>,
    confidence_floor: f64,
    batch_size: usize,
    max_preloads: usize,
}

impl<S: IMemoryStorage, E: IEmbeddingProvider> EmbeddingPreloader<S, E> {
    pub fn new(storage: Arc<S>, provider: Arc<E>, config: &PredictionConfig) -> Self {
        let embeddings = Cache::builder()
            .max_capacity(config.embedding_cache_capacity)
            .time_to_idle(Duration::from_secs(config.embedding_cache_idle_secs))
            .build();
        Self {
            storage,
            provider,
            embeddings,
            confidence_floor: config.preload_confidence_floor,
            batch_size: config.preload_batch_size.max(1),
            max_preloads: config.preload_max,
        }
    }

    /// Embed the top predictions at or above the confidence floor and mark
    /// them `embedding_preloaded`. Failures are reported, never raised.
    pub async fn preload(&self, predictions: &mut [PredictedMemory]) -> PreloadReport {
        let mut report = PreloadReport::default();
        let mut pending: Vec<(String, String)> = Vec::new();

        let eligible = predictions
            .iter()
            .filter(|p| p.confidence >= self.confidence_floor)
            .take(self.max_preloads);
        for prediction in eligible {
            let id = &prediction.memory_id;
            if prediction.embedding_preloaded || self.is_preloaded(id) {
                report.skipped.push(id.clone());
                continue;
            }
            if pending.iter().any(|(pending_id, _)| pending_id == id) {
                continue;
            }
            match self.storage.read(id).await {
                Ok(Some(memory)) => pending.push((id.clone(), memory.embedding_text())),
                Ok(None) => report.failed.push(id.clone()),
                Err(err) => {
                    warn!(memory_id = %id, error = %err, "preload read failed");
                    report.failed.push(id.clone());
                }
            }
        }

        for batch in pending.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|(_, text)| text.clone()).collect();
            match self.provider.embed_batch(&texts).await {
                Ok(vectors) if vectors.len() == batch.len() => {
                    for ((id, _), vector) in batch.iter().zip(vectors) {
                        self.embeddings.insert(id.clone(), Arc::new(vector));
                        report.preloaded.push(id.clone());
                    }
                }
                Ok(vectors) => {
                    warn!(
                        expected = batch.len(),
                        actual = vectors.len(),
                        "embedding batch size mismatch"
                    );
                    report.failed.extend(batch.iter().map(|(id, _)| id.clone()));
                }
                Err(err) => {
                    warn!(batch = batch.len(), error = %err, "embedding batch failed");
                    report.failed.extend(batch.iter().map(|(id, _)| id.clone()));
                }
            }
        }

        let ready: HashSet<&String> = report.preloaded.iter().chain(&report.skipped).collect();
        for prediction in predictions.iter_mut() {
            if ready.contains(&prediction.memory_id) {
                prediction.embedding_preloaded = true;
            }
        }

        debug!(
            preloaded = report.preloaded.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "embedding preload finished"
        );
        report
    }

    pub fn get_embedding(&self, memory_id: &str) -> Option<Arc<Vec<f32>>> {
        self.embeddings.get(memory_id)
    }

    pub fn is_preloaded(&self, memory_id: &str) -> bool {
        self.embeddings.contains_key(memory_id)
    }

    /// Forget a memory's vector, e.g. after its content changed.
    pub fn invalidate(&self, memory_id: &str) {
        self.embeddings.invalidate(memory_id);
    }
}
