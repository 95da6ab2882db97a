//! PredictionEngine: runs the strategies concurrently, merges, ranks, caches.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use cortex_core::config::PredictionConfig;
use cortex_core::errors::CortexResult;
use cortex_core::traits::IMemoryStorage;
use cortex_observability::prediction_span;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn, Instrument};

use crate::cache::PredictionCache;
use crate::predicted::{PredictedMemory, PredictionStrategy};
use crate::signals::PredictionSignals;
use crate::strategies::{
    self, BehavioralStrategy, FileBasedStrategy, PatternBasedStrategy, TemporalStrategy,
    UsageRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStatus {
    Hit,
    Miss,
}

/// Output of one prediction call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predictions: Vec<PredictedMemory>,
    pub signals: PredictionSignals,
    /// Strategies that ran and returned without error.
    pub strategies_used: Vec<PredictionStrategy>,
    pub prediction_time_ms: u64,
    pub cache_status: CacheStatus,
    pub predicted_at: DateTime<Utc>,
}

/// Prediction engine coordinating all 4 strategies with caching and merge.
pub struct PredictionEngine<S: IMemoryStorage> {
    storage: Arc<S>,
    config: PredictionConfig,
    cache: PredictionCache,
    temporal: TemporalStrategy,
}

impl<S: IMemoryStorage> PredictionEngine<S> {
    pub fn new(storage: Arc<S>, config: PredictionConfig) -> Self {
        Self {
            cache: PredictionCache::from_config(&config),
            temporal: TemporalStrategy::new(config.usage_history_capacity),
            storage,
            config,
        }
    }

    pub fn with_defaults(storage: Arc<S>) -> Self {
        Self::new(storage, PredictionConfig::default())
    }

    pub fn cache(&self) -> &PredictionCache {
        &self.cache
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Predict which memories the given context will need.
    ///
    /// A cached list for the same fingerprint is returned as a hit. Otherwise
    /// the strategies run concurrently; one that fails contributes nothing.
    pub async fn predict(&self, signals: &PredictionSignals) -> CortexResult<PredictionResult> {
        let fingerprint = signals.fingerprint();
        self.run(signals, &fingerprint)
            .instrument(prediction_span!(fingerprint))
            .await
    }

    async fn run(
        &self,
        signals: &PredictionSignals,
        fingerprint: &str,
    ) -> CortexResult<PredictionResult> {
        let started = Instant::now();

        if let Some(predictions) = self.cache.get(fingerprint)? {
            debug!(fingerprint = %fingerprint, count = predictions.len(), "prediction cache hit");
            return Ok(PredictionResult {
                strategies_used: distinct_strategies(&predictions),
                predictions,
                signals: signals.clone(),
                prediction_time_ms: started.elapsed().as_millis() as u64,
                cache_status: CacheStatus::Hit,
                predicted_at: Utc::now(),
            });
        }

        let limit = self.config.max_predictions;
        let storage = self.storage.as_ref();
        let (file, pattern, temporal, behavioral) = tokio::join!(
            FileBasedStrategy::predict(signals, storage, limit),
            PatternBasedStrategy::predict(&signals.file, storage, limit),
            self.temporal.predict(&signals.temporal, storage, limit),
            async {
                if self.config.enable_behavioral {
                    Some(BehavioralStrategy::predict(signals, storage, limit).await)
                } else {
                    None
                }
            },
        );

        let mut strategies_used = Vec::new();
        let mut all = Vec::new();
        let outcomes = [
            (PredictionStrategy::FileBased, Some(file)),
            (PredictionStrategy::PatternBased, Some(pattern)),
            (PredictionStrategy::Temporal, Some(temporal)),
            (PredictionStrategy::Behavioral, behavioral),
        ];
        for (strategy, outcome) in outcomes {
            match outcome {
                Some(Ok(predictions)) => {
                    debug!(strategy = %strategy, count = predictions.len(), "strategy finished");
                    strategies_used.push(strategy);
                    all.extend(predictions);
                }
                Some(Err(err)) => {
                    warn!(strategy = %strategy, error = %err, "prediction strategy failed");
                }
                None => {}
            }
        }

        let mut predictions = strategies::merge(all);
        strategies::rank(&mut predictions);
        predictions.retain(|p| p.confidence >= self.config.min_confidence);
        predictions.truncate(self.config.max_predictions);

        let active_file = signals.file.active_file.as_deref();
        self.cache.set(fingerprint, predictions.clone(), active_file)?;
        if let Some(path) = active_file {
            self.cache.set_for_file(path, fingerprint, predictions.clone())?;
        }

        let elapsed = started.elapsed();
        self.cache.record_latency(elapsed.as_secs_f64() * 1000.0)?;
        debug!(
            fingerprint = %fingerprint,
            count = predictions.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "predictions computed"
        );

        Ok(PredictionResult {
            predictions,
            signals: signals.clone(),
            strategies_used,
            prediction_time_ms: elapsed.as_millis() as u64,
            cache_status: CacheStatus::Miss,
            predicted_at: Utc::now(),
        })
    }

    /// Cached predictions for this context, without running any strategy.
    pub fn cached(
        &self,
        signals: &PredictionSignals,
    ) -> CortexResult<Option<Vec<PredictedMemory>>> {
        self.cache.get(&signals.fingerprint())
    }

    /// Feed the temporal strategy's usage history.
    pub fn record_usage(&self, memory_id: &str, at: DateTime<Utc>) -> CortexResult<()> {
        self.temporal.record(UsageRecord::new(memory_id, at))
    }

    pub fn usage_history_len(&self) -> usize {
        self.temporal.history_len()
    }

    /// Invalidate predictions made for a file that changed.
    pub fn on_file_changed(&self, file_path: &str) -> CortexResult<usize> {
        self.cache.invalidate_file(file_path)
    }

    /// Invalidate all cache entries (e.g., new session).
    pub fn on_new_session(&self) -> CortexResult<()> {
        self.cache.clear()
    }
}

fn distinct_strategies(predictions: &[PredictedMemory]) -> Vec<PredictionStrategy> {
    let mut strategies: Vec<PredictionStrategy> =
        predictions.iter().map(|p| p.source.strategy).collect();
    strategies.sort();
    strategies.dedup();
    strategies
}
