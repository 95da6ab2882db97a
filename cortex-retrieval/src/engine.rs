//! RetrievalEngine: gather → score → compress and fit → record.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use chrono::Utc;
use cortex_compression::CompressionEngine;
use cortex_core::config::RetrievalConfig;
use cortex_core::errors::{CortexError, CortexResult};
use cortex_core::models::{LevelRange, SessionContext};
use cortex_core::traits::{IMemoryStorage, ISessionTracker};
use cortex_observability::{retrieval_span, RetrievalMetrics, RetrievalSample};
use cortex_prediction::PredictionEngine;
use tracing::{info, warn, Instrument};

use crate::budget::{BudgetAllocation, BudgetManager, FitOptions};
use crate::gather::{Gathered, Gatherer};
use crate::ranking::{self, ScorerWeights, ScoringContext};
use crate::request::{
    PredictionSummary, RetrievalRequest, RetrievalResult, RetrievedMemory, SessionSummary,
};

/// The retrieval orchestrator.
///
/// Owns its compressor, metrics and (optionally) a prediction engine sharing
/// the same storage. The session tracker is external and only read from and
/// appended to.
pub struct RetrievalEngine<S: IMemoryStorage, T: ISessionTracker> {
    storage: Arc<S>,
    sessions: Arc<T>,
    predictor: Option<Arc<PredictionEngine<S>>>,
    compressor: CompressionEngine,
    weights: ScorerWeights,
    config: RetrievalConfig,
    metrics: Mutex<RetrievalMetrics>,
}

impl<S: IMemoryStorage, T: ISessionTracker> RetrievalEngine<S, T> {
    pub fn new(storage: Arc<S>, sessions: Arc<T>, config: RetrievalConfig) -> Self {
        Self {
            storage,
            sessions,
            predictor: None,
            compressor: CompressionEngine::new(),
            weights: ScorerWeights::default(),
            config,
            metrics: Mutex::new(RetrievalMetrics::new()),
        }
    }

    pub fn with_predictor(mut self, predictor: Arc<PredictionEngine<S>>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Snapshot of this engine's metrics.
    pub fn metrics(&self) -> CortexResult<RetrievalMetrics> {
        Ok(self.lock_metrics()?.clone())
    }

    /// Retrieve context for `request`.
    ///
    /// Empty results are not errors. Fails on an invalid configuration or when
    /// every candidate source fails.
    pub async fn retrieve(&self, request: &RetrievalRequest) -> CortexResult<RetrievalResult> {
        let budget = request.max_tokens.unwrap_or(self.config.default_budget);
        self.run(request, budget)
            .instrument(retrieval_span!(request.intent, budget))
            .await
    }

    async fn run(
        &self,
        request: &RetrievalRequest,
        budget: usize,
    ) -> CortexResult<RetrievalResult> {
        let started = Instant::now();
        let levels = LevelRange::new(self.config.min_level, self.config.max_level)?;

        let session = match self.sessions.get_active_session().await {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "active session unavailable, retrieving without dedup");
                None
            }
        };

        // Gather.
        let gatherer = Gatherer {
            storage: self.storage.as_ref(),
            predictor: self.predictor.as_deref(),
            config: &self.config,
        };
        let Gathered {
            memories,
            predicted,
            prediction_cache_hit,
            ..
        } = gatherer.gather(request).await?;
        let total_candidates = memories.len();

        // Score.
        let ctx = ScoringContext {
            intent: request.intent,
            active_file: request.active_file.as_deref(),
            patterns: &request.detected_patterns,
        };
        let scored = ranking::score(memories, &ctx, &self.weights);

        // Compress and fit, skipping what the session already has.
        let options = FitOptions {
            prefer_new: self.config.prefer_new,
            levels,
            session: session.as_ref(),
            reserved_tokens: self.config.reserved_tokens,
            deduplicate: true,
            stop_at_utilization: Some(self.config.stop_utilization),
            ..FitOptions::default()
        };
        let allocation =
            BudgetManager::new(&self.compressor).fit_to_budget(&scored, budget, &options)?;

        // Record.
        let recorded_tokens = self.record(session.as_ref(), &allocation).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        self.lock_metrics()?.record(&RetrievalSample {
            intent: request.intent,
            candidates: total_candidates,
            delivered: allocation.memories.len(),
            tokens_used: allocation.tokens_used,
            budget,
            deduplicated: allocation.deduplicated.len(),
            tokens_saved_by_dedup: allocation.tokens_saved_by_dedup,
            latency_ms: elapsed_ms,
        });
        info!(
            intent = %request.intent,
            candidates = total_candidates,
            delivered = allocation.memories.len(),
            excluded = allocation.excluded.len(),
            deduplicated = allocation.deduplicated.len(),
            tokens_used = allocation.tokens_used,
            budget,
            elapsed_ms,
            "retrieval complete"
        );

        let cache_hit_rate = match self.predictor.as_deref() {
            Some(predictor) => predictor.cache().stats()?.hit_rate,
            None => 0.0,
        };
        let session_summary = SessionSummary {
            session_id: session.as_ref().map(|s| s.session_id.clone()),
            deduplicated: allocation.deduplicated.len(),
            tokens_saved_by_dedup: allocation.tokens_saved_by_dedup,
            cumulative_tokens_sent: session.as_ref().map_or(0, |s| s.tokens_sent)
                + recorded_tokens,
        };

        Ok(RetrievalResult {
            total_candidates,
            tokens_used: allocation.tokens_used,
            retrieval_time_ms: elapsed_ms,
            session: session_summary,
            prediction: PredictionSummary {
                cache_hit_rate,
                predicted_candidates: predicted,
                cache_hit: prediction_cache_hit,
            },
            excluded: allocation.excluded,
            retrieved_at: Utc::now(),
            memories: allocation
                .memories
                .into_iter()
                .map(|m| RetrievedMemory {
                    compressed: m.compressed,
                    relevance_score: m.score.clamp(0.0, 1.0),
                    relevance_reason: m.relevance_reason,
                })
                .collect(),
        })
    }

    /// Push deliveries to the session, storage and usage history. Failures are
    /// logged and skipped. Returns the tokens the session accepted.
    async fn record(
        &self,
        session: Option<&SessionContext>,
        allocation: &BudgetAllocation,
    ) -> usize {
        let now = Utc::now();
        let mut recorded = 0;

        for delivered in &allocation.memories {
            let memory_id = delivered.compressed.memory_id.as_str();
            let tokens = delivered.compressed.token_count;

            if let Some(session) = session {
                match self
                    .sessions
                    .record_memory_loaded(&session.session_id, memory_id, tokens)
                    .await
                {
                    Ok(()) => recorded += tokens,
                    Err(err) => {
                        warn!(memory_id, error = %err, "failed to record delivery in session")
                    }
                }
            }
            if let Err(err) = self.storage.record_access(memory_id).await {
                warn!(memory_id, error = %err, "failed to record access");
            }
            if let Some(predictor) = self.predictor.as_deref() {
                if let Err(err) = predictor.record_usage(memory_id, now) {
                    warn!(memory_id, error = %err, "failed to record usage");
                }
            }
        }

        if let Some(session) = session {
            if allocation.tokens_saved_by_dedup > 0 {
                if let Err(err) = self
                    .sessions
                    .record_dedup_savings(&session.session_id, allocation.tokens_saved_by_dedup)
                    .await
                {
                    warn!(error = %err, "failed to record dedup savings");
                }
            }
        }
        recorded
    }

    fn lock_metrics(&self) -> CortexResult<MutexGuard<'_, RetrievalMetrics>> {
        self.metrics
            .lock()
            .map_err(|e| CortexError::ConcurrencyError(e.to_string()))
    }
}
