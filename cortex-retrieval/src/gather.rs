//! Candidate gathering from the four retrieval sources.

use std::collections::HashSet;
use std::fmt;

use cortex_core::config::RetrievalConfig;
use cortex_core::errors::{CortexError, CortexResult, RetrievalError};
use cortex_core::memory::BaseMemory;
use cortex_core::traits::{IMemoryStorage, MemoryFilter};
use cortex_prediction::{CacheStatus, PredictedMemory, PredictionEngine};
use tracing::{debug, warn};

use crate::request::RetrievalRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    ActiveFile,
    Patterns,
    Predictions,
    IntentSearch,
}

impl CandidateSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActiveFile => "active_file",
            Self::Patterns => "patterns",
            Self::Predictions => "predictions",
            Self::IntentSearch => "intent_search",
        }
    }
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinct candidates in first-seen order.
#[derive(Debug, Default)]
pub struct Gathered {
    pub memories: Vec<BaseMemory>,
    /// Candidates first contributed by predictions.
    pub predicted: usize,
    /// `None` when predictions were not consulted.
    pub prediction_cache_hit: Option<bool>,
    seen: HashSet<String>,
}

impl Gathered {
    fn add(&mut self, memories: Vec<BaseMemory>) -> usize {
        let before = self.memories.len();
        for memory in memories {
            if self.seen.insert(memory.id.clone()) {
                self.memories.push(memory);
            }
        }
        self.memories.len() - before
    }
}

#[derive(Debug, Default)]
struct SourceTally {
    attempted: usize,
    failed: usize,
    first_error: Option<CortexError>,
}

impl SourceTally {
    fn settle(
        &mut self,
        source: CandidateSource,
        outcome: CortexResult<Vec<BaseMemory>>,
        limit: usize,
        gathered: &mut Gathered,
    ) -> usize {
        self.attempted += 1;
        match outcome {
            Ok(mut memories) => {
                memories.truncate(limit);
                let added = gathered.add(memories);
                debug!(source = %source, added, "candidates gathered");
                added
            }
            Err(err) => {
                warn!(source = %source, error = %err, "candidate source failed, skipping");
                self.failed += 1;
                self.first_error.get_or_insert(err);
                0
            }
        }
    }

    fn into_result(self) -> CortexResult<()> {
        match self.first_error {
            Some(err) if self.failed == self.attempted => Err(RetrievalError::AllSourcesFailed {
                attempted: self.attempted,
                first_error: err.to_string(),
            }
            .into()),
            _ => Ok(()),
        }
    }
}

/// Pulls candidates for one request.
///
/// A failing source is skipped with a warning. Only when every attempted
/// source fails is an error returned.
pub struct Gatherer<'a, S: IMemoryStorage> {
    pub storage: &'a S,
    pub predictor: Option<&'a PredictionEngine<S>>,
    pub config: &'a RetrievalConfig,
}

impl<S: IMemoryStorage> Gatherer<'_, S> {
    pub async fn gather(&self, request: &RetrievalRequest) -> CortexResult<Gathered> {
        let limit = self.config.max_candidates_per_source;
        let mut gathered = Gathered::default();
        let mut tally = SourceTally::default();

        if let Some(path) = request.active_file.as_deref() {
            let outcome = self.storage.find_by_file(path).await;
            tally.settle(CandidateSource::ActiveFile, outcome, limit, &mut gathered);
        }

        if !request.detected_patterns.is_empty() {
            let outcome = self.by_patterns(&request.detected_patterns).await;
            tally.settle(CandidateSource::Patterns, outcome, limit, &mut gathered);
        }

        if let Some(predictor) = self.predictor.filter(|_| self.config.use_predictions) {
            let outcome = match self.predictions(predictor, request).await {
                Ok((predictions, cache_hit)) => {
                    gathered.prediction_cache_hit = Some(cache_hit);
                    self.read_predicted(&predictions).await
                }
                Err(err) => Err(err),
            };
            let added = tally.settle(CandidateSource::Predictions, outcome, limit, &mut gathered);
            gathered.predicted = added;
        }

        let outcome = self.by_intent(request).await;
        tally.settle(CandidateSource::IntentSearch, outcome, limit, &mut gathered);

        tally.into_result()?;
        Ok(gathered)
    }

    async fn by_patterns(&self, patterns: &[String]) -> CortexResult<Vec<BaseMemory>> {
        let mut memories = Vec::new();
        for pattern in patterns {
            memories.extend(self.storage.find_by_pattern(pattern).await?);
        }
        Ok(memories)
    }

    /// Predictions for the request, and whether they came from the cache.
    async fn predictions(
        &self,
        predictor: &PredictionEngine<S>,
        request: &RetrievalRequest,
    ) -> CortexResult<(Vec<PredictedMemory>, bool)> {
        if let Some(signals) = request.signals.as_ref() {
            if self.config.predict_on_miss {
                let result = predictor.predict(signals).await?;
                return Ok((result.predictions, result.cache_status == CacheStatus::Hit));
            }
            return Ok(match predictor.cached(signals)? {
                Some(predictions) => (predictions, true),
                None => (Vec::new(), false),
            });
        }
        if let Some(path) = request.active_file.as_deref() {
            return Ok(match predictor.cache().get_for_file(path)? {
                Some(predictions) => (predictions, true),
                None => (Vec::new(), false),
            });
        }
        Ok((Vec::new(), false))
    }

    async fn read_predicted(
        &self,
        predictions: &[PredictedMemory],
    ) -> CortexResult<Vec<BaseMemory>> {
        let mut memories = Vec::with_capacity(predictions.len());
        for prediction in predictions.iter().take(self.config.max_candidates_per_source) {
            if let Some(memory) = self.storage.read(&prediction.memory_id).await? {
                memories.push(memory);
            }
        }
        Ok(memories)
    }

    async fn by_intent(&self, request: &RetrievalRequest) -> CortexResult<Vec<BaseMemory>> {
        let query = request.query.trim();
        let filter = MemoryFilter {
            query: (!query.is_empty()).then(|| query.to_string()),
            types: request.intent.relevant_types().to_vec(),
            limit: Some(self.config.max_candidates_per_source),
            ..MemoryFilter::default()
        };
        self.storage.search(&filter).await
    }
}
