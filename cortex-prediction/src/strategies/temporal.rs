use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Datelike, Utc, Weekday};
use cortex_core::errors::{CortexError, CortexResult};
use cortex_core::memory::MemoryType;
use cortex_core::traits::{IMemoryStorage, QueryOptions};
use serde::{Deserialize, Serialize};

use crate::predicted::{PredictedMemory, PredictionStrategy};
use crate::signals::{TemporalSignals, TimeOfDay};

use super::CandidateSet;

const HISTORY_BASE: f64 = 0.4;
const TIME_OF_DAY_STEP: f64 = 0.05;
const TIME_OF_DAY_CAP: f64 = 0.25;
const DAY_OF_WEEK_STEP: f64 = 0.025;
const DAY_OF_WEEK_CAP: f64 = 0.1;
const NEW_SESSION_BASE: f64 = 0.55;

/// One delivery of a memory, bucketed for temporal matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub memory_id: String,
    pub time_of_day: TimeOfDay,
    pub day_of_week: Weekday,
    pub at: DateTime<Utc>,
}

impl UsageRecord {
    pub fn new(memory_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            memory_id: memory_id.into(),
            time_of_day: TimeOfDay::of(at),
            day_of_week: at.weekday(),
            at,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Hits {
    time_of_day: usize,
    day_of_week: usize,
}

impl Hits {
    fn total(self) -> usize {
        self.time_of_day + self.day_of_week
    }
}

/// Temporal prediction strategy.
///
/// Predicts memories that were used at a similar time of day or on the same
/// weekday, from a bounded usage history. New sessions also get core memories.
#[derive(Debug)]
pub struct TemporalStrategy {
    history: Mutex<VecDeque<UsageRecord>>,
    capacity: usize,
}

impl TemporalStrategy {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
        }
    }

    /// Append a usage record, dropping the oldest once full.
    pub fn record(&self, record: UsageRecord) -> CortexResult<()> {
        let mut history = self.lock()?;
        while history.len() >= self.capacity {
            history.pop_front();
        }
        history.push_back(record);
        Ok(())
    }

    pub fn history_len(&self) -> usize {
        self.lock().map(|h| h.len()).unwrap_or(0)
    }

    pub async fn predict<S: IMemoryStorage>(
        &self,
        signals: &TemporalSignals,
        storage: &S,
        limit: usize,
    ) -> CortexResult<Vec<PredictedMemory>> {
        let ranked = self.tally(signals)?;
        let mut candidates = CandidateSet::default();

        for (memory_id, hits) in ranked.into_iter().take(limit) {
            let Some(memory) = storage.read(&memory_id).await? else {
                continue;
            };
            let memory_confidence = memory.confidence.value();
            let (first_signal, reason) = if hits.time_of_day > 0 {
                (
                    format!("time_of_day:{}", signals.time_of_day.as_str()),
                    "often used at this time of day",
                )
            } else {
                (
                    format!("day_of_week:{}", signals.day_of_week),
                    "often used on this weekday",
                )
            };
            let mut prediction = PredictedMemory::new(
                &memory,
                PredictionStrategy::Temporal,
                reason,
                HISTORY_BASE,
                first_signal,
            );
            if hits.time_of_day > 0 {
                let bonus = (TIME_OF_DAY_STEP * hits.time_of_day as f64).min(TIME_OF_DAY_CAP);
                prediction = prediction.with_component("time_of_day", bonus, memory_confidence);
            }
            if hits.day_of_week > 0 {
                let bonus = (DAY_OF_WEEK_STEP * hits.day_of_week as f64).min(DAY_OF_WEEK_CAP);
                prediction = prediction.with_component("day_of_week", bonus, memory_confidence);
                prediction
                    .source
                    .contributing_signals
                    .insert(format!("day_of_week:{}", signals.day_of_week));
            }
            candidates.offer(prediction);
        }

        if signals.is_new_session {
            let options = QueryOptions {
                limit: Some(limit),
                min_confidence: None,
            };
            for memory in storage.find_by_type(MemoryType::Core, &options).await? {
                candidates.offer(PredictedMemory::new(
                    &memory,
                    PredictionStrategy::Temporal,
                    "core context for a new session",
                    NEW_SESSION_BASE,
                    "new_session",
                ));
            }
        }

        Ok(candidates.into_vec())
    }

    /// Memory ids with any matching usage, most hits first.
    fn tally(&self, signals: &TemporalSignals) -> CortexResult<Vec<(String, Hits)>> {
        let history = self.lock()?;
        let mut hits: HashMap<&str, Hits> = HashMap::new();
        for record in history.iter() {
            let same_bucket = record.time_of_day == signals.time_of_day;
            let same_day = record.day_of_week == signals.day_of_week;
            if !same_bucket && !same_day {
                continue;
            }
            let entry = hits.entry(record.memory_id.as_str()).or_default();
            entry.time_of_day += usize::from(same_bucket);
            entry.day_of_week += usize::from(same_day);
        }
        let mut ranked: Vec<(String, Hits)> = hits
            .into_iter()
            .map(|(id, h)| (id.to_string(), h))
            .collect();
        ranked.sort_by(|a, b| b.1.total().cmp(&a.1.total()).then_with(|| a.0.cmp(&b.0)));
        Ok(ranked)
    }

    fn lock(&self) -> CortexResult<std::sync::MutexGuard<'_, VecDeque<UsageRecord>>> {
        self.history
            .lock()
            .map_err(|e| CortexError::ConcurrencyError(e.to_string()))
    }
}
