//! Prediction cache: TTL per entry, oldest-insertion eviction, hit/miss stats.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use cortex_core::config::PredictionConfig;
use cortex_core::errors::{CortexError, CortexResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::predicted::PredictedMemory;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    Fingerprint(String),
    File(String),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    predictions: Vec<PredictedMemory>,
    signals_fingerprint: String,
    /// Active file the predictions were produced for.
    active_file: Option<String>,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    /// Insertion order, oldest first.
    order: VecDeque<CacheKey>,
    evictions: u64,
    latency_total_ms: f64,
    latency_samples: u64,
}

impl CacheState {
    fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.order.retain(|k| k != key);
        }
        removed
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub entries: usize,
    pub evictions: u64,
    pub avg_prediction_latency_ms: f64,
}

/// Cache of prediction lists, keyed by signals fingerprint or by file.
///
/// Owned by one prediction engine. Entries sit behind a single mutex;
/// hit and miss counters are atomics so they can be read without it.
#[derive(Debug)]
pub struct PredictionCache {
    state: Mutex<CacheState>,
    hits: AtomicU64,
    misses: AtomicU64,
    max_entries: usize,
    default_ttl: Duration,
}

impl PredictionCache {
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            max_entries: max_entries.max(1),
            default_ttl,
        }
    }

    pub fn from_config(config: &PredictionConfig) -> Self {
        Self::new(
            config.cache_max_entries,
            Duration::from_millis(config.cache_ttl_ms),
        )
    }

    /// Predictions cached under `fingerprint`, or `None` on miss or expiry.
    pub fn get(&self, fingerprint: &str) -> CortexResult<Option<Vec<PredictedMemory>>> {
        self.lookup(CacheKey::Fingerprint(fingerprint.to_string()))
    }

    pub fn set(
        &self,
        fingerprint: &str,
        predictions: Vec<PredictedMemory>,
        active_file: Option<&str>,
    ) -> CortexResult<()> {
        self.set_with_ttl(fingerprint, predictions, active_file, self.default_ttl)
    }

    pub fn set_with_ttl(
        &self,
        fingerprint: &str,
        predictions: Vec<PredictedMemory>,
        active_file: Option<&str>,
        ttl: Duration,
    ) -> CortexResult<()> {
        let entry = CacheEntry {
            predictions,
            signals_fingerprint: fingerprint.to_string(),
            active_file: active_file.map(String::from),
            inserted_at: Instant::now(),
            ttl,
        };
        self.store(CacheKey::Fingerprint(fingerprint.to_string()), entry)
    }

    /// Latest predictions made for `path` as the active file.
    pub fn get_for_file(&self, path: &str) -> CortexResult<Option<Vec<PredictedMemory>>> {
        self.lookup(CacheKey::File(path.to_string()))
    }

    pub fn set_for_file(
        &self,
        path: &str,
        fingerprint: &str,
        predictions: Vec<PredictedMemory>,
    ) -> CortexResult<()> {
        let entry = CacheEntry {
            predictions,
            signals_fingerprint: fingerprint.to_string(),
            active_file: Some(path.to_string()),
            inserted_at: Instant::now(),
            ttl: self.default_ttl,
        };
        self.store(CacheKey::File(path.to_string()), entry)
    }

    /// Drop the entry for `fingerprint`. Returns whether one existed.
    pub fn invalidate(&self, fingerprint: &str) -> CortexResult<bool> {
        let mut state = self.lock()?;
        Ok(state
            .remove(&CacheKey::Fingerprint(fingerprint.to_string()))
            .is_some())
    }

    /// Drop the file entry for `path` and every entry produced for it as the
    /// active file. Returns how many entries were removed.
    pub fn invalidate_file(&self, path: &str) -> CortexResult<usize> {
        let mut state = self.lock()?;
        let stale: Vec<CacheKey> = state
            .entries
            .iter()
            .filter(|(key, entry)| {
                matches!(key, CacheKey::File(p) if p == path)
                    || entry.active_file.as_deref() == Some(path)
            })
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            state.remove(key);
        }
        debug!(path, removed = stale.len(), "prediction cache invalidated for file");
        Ok(stale.len())
    }

    /// Remove every entry. Counters are kept.
    pub fn clear(&self) -> CortexResult<()> {
        let mut state = self.lock()?;
        state.entries.clear();
        state.order.clear();
        Ok(())
    }

    /// Fold one prediction run's latency into the running average.
    pub fn record_latency(&self, elapsed_ms: f64) -> CortexResult<()> {
        let mut state = self.lock()?;
        state.latency_total_ms += elapsed_ms;
        state.latency_samples += 1;
        Ok(())
    }

    pub fn stats(&self) -> CortexResult<CacheStats> {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;
        let state = self.lock()?;
        Ok(CacheStats {
            hits,
            misses,
            hit_rate: if lookups == 0 {
                0.0
            } else {
                hits as f64 / lookups as f64
            },
            entries: state.entries.len(),
            evictions: state.evictions,
            avg_prediction_latency_ms: if state.latency_samples == 0 {
                0.0
            } else {
                state.latency_total_ms / state.latency_samples as f64
            },
        })
    }

    pub fn len(&self) -> usize {
        self.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: CacheKey) -> CortexResult<Option<Vec<PredictedMemory>>> {
        let found = {
            let mut state = self.lock()?;
            let expired = state.entries.get(&key).map(CacheEntry::is_expired);
            match expired {
                Some(true) => {
                    state.remove(&key);
                    None
                }
                Some(false) => state.entries.get(&key).map(|e| e.predictions.clone()),
                None => None,
            }
        };
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(found)
    }

    fn store(&self, key: CacheKey, entry: CacheEntry) -> CortexResult<()> {
        let mut state = self.lock()?;
        state.remove(&key);
        state.entries.insert(key.clone(), entry);
        state.order.push_back(key);
        while state.entries.len() > self.max_entries {
            let Some(oldest) = state.order.pop_front() else {
                break;
            };
            if let Some(evicted) = state.entries.remove(&oldest) {
                state.evictions += 1;
                debug!(
                    fingerprint = %evicted.signals_fingerprint,
                    "prediction cache evicted oldest entry"
                );
            }
        }
        Ok(())
    }

    fn lock(&self) -> CortexResult<MutexGuard<'_, CacheState>> {
        self.state
            .lock()
            .map_err(|e| CortexError::ConcurrencyError(e.to_string()))
    }
}
