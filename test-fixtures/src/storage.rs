use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use chrono::Utc;
use cortex_core::errors::{CortexError, CortexResult, StorageError};
use cortex_core::memory::{BaseMemory, MemoryType};
use cortex_core::traits::{IMemoryStorage, MemoryFilter, QueryOptions};

/// Storage operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOp {
    Read,
    Search,
    FindByFile,
    FindByPattern,
    FindByType,
    RecordAccess,
}

/// HashMap-backed storage with per-operation failure injection and call counting.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    memories: RwLock<HashMap<String, BaseMemory>>,
    failing: Mutex<HashSet<StorageOp>>,
    calls: AtomicUsize,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_memories(memories: impl IntoIterator<Item = BaseMemory>) -> Self {
        let storage = Self::new();
        for memory in memories {
            storage.insert(memory);
        }
        storage
    }

    pub fn insert(&self, memory: BaseMemory) {
        if let Ok(mut map) = self.memories.write() {
            map.insert(memory.id.clone(), memory);
        }
    }

    /// Snapshot of a stored memory, bypassing failure injection.
    pub fn get(&self, id: &str) -> Option<BaseMemory> {
        self.memories.read().ok()?.get(id).cloned()
    }

    /// Make every subsequent call of `op` fail.
    pub fn fail_on(&self, op: StorageOp) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(op);
        }
    }

    pub fn heal(&self) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.clear();
        }
    }

    /// Total number of trait calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn enter(&self, op: StorageOp) -> CortexResult<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let failing = self
            .failing
            .lock()
            .map_err(|e| CortexError::ConcurrencyError(e.to_string()))?;
        if failing.contains(&op) {
            return Err(StorageError::QueryFailed {
                operation: format!("{op:?}"),
                reason: "injected failure".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn select<F>(&self, limit: Option<usize>, keep: F) -> CortexResult<Vec<BaseMemory>>
    where
        F: Fn(&BaseMemory) -> bool,
    {
        let map = self
            .memories
            .read()
            .map_err(|e| CortexError::ConcurrencyError(e.to_string()))?;
        let mut out: Vec<BaseMemory> = map.values().filter(|m| keep(m)).cloned().collect();
        out.sort_by(|a, b| {
            b.confidence
                .value()
                .total_cmp(&a.confidence.value())
                .then_with(|| a.id.cmp(&b.id))
        });
        if let Some(limit) = limit {
            out.truncate(limit);
        }
        Ok(out)
    }
}

fn matches_query(memory: &BaseMemory, query: &str) -> bool {
    let haystack = format!(
        "{} {} {}",
        memory.summary,
        memory.tags.join(" "),
        memory.content.text()
    )
    .to_lowercase();
    query
        .split_whitespace()
        .any(|word| haystack.contains(&word.to_lowercase()))
}

impl IMemoryStorage for InMemoryStorage {
    async fn read(&self, id: &str) -> CortexResult<Option<BaseMemory>> {
        self.enter(StorageOp::Read)?;
        let map = self
            .memories
            .read()
            .map_err(|e| CortexError::ConcurrencyError(e.to_string()))?;
        Ok(map.get(id).cloned())
    }

    async fn search(&self, filter: &MemoryFilter) -> CortexResult<Vec<BaseMemory>> {
        self.enter(StorageOp::Search)?;
        self.select(filter.limit, |m| {
            filter.query.as_deref().map_or(true, |q| matches_query(m, q))
                && (filter.types.is_empty() || filter.types.contains(&m.memory_type()))
                && (filter.tags.is_empty() || m.tags.iter().any(|t| filter.tags.contains(t)))
                && filter.linked_file_prefix.as_deref().map_or(true, |prefix| {
                    m.linked_files.iter().any(|f| f.starts_with(prefix))
                })
                && filter
                    .min_confidence
                    .map_or(true, |min| m.confidence.value() >= min)
        })
    }

    async fn find_by_file(&self, path: &str) -> CortexResult<Vec<BaseMemory>> {
        self.enter(StorageOp::FindByFile)?;
        self.select(None, |m| m.is_linked_to_file(path))
    }

    async fn find_by_pattern(&self, pattern_id: &str) -> CortexResult<Vec<BaseMemory>> {
        self.enter(StorageOp::FindByPattern)?;
        self.select(None, |m| m.linked_patterns.iter().any(|p| p == pattern_id))
    }

    async fn find_by_type(
        &self,
        memory_type: MemoryType,
        options: &QueryOptions,
    ) -> CortexResult<Vec<BaseMemory>> {
        self.enter(StorageOp::FindByType)?;
        self.select(options.limit, |m| {
            m.memory_type() == memory_type
                && options
                    .min_confidence
                    .map_or(true, |min| m.confidence.value() >= min)
        })
    }

    async fn record_access(&self, id: &str) -> CortexResult<()> {
        self.enter(StorageOp::RecordAccess)?;
        let mut map = self
            .memories
            .write()
            .map_err(|e| CortexError::ConcurrencyError(e.to_string()))?;
        match map.get_mut(id) {
            Some(memory) => {
                memory.record_access(Utc::now());
                Ok(())
            }
            None => Err(CortexError::MemoryNotFound { id: id.to_string() }),
        }
    }
}
