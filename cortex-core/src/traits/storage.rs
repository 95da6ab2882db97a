use crate::errors::CortexResult;
use crate::memory::{BaseMemory, MemoryType};

/// Criteria for a storage search. Empty fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryFilter {
    /// Free-text query, matched however the backend sees fit.
    pub query: Option<String>,
    /// Match any of these types.
    pub types: Vec<MemoryType>,
    /// Match memories carrying any of these tags.
    pub tags: Vec<String>,
    /// Match memories linked to a file under this path prefix.
    pub linked_file_prefix: Option<String>,
    pub min_confidence: Option<f64>,
    pub limit: Option<usize>,
}

impl MemoryFilter {
    pub fn query(text: impl Into<String>) -> Self {
        Self {
            query: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn tags(tags: Vec<String>) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Paging and threshold options for typed lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QueryOptions {
    pub limit: Option<usize>,
    pub min_confidence: Option<f64>,
}

/// Read access to the memory store. Implementations must tolerate concurrent calls.
///
/// Persistence is owned by the implementor; this engine only reads and
/// reports accesses.
#[allow(async_fn_in_trait)]
pub trait IMemoryStorage: Send + Sync {
    /// Fetch one memory. `Ok(None)` when the id is unknown.
    async fn read(&self, id: &str) -> CortexResult<Option<BaseMemory>>;

    async fn search(&self, filter: &MemoryFilter) -> CortexResult<Vec<BaseMemory>>;

    /// Memories linked to `path`.
    async fn find_by_file(&self, path: &str) -> CortexResult<Vec<BaseMemory>>;

    /// Memories linked to the pattern `pattern_id`.
    async fn find_by_pattern(&self, pattern_id: &str) -> CortexResult<Vec<BaseMemory>>;

    async fn find_by_type(
        &self,
        memory_type: MemoryType,
        options: &QueryOptions,
    ) -> CortexResult<Vec<BaseMemory>>;

    /// Note that a memory was delivered. Stores without access tracking can ignore it.
    async fn record_access(&self, id: &str) -> CortexResult<()> {
        let _ = id;
        Ok(())
    }
}
