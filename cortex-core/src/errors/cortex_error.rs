use super::{EmbeddingError, RetrievalError, StorageError};

/// Result alias used across every Cortex crate.
pub type CortexResult<T> = Result<T, CortexError>;

/// Top-level error type. Sub-system errors convert into it via `From`.
///
/// "No data" conditions (unknown memory, empty candidate set, cache miss)
/// are not represented here: components return empty results for those.
#[derive(Debug, thiserror::Error)]
pub enum CortexError {
    #[error("memory not found: {id}")]
    MemoryNotFound { id: String },

    #[error("session not found: {id}")]
    SessionNotFound { id: String },

    #[error("invalid compression level {level} (expected 0..=3)")]
    InvalidCompressionLevel { level: u8 },

    #[error("invalid level range: min {min} is greater than max {max}")]
    InvalidLevelRange { min: u8, max: u8 },

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),
}

impl CortexError {
    /// Whether the error came from a collaborator rather than from the caller's input.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::StorageError(_) | Self::EmbeddingError(_))
    }
}
