/// Failures reported by an embedding provider.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("batch size mismatch: sent {expected} texts, received {actual} vectors")]
    BatchSizeMismatch { expected: usize, actual: usize },
}
