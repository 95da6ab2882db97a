/// Failures reported by a storage collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("query `{operation}` failed: {reason}")]
    QueryFailed { operation: String, reason: String },
}
