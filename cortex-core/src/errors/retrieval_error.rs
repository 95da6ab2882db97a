/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("invalid retrieval request: {reason}")]
    InvalidRequest { reason: String },

    #[error("all {attempted} candidate sources failed; first failure: {first_error}")]
    AllSourcesFailed { attempted: usize, first_error: String },
}
