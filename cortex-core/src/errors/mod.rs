mod cortex_error;
mod embedding_error;
mod retrieval_error;
mod storage_error;

pub use cortex_error::{CortexError, CortexResult};
pub use embedding_error::EmbeddingError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;
