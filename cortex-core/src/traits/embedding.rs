use crate::errors::CortexResult;

/// Embedding generation provider.
#[allow(async_fn_in_trait)]
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    async fn embed(&self, text: &str) -> CortexResult<Vec<f32>>;

    /// Embed a batch of texts. The result has one vector per input, in order.
    async fn embed_batch(&self, texts: &[String]) -> CortexResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}
