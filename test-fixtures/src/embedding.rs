use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use cortex_core::errors::{CortexError, CortexResult, EmbeddingError};
use cortex_core::traits::IEmbeddingProvider;

/// Deterministic embedding provider. Vectors are derived from a blake3 hash
/// of the text, so equal texts embed identically.
#[derive(Debug)]
pub struct MockEmbeddingProvider {
    dims: usize,
    failing: AtomicBool,
    /// Any batch containing a text with this marker fails.
    poison: Mutex<Option<String>>,
    batch_sizes: Mutex<Vec<usize>>,
    texts_embedded: AtomicUsize,
}

impl MockEmbeddingProvider {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            failing: AtomicBool::new(false),
            poison: Mutex::new(None),
            batch_sizes: Mutex::new(Vec::new()),
            texts_embedded: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// Fail any batch containing a text that includes `marker`.
    pub fn poison_texts_containing(&self, marker: &str) {
        if let Ok(mut poison) = self.poison.lock() {
            *poison = Some(marker.to_string());
        }
    }

    /// Sizes of every batch received, in order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().map(|b| b.clone()).unwrap_or_default()
    }

    pub fn texts_embedded(&self) -> usize {
        self.texts_embedded.load(Ordering::Relaxed)
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let hash = blake3::hash(text.as_bytes());
        hash.as_bytes()
            .iter()
            .cycle()
            .take(self.dims)
            .map(|b| *b as f32 / 255.0)
            .collect()
    }

    fn check(&self, texts: &[String]) -> CortexResult<()> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                reason: "mock provider set to fail".to_string(),
            }
            .into());
        }
        let poison = self
            .poison
            .lock()
            .map_err(|e| CortexError::ConcurrencyError(e.to_string()))?;
        if let Some(marker) = poison.as_deref() {
            if texts.iter().any(|t| t.contains(marker)) {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("poisoned text `{marker}`"),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new(8)
    }
}

impl IEmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> CortexResult<Vec<f32>> {
        let mut batch = self.embed_batch(&[text.to_string()]).await?;
        batch.pop().ok_or_else(|| {
            EmbeddingError::BatchSizeMismatch {
                expected: 1,
                actual: 0,
            }
            .into()
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> CortexResult<Vec<Vec<f32>>> {
        if let Ok(mut sizes) = self.batch_sizes.lock() {
            sizes.push(texts.len());
        }
        self.check(texts)?;
        self.texts_embedded.fetch_add(texts.len(), Ordering::Relaxed);
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}
