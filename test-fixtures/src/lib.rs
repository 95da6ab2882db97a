//! Test support for Cortex crates: memory builders, in-memory collaborators
//! with failure injection, and JSON fixture loading.

mod builders;
mod embedding;
mod storage;

pub use builders::{sample_content, MemoryBuilder};
pub use embedding::MockEmbeddingProvider;
pub use storage::{InMemoryStorage, StorageOp};

use serde::de::DeserializeOwned;
use std::path::PathBuf;

use cortex_core::memory::BaseMemory;

/// Root directory of the fixture files shipped with this crate.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// The sample memory set used by integration tests.
pub fn sample_memories() -> Vec<BaseMemory> {
    load_fixture("memories/sample_memories.json")
}
