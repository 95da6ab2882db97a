mod compressor;
mod decay_engine;
mod embedding;
mod session;
mod storage;

pub use compressor::ICompressor;
pub use decay_engine::IDecayEngine;
pub use embedding::IEmbeddingProvider;
pub use session::ISessionTracker;
pub use storage::{IMemoryStorage, MemoryFilter, QueryOptions};
