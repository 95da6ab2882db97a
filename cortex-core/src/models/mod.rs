mod compressed_memory;
mod scored_memory;
mod session_context;

pub use compressed_memory::{
    CompressedMemory, CompressedOutput, ContextExcerpt, Level0Output, Level1Output, Level2Output,
    Level3Output, LevelRange,
};
pub use scored_memory::ScoredMemory;
pub use session_context::SessionContext;
