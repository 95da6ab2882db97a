pub mod base;
pub mod confidence;
pub mod half_lives;
pub mod importance;
pub mod types;

pub use base::{BaseMemory, Citation, TypedContent};
pub use confidence::Confidence;
pub use half_lives::half_life_days;
pub use importance::Importance;
pub use types::MemoryType;
