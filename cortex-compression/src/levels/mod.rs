pub mod level0;
pub mod level1;
pub mod level2;
pub mod level3;

use cortex_core::constants::ELLIPSIS;
use cortex_core::errors::CortexError;
use cortex_core::memory::BaseMemory;
use cortex_core::models::{CompressedOutput, LevelRange};

/// Compression level. Higher is more detailed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CompressionLevel {
    /// ~5 tokens.
    L0 = 0,
    /// ~50 tokens.
    L1 = 1,
    /// ~200 tokens.
    L2 = 2,
    /// Unbounded.
    L3 = 3,
}

impl CompressionLevel {
    pub const ALL_DESC: [CompressionLevel; 4] = [Self::L3, Self::L2, Self::L1, Self::L0];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Token ceiling of a rendering at this level; `None` for full context.
    /// Targets are roughly half of it: ~5, ~50 and ~200 tokens.
    pub fn max_tokens(self) -> Option<usize> {
        match self {
            Self::L0 => Some(10),
            Self::L1 => Some(75),
            Self::L2 => Some(300),
            Self::L3 => None,
        }
    }

    /// Levels inside `range`, highest first.
    pub fn descending_within(range: LevelRange) -> impl Iterator<Item = CompressionLevel> {
        Self::ALL_DESC
            .into_iter()
            .filter(move |l| (range.min..=range.max).contains(&l.as_u8()))
    }
}

impl TryFrom<u8> for CompressionLevel {
    type Error = CortexError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::L0),
            1 => Ok(Self::L1),
            2 => Ok(Self::L2),
            3 => Ok(Self::L3),
            _ => Err(CortexError::InvalidCompressionLevel { level }),
        }
    }
}

/// Render `memory` at `level`.
pub fn render(memory: &BaseMemory, level: CompressionLevel) -> CompressedOutput {
    match level {
        CompressionLevel::L0 => CompressedOutput::Level0(level0::compress(memory)),
        CompressionLevel::L1 => CompressedOutput::Level1(level1::compress(memory)),
        CompressionLevel::L2 => CompressedOutput::Level2(level2::compress(memory)),
        CompressionLevel::L3 => CompressedOutput::Level3(level3::compress(memory)),
    }
}

/// Cut `text` to at most `max_chars` characters, ending in `...` when cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let prefix: String = text.chars().take(keep).collect();
    format!("{}{ELLIPSIS}", prefix.trim_end())
}
