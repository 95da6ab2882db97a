use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_COMPRESSION_LEVEL;
use crate::errors::{CortexError, CortexResult};
use crate::memory::{Citation, Importance, MemoryType, TypedContent};

/// Level 0: identity only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Level0Output {
    pub id: String,
    pub memory_type: MemoryType,
    pub importance: Importance,
}

/// Level 1: Level 0 plus a one-liner, up to three tags and confidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Level1Output {
    #[serde(flatten)]
    pub identity: Level0Output,
    pub one_liner: String,
    pub tags: Vec<String>,
    pub confidence: f64,
}

/// An illustrative excerpt attached at Level 2.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextExcerpt {
    pub label: String,
    pub text: String,
}

/// Level 2: Level 1 plus examples and the first few linked files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Level2Output {
    #[serde(flatten)]
    pub brief: Level1Output,
    pub examples: Vec<ContextExcerpt>,
    pub files: Vec<String>,
}

/// Level 3: everything the memory holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Level3Output {
    #[serde(flatten)]
    pub detail: Level2Output,
    pub summary: String,
    pub content: TypedContent,
    pub all_tags: Vec<String>,
    pub linked_files: Vec<String>,
    pub linked_patterns: Vec<String>,
    pub citations: Vec<Citation>,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    pub access_count: u64,
}

/// Level-specific payload of a compressed memory.
///
/// Each level embeds the previous one, so a higher level never renders
/// fewer characters than a lower one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CompressedOutput {
    Level0(Level0Output),
    Level1(Level1Output),
    Level2(Level2Output),
    Level3(Level3Output),
}

impl CompressedOutput {
    pub fn level(&self) -> u8 {
        match self {
            Self::Level0(_) => 0,
            Self::Level1(_) => 1,
            Self::Level2(_) => 2,
            Self::Level3(_) => 3,
        }
    }

    /// Compact text of the payload. This is the text token counts are
    /// measured on. Each level's text starts with the level below it.
    pub fn render(&self) -> CortexResult<String> {
        match self {
            Self::Level0(o) => Ok(o.render()),
            Self::Level1(o) => Ok(o.render()),
            Self::Level2(o) => Ok(o.render()),
            Self::Level3(o) => o.render(),
        }
    }
}

/// Characters of the id shown below level 3.
const SHORT_ID_CHARS: usize = 8;

fn type_label(memory_type: MemoryType) -> &'static str {
    match memory_type {
        MemoryType::Core => "core",
        MemoryType::Tribal => "tribal",
        MemoryType::Procedural => "proc",
        MemoryType::Semantic => "sem",
        MemoryType::Episodic => "epi",
        MemoryType::PatternRationale => "pattern",
        MemoryType::ConstraintOverride => "constraint",
        MemoryType::DecisionContext => "decision",
        MemoryType::CodeSmell => "smell",
    }
}

fn importance_label(importance: Importance) -> &'static str {
    match importance {
        Importance::Low => "low",
        Importance::Normal => "norm",
        Importance::High => "high",
        Importance::Critical => "crit",
    }
}

impl Level0Output {
    /// `[type|importance] short-id`
    pub fn render(&self) -> String {
        let short_id: String = self.id.chars().take(SHORT_ID_CHARS).collect();
        format!(
            "[{}|{}] {short_id}",
            type_label(self.memory_type),
            importance_label(self.importance)
        )
    }
}

impl Level1Output {
    /// Level 0 line, then `one-liner | Tags: a, b | conf:0.80`.
    pub fn render(&self) -> String {
        let mut parts = vec![format!("{} {}", self.identity.render(), self.one_liner)];
        if !self.tags.is_empty() {
            parts.push(format!("Tags: {}", self.tags.join(", ")));
        }
        parts.push(format!("conf:{:.2}", self.confidence));
        parts.join(" | ")
    }
}

impl Level2Output {
    /// Level 1 line, then one line per excerpt and the linked files.
    pub fn render(&self) -> String {
        let mut lines = vec![self.brief.render()];
        lines.extend(
            self.examples
                .iter()
                .map(|e| format!("- {}: {}", e.label, e.text)),
        );
        if !self.files.is_empty() {
            lines.push(format!("Files: {}", self.files.join(", ")));
        }
        lines.join("\n")
    }
}

impl Level3Output {
    /// Level 2 text, then the full id, summary, payload and metadata.
    pub fn render(&self) -> CortexResult<String> {
        let mut lines = vec![
            self.detail.render(),
            format!("id: {}", self.detail.brief.identity.id),
            format!("Summary: {}", self.summary),
            format!("Content: {}", serde_json::to_string(&self.content)?),
        ];
        if !self.all_tags.is_empty() {
            lines.push(format!("All tags: {}", self.all_tags.join(", ")));
        }
        if !self.linked_files.is_empty() {
            lines.push(format!("Linked files: {}", self.linked_files.join(", ")));
        }
        if !self.linked_patterns.is_empty() {
            lines.push(format!("Patterns: {}", self.linked_patterns.join(", ")));
        }
        if !self.citations.is_empty() {
            let cited: Vec<String> = self
                .citations
                .iter()
                .map(|c| {
                    let state = if c.valid { "valid" } else { "stale" };
                    format!("{}:{}-{} ({state})", c.file_path, c.line_start, c.line_end)
                })
                .collect();
            lines.push(format!("Citations: {}", cited.join(", ")));
        }
        lines.push(format!(
            "Created: {} | Accessed: {} ({}x)",
            self.created_at.format("%Y-%m-%d"),
            self.last_accessed.format("%Y-%m-%d"),
            self.access_count
        ));
        Ok(lines.join("\n"))
    }
}

/// A memory rendered at one of four levels for token-efficient context injection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedMemory {
    pub memory_id: String,
    pub memory_type: MemoryType,
    pub importance: Importance,
    /// Compression level: 0 (ID only) through 3 (full context).
    pub level: u8,
    pub output: CompressedOutput,
    /// Token count of `output` as rendered.
    pub token_count: usize,
    /// Token count of the full (level 3) rendering.
    pub original_token_count: usize,
    /// `token_count / original_token_count`, 1.0 at level 3.
    pub compression_ratio: f64,
    pub compressed_at: DateTime<Utc>,
}

/// Inclusive range of compression levels a caller accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    pub min: u8,
    pub max: u8,
}

impl LevelRange {
    pub const FULL: LevelRange = LevelRange { min: 0, max: 3 };

    pub fn new(min: u8, max: u8) -> CortexResult<Self> {
        if max > MAX_COMPRESSION_LEVEL {
            return Err(CortexError::InvalidCompressionLevel { level: max });
        }
        if min > max {
            return Err(CortexError::InvalidLevelRange { min, max });
        }
        Ok(Self { min, max })
    }
}

impl Default for LevelRange {
    fn default() -> Self {
        Self::FULL
    }
}
