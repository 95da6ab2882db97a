use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confidence::Confidence;
use super::importance::Importance;
use super::types::{
    CodeSmellContent, ConstraintOverrideContent, CoreContent, DecisionContextContent,
    EpisodicContent, MemoryType, PatternRationaleContent, ProceduralContent, SemanticContent,
    TribalContent,
};

/// Typed content wrapper. Each memory type has its own content struct.
/// Serialized as a tagged enum so the type is preserved in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum TypedContent {
    // Domain-agnostic
    Core(CoreContent),
    Tribal(TribalContent),
    Procedural(ProceduralContent),
    Semantic(SemanticContent),
    Episodic(EpisodicContent),
    // Code-specific
    PatternRationale(PatternRationaleContent),
    ConstraintOverride(ConstraintOverrideContent),
    DecisionContext(DecisionContextContent),
    CodeSmell(CodeSmellContent),
}

impl TypedContent {
    /// The memory type carried by this payload.
    pub fn memory_type(&self) -> MemoryType {
        match self {
            Self::Core(_) => MemoryType::Core,
            Self::Tribal(_) => MemoryType::Tribal,
            Self::Procedural(_) => MemoryType::Procedural,
            Self::Semantic(_) => MemoryType::Semantic,
            Self::Episodic(_) => MemoryType::Episodic,
            Self::PatternRationale(_) => MemoryType::PatternRationale,
            Self::ConstraintOverride(_) => MemoryType::ConstraintOverride,
            Self::DecisionContext(_) => MemoryType::DecisionContext,
            Self::CodeSmell(_) => MemoryType::CodeSmell,
        }
    }

    /// Plain-text body of the payload, used for embedding.
    pub fn text(&self) -> String {
        match self {
            Self::Core(c) => format!("{}\n{}", c.project_name, c.description),
            Self::Tribal(c) => {
                let mut parts = vec![c.topic.clone(), c.knowledge.clone()];
                parts.extend(c.warnings.iter().cloned());
                parts.join("\n")
            }
            Self::Procedural(c) => {
                let mut parts = vec![c.title.clone()];
                parts.extend(c.steps.iter().map(|s| s.instruction.clone()));
                parts.join("\n")
            }
            Self::Semantic(c) => c.knowledge.clone(),
            Self::Episodic(c) => format!("{}\n{}", c.interaction, c.context),
            Self::PatternRationale(c) => {
                format!("{}\n{}\n{}", c.pattern_name, c.rationale, c.business_context)
            }
            Self::ConstraintOverride(c) => {
                format!("{}\n{}\n{}", c.constraint_name, c.override_reason, c.scope)
            }
            Self::DecisionContext(c) => format!("{}\n{}", c.decision, c.context),
            Self::CodeSmell(c) => format!("{}\n{}", c.smell_name, c.description),
        }
    }
}

/// A reference from a memory to a span of source code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Citation {
    pub file_path: String,
    pub line_start: u32,
    pub line_end: u32,
    /// Whether the cited code still matches what the memory describes.
    pub valid: bool,
}

/// The universal memory struct. Every memory in the system is a BaseMemory.
///
/// The memory type is not stored separately: it is derived from `content`,
/// so a memory can never disagree with its own payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseMemory {
    /// UUID v4 identifier.
    pub id: String,
    /// Typed content, one struct per memory type.
    pub content: TypedContent,
    /// Short summary used for Level 1 compression.
    pub summary: String,
    /// Confidence score, decays over time.
    pub confidence: Confidence,
    /// Importance level.
    pub importance: Importance,
    pub created_at: DateTime<Utc>,
    /// Last time this memory was accessed.
    pub last_accessed: DateTime<Utc>,
    /// Number of times accessed. Only ever increases.
    pub access_count: u64,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Files this memory is about.
    #[serde(default)]
    pub linked_files: Vec<String>,
    /// Code patterns this memory explains.
    #[serde(default)]
    pub linked_patterns: Vec<String>,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

impl BaseMemory {
    /// Create a fresh memory with a new id, full confidence and normal importance.
    pub fn new(content: TypedContent, summary: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            summary: summary.into(),
            confidence: Confidence::default(),
            importance: Importance::default(),
            created_at: now,
            last_accessed: now,
            access_count: 0,
            tags: Vec::new(),
            linked_files: Vec::new(),
            linked_patterns: Vec::new(),
            citations: Vec::new(),
        }
    }

    /// The type of this memory.
    pub fn memory_type(&self) -> MemoryType {
        self.content.memory_type()
    }

    /// Record one access at `at`. `last_accessed` never moves backwards.
    pub fn record_access(&mut self, at: DateTime<Utc>) {
        self.access_count = self.access_count.saturating_add(1);
        if at > self.last_accessed {
            self.last_accessed = at;
        }
    }

    pub fn is_linked_to_file(&self, path: &str) -> bool {
        self.linked_files.iter().any(|f| f == path)
    }

    /// Number of `patterns` this memory links to.
    pub fn pattern_overlap(&self, patterns: &[String]) -> usize {
        self.linked_patterns
            .iter()
            .filter(|p| patterns.contains(p))
            .count()
    }

    /// Text sent to an embedding provider: summary followed by the payload body.
    pub fn embedding_text(&self) -> String {
        format!("{}\n{}", self.summary, self.content.text())
    }
}

/// Identity equality: two memories are equal if they have the same ID.
impl PartialEq for BaseMemory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
