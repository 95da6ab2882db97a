mod code_specific;
mod domain_agnostic;

pub use code_specific::*;
pub use domain_agnostic::*;

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of memory types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    // Domain-agnostic
    Core,
    Tribal,
    Procedural,
    Semantic,
    Episodic,
    // Code-specific
    PatternRationale,
    ConstraintOverride,
    DecisionContext,
    CodeSmell,
}

impl MemoryType {
    /// Every memory type, in declaration order.
    pub const ALL: [MemoryType; 9] = [
        Self::Core,
        Self::Tribal,
        Self::Procedural,
        Self::Semantic,
        Self::Episodic,
        Self::PatternRationale,
        Self::ConstraintOverride,
        Self::DecisionContext,
        Self::CodeSmell,
    ];

    /// Stable snake_case name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Tribal => "tribal",
            Self::Procedural => "procedural",
            Self::Semantic => "semantic",
            Self::Episodic => "episodic",
            Self::PatternRationale => "pattern_rationale",
            Self::ConstraintOverride => "constraint_override",
            Self::DecisionContext => "decision_context",
            Self::CodeSmell => "code_smell",
        }
    }

    /// Parse a snake_case type name. Used for config keys.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Short tag used in compact renderings.
    pub fn short(self) -> &'static str {
        match self {
            Self::Core => "CORE",
            Self::Tribal => "TRIB",
            Self::Procedural => "PROC",
            Self::Semantic => "SEM",
            Self::Episodic => "EPIS",
            Self::PatternRationale => "PAT",
            Self::ConstraintOverride => "CSTR",
            Self::DecisionContext => "DCTX",
            Self::CodeSmell => "SMELL",
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
