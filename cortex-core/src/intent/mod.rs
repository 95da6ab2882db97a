mod type_map;

pub use type_map::relevant_types;

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the caller is trying to do. Drives which memory types are favoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    // Code-specific
    AddFeature,
    FixBug,
    Refactor,
    SecurityAudit,
    UnderstandCode,
    AddTest,
    ReviewCode,
    DeployMigrate,
    // Domain-agnostic
    Investigate,
    Recall,
    Learn,
    Decide,
}

impl Intent {
    pub const ALL: [Intent; 12] = [
        Self::AddFeature,
        Self::FixBug,
        Self::Refactor,
        Self::SecurityAudit,
        Self::UnderstandCode,
        Self::AddTest,
        Self::ReviewCode,
        Self::DeployMigrate,
        Self::Investigate,
        Self::Recall,
        Self::Learn,
        Self::Decide,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddFeature => "add_feature",
            Self::FixBug => "fix_bug",
            Self::Refactor => "refactor",
            Self::SecurityAudit => "security_audit",
            Self::UnderstandCode => "understand_code",
            Self::AddTest => "add_test",
            Self::ReviewCode => "review_code",
            Self::DeployMigrate => "deploy_migrate",
            Self::Investigate => "investigate",
            Self::Recall => "recall",
            Self::Learn => "learn",
            Self::Decide => "decide",
        }
    }

    /// Memory types this intent is most likely to need.
    pub fn relevant_types(self) -> &'static [crate::memory::MemoryType] {
        relevant_types(self)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
