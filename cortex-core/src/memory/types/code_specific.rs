use serde::{Deserialize, Serialize};

/// Why a code pattern exists. Half-life: 180d
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatternRationaleContent {
    pub pattern_name: String,
    pub rationale: String,
    pub business_context: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// An approved exception to a constraint. Half-life: 90d
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstraintOverrideContent {
    pub constraint_name: String,
    pub override_reason: String,
    pub approved_by: Option<String>,
    pub scope: String,
}

/// Context around an architectural decision. Half-life: 180d
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionContextContent {
    pub decision: String,
    pub context: String,
    pub adr_link: Option<String>,
    #[serde(default)]
    pub trade_offs: Vec<String>,
}

/// A recurring mistake and its fix. Half-life: 90d
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodeSmellContent {
    pub smell_name: String,
    pub description: String,
    pub bad_example: String,
    pub good_example: String,
    pub severity: String,
}
