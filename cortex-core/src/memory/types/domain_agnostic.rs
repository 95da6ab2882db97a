use serde::{Deserialize, Serialize};

/// Core project/workspace metadata. Half-life: ∞
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreContent {
    pub project_name: String,
    pub description: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Institutional knowledge. Half-life: 365d
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TribalContent {
    pub topic: String,
    pub knowledge: String,
    pub severity: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub consequences: Vec<String>,
}

/// How-to procedures. Half-life: 180d
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProceduralContent {
    pub title: String,
    pub steps: Vec<ProceduralStep>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProceduralStep {
    pub order: u32,
    pub instruction: String,
    #[serde(default)]
    pub completed: bool,
}

/// Consolidated knowledge from episodic memories. Half-life: 90d
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemanticContent {
    pub knowledge: String,
    #[serde(default)]
    pub source_episodes: Vec<String>,
    pub consolidation_confidence: f64,
}

/// Raw interaction records. Half-life: 7d
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpisodicContent {
    pub interaction: String,
    pub context: String,
    pub outcome: Option<String>,
}
