use serde::{Deserialize, Serialize};

/// Importance level. Ordered: Low < Normal < High < Critical.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Importance {
    /// Decay anchor: important memories resist decay.
    pub fn weight(self) -> f64 {
        match self {
            Self::Low => 0.8,
            Self::Normal => 1.0,
            Self::High => 1.5,
            Self::Critical => 2.0,
        }
    }

    /// Additive retrieval score bonus.
    pub fn retrieval_bonus(self) -> f64 {
        match self {
            Self::Critical => 0.2,
            Self::High => 0.1,
            Self::Normal | Self::Low => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}
