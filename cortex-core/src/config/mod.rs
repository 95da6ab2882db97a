pub mod defaults;

mod decay_config;
mod observability_config;
mod prediction_config;
mod retrieval_config;

pub use decay_config::DecayConfig;
pub use observability_config::ObservabilityConfig;
pub use prediction_config::PredictionConfig;
pub use retrieval_config::RetrievalConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_COMPRESSION_LEVEL;
use crate::errors::{CortexError, CortexResult};
use crate::memory::MemoryType;

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CortexConfig {
    pub decay: DecayConfig,
    pub prediction: PredictionConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl CortexConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(s: &str) -> CortexResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| CortexError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> CortexResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CortexError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }

    pub fn validate(&self) -> CortexResult<()> {
        let unit = |name: &str, v: f64| -> CortexResult<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(CortexError::ConfigError(format!(
                    "{name} must be within [0, 1], got {v}"
                )))
            }
        };

        unit("decay.archival_threshold", self.decay.archival_threshold)?;
        for (name, threshold) in &self.decay.min_confidence_overrides {
            known_type(name)?;
            unit("decay.min_confidence_overrides", *threshold)?;
        }
        for name in self.decay.half_life_overrides.keys() {
            if known_type(name)? == MemoryType::Core {
                return Err(CortexError::ConfigError(
                    "decay.half_life_overrides cannot set a half-life for core memories".into(),
                ));
            }
        }

        let p = &self.prediction;
        unit("prediction.min_confidence", p.min_confidence)?;
        unit("prediction.preload_confidence_floor", p.preload_confidence_floor)?;
        if p.cache_max_entries == 0 {
            return Err(CortexError::ConfigError(
                "prediction.cache_max_entries must be positive".into(),
            ));
        }
        if p.preload_batch_size == 0 {
            return Err(CortexError::ConfigError(
                "prediction.preload_batch_size must be positive".into(),
            ));
        }

        let r = &self.retrieval;
        if r.max_level > MAX_COMPRESSION_LEVEL {
            return Err(CortexError::InvalidCompressionLevel { level: r.max_level });
        }
        if r.min_level > r.max_level {
            return Err(CortexError::InvalidLevelRange {
                min: r.min_level,
                max: r.max_level,
            });
        }
        if !(r.stop_utilization > 0.0 && r.stop_utilization <= 1.0) {
            return Err(CortexError::ConfigError(format!(
                "retrieval.stop_utilization must be within (0, 1], got {}",
                r.stop_utilization
            )));
        }
        Ok(())
    }
}

fn known_type(name: &str) -> CortexResult<MemoryType> {
    MemoryType::from_name(name)
        .ok_or_else(|| CortexError::ConfigError(format!("unknown memory type `{name}`")))
}
