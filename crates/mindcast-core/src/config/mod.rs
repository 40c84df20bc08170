pub mod correlation_config;
pub mod defaults;
pub mod forecast_config;
pub mod observability_config;

use serde::{Deserialize, Serialize};

pub use correlation_config::CorrelationConfig;
pub use forecast_config::ForecastConfig;
pub use observability_config::ObservabilityConfig;

use crate::errors::{MindcastError, MindcastResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MindcastConfig {
    pub correlation: CorrelationConfig,
    pub forecast: ForecastConfig,
    pub observability: ObservabilityConfig,
}

impl MindcastConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> MindcastResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| MindcastError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engines cannot work with.
    pub fn validate(&self) -> MindcastResult<()> {
        let c = &self.correlation;
        if !(0.0..=1.0).contains(&c.min_correlation_strength) {
            return Err(MindcastError::ConfigError(format!(
                "min_correlation_strength must be within [0, 1], got {}",
                c.min_correlation_strength
            )));
        }
        if c.pattern_thresholds.is_empty() {
            return Err(MindcastError::ConfigError(
                "pattern_thresholds must not be empty".to_string(),
            ));
        }
        if c.pattern_thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MindcastError::ConfigError(format!(
                "pattern_thresholds must be strictly increasing, got {:?}",
                c.pattern_thresholds
            )));
        }
        if c.correlation_window_days < 1 {
            return Err(MindcastError::ConfigError(
                "correlation_window_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
