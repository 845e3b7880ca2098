//! Pipeline configuration.
//!
//! [`PipelineConfig`] gathers the constants of a QoI statistics run: burn-in,
//! layout and the estimator settings. It is read from JSON, where any missing
//! field takes its default:
//!
//! ```
//! use enrich_analysis::config::PipelineConfig;
//!
//! let config: PipelineConfig =
//!     serde_json::from_str(r#"{"burn_in": 0, "estimator": {"noise_variance": 100.0}}"#).unwrap();
//! assert_eq!(config.burn_in, 0);
//! assert_eq!(config.n_weeks, 52);
//! assert_eq!(config.estimator.noise_variance, 100.0);
//! assert_eq!(config.estimator.num_bins, 200);
//! ```

use enrich_stats::config::{ConfigError, EstimatorConfig};
use serde::{Deserialize, Serialize};

use crate::layout::QoiLayout;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Leading rows of the sample file discarded before processing.
    pub burn_in: usize,
    pub n_weeks: usize,
    pub n_species: usize,
    pub estimator: EstimatorConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            burn_in: 100,
            n_weeks: 52,
            n_species: 7,
            estimator: EstimatorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum PipelineConfigError {
    #[display("number of weeks must be at least 1")]
    ZeroWeeks,
    #[display("invalid estimator configuration: {source}")]
    Estimator { source: ConfigError },
}

impl PipelineConfig {
    #[must_use]
    pub const fn layout(&self) -> QoiLayout {
        QoiLayout::new(self.n_weeks, self.n_species)
    }

    pub fn validate(&self) -> Result<(), PipelineConfigError> {
        if self.n_weeks == 0 {
            return Err(PipelineConfigError::ZeroWeeks);
        }
        self.estimator
            .validate()
            .map_err(|source| PipelineConfigError::Estimator { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.burn_in, 100);
        assert_eq!(config.layout(), QoiLayout::new(52, 7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let config = PipelineConfig {
            n_weeks: 0,
            ..PipelineConfig::default()
        };
        assert_eq!(config.validate(), Err(PipelineConfigError::ZeroWeeks));

        let mut config = PipelineConfig::default();
        config.estimator.augmentation_factor = 0;
        assert_eq!(
            config.validate(),
            Err(PipelineConfigError::Estimator {
                source: ConfigError::ZeroAugmentationFactor
            })
        );
    }

    #[test]
    fn test_json_roundtrip_preserves_thresholds() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
