//! Estimator configuration.
//!
//! Every tunable of the quantile estimator lives in [`EstimatorConfig`]. The
//! defaults reproduce the constants of the enriched-model post-processing runs:
//! noise variance `2.5e7`, 100 noisy draws per sample, 200 histogram bins and
//! the legacy threshold pairs.
//!
//! # Threshold pairs
//!
//! Each reported value is the midpoint of two bin edges. The left edge comes
//! from the first bin whose cumulative mass exceeds [`EdgeThresholds::left`],
//! the right edge from the bin after the first one exceeding
//! [`EdgeThresholds::right`]. For the median and the 95% band both thresholds
//! are equal. The legacy inner band pairs `0.175` with `0.25` and `0.825` with
//! `0.75`; historical result files were produced this way, so it stays the
//! default. [`ThresholdPairing::Nominal`] uses each nominal threshold for both
//! edges instead.

use serde::{Deserialize, Serialize};

/// Cumulative-mass thresholds locating the two edges of one reported value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeThresholds {
    /// Threshold selecting the bin whose left edge is used.
    pub left: f64,
    /// Threshold selecting the bin whose right edge is used.
    pub right: f64,
}

impl EdgeThresholds {
    #[must_use]
    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Both edges located from the same threshold.
    #[must_use]
    pub const fn symmetric(threshold: f64) -> Self {
        Self::new(threshold, threshold)
    }

    /// Returns `true` when both edges come from the same threshold.
    #[expect(clippy::float_cmp)]
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.left == self.right
    }
}

/// Threshold pairs for the five values of a [`QuantileRecord`](crate::quantile::QuantileRecord).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantileThresholds {
    pub median: EdgeThresholds,
    pub lower_95: EdgeThresholds,
    pub lower_50: EdgeThresholds,
    pub upper_50: EdgeThresholds,
    pub upper_95: EdgeThresholds,
}

impl Default for QuantileThresholds {
    fn default() -> Self {
        Self::LEGACY
    }
}

impl QuantileThresholds {
    /// Pairs used by the historical `qoi-stats` files.
    ///
    /// The inner band mixes `0.175`/`0.25` and `0.825`/`0.75`.
    pub const LEGACY: Self = Self {
        median: EdgeThresholds::symmetric(0.5),
        lower_95: EdgeThresholds::symmetric(0.025),
        lower_50: EdgeThresholds::new(0.175, 0.25),
        upper_50: EdgeThresholds::new(0.825, 0.75),
        upper_95: EdgeThresholds::symmetric(0.975),
    };

    /// Every value located from its own nominal threshold.
    pub const NOMINAL: Self = Self {
        median: EdgeThresholds::symmetric(0.5),
        lower_95: EdgeThresholds::symmetric(0.025),
        lower_50: EdgeThresholds::symmetric(0.175),
        upper_50: EdgeThresholds::symmetric(0.825),
        upper_95: EdgeThresholds::symmetric(0.975),
    };

    /// Named threshold pairs in output order.
    #[must_use]
    pub fn named(&self) -> [(&'static str, EdgeThresholds); 5] {
        [
            ("median", self.median),
            ("lower_95", self.lower_95),
            ("lower_50", self.lower_50),
            ("upper_50", self.upper_50),
            ("upper_95", self.upper_95),
        ]
    }

    /// Pairs whose left and right thresholds differ.
    pub fn asymmetric(&self) -> impl Iterator<Item = (&'static str, EdgeThresholds)> {
        self.named().into_iter().filter(|(_, t)| !t.is_symmetric())
    }
}

/// Preset selecting how the inner band thresholds are paired.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPairing {
    /// Reproduce historical outputs (`0.175`/`0.25`, `0.825`/`0.75`).
    #[default]
    Legacy,
    /// Use `0.175` and `0.825` for both edges.
    Nominal,
}

impl ThresholdPairing {
    #[must_use]
    pub const fn thresholds(self) -> QuantileThresholds {
        match self {
            Self::Legacy => QuantileThresholds::LEGACY,
            Self::Nominal => QuantileThresholds::NOMINAL,
        }
    }
}

/// Configuration of the resampled-histogram quantile estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Variance of the Gaussian observation noise added to each draw.
    pub noise_variance: f64,
    /// Number of noisy draws generated per raw sample.
    pub augmentation_factor: usize,
    /// Number of equal-width histogram bins.
    pub num_bins: usize,
    pub thresholds: QuantileThresholds,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            noise_variance: Self::DEFAULT_NOISE_VARIANCE,
            augmentation_factor: Self::DEFAULT_AUGMENTATION_FACTOR,
            num_bins: Self::DEFAULT_NUM_BINS,
            thresholds: QuantileThresholds::LEGACY,
        }
    }
}

impl EstimatorConfig {
    pub const DEFAULT_NOISE_VARIANCE: f64 = 25_000_000.0;
    pub const DEFAULT_AUGMENTATION_FACTOR: usize = 100;
    pub const DEFAULT_NUM_BINS: usize = 200;

    /// Standard deviation of the observation noise.
    #[must_use]
    pub fn noise_std_dev(&self) -> f64 {
        self.noise_variance.sqrt()
    }

    /// Checks every field, reporting the first invalid one.
    ///
    /// # Examples
    ///
    /// ```
    /// use enrich_stats::config::{ConfigError, EstimatorConfig};
    ///
    /// assert!(EstimatorConfig::default().validate().is_ok());
    ///
    /// let config = EstimatorConfig { num_bins: 0, ..EstimatorConfig::default() };
    /// assert_eq!(config.validate(), Err(ConfigError::ZeroBins));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.noise_variance.is_finite() && self.noise_variance > 0.0) {
            return Err(ConfigError::NonPositiveNoiseVariance {
                variance: self.noise_variance,
            });
        }
        if self.augmentation_factor == 0 {
            return Err(ConfigError::ZeroAugmentationFactor);
        }
        if self.num_bins == 0 {
            return Err(ConfigError::ZeroBins);
        }
        for (name, pair) in self.thresholds.named() {
            for value in [pair.left, pair.right] {
                if !(value > 0.0 && value < 1.0) {
                    return Err(ConfigError::ThresholdOutOfRange { name, value });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("noise variance must be positive and finite, got {variance}")]
    NonPositiveNoiseVariance { variance: f64 },
    #[display("augmentation factor must be at least 1")]
    ZeroAugmentationFactor,
    #[display("histogram bin count must be at least 1")]
    ZeroBins,
    #[display("{name} threshold must lie strictly between 0 and 1, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_constants() {
        let config = EstimatorConfig::default();
        assert_eq!(config.noise_variance, 25_000_000.0);
        assert_eq!(config.noise_std_dev(), 5000.0);
        assert_eq!(config.augmentation_factor, 100);
        assert_eq!(config.num_bins, 200);
        assert_eq!(config.thresholds, QuantileThresholds::LEGACY);
    }

    #[test]
    fn test_legacy_inner_band_is_asymmetric() {
        let names = QuantileThresholds::LEGACY
            .asymmetric()
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["lower_50", "upper_50"]);
        assert_eq!(QuantileThresholds::NOMINAL.asymmetric().count(), 0);
    }

    #[test]
    fn test_pairing_from_str() {
        assert_eq!(
            "legacy".parse::<ThresholdPairing>().unwrap(),
            ThresholdPairing::Legacy
        );
        assert_eq!(
            "Nominal".parse::<ThresholdPairing>().unwrap(),
            ThresholdPairing::Nominal
        );
        assert!("other".parse::<ThresholdPairing>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let base = EstimatorConfig::default();

        let config = EstimatorConfig {
            noise_variance: 0.0,
            ..base
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveNoiseVariance { .. })
        ));

        let config = EstimatorConfig {
            noise_variance: f64::NAN,
            ..base
        };
        assert!(config.validate().is_err());

        let config = EstimatorConfig {
            augmentation_factor: 0,
            ..base
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroAugmentationFactor));

        let mut config = base;
        config.thresholds.upper_95 = EdgeThresholds::symmetric(1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange {
                name: "upper_95",
                value: 1.0
            })
        );
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: EstimatorConfig = serde_json::from_str(r#"{"num_bins": 50}"#).unwrap();
        assert_eq!(config.num_bins, 50);
        assert_eq!(config.augmentation_factor, 100);
        assert_eq!(config.thresholds, QuantileThresholds::LEGACY);

        let config: EstimatorConfig = serde_json::from_str(
            r#"{"thresholds": {"lower_50": {"left": 0.25, "right": 0.25}}}"#,
        )
        .unwrap();
        assert_eq!(config.thresholds.lower_50, EdgeThresholds::symmetric(0.25));
        assert_eq!(config.thresholds.upper_50, EdgeThresholds::new(0.825, 0.75));
    }
}
