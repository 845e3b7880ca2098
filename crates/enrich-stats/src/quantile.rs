//! Resampled-histogram quantile estimation.
//!
//! A column of posterior draws is summarised in two stages:
//!
//! 1. **Augment**: every draw `mu` is replaced by
//!    [`augmentation_factor`](EstimatorConfig::augmentation_factor) draws from
//!    `Normal(mu, σ)`, where `σ² =`
//!    [`noise_variance`](EstimatorConfig::noise_variance).
//! 2. **Bin**: the pool is binned into a [`DensityHistogram`] and each
//!    reported value is read off its cumulative mass by first exceedance.
//!
//! Values are cumulative case counts, so every reported value is clamped to
//! be non-negative.
//!
//! # Examples
//!
//! ```
//! use enrich_stats::{
//!     config::EstimatorConfig,
//!     noise::NoiseSeed,
//!     quantile::QuantileEstimator,
//! };
//!
//! let config = EstimatorConfig {
//!     noise_variance: 100.0,
//!     ..EstimatorConfig::default()
//! };
//! let mut estimator = QuantileEstimator::new(config, NoiseSeed::from(42)).unwrap();
//! let record = estimator.estimate(&[100.0, 100.0, 100.0]).unwrap();
//!
//! assert!((record.median - 100.0).abs() < 3.0);
//! assert!(record.lower_95 < record.median && record.median < record.upper_95);
//! ```

use std::fmt;

use crate::{
    config::{ConfigError, EdgeThresholds, EstimatorConfig, QuantileThresholds},
    histogram::{CumulativeMass, DensityHistogram, HistogramError},
    noise::{NoiseAugmenter, NoiseSeed},
};

/// Five-number uncertainty summary of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileRecord {
    /// Point estimate (cumulative mass 0.5).
    pub median: f64,
    /// Lower bound of the 95% band.
    pub lower_95: f64,
    /// Lower bound of the inner band.
    pub lower_50: f64,
    /// Upper bound of the inner band.
    pub upper_50: f64,
    /// Upper bound of the 95% band.
    pub upper_95: f64,
}

impl QuantileRecord {
    /// Values in output order: median, lower 95, lower 50, upper 50, upper 95.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 5] {
        [
            self.median,
            self.lower_95,
            self.lower_50,
            self.upper_50,
            self.upper_95,
        ]
    }

    #[must_use]
    pub const fn from_array(values: [f64; 5]) -> Self {
        let [median, lower_95, lower_50, upper_50, upper_95] = values;
        Self {
            median,
            lower_95,
            lower_50,
            upper_50,
            upper_95,
        }
    }
}

/// Space-separated values in output order.
impl fmt::Display for QuantileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [q0, q1, q2, q3, q4] = self.to_array();
        write!(f, "{q0} {q1} {q2} {q3} {q4}")
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum EstimateError {
    #[display("insufficient data: no samples to summarise")]
    InsufficientData,
    #[display("augmented samples span a non-finite range [{min}, {max}]")]
    NonFiniteRange { min: f64, max: f64 },
}

impl From<HistogramError> for EstimateError {
    fn from(error: HistogramError) -> Self {
        match error {
            HistogramError::Empty | HistogramError::ZeroBins => Self::InsufficientData,
            HistogramError::NonFiniteRange { min, max } => Self::NonFiniteRange { min, max },
        }
    }
}

/// Stateful estimator owning the noise generator and a reusable pool buffer.
///
/// Successive calls to [`estimate`](Self::estimate) continue the same random
/// stream, so summarising columns in a fixed order from a fixed seed is
/// deterministic.
#[derive(Debug, Clone)]
pub struct QuantileEstimator {
    config: EstimatorConfig,
    augmenter: NoiseAugmenter,
    pool: Vec<f64>,
}

impl QuantileEstimator {
    /// Validates `config` and seeds the noise generator.
    pub fn new(config: EstimatorConfig, seed: NoiseSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            augmenter: NoiseAugmenter::new(seed, config.noise_std_dev()),
            pool: vec![],
        })
    }

    #[must_use]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Summarises one column of draws.
    ///
    /// Fails with [`EstimateError::InsufficientData`] when `samples` is empty.
    pub fn estimate(&mut self, samples: &[f64]) -> Result<QuantileRecord, EstimateError> {
        if samples.is_empty() {
            return Err(EstimateError::InsufficientData);
        }
        self.augmenter
            .augment_into(samples, self.config.augmentation_factor, &mut self.pool);
        let histogram = DensityHistogram::new(&self.pool, self.config.num_bins)?;
        Ok(summarize_histogram(&histogram, &self.config.thresholds))
    }
}

/// Reads the five reported values off a histogram.
///
/// Each value is `max((edge[i] + edge[j + 1]) / 2, 0)` with `i` and `j` the
/// first bins whose cumulative mass exceeds the left and right threshold of
/// its pair. A threshold never exceeded (only possible through rounding near
/// 1) selects the last bin.
///
/// # Examples
///
/// ```
/// use enrich_stats::{
///     config::QuantileThresholds, histogram::DensityHistogram, quantile::summarize_histogram,
/// };
///
/// // Edges 0, 2, 4, 6, 8; cumulative mass 0.2, 0.4, 0.6, 1.0.
/// let histogram = DensityHistogram::new(&[0.0, 2.0, 4.0, 6.0, 8.0], 4).unwrap();
/// let record = summarize_histogram(&histogram, &QuantileThresholds::NOMINAL);
/// assert_eq!(record.median, 5.0);
/// assert_eq!(record.lower_95, 1.0);
/// assert_eq!(record.upper_95, 7.0);
/// ```
#[must_use]
pub fn summarize_histogram(
    histogram: &DensityHistogram,
    thresholds: &QuantileThresholds,
) -> QuantileRecord {
    let mass = histogram.cumulative_mass();
    let value = |pair: EdgeThresholds| edge_midpoint(histogram, &mass, pair);
    QuantileRecord {
        median: value(thresholds.median),
        lower_95: value(thresholds.lower_95),
        lower_50: value(thresholds.lower_50),
        upper_50: value(thresholds.upper_50),
        upper_95: value(thresholds.upper_95),
    }
}

fn edge_midpoint(histogram: &DensityHistogram, mass: &CumulativeMass, pair: EdgeThresholds) -> f64 {
    let last_bin = histogram.num_bins() - 1;
    let left = mass.first_exceeding(pair.left).unwrap_or(last_bin);
    let right = mass.first_exceeding(pair.right).unwrap_or(last_bin);
    let edges = histogram.edges();
    f64::max((edges[left] + edges[right + 1]) / 2.0, 0.0)
}
