//! Numeric kernel for post-processing enriched-model output.
//!
//! This crate turns columns of posterior draws into uncertainty summaries:
//!
//! - **Configuration**: every tunable of the estimator in one struct
//! - **Noise augmentation**: seeded Gaussian observation noise per draw
//! - **Histograms**: fixed-width density histograms and their cumulative mass
//! - **Quantiles**: five-number summaries read off the cumulative mass
//! - **Descriptive statistics**: mean, median, spread of a dataset
//!
//! # Modules
//!
//! - [`config`]: Estimator configuration and threshold pairs
//! - [`noise`]: Noise seed and augmentation
//! - [`histogram`]: Density histogram and cumulative mass
//! - [`quantile`]: Resampled-histogram quantile estimation
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//!
//! # Examples
//!
//! ## Summarising one column
//!
//! ```
//! use enrich_stats::{config::EstimatorConfig, noise::NoiseSeed, quantile::QuantileEstimator};
//!
//! let config = EstimatorConfig {
//!     noise_variance: 4.0,
//!     ..EstimatorConfig::default()
//! };
//! let mut estimator = QuantileEstimator::new(config, NoiseSeed::from(1)).unwrap();
//! let record = estimator.estimate(&[20.0, 21.0, 19.5, 20.5]).unwrap();
//! assert!(record.lower_95 <= record.median && record.median <= record.upper_95);
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use enrich_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod config;
pub mod descriptive;
pub mod histogram;
pub mod noise;
pub mod quantile;
