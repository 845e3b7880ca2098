//! Post-processing of enriched epidemic-model calibration output
//!
//! This crate reads the plain-text tables produced by the sampler, summarises
//! them with [`enrich_stats`], and writes the tables consumed by plotting.
//!
//! # Overview
//!
//! ## QoI Statistics Workflow
//!
//! Turn posterior predictive draws into uncertainty bands:
//!
//! 1. **Load Draws** ([`matrix::SampleMatrix`]): Parse the whitespace table, skipping `%` comments
//! 2. **Configure** ([`config::PipelineConfig`]): Burn-in, layout and estimator settings
//! 3. **Summarise** ([`qoi::compute_qoi_statistics`]): One [`QuantileRecord`] per
//!    (week, compartment) column
//! 4. **Save** ([`stats_table::write_stats_table`]): The `qoi-stats` table
//!
//! ## Time Series Workflow
//!
//! Compare the bands with surveillance data:
//!
//! 1. **Load Bands** ([`stats_table::read_stats_table`]): Read a `qoi-stats` table back
//! 2. **Pair with Observations** ([`time_series::TimeSeries`]): Rebuild observed cumulative
//!    cases under a [`time_series::Reporting`] assumption
//!
//! ## Chain Inspection Workflow
//!
//! 1. **Summarise Parameters** ([`chain::ChainSummary`]): Per-column statistics of the
//!    model-inadequacy parameters of an MCMC chain
//!
//! # Examples
//!
//! ```
//! use enrich_analysis::{config::PipelineConfig, matrix::SampleMatrix, qoi, stats_table};
//! use enrich_stats::noise::NoiseSeed;
//!
//! let config = PipelineConfig {
//!     burn_in: 0,
//!     n_weeks: 1,
//!     n_species: 1,
//!     ..PipelineConfig::default()
//! };
//! let text = "% susceptible cases\n900 100\n905 110\n890 95\n";
//! let matrix = SampleMatrix::from_reader(text.as_bytes()).unwrap();
//! let records = qoi::compute_qoi_statistics(matrix, &config, NoiseSeed::from(9)).unwrap();
//!
//! let mut out = vec![];
//! stats_table::write_stats_table(&mut out, &records).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
//! ```
//!
//! [`QuantileRecord`]: enrich_stats::quantile::QuantileRecord

pub mod chain;
pub mod config;
pub mod layout;
pub mod matrix;
pub mod qoi;
pub mod stats_table;
pub mod time_series;
