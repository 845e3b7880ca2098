//! Per-column QoI statistics.
//!
//! Summarises every (week, compartment) column of the sampler output into a
//! [`QuantileRecord`], in column order. Columns are processed sequentially
//! from one noise generator, so a fixed seed reproduces the whole table.

use enrich_stats::{
    noise::NoiseSeed,
    quantile::{EstimateError, QuantileEstimator, QuantileRecord},
};

use crate::{
    config::{PipelineConfig, PipelineConfigError},
    layout::{ColumnPosition, QoiLayout},
    matrix::SampleMatrix,
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum QoiError {
    #[display("{source}")]
    Config { source: PipelineConfigError },
    #[display("sample matrix has {found} columns, layout requires {expected}")]
    MissingColumns { expected: usize, found: usize },
    #[display("column {column} ({position}): {source}")]
    Column {
        column: usize,
        position: ColumnPosition,
        source: EstimateError,
    },
}

/// Summarises the first `layout.num_columns()` columns of `draws`.
///
/// `draws` must already be stripped of burn-in rows. Extra columns beyond the
/// layout are ignored.
pub fn summarize_columns(
    draws: &SampleMatrix,
    layout: QoiLayout,
    estimator: &mut QuantileEstimator,
) -> Result<Vec<QuantileRecord>, QoiError> {
    let expected = layout.num_columns();
    let found = draws.num_columns();
    if found < expected {
        return Err(QoiError::MissingColumns { expected, found });
    }
    if found > expected {
        tracing::warn!(expected, found, "ignoring columns beyond the layout");
    }

    let mut column = Vec::with_capacity(draws.num_rows());
    let mut records = Vec::with_capacity(expected);
    for idx in 0..expected {
        column.clear();
        column.extend(draws.column(idx));
        let record = estimator
            .estimate(&column)
            .map_err(|source| QoiError::Column {
                column: idx,
                position: layout.position(idx),
                source,
            })?;
        records.push(record);

        let position = layout.position(idx);
        if position.compartment == layout.cumulative_cases_compartment() {
            tracing::debug!(
                week = position.week + 1,
                median = record.median,
                "summarised week"
            );
        }
    }
    Ok(records)
}

/// Runs a complete QoI statistics pass over raw sampler output.
///
/// Validates `config`, drops `config.burn_in` leading rows, then summarises
/// every column of the layout with a generator seeded from `seed`.
///
/// # Examples
///
/// ```
/// use enrich_analysis::{config::PipelineConfig, matrix::SampleMatrix, qoi};
/// use enrich_stats::noise::NoiseSeed;
///
/// let mut config = PipelineConfig::default();
/// config.burn_in = 1;
/// config.n_weeks = 2;
/// config.n_species = 1;
/// config.estimator.noise_variance = 1.0;
///
/// let matrix = SampleMatrix::from_rows(&[
///     [0.0, 0.0, 0.0, 0.0],
///     [10.0, 20.0, 30.0, 40.0],
///     [11.0, 21.0, 31.0, 41.0],
/// ])
/// .unwrap();
/// let records = qoi::compute_qoi_statistics(matrix, &config, NoiseSeed::from(3)).unwrap();
/// assert_eq!(records.len(), 4);
/// assert!(records[3].median > records[0].median);
/// ```
pub fn compute_qoi_statistics(
    matrix: SampleMatrix,
    config: &PipelineConfig,
    seed: NoiseSeed,
) -> Result<Vec<QuantileRecord>, QoiError> {
    config
        .validate()
        .map_err(|source| QoiError::Config { source })?;

    let total_rows = matrix.num_rows();
    let draws = matrix.drop_leading_rows(config.burn_in);
    tracing::info!(
        total_rows,
        burn_in = config.burn_in,
        draws = draws.num_rows(),
        columns = config.layout().num_columns(),
        "computing QoI statistics"
    );

    let mut estimator = QuantileEstimator::new(config.estimator, seed).map_err(|source| {
        QoiError::Config {
            source: PipelineConfigError::Estimator { source },
        }
    })?;
    summarize_columns(&draws, config.layout(), &mut estimator)
}
