//! The `qoi-stats` text format.
//!
//! One line per column of the sampler output, five space-separated values per
//! line in [`QuantileRecord`] order, no header.

use std::io::{self, BufRead, Write};

use enrich_stats::quantile::QuantileRecord;

use crate::matrix::{ReadMatrixError, SampleMatrix};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StatsTableError {
    #[display("{source}")]
    Matrix { source: ReadMatrixError },
    #[display("stats table must have 5 columns, found {found}")]
    ColumnCount { found: usize },
}

pub fn write_stats_table<W>(mut writer: W, records: &[QuantileRecord]) -> io::Result<()>
where
    W: Write,
{
    for record in records {
        writeln!(writer, "{record}")?;
    }
    writer.flush()
}

/// Parses a stats table written by [`write_stats_table`].
///
/// # Examples
///
/// ```
/// use enrich_analysis::stats_table;
///
/// let records = stats_table::read_stats_table("5 1 2 8 9\n6 2 3 9 10\n".as_bytes()).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].upper_95, 10.0);
/// ```
pub fn read_stats_table<R>(reader: R) -> Result<Vec<QuantileRecord>, StatsTableError>
where
    R: BufRead,
{
    let matrix =
        SampleMatrix::from_reader(reader).map_err(|source| StatsTableError::Matrix { source })?;
    if matrix.is_empty() {
        return Ok(vec![]);
    }
    let found = matrix.num_columns();
    if found != 5 {
        return Err(StatsTableError::ColumnCount { found });
    }
    Ok(matrix
        .rows()
        .map(|row| QuantileRecord::from_array([row[0], row[1], row[2], row[3], row[4]]))
        .collect())
}
