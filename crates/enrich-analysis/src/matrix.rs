//! Whitespace-delimited numeric tables.
//!
//! Sampler and model outputs are plain text: one row per line, values
//! separated by whitespace, `%` starting a comment that runs to the end of the
//! line. Blank and comment-only lines are skipped.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    num::ParseFloatError,
    path::Path,
};

/// A dense row-major table of `f64` values.
///
/// Rows are simulation draws (or weeks, or chain steps); every row has the
/// same number of columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleMatrix {
    num_columns: usize,
    values: Vec<f64>,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ReadMatrixError {
    #[display("cannot read input: {source}")]
    Io { source: io::Error },
    #[display("line {line}: invalid number {token:?}")]
    InvalidNumber {
        line: usize,
        token: String,
        source: ParseFloatError,
    },
    #[display("line {line}: expected {expected} values, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl From<io::Error> for ReadMatrixError {
    fn from(source: io::Error) -> Self {
        Self::Io { source }
    }
}

impl SampleMatrix {
    /// Builds a matrix from in-memory rows.
    ///
    /// Rows are numbered from 1 in [`ReadMatrixError::RaggedRow`].
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ReadMatrixError>
    where
        R: AsRef<[f64]>,
    {
        let mut matrix = Self::default();
        for (idx, row) in rows.iter().enumerate() {
            matrix.push_row(idx + 1, row.as_ref())?;
        }
        Ok(matrix)
    }

    /// Parses a table from a reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use enrich_analysis::matrix::SampleMatrix;
    ///
    /// let text = "% draws of two quantities\n1.0 2.0\n\n3.0 4.0 % trailing note\n";
    /// let matrix = SampleMatrix::from_reader(text.as_bytes()).unwrap();
    /// assert_eq!(matrix.num_rows(), 2);
    /// assert_eq!(matrix.num_columns(), 2);
    /// assert_eq!(matrix.column(1).collect::<Vec<_>>(), [2.0, 4.0]);
    /// ```
    pub fn from_reader<R>(reader: R) -> Result<Self, ReadMatrixError>
    where
        R: BufRead,
    {
        let mut matrix = Self::default();
        let mut row = vec![];
        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let data = line.split('%').next().unwrap_or_default();
            row.clear();
            for token in data.split_whitespace() {
                let value = token
                    .parse::<f64>()
                    .map_err(|source| ReadMatrixError::InvalidNumber {
                        line: line_no,
                        token: token.to_owned(),
                        source,
                    })?;
                row.push(value);
            }
            if !row.is_empty() {
                matrix.push_row(line_no, &row)?;
            }
        }
        Ok(matrix)
    }

    /// Opens and parses a table file.
    pub fn from_path<P>(path: P) -> Result<Self, ReadMatrixError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn push_row(&mut self, line: usize, row: &[f64]) -> Result<(), ReadMatrixError> {
        if self.values.is_empty() {
            self.num_columns = row.len();
        } else if row.len() != self.num_columns {
            return Err(ReadMatrixError::RaggedRow {
                line,
                expected: self.num_columns,
                found: row.len(),
            });
        }
        self.values.extend_from_slice(row);
        Ok(())
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.values.len().checked_div(self.num_columns).unwrap_or(0)
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.num_columns.max(1))
    }

    /// Returns row `idx`, or `None` when out of range.
    #[must_use]
    pub fn row(&self, idx: usize) -> Option<&[f64]> {
        if idx >= self.num_rows() {
            return None;
        }
        let start = idx * self.num_columns;
        self.values.get(start..start + self.num_columns)
    }

    /// Iterates over the values of column `idx`, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.num_columns()` and the matrix has rows.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows().map(move |row| row[idx])
    }

    /// Discards the first `count` rows, keeping the column count.
    ///
    /// Dropping every row leaves a matrix whose columns are all empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use enrich_analysis::matrix::SampleMatrix;
    ///
    /// let matrix = SampleMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
    /// let kept = matrix.clone().drop_leading_rows(2);
    /// assert_eq!(kept.row(0), Some(&[5.0, 6.0][..]));
    ///
    /// let none = matrix.drop_leading_rows(10);
    /// assert_eq!(none.num_rows(), 0);
    /// assert_eq!(none.num_columns(), 2);
    /// ```
    #[must_use]
    pub fn drop_leading_rows(mut self, count: usize) -> Self {
        let end = count
            .saturating_mul(self.num_columns)
            .min(self.values.len());
        self.values.drain(..end);
        self
    }
}
