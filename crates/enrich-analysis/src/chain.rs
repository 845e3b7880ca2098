//! Summaries of calibration chains.
//!
//! The calibration run leaves a filtered MCMC chain, one draw per row and one
//! model parameter per column. The leading columns are the model-inadequacy
//! parameters, whose count depends on the [`InadequacyType`].

use std::io::{self, Write};

use enrich_stats::descriptive::DescriptiveStats;

use crate::matrix::SampleMatrix;

/// Form of the model-inadequacy operator used during calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InadequacyType {
    /// Two parameters per species.
    Linear,
    /// Four parameters per species.
    Extended,
    /// `2 × n_species` parameters per species.
    Full,
}

impl TryFrom<u8> for InadequacyType {
    type Error = ChainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Linear),
            2 => Ok(Self::Extended),
            3 => Ok(Self::Full),
            value => Err(ChainError::UnknownInadequacyType { value }),
        }
    }
}

impl InadequacyType {
    /// Inadequacy parameters per species.
    #[must_use]
    pub const fn params_factor(self, n_species: usize) -> usize {
        match self {
            Self::Linear => 2,
            Self::Extended => 4,
            Self::Full => 2 * n_species,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ChainError {
    #[display("unknown model inadequacy type {value}, expected 1, 2 or 3")]
    UnknownInadequacyType { value: u8 },
    #[display("chain has {found} parameter columns, inadequacy model requires {expected}")]
    MissingParameters { expected: usize, found: usize },
    #[display("chain has no draws")]
    EmptyChain,
    #[display("chain value in parameter {column}, draw {row} is not finite")]
    NonFiniteValue { column: usize, row: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSummary {
    /// Zero-based chain column.
    pub index: usize,
    pub stats: DescriptiveStats,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChainSummary {
    pub parameters: Vec<ParameterSummary>,
}

impl ChainSummary {
    /// Summarises the inadequacy parameters of `chain`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enrich_analysis::{
    ///     chain::{ChainSummary, InadequacyType},
    ///     matrix::SampleMatrix,
    /// };
    ///
    /// let chain = SampleMatrix::from_rows(&[[1.0, 10.0, 0.0], [3.0, 30.0, 0.0]]).unwrap();
    /// let summary = ChainSummary::from_chain(&chain, 1, InadequacyType::Linear).unwrap();
    /// assert_eq!(summary.parameters.len(), 2);
    /// assert_eq!(summary.parameters[1].stats.mean, 20.0);
    /// ```
    pub fn from_chain(
        chain: &SampleMatrix,
        n_species: usize,
        inadequacy: InadequacyType,
    ) -> Result<Self, ChainError> {
        if chain.num_rows() == 0 {
            return Err(ChainError::EmptyChain);
        }
        let expected = inadequacy.params_factor(n_species) * n_species;
        let found = chain.num_columns();
        if found < expected {
            return Err(ChainError::MissingParameters { expected, found });
        }
        for (row, draw) in chain.rows().enumerate() {
            if let Some(column) = draw[..expected].iter().position(|v| !v.is_finite()) {
                return Err(ChainError::NonFiniteValue { column, row });
            }
        }

        let parameters = (0..expected)
            .filter_map(|index| {
                let stats = DescriptiveStats::new(chain.column(index))?;
                Some(ParameterSummary { index, stats })
            })
            .collect();
        Ok(Self { parameters })
    }

    pub fn write_table<W>(&self, mut writer: W) -> io::Result<()>
    where
        W: Write,
    {
        writeln!(writer, "% parameter mean std_dev min max")?;
        for ParameterSummary { index, stats } in &self.parameters {
            writeln!(
                writer,
                "{index} {} {} {} {}",
                stats.mean, stats.std_dev, stats.min, stats.max
            )?;
        }
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn chain(rows: usize, columns: usize) -> SampleMatrix {
        let rows = (0..rows)
            .map(|r| {
                (0..columns)
                    .map(|c| f64::from(u32::try_from(c * 10 + r).unwrap()))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        SampleMatrix::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_inadequacy_type_from_u8() {
        assert_eq!(InadequacyType::try_from(1), Ok(InadequacyType::Linear));
        assert_eq!(InadequacyType::try_from(3), Ok(InadequacyType::Full));
        assert_eq!(
            InadequacyType::try_from(4),
            Err(ChainError::UnknownInadequacyType { value: 4 })
        );
        assert!(InadequacyType::try_from(0).is_err());
    }

    #[test]
    fn test_selected_column_count() {
        let n_species = 3;
        for (inadequacy, expected) in [
            (InadequacyType::Linear, 6),
            (InadequacyType::Extended, 12),
            (InadequacyType::Full, 18),
        ] {
            let summary = ChainSummary::from_chain(&chain(4, 20), n_species, inadequacy).unwrap();
            assert_eq!(summary.parameters.len(), expected);
            assert_eq!(summary.parameters.last().unwrap().index, expected - 1);
        }
    }

    #[test]
    fn test_parameter_stats() {
        let summary = ChainSummary::from_chain(&chain(4, 2), 1, InadequacyType::Linear).unwrap();
        let stats = summary.parameters[1].stats;
        assert_abs_diff_eq!(stats.mean, 11.5);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 13.0);
        assert_eq!(stats.count, 4);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            ChainSummary::from_chain(&chain(4, 5), 3, InadequacyType::Linear),
            Err(ChainError::MissingParameters {
                expected: 6,
                found: 5
            })
        );
        assert_eq!(
            ChainSummary::from_chain(&SampleMatrix::default(), 3, InadequacyType::Linear),
            Err(ChainError::EmptyChain)
        );
    }

    #[test]
    fn test_non_finite_draw_rejected() {
        let chain = SampleMatrix::from_reader("1.0 2.0\nnan 3.0\n".as_bytes()).unwrap();
        assert_eq!(
            ChainSummary::from_chain(&chain, 1, InadequacyType::Linear),
            Err(ChainError::NonFiniteValue { column: 0, row: 1 })
        );

        let chain = SampleMatrix::from_reader("1.0 inf\n2.0 3.0\n".as_bytes()).unwrap();
        assert_eq!(
            ChainSummary::from_chain(&chain, 1, InadequacyType::Linear),
            Err(ChainError::NonFiniteValue { column: 1, row: 0 })
        );
    }

    #[test]
    fn test_non_finite_beyond_selected_columns_ignored() {
        let chain = SampleMatrix::from_reader("1.0 2.0 nan\n3.0 4.0 5.0\n".as_bytes()).unwrap();
        let summary = ChainSummary::from_chain(&chain, 1, InadequacyType::Linear).unwrap();
        assert_eq!(summary.parameters.len(), 2);
    }

    #[test]
    fn test_write_table() {
        let summary = ChainSummary::from_chain(&chain(2, 2), 1, InadequacyType::Linear).unwrap();
        let mut out = vec![];
        summary.write_table(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "% parameter mean std_dev min max\n0 0.5 0.5 0 1\n1 10.5 0.5 10 11\n"
        );
    }
}
