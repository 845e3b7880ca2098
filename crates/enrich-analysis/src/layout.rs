//! Mapping between sample-matrix columns and (week, compartment) pairs.
//!
//! The model reports `n_species` state variables plus the cumulative case
//! count for every epidemiological week, week-major:
//!
//! ```text
//! column = week * (n_species + 1) + compartment
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QoiLayout {
    /// Number of epidemiological weeks.
    pub n_weeks: usize,
    /// Number of modelled state variables per week, excluding cumulative cases.
    pub n_species: usize,
}

/// Week and compartment of one column, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("week {}, compartment {compartment}", week + 1)]
pub struct ColumnPosition {
    pub week: usize,
    pub compartment: usize,
}

impl QoiLayout {
    #[must_use]
    pub const fn new(n_weeks: usize, n_species: usize) -> Self {
        Self { n_weeks, n_species }
    }

    /// Compartments per week.
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.n_species + 1
    }

    /// Columns the layout expects in the sample matrix.
    #[must_use]
    pub const fn num_columns(&self) -> usize {
        self.n_weeks * self.dim()
    }

    /// The compartment holding the cumulative case count.
    #[must_use]
    pub const fn cumulative_cases_compartment(&self) -> usize {
        self.n_species
    }

    /// # Examples
    ///
    /// ```
    /// use enrich_analysis::layout::QoiLayout;
    ///
    /// let layout = QoiLayout::new(52, 7);
    /// assert_eq!(layout.column(0, 7), 7);
    /// assert_eq!(layout.column(3, 7), 31);
    /// assert_eq!(layout.position(31).to_string(), "week 4, compartment 7");
    /// ```
    #[must_use]
    pub const fn column(&self, week: usize, compartment: usize) -> usize {
        week * self.dim() + compartment
    }

    #[must_use]
    pub const fn position(&self, column: usize) -> ColumnPosition {
        ColumnPosition {
            week: column / self.dim(),
            compartment: column % self.dim(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count() {
        let layout = QoiLayout::new(52, 7);
        assert_eq!(layout.dim(), 8);
        assert_eq!(layout.num_columns(), 416);
        assert_eq!(layout.cumulative_cases_compartment(), 7);
    }

    #[test]
    fn test_position_inverts_column() {
        let layout = QoiLayout::new(5, 3);
        for column in 0..layout.num_columns() {
            let ColumnPosition { week, compartment } = layout.position(column);
            assert!(week < layout.n_weeks);
            assert!(compartment < layout.dim());
            assert_eq!(layout.column(week, compartment), column);
        }
    }
}
