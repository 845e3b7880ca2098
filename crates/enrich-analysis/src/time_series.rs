//! Weekly model bands paired with observed cumulative cases.
//!
//! Combines a stats table with the surveillance data the model was calibrated
//! against. The observed table holds one row per week with the new case count
//! in its second column; cumulative counts are rebuilt here, scaled by the
//! assumed [`Reporting`] rate.

use std::io::{self, Write};

use enrich_stats::quantile::QuantileRecord;
use serde::{Deserialize, Serialize};

use crate::{layout::QoiLayout, matrix::SampleMatrix};

/// Assumed completeness of case reporting.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::FromStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Reporting {
    /// Every case is reported.
    #[default]
    Complete,
    /// 10% of cases go unreported.
    Under10,
    /// Half of all cases go unreported.
    Under50,
}

impl Reporting {
    /// Multiplier turning reported counts into estimated true counts.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Complete => 1.0,
            Self::Under10 => 10.0 / 9.0,
            Self::Under50 => 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TimeSeriesError {
    #[display("compartment {compartment} out of range, weeks have {dim} compartments")]
    CompartmentOutOfRange { compartment: usize, dim: usize },
    #[display("stats table has {found} rows, layout requires {expected}")]
    MissingRecords { expected: usize, found: usize },
    #[display("observed data has {found} weeks, layout requires {expected}")]
    MissingObservedWeeks { expected: usize, found: usize },
    #[display("observed data has {found} columns, the case count is column 2")]
    MissingCaseColumn { found: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    /// One-based week number.
    pub week: usize,
    /// Observed cumulative cases, scaled by the reporting factor.
    pub observed: f64,
    pub model: QuantileRecord,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    pub points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// Pairs the `compartment` record of each week with observed cumulative
    /// cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use enrich_analysis::{
    ///     layout::QoiLayout,
    ///     matrix::SampleMatrix,
    ///     time_series::{Reporting, TimeSeries},
    /// };
    /// use enrich_stats::quantile::QuantileRecord;
    ///
    /// let layout = QoiLayout::new(2, 1);
    /// let records = (0..4)
    ///     .map(|i| QuantileRecord::from_array([f64::from(i); 5]))
    ///     .collect::<Vec<_>>();
    /// let observed = SampleMatrix::from_rows(&[[1.0, 3.0], [2.0, 5.0]]).unwrap();
    ///
    /// let series = TimeSeries::build(&records, &observed, layout, 1, Reporting::Under50).unwrap();
    /// assert_eq!(series.points[1].week, 2);
    /// assert_eq!(series.points[1].observed, 16.0);
    /// assert_eq!(series.points[1].model.median, 3.0);
    /// ```
    pub fn build(
        records: &[QuantileRecord],
        observed: &SampleMatrix,
        layout: QoiLayout,
        compartment: usize,
        reporting: Reporting,
    ) -> Result<Self, TimeSeriesError> {
        let dim = layout.dim();
        if compartment >= dim {
            return Err(TimeSeriesError::CompartmentOutOfRange { compartment, dim });
        }
        if records.len() < layout.num_columns() {
            return Err(TimeSeriesError::MissingRecords {
                expected: layout.num_columns(),
                found: records.len(),
            });
        }
        if observed.num_rows() < layout.n_weeks {
            return Err(TimeSeriesError::MissingObservedWeeks {
                expected: layout.n_weeks,
                found: observed.num_rows(),
            });
        }
        if observed.num_columns() < 2 {
            return Err(TimeSeriesError::MissingCaseColumn {
                found: observed.num_columns(),
            });
        }

        let factor = reporting.factor();
        let mut cumulative = 0.0;
        let points = observed
            .column(1)
            .take(layout.n_weeks)
            .enumerate()
            .map(|(week, new_cases)| {
                cumulative += factor * new_cases;
                TimeSeriesPoint {
                    week: week + 1,
                    observed: cumulative,
                    model: records[layout.column(week, compartment)],
                }
            })
            .collect();
        Ok(Self { points })
    }

    pub fn write_table<W>(&self, mut writer: W) -> io::Result<()>
    where
        W: Write,
    {
        writeln!(
            writer,
            "% week observed median lower_95 lower_50 upper_50 upper_95"
        )?;
        for point in &self.points {
            writeln!(writer, "{} {} {}", point.week, point.observed, point.model)?;
        }
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn records(layout: QoiLayout) -> Vec<QuantileRecord> {
        (0..layout.num_columns())
            .map(|i| QuantileRecord::from_array([f64::from(u32::try_from(i).unwrap()); 5]))
            .collect()
    }

    fn observed(weekly: &[f64]) -> SampleMatrix {
        let rows = weekly
            .iter()
            .enumerate()
            .map(|(week, &cases)| [f64::from(u32::try_from(week).unwrap()), cases])
            .collect::<Vec<_>>();
        SampleMatrix::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_reporting_parse() {
        assert_eq!("complete".parse::<Reporting>().unwrap(), Reporting::Complete);
        assert_eq!("Under10".parse::<Reporting>().unwrap(), Reporting::Under10);
        assert_eq!("under50".parse::<Reporting>().unwrap(), Reporting::Under50);
        assert!("under25".parse::<Reporting>().is_err());
    }

    #[test]
    fn test_cumulative_cases_follow_reporting_factor() {
        let layout = QoiLayout::new(3, 2);
        let data = observed(&[9.0, 18.0, 0.0]);

        let complete =
            TimeSeries::build(&records(layout), &data, layout, 2, Reporting::Complete).unwrap();
        let observed = complete.points.iter().map(|p| p.observed).collect::<Vec<_>>();
        assert_eq!(observed, [9.0, 27.0, 27.0]);

        let under10 =
            TimeSeries::build(&records(layout), &data, layout, 2, Reporting::Under10).unwrap();
        assert_abs_diff_eq!(under10.points[0].observed, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(under10.points[2].observed, 30.0, epsilon = 1e-12);
    }

    #[test]
    fn test_selects_compartment_of_each_week() {
        let layout = QoiLayout::new(3, 2);
        let series =
            TimeSeries::build(&records(layout), &observed(&[1.0; 3]), layout, 2, Reporting::Complete)
                .unwrap();
        let medians = series.points.iter().map(|p| p.model.median).collect::<Vec<_>>();
        assert_eq!(medians, [2.0, 5.0, 8.0]);
        assert_eq!(series.points[0].week, 1);
    }

    #[test]
    fn test_extra_observed_weeks_ignored() {
        let layout = QoiLayout::new(2, 0);
        let series = TimeSeries::build(
            &records(layout),
            &observed(&[1.0, 1.0, 1.0, 1.0]),
            layout,
            0,
            Reporting::Complete,
        )
        .unwrap();
        assert_eq!(series.points.len(), 2);
    }

    #[test]
    fn test_errors() {
        let layout = QoiLayout::new(3, 2);
        let data = observed(&[1.0; 3]);
        assert_eq!(
            TimeSeries::build(&records(layout), &data, layout, 3, Reporting::Complete),
            Err(TimeSeriesError::CompartmentOutOfRange {
                compartment: 3,
                dim: 3
            })
        );
        assert_eq!(
            TimeSeries::build(&records(layout)[..8], &data, layout, 2, Reporting::Complete),
            Err(TimeSeriesError::MissingRecords {
                expected: 9,
                found: 8
            })
        );
        assert_eq!(
            TimeSeries::build(
                &records(layout),
                &observed(&[1.0; 2]),
                layout,
                2,
                Reporting::Complete
            ),
            Err(TimeSeriesError::MissingObservedWeeks {
                expected: 3,
                found: 2
            })
        );
        let single = SampleMatrix::from_rows(&[[1.0], [2.0], [3.0]]).unwrap();
        assert_eq!(
            TimeSeries::build(&records(layout), &single, layout, 2, Reporting::Complete),
            Err(TimeSeriesError::MissingCaseColumn { found: 1 })
        );
    }

    #[test]
    fn test_write_table() {
        let series = TimeSeries {
            points: vec![TimeSeriesPoint {
                week: 1,
                observed: 12.5,
                model: QuantileRecord::from_array([10.0, 2.0, 8.0, 12.0, 20.0]),
            }],
        };
        let mut out = vec![];
        series.write_table(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "% week observed median lower_95 lower_50 upper_50 upper_95\n1 12.5 10 2 8 12 20\n"
        );
    }
}
