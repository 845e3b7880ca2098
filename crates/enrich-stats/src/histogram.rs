//! Fixed-width density histogram and its cumulative mass.

/// An equal-width histogram normalised to a probability density.
///
/// The bins span the data range `[min, max]`. Every bin is half-open except
/// the last one, which also holds `max`. When all values are equal the range
/// is widened to `[min - 0.5, max + 0.5]` so the bins keep a positive width.
///
/// Densities are `count / (total * width)`, so `sum(density * width) == 1` up
/// to rounding.
#[derive(Debug, Clone)]
pub struct DensityHistogram {
    /// Bin edges in ascending order; one more entry than there are bins.
    edges: Vec<f64>,
    counts: Vec<u64>,
    densities: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum HistogramError {
    #[display("cannot build a histogram from an empty sample")]
    Empty,
    #[display("histogram needs at least one bin")]
    ZeroBins,
    #[display("sample range [{min}, {max}] is not finite")]
    NonFiniteRange { min: f64, max: f64 },
}

impl DensityHistogram {
    /// Bins `values` into `num_bins` equal-width bins.
    ///
    /// # Examples
    ///
    /// ```
    /// use enrich_stats::histogram::DensityHistogram;
    ///
    /// let histogram = DensityHistogram::new(&[0.0, 1.0, 1.5, 4.0], 4).unwrap();
    /// assert_eq!(histogram.edges(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(histogram.counts(), &[1, 2, 0, 1]);
    /// assert_eq!(histogram.densities(), &[0.25, 0.5, 0.0, 0.25]);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn new(values: &[f64], num_bins: usize) -> Result<Self, HistogramError> {
        if num_bins == 0 {
            return Err(HistogramError::ZeroBins);
        }
        if values.is_empty() {
            return Err(HistogramError::Empty);
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !(min.is_finite() && max.is_finite()) || values.iter().any(|v| v.is_nan()) {
            return Err(HistogramError::NonFiniteRange { min, max });
        }

        let (first, last) = if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };

        // Edges are computed from the start, not accumulated, and the last edge is exact.
        let step = (last - first) / num_bins as f64;
        let mut edges = (0..num_bins)
            .map(|i| first + (i as f64) * step)
            .collect::<Vec<_>>();
        edges.push(last);

        let scale = num_bins as f64 / (last - first);
        let last_bin = num_bins - 1;
        let mut counts = vec![0_u64; num_bins];
        for &value in values {
            // value >= first, so the position is non-negative.
            let mut idx = (((value - first) * scale) as usize).min(last_bin);
            // Rounding in `scale` can land one bin off; the edges decide.
            if idx > 0 && value < edges[idx] {
                idx -= 1;
            } else if idx < last_bin && value >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        let total = values.len() as f64;
        let densities = counts
            .iter()
            .zip(edges.windows(2))
            .map(|(&count, edge)| count as f64 / (edge[1] - edge[0]) / total)
            .collect();

        Ok(Self {
            edges,
            counts,
            densities,
        })
    }

    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    #[must_use]
    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    /// Width of the first bin, used as the common width of every bin.
    #[must_use]
    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Running sum of `density * bin_width` over the bins.
    #[must_use]
    pub fn cumulative_mass(&self) -> CumulativeMass {
        let width = self.bin_width();
        let values = self
            .densities
            .iter()
            .scan(0.0, |acc, density| {
                *acc += density * width;
                Some(*acc)
            })
            .collect();
        CumulativeMass { values }
    }
}

/// Non-decreasing cumulative probability mass per histogram bin.
#[derive(Debug, Clone)]
pub struct CumulativeMass {
    values: Vec<f64>,
}

impl CumulativeMass {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Index of the first bin whose cumulative mass is strictly greater than `threshold`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enrich_stats::histogram::DensityHistogram;
    ///
    /// let histogram = DensityHistogram::new(&[0.0, 1.0, 2.0, 3.0], 4).unwrap();
    /// let mass = histogram.cumulative_mass();
    /// assert_eq!(mass.first_exceeding(0.1), Some(0));
    /// assert_eq!(mass.first_exceeding(0.3), Some(1));
    /// assert_eq!(mass.first_exceeding(0.9), Some(3));
    /// assert_eq!(mass.first_exceeding(1.5), None);
    /// ```
    #[must_use]
    pub fn first_exceeding(&self, threshold: f64) -> Option<usize> {
        self.values.iter().position(|&mass| mass > threshold)
    }
}
