use std::ops::Range;

/// An equal-width histogram over the observed range of a dataset.
///
/// The data range `[min, max]` is divided into `num_bins` bins of equal width. Every
/// bin's range is half-open except the last one, which also holds values equal to `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// The bins in ascending order of range.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// The range of values covered by this bin.
    pub range: Range<f64>,
    /// The number of values that fall within this bin.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use nhanes_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(values, 3);
    /// assert_eq!(histogram.bins.len(), 3);
    /// assert_eq!(histogram.total_count(), 10);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, num_bins)
    }

    /// Creates a histogram from pre-sorted values.
    ///
    /// Returns an empty histogram for empty input or `num_bins == 0`. When every value is
    /// identical the histogram has a single unit-width bin.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], num_bins: usize) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Self { bins: vec![] };
        };
        if num_bins == 0 {
            return Self { bins: vec![] };
        }

        let range = max - min;
        if range <= f64::EPSILON * min.abs().max(1.0) {
            return Self {
                bins: vec![HistogramBin {
                    range: min..min + 1.0,
                    count: sorted_values.len() as u64,
                }],
            };
        }

        let bin_width = range / num_bins as f64;
        // Boundaries are recomputed from the index to avoid accumulating rounding errors
        let mut bins = (0..num_bins)
            .map(|idx| HistogramBin {
                range: (min + idx as f64 * range / num_bins as f64)
                    ..(min + (idx + 1) as f64 * range / num_bins as f64),
                count: 0,
            })
            .collect::<Vec<_>>();

        for &value in sorted_values {
            let idx = (((value - min) / bin_width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Sum of all bin counts.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}
