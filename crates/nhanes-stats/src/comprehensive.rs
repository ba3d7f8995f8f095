use crate::{descriptive::DescriptiveStats, histogram::Histogram, percentiles::Percentiles};

/// Percentile points backing a box plot: lower whisker, quartiles and upper whisker.
pub const BOX_PLOT_PERCENTILES: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];

/// Comprehensive statistical analysis combining multiple measures.
///
/// Combines descriptive statistics, a set of percentiles and a histogram, which is
/// everything a distribution view needs for one column.
///
/// # Examples
///
/// ```
/// use nhanes_stats::comprehensive::ComprehensiveStats;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let stats = ComprehensiveStats::new(values, &[25.0, 50.0, 75.0], 5).unwrap();
///
/// assert_eq!(stats.stats.mean, 5.5);
/// assert_eq!(stats.percentiles.get(50.0), Some(6.0));
/// assert_eq!(stats.histogram.bins.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComprehensiveStats {
    /// Basic descriptive statistics for the dataset.
    pub stats: DescriptiveStats,
    /// Precomputed percentile values for quick lookup.
    pub percentiles: Percentiles,
    /// Histogram showing the distribution of values across bins.
    pub histogram: Histogram,
}

impl ComprehensiveStats {
    /// Computes comprehensive statistics from unsorted values.
    ///
    /// Returns `None` if the dataset is empty.
    #[must_use]
    pub fn new<I>(values: I, percentile_points: &[f64], hist_num_bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points, hist_num_bins)
    }

    /// Computes comprehensive statistics from pre-sorted values.
    ///
    /// Returns `None` if the dataset is empty.
    #[must_use]
    pub fn from_sorted(
        sorted_values: &[f64],
        percentile_points: &[f64],
        hist_num_bins: usize,
    ) -> Option<Self> {
        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        let percentiles = Percentiles::from_sorted(sorted_values, percentile_points);
        let histogram = Histogram::from_sorted(sorted_values, hist_num_bins);

        Some(Self {
            stats,
            percentiles,
            histogram,
        })
    }
}
