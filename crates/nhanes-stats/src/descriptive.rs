/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency and dispersion
/// for a dataset of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset (upper median for even counts).
    pub median: f64,
    /// The population variance of the dataset.
    pub variance: f64,
    /// The population standard deviation of the dataset.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use nhanes_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.count, 5);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = sorted_values[count / 2];
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

/// Arithmetic mean of the values, or `None` when there are none.
///
/// ```
/// # use nhanes_stats::descriptive::mean;
/// assert_eq!(mean([2.0, 4.0]), Some(3.0));
/// assert_eq!(mean(std::iter::empty()), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new(std::iter::empty()).is_none());
        assert!(mean(std::iter::empty()).is_none());
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([7.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min, 7.5);
        assert_eq!(stats.max, 7.5);
        assert_eq!(stats.mean, 7.5);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_population_variance() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.variance, 4.0);
        assert_eq!(stats.std_dev, 2.0);
        assert_eq!(stats.median, 5.0);
    }

    #[test]
    fn test_mean_of_negative_values() {
        assert_eq!(mean([-1.0, -3.0]), Some(-2.0));
    }
}
