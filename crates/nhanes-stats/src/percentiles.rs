/// Precomputed percentile values for a dataset.
///
/// # Examples
///
/// ```
/// use nhanes_stats::percentiles::Percentiles;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
///
/// assert_eq!(percentiles.get(50.0), Some(6.0));
/// assert_eq!(percentiles.get(25.0), Some(3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles {
    /// Percentile-value pairs in the order they were requested.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let values = percentile_points
            .iter()
            .map(|&p| (p, compute_percentile(sorted_values, p)))
            .collect();
        Self { values }
    }

    /// Computes percentiles from unsorted values.
    #[must_use]
    pub fn new(values: &[f64], percentile_points: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Gets the value at a specific percentile, or `None` if it was not precomputed.
    ///
    /// ```
    /// use nhanes_stats::percentiles::Percentiles;
    ///
    /// let percentiles = Percentiles::new(&[1.0, 2.0, 3.0, 4.0, 5.0], &[50.0, 95.0]);
    /// assert_eq!(percentiles.get(50.0), Some(3.0));
    /// assert_eq!(percentiles.get(25.0), None);
    /// ```
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values
            .iter()
            .find_map(|(p, value)| ((*p - percentile).abs() < f64::EPSILON).then_some(*value))
    }

    /// Returns all percentile-value pairs as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.values
    }
}

/// Computes a single percentile value from sorted data with the nearest-rank method.
///
/// For `n` values the k-th percentile is the value at index `floor(n * k / 100)`,
/// clamped to the last element. Returns `f64::NAN` for empty input.
///
/// ```
/// use nhanes_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&values, 50.0), 3.0);
/// assert_eq!(compute_percentile(&values, 25.0), 2.0);
/// assert_eq!(compute_percentile(&values, 100.0), 5.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let idx = ((sorted_values.len() as f64 * percentile) / 100.0) as usize;
    let idx = idx.min(sorted_values.len() - 1);
    sorted_values[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
        let percentiles = Percentiles::new(&[], &[50.0]);
        assert!(percentiles.get(50.0).unwrap().is_nan());
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let percentiles = Percentiles::new(&[9.0, 1.0, 5.0], &[0.0, 100.0]);
        assert_eq!(percentiles.get(0.0), Some(1.0));
        assert_eq!(percentiles.get(100.0), Some(9.0));
    }

    #[test]
    fn test_as_slice_preserves_request_order() {
        let percentiles = Percentiles::new(&[1.0, 2.0, 3.0, 4.0], &[75.0, 25.0]);
        assert_eq!(percentiles.as_slice(), &[(75.0, 4.0), (25.0, 2.0)]);
    }

    #[test]
    #[should_panic(expected = "values must be sorted")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = Percentiles::from_sorted(&[3.0, 1.0], &[50.0]);
    }
}
