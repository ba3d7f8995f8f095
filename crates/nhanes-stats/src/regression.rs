//! Ordinary least-squares line used for scatter-plot trendlines.

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fits a line to `(x, y)` pairs by ordinary least squares.
    ///
    /// Returns `None` for fewer than two pairs or when every `x` is identical.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn least_squares<I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let pairs = pairs.into_iter().collect::<Vec<_>>();
        if pairs.len() < 2 {
            return None;
        }

        let n = pairs.len() as f64;
        let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;
        let (sxy, sxx) = pairs.iter().fold((0.0, 0.0), |(sxy, sxx), &(x, y)| {
            let dx = x - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });
        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    /// Evaluates the line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_data_has_no_fit() {
        assert_eq!(LinearFit::least_squares([(2.0, 1.0), (2.0, 5.0)]), None);
        assert_eq!(LinearFit::least_squares([(2.0, 1.0)]), None);
    }

    #[test]
    fn test_noisy_fit_passes_through_means() {
        let pairs = [(0.0, 1.0), (1.0, 2.0), (2.0, 2.0), (3.0, 5.0)];
        let fit = LinearFit::least_squares(pairs).unwrap();
        // Least-squares line always passes through (mean_x, mean_y)
        assert!((fit.predict(1.5) - 2.5).abs() < 1e-12);
        assert!((fit.slope - 1.2).abs() < 1e-12);
    }
}
