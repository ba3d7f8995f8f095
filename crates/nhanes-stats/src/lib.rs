//! Statistical utilities for the NHANES dashboard.
//!
//! This crate has no dependencies and works on plain `f64` slices. Missing values are
//! filtered out by the caller before anything reaches these functions.
//!
//! - **Descriptive statistics**: mean, median, variance, standard deviation, range
//! - **Percentiles**: nearest-rank percentile lookup (used for box-plot quartiles)
//! - **Histogram generation**: equal-width frequency distributions
//! - **Comprehensive statistics**: descriptive stats, percentiles and a histogram together
//! - **Correlation**: Pearson correlation over paired observations
//! - **Regression**: ordinary least-squares line for chart trendlines
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use nhanes_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Correlating two measurements
//!
//! ```
//! use nhanes_stats::correlation::pearson;
//!
//! let pairs = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
//! let r = pearson(pairs).unwrap();
//! assert!((r - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Fitting a trendline
//!
//! ```
//! use nhanes_stats::regression::LinearFit;
//!
//! let fit = LinearFit::least_squares([(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]).unwrap();
//! assert!((fit.slope - 2.0).abs() < 1e-12);
//! assert!((fit.intercept - 1.0).abs() < 1e-12);
//! ```

pub mod comprehensive;
pub mod correlation;
pub mod descriptive;
pub mod histogram;
pub mod percentiles;
pub mod regression;
