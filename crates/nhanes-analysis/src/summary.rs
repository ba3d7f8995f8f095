//! Aggregations shown by the dashboard
//!
//! Every function here reads a [`RowSet`] and returns a presentation-ready value. Absent
//! columns yield `None` (or [`MeanValue::NotAvailable`]) so callers can show a notice
//! instead of a chart.

use std::{cmp::Ordering, fmt};

use nhanes_stats::{
    comprehensive::{BOX_PLOT_PERCENTILES, ComprehensiveStats},
    correlation, descriptive,
    regression::LinearFit,
};
use serde::{Serialize, Serializer};

use crate::{
    schema::{CORRELATION_CANDIDATES, DISTRIBUTION_DEFAULTS, Field},
    table::RowSet,
};

/// Number of histogram bins in a distribution summary.
pub const DISTRIBUTION_BINS: usize = 30;

/// Mean of a column, or a "not available" marker.
///
/// Displays as `{:.2}` or `N/A`.
///
/// ```
/// use nhanes_analysis::summary::MeanValue;
///
/// assert_eq!(MeanValue::Value(22.0).to_string(), "22.00");
/// assert_eq!(MeanValue::NotAvailable.to_string(), "N/A");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeanValue {
    Value(f64),
    NotAvailable,
}

impl MeanValue {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotAvailable => None,
        }
    }
}

impl From<Option<f64>> for MeanValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::NotAvailable, Self::Value)
    }
}

impl fmt::Display for MeanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:.2}"),
            Self::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for MeanValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Mean of the present values of a column; not available if the column is absent or
/// entirely missing.
#[must_use]
pub fn mean_with_fallback(rows: &RowSet, field: Field) -> MeanValue {
    rows.numeric_column(field)
        .and_then(|column| descriptive::mean(column.present()))
        .into()
}

/// Headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpis {
    pub mean_bmi: MeanValue,
    pub mean_sugar: MeanValue,
    pub mean_sleep: MeanValue,
}

impl Kpis {
    #[must_use]
    pub fn compute(rows: &RowSet) -> Self {
        Self {
            mean_bmi: mean_with_fallback(rows, Field::Bmi),
            mean_sugar: mean_with_fallback(rows, Field::SugarAvg),
            mean_sleep: mean_with_fallback(rows, Field::SleepAvg),
        }
    }
}

/// One partition of a group-by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub group: &'static str,
    /// Rows in the partition.
    pub count: usize,
    /// Mean of the present values; `None` if the partition has none.
    pub mean: Option<f64>,
}

/// Mean of `value` per distinct label of `by`, sorted by descending mean.
///
/// Every label appears exactly once, `"Unknown"` included. Partitions without any value
/// sort last, in order of first appearance. Returns `None` if either column is absent.
#[must_use]
pub fn group_by_mean(rows: &RowSet, by: Field, value: Field) -> Option<Vec<GroupMean>> {
    let labels = rows.categorical(by)?;
    let values = rows.numeric(value)?;

    let mut acc: Vec<(&'static str, usize, Vec<f64>)> = vec![];
    for (&label, value) in labels.iter().zip(values) {
        let pos = acc
            .iter()
            .position(|(group, ..)| *group == label)
            .unwrap_or_else(|| {
                acc.push((label, 0, vec![]));
                acc.len() - 1
            });
        acc[pos].1 += 1;
        acc[pos].2.extend(*value);
    }

    let mut groups = acc
        .into_iter()
        .map(|(group, count, present)| GroupMean {
            group,
            count,
            mean: descriptive::mean(present),
        })
        .collect::<Vec<_>>();
    groups.sort_by(|a, b| match (a.mean, b.mean) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    Some(groups)
}

/// Pearson correlation between every pair of present candidate columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<&'static str>,
    /// `values[i][j]` correlates `columns[i]` with `columns[j]`; `None` where undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Computes the matrix over the present candidate columns.
    ///
    /// Each pair uses the rows where both values are present. Returns `None` when fewer
    /// than two candidates are present.
    #[must_use]
    pub fn compute(rows: &RowSet) -> Option<Self> {
        let present = CORRELATION_CANDIDATES
            .into_iter()
            .filter_map(|field| rows.numeric(field).map(|values| (field.name(), values)))
            .collect::<Vec<_>>();
        if present.len() < 2 {
            return None;
        }

        let values = present
            .iter()
            .map(|(_, xs)| {
                present
                    .iter()
                    .map(|(_, ys)| {
                        correlation::pearson(
                            xs.iter()
                                .zip(ys.iter())
                                .filter_map(|(x, y)| Some(((*x)?, (*y)?))),
                        )
                    })
                    .collect()
            })
            .collect();
        Some(Self {
            columns: present.iter().map(|(name, _)| *name).collect(),
            values,
        })
    }

    #[must_use]
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == row)?;
        let j = self.columns.iter().position(|c| *c == column)?;
        self.values[i][j]
    }
}

/// Names of the numeric columns available for distribution inspection.
#[must_use]
pub fn numeric_columns(rows: &RowSet) -> Vec<String> {
    rows.numeric_column_names().map(str::to_owned).collect()
}

/// Columns selected in the distribution view before the user picks any.
#[must_use]
pub fn default_distribution_columns(rows: &RowSet) -> Vec<String> {
    DISTRIBUTION_DEFAULTS
        .into_iter()
        .filter(|field| rows.numeric_column(field).is_some())
        .map(|field| field.name().to_owned())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinCount {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

/// Descriptive statistics, box-plot quartiles and a histogram for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub column: String,
    pub count: usize,
    pub missing: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    /// Minimum, lower quartile, median, upper quartile, maximum.
    pub box_plot: [f64; 5],
    pub histogram: Vec<BinCount>,
}

impl DistributionSummary {
    /// Summarizes a numeric column. Returns `None` if the column is absent or has no
    /// present values.
    #[must_use]
    pub fn compute(rows: &RowSet, column: &str) -> Option<Self> {
        let values = rows.numeric_column(column)?;
        let stats = ComprehensiveStats::new(
            values.present(),
            &BOX_PLOT_PERCENTILES,
            DISTRIBUTION_BINS,
        )?;
        let box_plot = BOX_PLOT_PERCENTILES.map(|p| stats.percentiles.get(p).unwrap_or(f64::NAN));
        Some(Self {
            column: column.to_owned(),
            count: stats.stats.count,
            missing: values.values.len() - stats.stats.count,
            min: stats.stats.min,
            max: stats.stats.max,
            mean: stats.stats.mean,
            median: stats.stats.median,
            std_dev: stats.stats.std_dev,
            box_plot,
            histogram: stats
                .histogram
                .bins
                .iter()
                .map(|bin| BinCount {
                    start: bin.range.start,
                    end: bin.range.end,
                    count: bin.count,
                })
                .collect(),
        })
    }
}

/// Fitted line of a scatter series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl From<LinearFit> for TrendLine {
    fn from(fit: LinearFit) -> Self {
        Self {
            slope: fit.slope,
            intercept: fit.intercept,
        }
    }
}

impl TrendLine {
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Points of one group, with their own trendline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    /// Group label, or `None` if the row-set has no grouping column.
    pub group: Option<&'static str>,
    #[serde(skip)]
    pub points: Vec<(f64, f64)>,
    pub num_points: usize,
    pub trend: Option<TrendLine>,
}

/// Sugar vs BMI scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPlot {
    pub x: &'static str,
    pub y: &'static str,
    pub series: Vec<ScatterSeries>,
}

impl ScatterPlot {
    /// Builds the `sugar_avg` against `BMXBMI` scatter, one series per `sleep_group` label
    /// when that column exists. Rows missing either value are left out.
    ///
    /// Returns `None` if either axis column is absent.
    #[must_use]
    pub fn sugar_vs_bmi(rows: &RowSet) -> Option<Self> {
        Self::compute(rows, Field::SugarAvg, Field::Bmi, Some(Field::SleepGroup))
    }

    #[must_use]
    pub fn compute(rows: &RowSet, x: Field, y: Field, group_by: Option<Field>) -> Option<Self> {
        let xs = rows.numeric(x)?;
        let ys = rows.numeric(y)?;
        let groups = group_by.and_then(|field| rows.categorical(field));

        let mut series: Vec<ScatterSeries> = vec![];
        for (i, (x, y)) in xs.iter().zip(ys).enumerate() {
            let (Some(x), Some(y)) = (*x, *y) else {
                continue;
            };
            let group = groups.map(|labels| labels[i]);
            match series.iter_mut().find(|s| s.group == group) {
                Some(s) => s.points.push((x, y)),
                None => series.push(ScatterSeries {
                    group,
                    points: vec![(x, y)],
                    num_points: 0,
                    trend: None,
                }),
            }
        }
        for s in &mut series {
            s.num_points = s.points.len();
            s.trend = LinearFit::least_squares(s.points.iter().copied()).map(TrendLine::from);
        }

        Some(Self {
            x: x.name(),
            y: y.name(),
            series,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.series.iter().flat_map(|s| s.points.iter().copied())
    }
}
