//! The complete dashboard model for one set of control values
//!
//! [`DashboardView::compute`] runs filtering and every aggregation. KPIs, the scatter and
//! the distributions read the filtered rows; the group-by charts and the correlation
//! heatmap read the full dataset.

use serde::Serialize;

use crate::{
    filter::{self, FilterConstraints, FilterDefaults},
    schema::Field,
    summary::{self, CorrelationMatrix, DistributionSummary, GroupMean, Kpis, ScatterPlot},
    table::RowSet,
};

pub const SCATTER_UNAVAILABLE: &str =
    "Needed columns not found for this chart: 'sugar_avg' and 'BMXBMI'.";
pub const SLEEP_UNAVAILABLE: &str = "Sleep features not available.";
pub const GENDER_UNAVAILABLE: &str = "Gender labels not available.";
pub const HEATMAP_UNAVAILABLE: &str =
    "Not enough numeric columns to compute a correlation heatmap.";
pub const NO_DISTRIBUTION_SELECTED: &str =
    "Select at least one numeric column to show distributions.";

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub source: String,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub defaults: FilterDefaults,
    pub constraints: FilterConstraints,
    pub kpis: Kpis,
    pub scatter: Option<ScatterPlot>,
    pub bmi_by_sleep_group: Option<Vec<GroupMean>>,
    pub bmi_by_gender: Option<Vec<GroupMean>>,
    pub correlation: Option<CorrelationMatrix>,
    /// Numeric columns of the filtered rows.
    pub numeric_columns: Vec<String>,
    pub distribution_columns: Vec<String>,
    pub distributions: Vec<DistributionSummary>,
    #[serde(skip)]
    pub filtered: RowSet,
}

impl DashboardView {
    /// Computes the view.
    ///
    /// `distribution_columns` of `None` selects the default columns; names that are not
    /// numeric columns of the filtered rows are ignored.
    #[must_use]
    pub fn compute(
        source: impl Into<String>,
        rows: &RowSet,
        defaults: FilterDefaults,
        constraints: FilterConstraints,
        distribution_columns: Option<&[String]>,
    ) -> Self {
        let filtered = filter::apply(rows, &constraints);
        let numeric_columns = summary::numeric_columns(&filtered);
        let distribution_columns = match distribution_columns {
            Some(selected) => selected
                .iter()
                .filter(|name| numeric_columns.contains(*name))
                .cloned()
                .collect(),
            None => summary::default_distribution_columns(&filtered),
        };
        let distributions = distribution_columns
            .iter()
            .filter_map(|name| DistributionSummary::compute(&filtered, name))
            .collect();

        Self {
            source: source.into(),
            total_rows: rows.len(),
            filtered_rows: filtered.len(),
            defaults,
            constraints,
            kpis: Kpis::compute(&filtered),
            scatter: ScatterPlot::sugar_vs_bmi(&filtered),
            bmi_by_sleep_group: summary::group_by_mean(rows, Field::SleepGroup, Field::Bmi),
            bmi_by_gender: summary::group_by_mean(rows, Field::GenderLabel, Field::Bmi),
            correlation: CorrelationMatrix::compute(rows),
            numeric_columns,
            distribution_columns,
            distributions,
            filtered,
        }
    }

    /// Messages for the parts of the dashboard that cannot be drawn.
    #[must_use]
    pub fn notices(&self) -> Vec<&'static str> {
        [
            (self.scatter.is_none(), SCATTER_UNAVAILABLE),
            (self.bmi_by_sleep_group.is_none(), SLEEP_UNAVAILABLE),
            (self.bmi_by_gender.is_none(), GENDER_UNAVAILABLE),
            (self.distribution_columns.is_empty(), NO_DISTRIBUTION_SELECTED),
            (self.correlation.is_none(), HEATMAP_UNAVAILABLE),
        ]
        .into_iter()
        .filter_map(|(missing, notice)| missing.then_some(notice))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        derive::derive,
        filter::{FilterDefaultsConfig, GenderFilter},
        table::{RawTable, RowId},
    };

    use super::*;

    fn two_rows() -> RowSet {
        derive(&RawTable::from_records(
            ["SEQN", "DR1TSUGR", "DR2TSUGR", "SLD012", "SLD013", "RIAGENDR", "BMXBMI"],
            [
                ["1", "100", "", "8", "8", "1", "22"],
                ["2", "", "", "5", "5", "2", "30"],
            ],
        ))
    }

    fn view(rows: &RowSet, constraints: FilterConstraints) -> DashboardView {
        let defaults = FilterDefaults::compute(rows, &FilterDefaultsConfig::default());
        DashboardView::compute("test.csv", rows, defaults, constraints, None)
    }

    #[test]
    fn test_male_filter_end_to_end() {
        let rows = two_rows();
        let constraints = FilterConstraints {
            gender: GenderFilter::from_label("Male"),
            ..FilterConstraints::default()
        };
        let view = view(&rows, constraints);

        assert_eq!(view.filtered.ids(), [RowId::new("1")]);
        assert_eq!(view.kpis.mean_bmi.to_string(), "22.00");
        assert_eq!(view.kpis.mean_sugar.to_string(), "100.00");
        assert_eq!(view.kpis.mean_sleep.to_string(), "8.00");
        // group-by reads the whole dataset
        let by_gender = view.bmi_by_gender.unwrap();
        assert_eq!(by_gender.len(), 2);
        assert_eq!(by_gender[0].group, "Female");
    }

    #[test]
    fn test_default_constraints_drop_missing_sugar() {
        let rows = two_rows();
        let defaults = FilterDefaults::compute(&rows, &FilterDefaultsConfig::default());
        let constraints = defaults.constraints();
        let view = DashboardView::compute("test.csv", &rows, defaults, constraints, None);

        assert_eq!(view.total_rows, 2);
        assert_eq!(view.filtered_rows, 1);
        assert_eq!(
            view.distribution_columns,
            ["BMXBMI", "sugar_avg", "sleep_avg"]
        );
    }

    #[test]
    fn test_notices_for_sparse_data() {
        let rows = derive(&RawTable::from_records(["SEQN", "BMXBMI"], [["1", "22"]]));
        let view = view(&rows, FilterConstraints::default());
        assert_eq!(
            view.notices(),
            [
                SCATTER_UNAVAILABLE,
                SLEEP_UNAVAILABLE,
                GENDER_UNAVAILABLE,
                HEATMAP_UNAVAILABLE
            ]
        );
        assert_eq!(view.kpis.mean_sugar.to_string(), "N/A");
    }

    #[test]
    fn test_selected_distribution_columns() {
        let rows = two_rows();
        let defaults = FilterDefaults::compute(&rows, &FilterDefaultsConfig::default());
        let selected = ["SLD012".to_owned(), "gender_label".to_owned()];
        let view = DashboardView::compute(
            "test.csv",
            &rows,
            defaults,
            FilterConstraints::default(),
            Some(&selected),
        );
        assert_eq!(view.distribution_columns, ["SLD012"]);
        assert_eq!(view.distributions.len(), 1);

        let view = DashboardView::compute(
            "test.csv",
            &rows,
            view.defaults,
            FilterConstraints::default(),
            Some(&[]),
        );
        assert_eq!(view.notices(), [NO_DISTRIBUTION_SELECTED]);
    }
}
