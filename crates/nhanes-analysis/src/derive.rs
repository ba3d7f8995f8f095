//! Feature derivation pipeline
//!
//! Turns a [`RawTable`] into a typed [`RowSet`]:
//!
//! 1. Row identifiers are taken from `SEQN`
//! 2. Known numeric source fields are coerced (unparseable cells become missing);
//!    unknown columns are kept only if they read as numeric
//! 3. `sugar_avg`, `kcal_avg` and `sleep_avg` are pairwise means of their two source
//!    columns, produced when at least one source column exists
//! 4. `sleep_group` is bucketed from `sleep_avg`
//! 5. `gender_label` and `race_label` are mapped from their code columns
//!
//! Derivation is total: absent or malformed data degrades to missing values or
//! [`UNKNOWN`], never to an error.

use tracing::debug;

use crate::{
    coerce,
    labels::{self, UNKNOWN},
    schema::{ColumnKind, Field, PAIRWISE_MEANS},
    table::{RawTable, RowId, RowSet},
};

pub const SLEEP_UNDER_6: &str = "<6h";
pub const SLEEP_6_TO_7: &str = "6–7h";
pub const SLEEP_7_TO_9: &str = "7–9h";
pub const SLEEP_OVER_9: &str = ">9h";

/// Sleep group labels in ascending order of hours.
pub const SLEEP_GROUPS: [&str; 4] = [SLEEP_UNDER_6, SLEEP_6_TO_7, SLEEP_7_TO_9, SLEEP_OVER_9];

/// Mean of whichever of the two values are present.
///
/// ```
/// use nhanes_analysis::derive::pairwise_mean;
///
/// assert_eq!(pairwise_mean(Some(100.0), Some(50.0)), Some(75.0));
/// assert_eq!(pairwise_mean(Some(100.0), None), Some(100.0));
/// assert_eq!(pairwise_mean(None, None), None);
/// ```
#[must_use]
pub fn pairwise_mean(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f64::midpoint(a, b)),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

/// Sleep bucket for an average number of hours.
///
/// Both 6 and 7 fall into `"6–7h"` and 9 falls into `"7–9h"`.
#[must_use]
pub fn sleep_group(hours: Option<f64>) -> &'static str {
    match hours {
        None => UNKNOWN,
        Some(h) if h < 6.0 => SLEEP_UNDER_6,
        Some(h) if h <= 7.0 => SLEEP_6_TO_7,
        Some(h) if h <= 9.0 => SLEEP_7_TO_9,
        Some(_) => SLEEP_OVER_9,
    }
}

/// Runs the derivation pipeline over a raw table.
#[must_use]
pub fn derive(raw: &RawTable) -> RowSet {
    let mut rows = RowSet::new(row_ids(raw));

    for column in raw.columns() {
        if rows.has_column(&column.name) || column.name == Field::Seqn.name() {
            continue;
        }
        let cells = column.cells.iter().map(String::as_str);
        match Field::from_name(&column.name).map(Field::kind) {
            Some(ColumnKind::Numeric) => {
                rows.push_numeric(&column.name, coerce::coerce_column(cells));
            }
            Some(_) => {
                debug!(column = %column.name, "categorical input column ignored; labels are derived");
            }
            None if coerce::is_numeric_column(cells.clone()) => {
                rows.push_numeric(&column.name, coerce::coerce_column(cells));
            }
            None => debug!(column = %column.name, "non-numeric auxiliary column dropped"),
        }
    }

    for (first, second, target) in PAIRWISE_MEANS {
        let values = match (raw_numeric(raw, first), raw_numeric(raw, second)) {
            (Some(a), Some(b)) => a
                .into_iter()
                .zip(b)
                .map(|(a, b)| pairwise_mean(a, b))
                .collect(),
            (Some(single), None) | (None, Some(single)) => single,
            (None, None) => continue,
        };
        rows.push_numeric(target.name(), values);
        debug!(column = %target, "derived");
    }

    let sleep_derived =
        raw.has_column(Field::SleepWeekday) || raw.has_column(Field::SleepWeekend);
    if let Some(sleep) = rows.numeric(Field::SleepAvg).filter(|_| sleep_derived) {
        let groups = sleep.iter().map(|hours| sleep_group(*hours)).collect();
        rows.push_categorical(Field::SleepGroup.name(), groups);
    }

    for (code, label, table) in [
        (Field::GenderCode, Field::GenderLabel, labels::GENDER),
        (Field::RaceCode, Field::RaceLabel, labels::RACE),
    ] {
        if let Some(cells) = raw.column(code) {
            let values = cells.iter().map(|cell| table.map_cell(cell)).collect();
            rows.push_categorical(label.name(), values);
            debug!(column = %label, "derived");
        }
    }

    rows
}

fn raw_numeric(raw: &RawTable, field: Field) -> Option<Vec<Option<f64>>> {
    raw.column(field)
        .map(|cells| coerce::coerce_column(cells.iter().map(String::as_str)))
}

fn row_ids(raw: &RawTable) -> Vec<RowId> {
    match raw.column(Field::Seqn) {
        Some(cells) => cells.iter().map(|id| RowId::new(id.trim())).collect(),
        None => {
            debug!("no SEQN column; using 1-based row positions as identifiers");
            (1..=raw.num_rows())
                .map(|pos| RowId::new(pos.to_string()))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::from_records(
            headers.iter().copied(),
            rows.iter().map(|row| row.iter().copied()),
        )
    }

    #[test]
    fn test_pairwise_mean_tolerates_one_side() {
        assert_eq!(pairwise_mean(None, Some(8.0)), Some(8.0));
        assert_eq!(pairwise_mean(Some(0.0), Some(10.0)), Some(5.0));
    }

    #[test]
    fn test_sleep_group_boundaries() {
        assert_eq!(sleep_group(Some(5.999)), "<6h");
        assert_eq!(sleep_group(Some(6.0)), "6–7h");
        assert_eq!(sleep_group(Some(7.0)), "6–7h");
        assert_eq!(sleep_group(Some(7.0001)), "7–9h");
        assert_eq!(sleep_group(Some(9.0)), "7–9h");
        assert_eq!(sleep_group(Some(9.0001)), ">9h");
        assert_eq!(sleep_group(None), "Unknown");
    }

    #[test]
    fn test_two_row_scenario() {
        let raw = table(
            &[
                "SEQN", "DR1TSUGR", "DR2TSUGR", "SLD012", "SLD013", "RIAGENDR", "BMXBMI",
            ],
            &[
                &["1", "100", "", "8", "8", "1", "22"],
                &["2", "", "", "5", "5", "2", "30"],
            ],
        );
        let rows = derive(&raw);

        assert_eq!(rows.ids(), [RowId::new("1"), RowId::new("2")]);
        assert_eq!(rows.numeric("sugar_avg").unwrap(), [Some(100.0), None]);
        assert_eq!(rows.numeric("sleep_avg").unwrap(), [Some(8.0), Some(5.0)]);
        assert_eq!(rows.categorical("sleep_group").unwrap(), ["7–9h", "<6h"]);
        assert_eq!(rows.categorical("gender_label").unwrap(), ["Male", "Female"]);
        assert_eq!(rows.numeric("BMXBMI").unwrap(), [Some(22.0), Some(30.0)]);
        assert!(!rows.has_column("kcal_avg"));
        assert!(!rows.has_column("race_label"));
    }

    #[test]
    fn test_single_source_column_is_enough() {
        let raw = table(&["SEQN", "DR2TKCAL"], &[&["1", "2000"], &["2", "x"]]);
        let rows = derive(&raw);
        assert_eq!(rows.numeric("kcal_avg").unwrap(), [Some(2000.0), None]);
    }

    #[test]
    fn test_missing_sleep_still_gets_a_group() {
        let raw = table(&["SEQN", "SLD012"], &[&["1", ""], &["2", "abc"]]);
        let rows = derive(&raw);
        assert_eq!(rows.numeric("sleep_avg").unwrap(), [None, None]);
        assert_eq!(rows.categorical("sleep_group").unwrap(), ["Unknown", "Unknown"]);
    }

    #[test]
    fn test_no_sources_no_derived_columns() {
        let raw = table(&["SEQN", "BMXBMI"], &[&["1", "25.1"]]);
        let rows = derive(&raw);
        for field in [
            Field::SugarAvg,
            Field::KcalAvg,
            Field::SleepAvg,
            Field::SleepGroup,
            Field::GenderLabel,
            Field::RaceLabel,
        ] {
            assert!(!rows.has_column(field), "{field}");
        }
    }

    #[test]
    fn test_bmi_coerced_with_unparseable_as_missing() {
        let raw = table(&["SEQN", "BMXBMI"], &[&["1", "25.1"], &["2", "n/a"], &["3", ""]]);
        let rows = derive(&raw);
        assert_eq!(rows.numeric("BMXBMI").unwrap(), [Some(25.1), None, None]);
    }

    #[test]
    fn test_race_labels() {
        let raw = table(&["SEQN", "RIDRETH1"], &[&["1", "4"], &["2", "6"], &["3", ""]]);
        let rows = derive(&raw);
        assert_eq!(
            rows.categorical("race_label").unwrap(),
            ["Non-Hispanic Black", "Unknown", "Unknown"]
        );
    }

    #[test]
    fn test_auxiliary_columns() {
        let raw = table(
            &["SEQN", "extra_num", "notes", "RIDAGEYR"],
            &[&["1", "3", "ok", "40"], &["2", "", "late", "old"]],
        );
        let rows = derive(&raw);
        assert_eq!(rows.numeric("extra_num").unwrap(), [Some(3.0), None]);
        assert!(!rows.has_column("notes"));
        // known numeric fields are coerced even when some cells are text
        assert_eq!(rows.numeric("RIDAGEYR").unwrap(), [Some(40.0), None]);
    }

    #[test]
    fn test_input_column_named_like_derived_is_replaced() {
        let raw = table(
            &["SEQN", "sleep_avg", "SLD012"],
            &[&["1", "99", "7"]],
        );
        let rows = derive(&raw);
        assert_eq!(rows.numeric("sleep_avg").unwrap(), [Some(7.0)]);
        assert_eq!(rows.numeric_column_names().filter(|n| *n == "sleep_avg").count(), 1);
    }

    #[test]
    fn test_row_order_and_count_preserved() {
        let raw = table(
            &["SEQN", "SLD012", "SLD013"],
            &[&["30", "1", "2"], &["10", "", "9"], &["20", "7", ""]],
        );
        let rows = derive(&raw);
        assert_eq!(
            rows.ids(),
            [RowId::new("30"), RowId::new("10"), RowId::new("20")]
        );
        assert_eq!(
            rows.numeric("sleep_avg").unwrap(),
            [Some(1.5), Some(9.0), Some(7.0)]
        );
    }
}
