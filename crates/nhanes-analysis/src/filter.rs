//! Row filtering
//!
//! A [`FilterConstraints`] value holds one constraint per filterable column; they are
//! combined by AND into a [`RowMask`]. A constraint over a column that the row-set does
//! not have is ignored.
//!
//! [`FilterDefaults`] computes the initial control values (gender options and range
//! defaults) from the observed data.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{
    schema::Field,
    table::{RowId, RowSet},
};

/// Wildcard gender option.
pub const ALL: &str = "All";

/// Boolean selection over the rows of a [`RowSet`], in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMask(Vec<bool>);

impl From<Vec<bool>> for RowMask {
    fn from(value: Vec<bool>) -> Self {
        Self(value)
    }
}

impl RowMask {
    /// A mask including every one of `len` rows.
    #[must_use]
    pub fn all(len: usize) -> Self {
        Self(vec![true; len])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn count_included(&self) -> usize {
        self.0.iter().filter(|keep| **keep).count()
    }

    /// Identifiers of the included rows.
    ///
    /// # Panics
    ///
    /// Panics if the mask was built for a row-set of different length.
    #[must_use]
    pub fn included_ids<'a>(&self, rows: &'a RowSet) -> Vec<&'a RowId> {
        assert_eq!(self.len(), rows.len(), "mask length mismatch");
        rows.ids()
            .iter()
            .zip(self.iter())
            .filter_map(|(id, keep)| keep.then_some(id))
            .collect()
    }

    fn and_with(&mut self, mut keep: impl FnMut(usize) -> bool) {
        for (i, slot) in self.0.iter_mut().enumerate() {
            *slot = *slot && keep(i);
        }
    }
}

/// Gender constraint: a specific `gender_label` value, or the [`ALL`] wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum GenderFilter {
    #[default]
    All,
    Only(String),
}

impl GenderFilter {
    /// Parses a control value; [`ALL`] is the wildcard, anything else is a label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == ALL {
            Self::All
        } else {
            Self::Only(label.to_owned())
        }
    }

    #[must_use]
    pub fn matches(&self, label: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == label,
        }
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(label) => f.write_str(label),
        }
    }
}

impl Serialize for GenderFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Inclusive integer range over a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumericRange {
    pub min: i64,
    pub max: i64,
}

impl NumericRange {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Whether `value` is present and within `[min, max]`.
    ///
    /// ```
    /// use nhanes_analysis::filter::NumericRange;
    ///
    /// let range = NumericRange::new(6, 8);
    /// assert!(range.contains(Some(6.0)));
    /// assert!(range.contains(Some(8.0)));
    /// assert!(!range.contains(Some(8.5)));
    /// assert!(!range.contains(None));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn contains(&self, value: Option<f64>) -> bool {
        value.is_some_and(|v| (self.min as f64..=self.max as f64).contains(&v))
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// User-chosen constraints. `None` ranges leave the column unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterConstraints {
    pub gender: GenderFilter,
    pub sleep: Option<NumericRange>,
    pub sugar: Option<NumericRange>,
}

/// Builds the selection mask for `constraints`.
///
/// Rows with a missing value in a range-constrained column are excluded.
#[must_use]
pub fn build_mask(rows: &RowSet, constraints: &FilterConstraints) -> RowMask {
    let mut mask = RowMask::all(rows.len());

    if let (GenderFilter::Only(_), Some(labels)) =
        (&constraints.gender, rows.categorical(Field::GenderLabel))
    {
        mask.and_with(|i| constraints.gender.matches(labels[i]));
    }

    for (field, range) in [
        (Field::SleepAvg, constraints.sleep),
        (Field::SugarAvg, constraints.sugar),
    ] {
        if let (Some(range), Some(values)) = (range, rows.numeric(field)) {
            mask.and_with(|i| range.contains(values[i]));
        }
    }

    mask
}

/// Filters `rows`, producing a new row-set.
#[must_use]
pub fn apply(rows: &RowSet, constraints: &FilterConstraints) -> RowSet {
    rows.select(&build_mask(rows, constraints))
}

/// Choices for the gender control: [`ALL`] followed by the sorted distinct labels.
#[must_use]
pub fn gender_options(rows: &RowSet) -> Vec<&'static str> {
    let mut labels = rows
        .categorical(Field::GenderLabel)
        .map(<[_]>::to_vec)
        .unwrap_or_default();
    labels.sort_unstable();
    labels.dedup();
    let mut options = vec![ALL];
    options.extend(labels);
    options
}

/// Tunable inputs of the default control values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterDefaultsConfig {
    /// Outer bounds of the sleep control, in hours.
    pub sleep_bounds: NumericRange,
    /// Sugar range assumed when `sugar_avg` is absent or entirely missing.
    pub sugar_fallback: NumericRange,
    /// Largest default upper value of the sugar control. Not a filter rule.
    pub sugar_default_cap: i64,
}

impl Default for FilterDefaultsConfig {
    fn default() -> Self {
        Self {
            sleep_bounds: NumericRange::new(0, 12),
            sugar_fallback: NumericRange::new(0, 400),
            sugar_default_cap: 300,
        }
    }
}

/// A range control: selectable bounds and the initially selected range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeControl {
    pub bounds: NumericRange,
    pub default: NumericRange,
}

/// Initial control values derived from the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterDefaults {
    pub genders: Vec<&'static str>,
    pub sleep: RangeControl,
    pub sugar: RangeControl,
}

impl FilterDefaults {
    #[must_use]
    pub fn compute(rows: &RowSet, config: &FilterDefaultsConfig) -> Self {
        Self {
            genders: gender_options(rows),
            sleep: sleep_control(observed_range(rows, Field::SleepAvg), config),
            sugar: sugar_control(observed_range(rows, Field::SugarAvg), config),
        }
    }

    /// Constraints selecting the default ranges and every gender.
    #[must_use]
    pub fn constraints(&self) -> FilterConstraints {
        FilterConstraints {
            gender: GenderFilter::All,
            sleep: Some(self.sleep.default),
            sugar: Some(self.sugar.default),
        }
    }
}

/// Observed `[min, max]` of a column, truncated toward zero.
#[expect(clippy::cast_possible_truncation)]
fn observed_range(rows: &RowSet, field: Field) -> Option<NumericRange> {
    let column = rows.numeric_column(field)?;
    let (min, max) = column.present().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
    })?;
    Some(NumericRange::new(min.trunc() as i64, max.trunc() as i64))
}

fn sleep_control(observed: Option<NumericRange>, config: &FilterDefaultsConfig) -> RangeControl {
    let bounds = config.sleep_bounds;
    let default = observed.map_or(bounds, |observed| {
        NumericRange::new(
            observed.min.clamp(bounds.min, bounds.max),
            observed.max.clamp(bounds.min, bounds.max),
        )
    });
    RangeControl { bounds, default }
}

fn sugar_control(observed: Option<NumericRange>, config: &FilterDefaultsConfig) -> RangeControl {
    let observed = observed.unwrap_or(config.sugar_fallback);
    let bounds = NumericRange::new(observed.min.max(0), observed.max.max(1));
    let default = NumericRange::new(
        bounds.min,
        bounds.max.min(config.sugar_default_cap).max(bounds.min),
    );
    RangeControl { bounds, default }
}
