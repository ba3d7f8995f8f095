use std::str::FromStr;

use nhanes_analysis::{
    filter::{FilterConstraints, FilterDefaults, FilterDefaultsConfig, GenderFilter, NumericRange},
    table::RowSet,
};
use tracing::warn;

/// Initial filter values shared by the dashboard and summary commands.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct FilterArg {
    /// Gender label to keep ("All" keeps every row)
    #[arg(long)]
    pub(crate) gender: Option<String>,
    /// Average sleep hours to keep [default: observed range within 0..12]
    #[arg(long, value_name = "MIN..MAX")]
    pub(crate) sleep: Option<RangeArg>,
    /// Average daily sugar grams to keep [default: observed range, capped]
    #[arg(long, value_name = "MIN..MAX")]
    pub(crate) sugar: Option<RangeArg>,
    /// Largest upper value of the default sugar range
    #[arg(long, value_name = "GRAMS")]
    pub(crate) sugar_default_cap: Option<i64>,
}

impl FilterArg {
    pub(crate) fn defaults_config(&self) -> FilterDefaultsConfig {
        let config = FilterDefaultsConfig::default();
        FilterDefaultsConfig {
            sugar_default_cap: self.sugar_default_cap.unwrap_or(config.sugar_default_cap),
            ..config
        }
    }

    /// Control defaults for `rows`, and the constraints with command-line overrides applied.
    pub(crate) fn resolve(&self, rows: &RowSet) -> (FilterDefaults, FilterConstraints) {
        let defaults = FilterDefaults::compute(rows, &self.defaults_config());
        let mut constraints = defaults.constraints();
        if let Some(gender) = &self.gender {
            if !defaults.genders.iter().any(|option| *option == gender.as_str()) {
                warn!(%gender, options = ?defaults.genders, "gender matches no rows");
            }
            constraints.gender = GenderFilter::from_label(gender);
        }
        if let Some(sleep) = self.sleep {
            constraints.sleep = Some(sleep.into());
        }
        if let Some(sugar) = self.sugar {
            constraints.sugar = Some(sugar.into());
        }
        (defaults, constraints)
    }
}

/// An inclusive `MIN..MAX` integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RangeArg {
    min: i64,
    max: i64,
}

impl From<RangeArg> for NumericRange {
    fn from(range: RangeArg) -> Self {
        NumericRange::new(range.min, range.max)
    }
}

#[derive(Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub(crate) enum ParseRangeError {
    #[display("expected MIN..MAX")]
    MissingSeparator,
    #[display("invalid bound '{bound}'")]
    InvalidBound { bound: String },
    #[display("minimum {min} is greater than maximum {max}")]
    Reversed { min: i64, max: i64 },
}

impl FromStr for RangeArg {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .split_once("..")
            .ok_or(ParseRangeError::MissingSeparator)?;
        let parse = |bound: &str| {
            bound
                .trim()
                .parse::<i64>()
                .map_err(|_| ParseRangeError::InvalidBound {
                    bound: bound.to_owned(),
                })
        };
        let (min, max) = (parse(min)?, parse(max)?);
        if min > max {
            return Err(ParseRangeError::Reversed { min, max });
        }
        Ok(Self { min, max })
    }
}

#[cfg(test)]
mod tests {
    use nhanes_analysis::{derive::derive, table::RawTable};

    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!("6..9".parse::<RangeArg>(), Ok(RangeArg { min: 6, max: 9 }));
        assert_eq!(" 0 .. 300 ".parse::<RangeArg>(), Ok(RangeArg { min: 0, max: 300 }));
        assert_eq!("-5..5".parse::<RangeArg>(), Ok(RangeArg { min: -5, max: 5 }));
        assert_eq!(
            "9".parse::<RangeArg>(),
            Err(ParseRangeError::MissingSeparator)
        );
        assert_eq!(
            "a..9".parse::<RangeArg>(),
            Err(ParseRangeError::InvalidBound { bound: "a".into() })
        );
        assert_eq!(
            "9..6".parse::<RangeArg>(),
            Err(ParseRangeError::Reversed { min: 9, max: 6 })
        );
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let rows = derive(&RawTable::from_records(
            ["SEQN", "SLD012", "DR1TSUGR", "RIAGENDR"],
            [["1", "5", "120", "1"], ["2", "8", "500", "2"]],
        ));
        let arg = FilterArg {
            gender: Some("Female".into()),
            sleep: Some(RangeArg { min: 6, max: 9 }),
            sugar: None,
            sugar_default_cap: Some(450),
        };
        let (defaults, constraints) = arg.resolve(&rows);

        assert_eq!(defaults.sugar.default, NumericRange::new(120, 450));
        assert_eq!(constraints.gender, GenderFilter::from_label("Female"));
        assert_eq!(constraints.sleep, Some(NumericRange::new(6, 9)));
        assert_eq!(constraints.sugar, Some(NumericRange::new(120, 450)));
    }

    #[test]
    fn test_resolve_without_overrides_uses_defaults() {
        let rows = derive(&RawTable::from_records(["SEQN", "SLD012"], [["1", "7.5"]]));
        let (defaults, constraints) = FilterArg::default().resolve(&rows);
        assert_eq!(constraints, defaults.constraints());
        assert_eq!(defaults.sugar.default, NumericRange::new(0, 300));
    }
}
