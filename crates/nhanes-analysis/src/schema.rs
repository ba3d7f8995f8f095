//! Logical schema of the survey table
//!
//! Every column the dashboard knows about is a [`Field`]. The schema records which fields
//! come from the input file and which are derived, whether a field is required, and what
//! kind of values it holds. Input files may contain any subset of the optional fields plus
//! arbitrary extra columns; only [`Field::Seqn`] is required.

use std::fmt;

/// Value kind stored in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Stable row identifier, kept as text.
    Identifier,
    /// Real numbers or integer codes, possibly missing.
    Numeric,
    /// Text labels; never missing.
    Categorical,
}

/// Whether a field must be present in the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Where a field's values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Read from the input file.
    Source,
    /// Computed by the derivation pipeline.
    Derived,
}

/// A column of the logical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Respondent sequence number (`SEQN`)
    Seqn,
    /// Total sugars, first dietary recall (`DR1TSUGR`)
    SugarDay1,
    /// Total sugars, second dietary recall (`DR2TSUGR`)
    SugarDay2,
    /// Energy intake, first dietary recall (`DR1TKCAL`)
    KcalDay1,
    /// Energy intake, second dietary recall (`DR2TKCAL`)
    KcalDay2,
    /// Usual sleep hours on weekdays (`SLD012`)
    SleepWeekday,
    /// Usual sleep hours on weekends (`SLD013`)
    SleepWeekend,
    /// Gender code (`RIAGENDR`)
    GenderCode,
    /// Race/Hispanic origin code (`RIDRETH1`)
    RaceCode,
    /// Body mass index (`BMXBMI`)
    Bmi,
    /// Age in years at screening (`RIDAGEYR`)
    Age,
    /// Standing height in cm (`BMXHT`)
    Height,
    /// Weight in kg (`BMXWT`)
    Weight,
    /// Ratio of family income to poverty (`INDFMPIR`)
    IncomeRatio,
    SugarAvg,
    KcalAvg,
    SleepAvg,
    SleepGroup,
    GenderLabel,
    RaceLabel,
}

impl Field {
    /// Every field, source fields first.
    pub const ALL: [Self; 20] = [
        Self::Seqn,
        Self::SugarDay1,
        Self::SugarDay2,
        Self::KcalDay1,
        Self::KcalDay2,
        Self::SleepWeekday,
        Self::SleepWeekend,
        Self::GenderCode,
        Self::RaceCode,
        Self::Bmi,
        Self::Age,
        Self::Height,
        Self::Weight,
        Self::IncomeRatio,
        Self::SugarAvg,
        Self::KcalAvg,
        Self::SleepAvg,
        Self::SleepGroup,
        Self::GenderLabel,
        Self::RaceLabel,
    ];

    /// Column name as it appears in the input file or the derived table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Seqn => "SEQN",
            Self::SugarDay1 => "DR1TSUGR",
            Self::SugarDay2 => "DR2TSUGR",
            Self::KcalDay1 => "DR1TKCAL",
            Self::KcalDay2 => "DR2TKCAL",
            Self::SleepWeekday => "SLD012",
            Self::SleepWeekend => "SLD013",
            Self::GenderCode => "RIAGENDR",
            Self::RaceCode => "RIDRETH1",
            Self::Bmi => "BMXBMI",
            Self::Age => "RIDAGEYR",
            Self::Height => "BMXHT",
            Self::Weight => "BMXWT",
            Self::IncomeRatio => "INDFMPIR",
            Self::SugarAvg => "sugar_avg",
            Self::KcalAvg => "kcal_avg",
            Self::SleepAvg => "sleep_avg",
            Self::SleepGroup => "sleep_group",
            Self::GenderLabel => "gender_label",
            Self::RaceLabel => "race_label",
        }
    }

    /// Looks up a field by its column name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    #[must_use]
    pub const fn presence(self) -> Presence {
        match self {
            Self::Seqn => Presence::Required,
            _ => Presence::Optional,
        }
    }

    #[must_use]
    pub const fn kind(self) -> ColumnKind {
        match self {
            Self::Seqn => ColumnKind::Identifier,
            Self::SleepGroup | Self::GenderLabel | Self::RaceLabel => ColumnKind::Categorical,
            _ => ColumnKind::Numeric,
        }
    }

    #[must_use]
    pub const fn origin(self) -> Origin {
        match self {
            Self::SugarAvg
            | Self::KcalAvg
            | Self::SleepAvg
            | Self::SleepGroup
            | Self::GenderLabel
            | Self::RaceLabel => Origin::Derived,
            _ => Origin::Source,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

/// Pairwise-mean derivations as `(first, second, derived)`.
pub const PAIRWISE_MEANS: [(Field, Field, Field); 3] = [
    (Field::SugarDay1, Field::SugarDay2, Field::SugarAvg),
    (Field::KcalDay1, Field::KcalDay2, Field::KcalAvg),
    (Field::SleepWeekday, Field::SleepWeekend, Field::SleepAvg),
];

/// Columns considered for the correlation heatmap, in display order.
pub const CORRELATION_CANDIDATES: [Field; 8] = [
    Field::Bmi,
    Field::SugarAvg,
    Field::KcalAvg,
    Field::SleepAvg,
    Field::Age,
    Field::Height,
    Field::Weight,
    Field::IncomeRatio,
];

/// Columns pre-selected in the distribution view when present.
pub const DISTRIBUTION_DEFAULTS: [Field; 4] =
    [Field::Bmi, Field::SugarAvg, Field::SleepAvg, Field::KcalAvg];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("bmi"), None);
    }

    #[test]
    fn test_only_identifier_is_required() {
        let required = Field::ALL
            .into_iter()
            .filter(|field| field.presence() == Presence::Required)
            .collect::<Vec<_>>();
        assert_eq!(required, [Field::Seqn]);
    }

    #[test]
    fn test_derived_fields_are_never_identifiers() {
        for field in Field::ALL {
            if field.origin() == Origin::Derived {
                assert_ne!(field.kind(), ColumnKind::Identifier, "{field}");
            }
        }
    }
}
