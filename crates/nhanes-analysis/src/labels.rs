//! Fixed lookup tables from survey codes to readable labels.

use crate::coerce;

/// Label used for any code outside a table and for unparseable input.
pub const UNKNOWN: &str = "Unknown";

/// A fixed mapping from integer survey codes to labels.
#[derive(Debug, Clone, Copy)]
pub struct CodeTable {
    entries: &'static [(i64, &'static str)],
}

impl CodeTable {
    #[must_use]
    pub const fn new(entries: &'static [(i64, &'static str)]) -> Self {
        Self { entries }
    }

    /// Label for `code`, or `default` if the code is not in the table.
    #[must_use]
    pub fn get_or(&self, code: Option<i64>, default: &'static str) -> &'static str {
        code.and_then(|code| {
            self.entries
                .iter()
                .find_map(|&(c, label)| (c == code).then_some(label))
        })
        .unwrap_or(default)
    }

    /// Label for a raw cell; non-integer and out-of-table cells map to [`UNKNOWN`].
    #[must_use]
    pub fn map_cell(&self, cell: &str) -> &'static str {
        self.get_or(coerce::to_code(cell), UNKNOWN)
    }

    pub fn entries(&self) -> impl Iterator<Item = (i64, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}

/// `RIAGENDR` codes.
pub const GENDER: CodeTable = CodeTable::new(&[(1, "Male"), (2, "Female")]);

/// `RIDRETH1` codes.
pub const RACE: CodeTable = CodeTable::new(&[
    (1, "Mexican American"),
    (2, "Other Hispanic"),
    (3, "Non-Hispanic White"),
    (4, "Non-Hispanic Black"),
    (5, "Other/Multi"),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_mapping() {
        assert_eq!(GENDER.map_cell("1"), "Male");
        assert_eq!(GENDER.map_cell("2"), "Female");
        assert_eq!(GENDER.map_cell("2.0"), "Female");
        assert_eq!(GENDER.map_cell("3"), UNKNOWN);
        assert_eq!(GENDER.map_cell(""), UNKNOWN);
        assert_eq!(GENDER.map_cell("F"), UNKNOWN);
        assert_eq!(GENDER.map_cell("1.5"), UNKNOWN);
    }

    #[test]
    fn test_race_mapping() {
        let expected = [
            "Mexican American",
            "Other Hispanic",
            "Non-Hispanic White",
            "Non-Hispanic Black",
            "Other/Multi",
        ];
        for (code, label) in (1..=5).zip(expected) {
            assert_eq!(RACE.map_cell(&code.to_string()), label);
        }
        assert_eq!(RACE.map_cell("6"), UNKNOWN);
        assert_eq!(RACE.map_cell("0"), UNKNOWN);
        assert_eq!(RACE.map_cell(""), UNKNOWN);
    }

    #[test]
    fn test_custom_default() {
        assert_eq!(GENDER.get_or(Some(9), "Other"), "Other");
        assert_eq!(GENDER.get_or(None, "Other"), "Other");
        assert_eq!(GENDER.get_or(Some(1), "Other"), "Male");
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(GENDER.entries().count(), 2);
        assert_eq!(RACE.entries().count(), 5);
    }
}
