//! Lenient conversion of raw cell text into numbers.
//!
//! Nothing here fails: anything that cannot be read as a real number becomes `None`.

/// Parses a cell as a real number.
///
/// Surrounding whitespace is ignored. Empty cells, unparseable text and `NaN` are missing.
#[must_use]
pub fn to_numeric(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Parses a cell as an integer code.
///
/// Accepts integral real numbers (`"1"`, `"1.0"`, `"2e0"`); fractional or non-numeric
/// values are not codes.
#[expect(clippy::cast_possible_truncation)]
#[must_use]
pub fn to_code(cell: &str) -> Option<i64> {
    let value = to_numeric(cell)?;
    (value.fract() == 0.0 && value.abs() < 9.0e15).then_some(value as i64)
}

/// Coerces a whole column, turning unparseable cells into missing values.
pub fn coerce_column<'a, I>(cells: I) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = &'a str>,
{
    cells.into_iter().map(to_numeric).collect()
}

/// Whether a column reads as numeric: every non-empty cell parses as a number.
///
/// A column with only empty cells counts as numeric (entirely missing).
pub fn is_numeric_column<'a, I>(cells: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    cells.into_iter().all(|cell| {
        let cell = cell.trim();
        cell.is_empty() || cell.parse::<f64>().is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_numeric() {
        assert_eq!(to_numeric("22.5"), Some(22.5));
        assert_eq!(to_numeric("  7 "), Some(7.0));
        assert_eq!(to_numeric("-1e2"), Some(-100.0));
        assert_eq!(to_numeric(""), None);
        assert_eq!(to_numeric("   "), None);
        assert_eq!(to_numeric("abc"), None);
        assert_eq!(to_numeric("NaN"), None);
        assert_eq!(to_numeric("1,5"), None);
    }

    #[test]
    fn test_parsed_zero_is_not_missing() {
        assert_eq!(to_numeric("0"), Some(0.0));
        assert_eq!(to_code("0"), Some(0));
    }

    #[test]
    fn test_to_code() {
        assert_eq!(to_code("1"), Some(1));
        assert_eq!(to_code("2.0"), Some(2));
        assert_eq!(to_code("1.5"), None);
        assert_eq!(to_code("male"), None);
        assert_eq!(to_code(""), None);
        assert_eq!(to_code("inf"), None);
    }

    #[test]
    fn test_coerce_column() {
        assert_eq!(
            coerce_column(["1", "", "x", "2.5"]),
            vec![Some(1.0), None, None, Some(2.5)]
        );
    }

    #[test]
    fn test_is_numeric_column() {
        assert!(is_numeric_column(["1", "", "3.5"]));
        assert!(is_numeric_column(["", ""]));
        assert!(!is_numeric_column(["1", "n/a"]));
    }
}
