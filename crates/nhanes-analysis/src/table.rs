//! Tabular data containers
//!
//! - [`RawTable`]: the input file as text cells, column-major
//! - [`RowSet`]: the typed table produced by derivation, with numeric columns
//!   (`Option<f64>` per cell) and categorical columns (a label per cell)
//!
//! Both keep rows in input order. A [`RowSet`] is never modified after derivation;
//! filtering builds a new one with [`RowSet::select`].

use std::fmt;

use serde::Serialize;

use crate::{filter::RowMask, schema::Field};

/// A column of raw cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    pub name: String,
    pub cells: Vec<String>,
}

/// The input file as read, before any coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<RawColumn>,
    num_rows: usize,
}

impl RawTable {
    /// Builds a table from a header and row-major records.
    ///
    /// Short records are padded with empty cells; cells beyond the header are dropped.
    pub fn from_records<H, R>(headers: H, records: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator,
        <R::Item as IntoIterator>::Item: Into<String>,
    {
        let mut columns = headers
            .into_iter()
            .map(|name| RawColumn {
                name: name.into().trim().to_owned(),
                cells: vec![],
            })
            .collect::<Vec<_>>();
        let mut num_rows = 0;
        for record in records {
            let mut cells = record.into_iter();
            for column in &mut columns {
                column
                    .cells
                    .push(cells.next().map(Into::into).unwrap_or_default());
            }
            num_rows += 1;
        }
        Self { columns, num_rows }
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[must_use]
    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    #[must_use]
    pub fn has_column(&self, name: impl AsRef<str>) -> bool {
        self.column(name).is_some()
    }

    /// Cells of the first column with the given name.
    #[must_use]
    pub fn column(&self, name: impl AsRef<str>) -> Option<&[String]> {
        let name = name.as_ref();
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.cells.as_slice())
    }
}

/// Stable identifier of a survey subject (`SEQN`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl NumericColumn {
    /// Non-missing values in row order.
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|value| *value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalColumn {
    pub name: String,
    pub values: Vec<&'static str>,
}

/// Typed survey table.
///
/// Columns are looked up by name; a lookup returning `None` means the column is absent
/// from this row-set, which callers treat as "skip", never as an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    ids: Vec<RowId>,
    numeric: Vec<NumericColumn>,
    categorical: Vec<CategoricalColumn>,
}

impl RowSet {
    /// Creates a row-set with the given identifiers and no columns.
    #[must_use]
    pub fn new(ids: Vec<RowId>) -> Self {
        Self {
            ids,
            numeric: vec![],
            categorical: vec![],
        }
    }

    /// Adds a numeric column, replacing any column of the same name.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have one entry per row.
    pub fn push_numeric(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        assert_eq!(values.len(), self.ids.len(), "column length mismatch");
        let name = name.into();
        self.remove_column(&name);
        self.numeric.push(NumericColumn { name, values });
    }

    /// Adds a categorical column, replacing any column of the same name.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have one entry per row.
    pub fn push_categorical(&mut self, name: impl Into<String>, values: Vec<&'static str>) {
        assert_eq!(values.len(), self.ids.len(), "column length mismatch");
        let name = name.into();
        self.remove_column(&name);
        self.categorical.push(CategoricalColumn { name, values });
    }

    fn remove_column(&mut self, name: &str) {
        self.numeric.retain(|column| column.name != name);
        self.categorical.retain(|column| column.name != name);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> &[RowId] {
        &self.ids
    }

    #[must_use]
    pub fn numeric_column(&self, name: impl AsRef<str>) -> Option<&NumericColumn> {
        let name = name.as_ref();
        self.numeric.iter().find(|column| column.name == name)
    }

    #[must_use]
    pub fn numeric(&self, name: impl AsRef<str>) -> Option<&[Option<f64>]> {
        self.numeric_column(name)
            .map(|column| column.values.as_slice())
    }

    #[must_use]
    pub fn categorical(&self, name: impl AsRef<str>) -> Option<&[&'static str]> {
        let name = name.as_ref();
        self.categorical
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.values.as_slice())
    }

    #[must_use]
    pub fn has_column(&self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        self.numeric.iter().any(|column| column.name == name)
            || self.categorical.iter().any(|column| column.name == name)
    }

    /// Whether every field is present.
    #[must_use]
    pub fn has_fields(&self, fields: &[Field]) -> bool {
        fields.iter().all(|field| self.has_column(field))
    }

    #[must_use]
    pub fn numeric_columns(&self) -> &[NumericColumn] {
        &self.numeric
    }

    #[must_use]
    pub fn categorical_columns(&self) -> &[CategoricalColumn] {
        &self.categorical
    }

    /// Names of the numeric columns in table order.
    pub fn numeric_column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.numeric.iter().map(|column| column.name.as_str())
    }

    /// Builds a new row-set holding the rows included by `mask`, in the original order.
    ///
    /// # Panics
    ///
    /// Panics if the mask was built for a row-set of different length.
    #[must_use]
    pub fn select(&self, mask: &RowMask) -> Self {
        assert_eq!(mask.len(), self.len(), "mask length mismatch");
        fn pick<T: Clone>(values: &[T], mask: &RowMask) -> Vec<T> {
            values
                .iter()
                .zip(mask.iter())
                .filter_map(|(value, keep)| keep.then(|| value.clone()))
                .collect()
        }

        Self {
            ids: pick(&self.ids, mask),
            numeric: self
                .numeric
                .iter()
                .map(|column| NumericColumn {
                    name: column.name.clone(),
                    values: pick(&column.values, mask),
                })
                .collect(),
            categorical: self
                .categorical
                .iter()
                .map(|column| CategoricalColumn {
                    name: column.name.clone(),
                    values: pick(&column.values, mask),
                })
                .collect(),
        }
    }
}
