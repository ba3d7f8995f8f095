//! CSV loading
//!
//! Loading is the only fallible step of the pipeline. Cell-level problems (empty cells,
//! text in numeric columns, short rows) are left for derivation to degrade; a file that
//! cannot be opened or tokenized, or that lacks `SEQN`, is an error carrying its path.

use std::{
    collections::HashSet,
    fs::File,
    io,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    derive,
    schema::Field,
    table::{RawTable, RowSet},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open '{}': {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to parse '{}': {source}", path.display())]
    Parse { path: PathBuf, source: csv::Error },
    #[display("'{}' has no {} column", path.display(), Field::Seqn)]
    MissingIdentifier { path: PathBuf },
}

impl LoadError {
    /// Path of the file that failed to load.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. }
            | Self::Parse { path, .. }
            | Self::MissingIdentifier { path } => path,
        }
    }
}

/// Reads a CSV file into a [`RawTable`] without interpreting any cell.
pub fn read_csv(path: &Path) -> Result<RawTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    read_csv_from(file, path)
}

/// Reads CSV text from `reader`; `path` is only used in errors.
pub fn read_csv_from<R>(reader: R, path: &Path) -> Result<RawTable, LoadError>
where
    R: io::Read,
{
    let parse_error = |source| LoadError::Parse {
        path: path.to_owned(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers().map_err(parse_error)?.clone();
    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(parse_error)?;

    Ok(RawTable::from_records(
        headers.iter(),
        records.iter().map(|record| record.iter()),
    ))
}

/// Reads and derives a CSV file.
pub fn load_and_prepare(path: &Path) -> Result<RowSet, LoadError> {
    let raw = read_csv(path)?;
    prepare(&raw, path)
}

/// Validates and derives an already-read table.
pub fn prepare(raw: &RawTable, path: &Path) -> Result<RowSet, LoadError> {
    let Some(ids) = raw.column(Field::Seqn) else {
        return Err(LoadError::MissingIdentifier {
            path: path.to_owned(),
        });
    };

    let mut seen = HashSet::with_capacity(ids.len());
    let duplicates = ids.iter().filter(|id| !seen.insert(id.trim())).count();
    if duplicates > 0 {
        warn!(path = %path.display(), duplicates, "duplicate SEQN values");
    }

    debug!(
        path = %path.display(),
        columns = raw.columns().len(),
        rows = raw.num_rows(),
        "read CSV"
    );
    let rows = derive::derive(raw);
    info!(
        path = %path.display(),
        rows = rows.len(),
        numeric_columns = rows.numeric_columns().len(),
        categorical_columns = rows.categorical_columns().len(),
        "dataset prepared"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_prepare() {
        let file = write_csv(
            "SEQN,DR1TSUGR,DR2TSUGR,SLD012,SLD013,RIAGENDR,BMXBMI\n\
             1,100,,8,8,1,22\n\
             2,,,5,5,2,30\n",
        );
        let rows = load_and_prepare(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.numeric("sugar_avg").unwrap(), [Some(100.0), None]);
        assert_eq!(rows.categorical("gender_label").unwrap(), ["Male", "Female"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let file = write_csv("SEQN,BMXBMI,RIAGENDR\n1,22\n2,30,2\n");
        let rows = load_and_prepare(file.path()).unwrap();
        assert_eq!(rows.numeric("BMXBMI").unwrap(), [Some(22.0), Some(30.0)]);
        assert_eq!(rows.categorical("gender_label").unwrap(), ["Unknown", "Female"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = load_and_prepare(&path).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert_eq!(err.path(), path);
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_missing_identifier() {
        let file = write_csv("BMXBMI\n22\n");
        let err = load_and_prepare(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingIdentifier { .. }));
        assert!(err.to_string().contains("SEQN"));
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"SEQN,BMXBMI\n1,\xff\xfe\n").unwrap();
        let err = load_and_prepare(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let file = write_csv("SEQN,BMXBMI\n");
        let rows = load_and_prepare(file.path()).unwrap();
        assert!(rows.is_empty());
        assert_eq!(rows.numeric("BMXBMI").map(<[_]>::len), Some(0));
    }
}
