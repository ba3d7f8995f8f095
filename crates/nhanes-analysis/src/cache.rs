//! Path-keyed dataset cache
//!
//! Prepared row-sets are loaded once per distinct path and kept for the lifetime of the
//! cache. Failed loads are not cached, so a fixed file is picked up on the next request.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    rc::Rc,
};

use tracing::debug;

use crate::{
    load::{self, LoadError},
    table::RowSet,
};

/// Something that turns a path into a prepared row-set.
pub trait DatasetSource {
    fn load(&self, path: &Path) -> Result<RowSet, LoadError>;
}

/// Reads CSV files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSource;

impl DatasetSource for CsvSource {
    fn load(&self, path: &Path) -> Result<RowSet, LoadError> {
        load::load_and_prepare(path)
    }
}

impl<F> DatasetSource for F
where
    F: Fn(&Path) -> Result<RowSet, LoadError>,
{
    fn load(&self, path: &Path) -> Result<RowSet, LoadError> {
        self(path)
    }
}

/// Loaded row-sets keyed by the path they were requested with.
///
/// Paths are compared as given; `data.csv` and `./data.csv` are separate entries.
#[derive(Debug, Default)]
pub struct DatasetCache<S = CsvSource> {
    source: S,
    entries: HashMap<PathBuf, Rc<RowSet>>,
}

impl DatasetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> DatasetCache<S>
where
    S: DatasetSource,
{
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            entries: HashMap::new(),
        }
    }

    /// Returns the row-set for `path`, loading it on first use.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Rc<RowSet>, LoadError> {
        if let Some(rows) = self.entries.get(path) {
            debug!(path = %path.display(), "dataset cache hit");
            return Ok(Rc::clone(rows));
        }
        let rows = Rc::new(self.source.load(path)?);
        self.entries.insert(path.to_owned(), Rc::clone(&rows));
        Ok(rows)
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::table::RowId;

    use super::*;

    #[test]
    fn test_loads_once_per_path() {
        let calls = Cell::new(0);
        let mut cache = DatasetCache::with_source(|path: &Path| -> Result<RowSet, LoadError> {
            calls.set(calls.get() + 1);
            Ok(RowSet::new(vec![RowId::new(path.display().to_string())]))
        });

        let a = cache.get_or_load(Path::new("a.csv")).unwrap();
        let again = cache.get_or_load(Path::new("a.csv")).unwrap();
        assert!(Rc::ptr_eq(&a, &again));
        assert_eq!(calls.get(), 1);

        let b = cache.get_or_load(Path::new("b.csv")).unwrap();
        assert_eq!(b.ids(), [RowId::new("b.csv")]);
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let calls = Cell::new(0);
        let mut cache = DatasetCache::with_source(|path: &Path| -> Result<RowSet, LoadError> {
            calls.set(calls.get() + 1);
            Err(LoadError::MissingIdentifier {
                path: path.to_owned(),
            })
        });

        assert!(cache.get_or_load(Path::new("bad.csv")).is_err());
        assert!(cache.get_or_load(Path::new("bad.csv")).is_err());
        assert_eq!(calls.get(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "SEQN,BMXBMI\n1,22\n").unwrap();

        let mut cache = DatasetCache::new();
        let rows = cache.get_or_load(&path).unwrap();
        assert_eq!(rows.len(), 1);

        // served from memory once cached
        std::fs::remove_file(&path).unwrap();
        assert!(cache.contains(&path));
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);
    }
}
