use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// A persistent string store addressed by key
pub(crate) trait KeyValueStorage {
    /// Returns `Ok(None)` if nothing has been stored under `key`
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &mut T {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_string(key, value)
    }
}

#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("storage key {0:?} cannot be used as a file name")]
    InvalidKey(String),
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

/// Storage backed by a directory, with one `<key>.json` file per key.
/// Writes go through a temporary file in the same directory that then
/// replaces the target, so a crash mid-write never leaves a truncated file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DirStorage {
    dir: PathBuf,
}

impl DirStorage {
    pub(crate) fn new<P: Into<PathBuf>>(dir: P) -> DirStorage {
        DirStorage { dir: dir.into() }
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for DirStorage {
    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => {
                tracing::debug!(file = %path.display(), bytes = s.len(), "read snapshot");
                Ok(Some(s))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    #[tracing::instrument(skip(self, value), fields(dir = %self.dir.display(), bytes = value.len()))]
    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write_err = |source| StorageError::Write {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        let mut temp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        temp.write_all(value.as_bytes()).map_err(write_err)?;
        temp.flush().map_err(write_err)?;
        temp.persist(&path).map_err(|e| write_err(e.error))?;
        tracing::debug!(file = %path.display(), "wrote snapshot");
        Ok(())
    }
}

/// Storage held in memory
#[cfg(test)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStorage {
    entries: std::collections::HashMap<String, String>,
    pub(crate) writes: usize,
}

#[cfg(test)]
impl MemoryStorage {
    pub(crate) fn new() -> MemoryStorage {
        MemoryStorage::default()
    }

    pub(crate) fn with_entry(mut self, key: &str, value: &str) -> MemoryStorage {
        self.entries.insert(key.to_owned(), value.to_owned());
        self
    }
}

#[cfg(test)]
impl KeyValueStorage for MemoryStorage {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_storage_missing_key() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = DirStorage::new(tmp.path());
        assert_eq!(storage.get_string("days").unwrap(), None);
    }

    #[test]
    fn test_dir_storage_set_then_get() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = DirStorage::new(tmp.path().join("nested"));
        storage.set_string("days", r#"{"a": 1}"#).unwrap();
        assert_eq!(
            storage.get_string("days").unwrap().as_deref(),
            Some(r#"{"a": 1}"#)
        );
        assert!(tmp.path().join("nested").join("days.json").exists());
        storage.set_string("days", "{}").unwrap();
        assert_eq!(storage.get_string("days").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_dir_storage_rejects_path_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = DirStorage::new(tmp.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                storage.set_string(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_dir_storage_write_failure() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where the storage directory should be
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let mut storage = DirStorage::new(&blocker);
        assert!(matches!(
            storage.set_string("days", "{}"),
            Err(StorageError::Write { .. })
        ));
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new().with_entry("a", "1");
        assert_eq!(storage.get_string("a").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.get_string("b").unwrap(), None);
        storage.set_string("b", "2").unwrap();
        assert_eq!(storage.get_string("b").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.writes, 1);
    }
}
