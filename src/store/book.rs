use super::days::DayStore;
use super::key::DateKey;
use super::record::DayRecord;
use super::storage::{KeyValueStorage, StorageError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// The storage key under which the whole [`DayStore`] is kept
pub(crate) const STORAGE_KEY: &str = "goals_calendar_days";

/// Where a snapshot that could not be parsed is copied before the first save
/// replaces it
pub(crate) const BACKUP_KEY: &str = "goals_calendar_days.bad";

/// A [`DayStore`] bound to the storage it is mirrored to.  Every save
/// rewrites the complete snapshot before it takes effect in memory.
#[derive(Debug)]
pub(crate) struct DayBook<S> {
    storage: S,
    days: DayStore,
    // The raw snapshot, if it was present but malformed
    unparsed: Option<String>,
}

impl<S: KeyValueStorage> DayBook<S> {
    /// Read the stored snapshot.  A missing, unreadable, or malformed
    /// snapshot yields an empty book.  A malformed snapshot is kept aside and
    /// copied to [`BACKUP_KEY`] before the first save overwrites it.
    #[tracing::instrument(skip(storage))]
    pub(crate) fn load(storage: S) -> DayBook<S> {
        let mut unparsed = None;
        let days = match storage.get_string(STORAGE_KEY) {
            Ok(Some(raw)) => match DayStore::from_json(&raw) {
                Ok(days) => {
                    info!(count = days.len(), "loaded day records");
                    days
                }
                Err(error) => {
                    warn!(%error, "stored day records are malformed; starting empty");
                    unparsed = Some(raw);
                    DayStore::new()
                }
            },
            Ok(None) => {
                info!("no stored day records; starting empty");
                DayStore::new()
            }
            Err(error) => {
                warn!(%error, "could not read stored day records; starting empty");
                DayStore::new()
            }
        };
        DayBook {
            storage,
            days,
            unparsed,
        }
    }

    pub(crate) fn days(&self) -> &DayStore {
        &self.days
    }

    pub(crate) fn get(&self, key: DateKey) -> DayRecord {
        self.days.get(key)
    }

    /// Set the record for `key` and write the full store to storage.
    ///
    /// If serialization or the write fails, the book is left exactly as it
    /// was.
    #[tracing::instrument(skip(self, key, record), fields(key = %key))]
    pub(crate) fn save(
        &mut self,
        key: DateKey,
        record: DayRecord,
    ) -> Result<&DayStore, SaveError> {
        let updated = self.days.with(key, record);
        let snapshot = updated.to_json()?;
        if let Some(raw) = self.unparsed.as_deref() {
            self.storage.set_string(BACKUP_KEY, raw)?;
            warn!(key = BACKUP_KEY, "copied malformed day records aside");
        }
        self.storage.set_string(STORAGE_KEY, &snapshot)?;
        debug!(count = updated.len(), "saved day records");
        self.days = updated;
        self.unparsed = None;
        Ok(&self.days)
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }
}

#[derive(Debug, Error)]
pub(crate) enum SaveError {
    #[error("failed to serialize day records")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to store day records")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::{DirStorage, MemoryStorage};
    use std::io;
    use std::path::PathBuf;
    use time::macros::date;

    #[derive(Debug)]
    struct ReadOnlyStorage(MemoryStorage);

    impl KeyValueStorage for ReadOnlyStorage {
        fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get_string(key)
        }

        fn set_string(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                path: PathBuf::from("/read-only"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[derive(Debug)]
    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_string(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                path: PathBuf::from("/broken"),
                source: io::Error::other("disk on fire"),
            })
        }

        fn set_string(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn key(date: time::Date) -> DateKey {
        DateKey::from(date)
    }

    #[test]
    fn test_load_missing() {
        let book = DayBook::load(MemoryStorage::new());
        assert!(book.days().is_empty());
    }

    #[test]
    fn test_load_malformed() {
        for raw in ["", "not json", "[]", r#"{"2024-01-01": "oops"}"#, "{\"2024-13-01\": {}}"] {
            let book = DayBook::load(MemoryStorage::new().with_entry(STORAGE_KEY, raw));
            assert!(book.days().is_empty(), "{raw:?}");
        }
    }

    #[test]
    fn test_load_unreadable() {
        let book = DayBook::load(BrokenStorage);
        assert!(book.days().is_empty());
    }

    #[test]
    fn test_load_existing() {
        let storage = MemoryStorage::new().with_entry(
            STORAGE_KEY,
            r#"{"2024-01-05": {"note": "gym", "progress": 80}, "2024-01-06": {"progress": 120}}"#,
        );
        let book = DayBook::load(storage);
        assert_eq!(book.get(key(date!(2024 - 01 - 05))), DayRecord::new("gym", 80));
        assert_eq!(book.get(key(date!(2024 - 01 - 06))), DayRecord::new("", 100));
    }

    #[test]
    fn test_null_fields_keep_other_records() {
        let storage = MemoryStorage::new().with_entry(
            STORAGE_KEY,
            r#"{"2024-01-05": {"note": "gym", "progress": 80}, "2024-01-06": {"note": null, "progress": 40}}"#,
        );
        let mut book = DayBook::load(storage);
        assert_eq!(book.days().len(), 2);
        assert_eq!(book.get(key(date!(2024 - 01 - 06))), DayRecord::new("", 40));
        book.save(key(date!(2024 - 01 - 07)), DayRecord::new("new", 10))
            .unwrap();
        let raw = book.storage().get_string(STORAGE_KEY).unwrap().unwrap();
        let stored = DayStore::from_json(&raw).unwrap();
        assert_eq!(stored.get(key(date!(2024 - 01 - 05))), DayRecord::new("gym", 80));
        assert_eq!(stored.len(), 3);
    }

    #[test]
    fn test_malformed_snapshot_is_backed_up_before_overwrite() {
        let raw = r#"{"2024-01-05": {"note": "gym", "progress": 80.5}}"#;
        let mut book = DayBook::load(MemoryStorage::new().with_entry(STORAGE_KEY, raw));
        assert!(book.days().is_empty());
        assert_eq!(book.storage().get_string(BACKUP_KEY).unwrap(), None);
        let k = key(date!(2024 - 01 - 07));
        book.save(k, DayRecord::new("new", 10)).unwrap();
        assert_eq!(
            book.storage().get_string(BACKUP_KEY).unwrap().as_deref(),
            Some(raw)
        );
        assert_eq!(book.storage().writes, 2);
        book.save(k, DayRecord::new("newer", 20)).unwrap();
        assert_eq!(book.storage().writes, 3);
        assert_eq!(
            book.storage().get_string(BACKUP_KEY).unwrap().as_deref(),
            Some(raw)
        );
    }

    #[test]
    fn test_backup_survives_in_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("goals_calendar_days.json"), "{oops").unwrap();
        let mut book = DayBook::load(DirStorage::new(tmp.path()));
        book.save(key(date!(2024 - 01 - 07)), DayRecord::new("new", 10))
            .unwrap();
        let backup = std::fs::read_to_string(tmp.path().join("goals_calendar_days.bad.json"))
            .unwrap();
        assert_eq!(backup, "{oops");
    }

    #[test]
    fn test_failed_backup_refuses_overwrite() {
        let storage = MemoryStorage::new().with_entry(STORAGE_KEY, "not json");
        let mut book = DayBook::load(ReadOnlyStorage(storage));
        let r = book.save(key(date!(2024 - 01 - 07)), DayRecord::new("new", 10));
        assert!(matches!(r, Err(SaveError::Storage(StorageError::Write { .. }))));
        assert!(book.days().is_empty());
        assert_eq!(
            book.storage().0.get_string(STORAGE_KEY).unwrap().as_deref(),
            Some("not json")
        );
    }

    #[test]
    fn test_save_then_get() {
        let mut book = DayBook::load(MemoryStorage::new());
        let k = key(date!(2024 - 01 - 05));
        book.save(k, DayRecord::new("stretch", 57)).unwrap();
        assert_eq!(book.get(k), DayRecord::new("stretch", 57));
        assert_eq!(book.get(key(date!(2024 - 01 - 06))), DayRecord::default());
    }

    #[test]
    fn test_save_clamps() {
        let mut book = DayBook::load(MemoryStorage::new());
        let a = key(date!(2024 - 01 - 01));
        let b = key(date!(2024 - 01 - 02));
        let c = key(date!(2024 - 01 - 03));
        book.save(a, DayRecord::new("", -5)).unwrap();
        book.save(b, DayRecord::new("", 150)).unwrap();
        book.save(c, DayRecord::new("", 57)).unwrap();
        assert_eq!(book.get(a).progress.get(), 0);
        assert_eq!(book.get(b).progress.get(), 100);
        assert_eq!(book.get(c).progress.get(), 57);
    }

    #[test]
    fn test_save_writes_through() {
        let mut storage = MemoryStorage::new();
        let k = key(date!(2024 - 01 - 05));
        {
            let mut book = DayBook::load(&mut storage);
            book.save(k, DayRecord::new("a \"quoted\" note", 40)).unwrap();
            assert_eq!(book.storage().writes, 1);
        }
        let reloaded = DayBook::load(&mut storage);
        assert_eq!(reloaded.get(k), DayRecord::new("a \"quoted\" note", 40));
    }

    #[test]
    fn test_snapshot_matches_memory_after_every_save() {
        let mut book = DayBook::load(MemoryStorage::new());
        for (i, day) in (1..=5).enumerate() {
            let k = key(time::Date::from_calendar_date(2024, time::Month::March, day).unwrap());
            let saved = book
                .save(k, DayRecord::new(format!("day {day}"), i64::from(day) * 10))
                .unwrap()
                .clone();
            let raw = book.storage().get_string(STORAGE_KEY).unwrap().unwrap();
            assert_eq!(DayStore::from_json(&raw).unwrap(), saved);
            assert_eq!(saved.len(), i + 1);
        }
    }

    #[test]
    fn test_failed_save_leaves_book_unchanged() {
        let k = key(date!(2024 - 01 - 05));
        let storage = MemoryStorage::new().with_entry(
            STORAGE_KEY,
            r#"{"2024-01-05": {"note": "old", "progress": 10}}"#,
        );
        let mut book = DayBook::load(ReadOnlyStorage(storage));
        let before = book.days().clone();
        let r = book.save(k, DayRecord::new("new", 90));
        assert!(matches!(r, Err(SaveError::Storage(StorageError::Write { .. }))));
        assert_eq!(book.days(), &before);
        assert_eq!(book.get(k), DayRecord::new("old", 10));
    }

    #[test]
    fn test_get_does_not_write() {
        let book = DayBook::load(MemoryStorage::new());
        let _ = book.get(key(date!(2024 - 01 - 05)));
        assert!(book.days().is_empty());
        assert_eq!(book.storage().writes, 0);
    }
}
