use super::book::{DayBook, SaveError};
use super::key::DateKey;
use super::record::DayRecord;
use super::storage::KeyValueStorage;
use thiserror::Error;

/// An open edit session for a single day.
///
/// Opening a draft only reads from the book.  The book changes only when the
/// draft is saved; discarding (or dropping) it leaves everything as it was.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Draft {
    key: DateKey,
    record: DayRecord,
}

impl Draft {
    pub(crate) fn open<S: KeyValueStorage>(book: &DayBook<S>, key: DateKey) -> Draft {
        tracing::debug!(%key, "opening day");
        Draft {
            key,
            record: book.get(key),
        }
    }

    pub(crate) fn key(&self) -> DateKey {
        self.key
    }

    pub(crate) fn record(&self) -> &DayRecord {
        &self.record
    }

    pub(crate) fn adjust_progress(&mut self, delta: i64) {
        self.record.progress = self.record.progress.adjusted(delta);
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        self.record.note.push(ch);
    }

    pub(crate) fn pop_char(&mut self) -> bool {
        self.record.note.pop().is_some()
    }

    /// Persist the draft to `book`, closing the session.  On failure the
    /// draft is handed back so that editing can continue.
    pub(crate) fn save<S: KeyValueStorage>(
        self,
        book: &mut DayBook<S>,
    ) -> Result<DateKey, SaveFailure> {
        let key = self.key;
        match book.save(key, self.record.clone()) {
            Ok(_) => Ok(key),
            Err(source) => Err(SaveFailure {
                draft: self,
                source,
            }),
        }
    }

    /// Close the session without saving
    pub(crate) fn discard(self) -> DateKey {
        tracing::debug!(key = %self.key, "discarding edits");
        self.key
    }
}

#[derive(Debug, Error)]
#[error("could not save {}", .draft.key)]
pub(crate) struct SaveFailure {
    pub(crate) draft: Draft,
    pub(crate) source: SaveError,
}
