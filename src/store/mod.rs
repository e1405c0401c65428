mod book;
mod days;
mod key;
mod record;
mod session;
mod storage;
pub(crate) use self::book::DayBook;
pub(crate) use self::days::DayStore;
pub(crate) use self::key::{DateKey, YMD_FMT};
pub(crate) use self::record::{DayRecord, Progress};
pub(crate) use self::session::Draft;
pub(crate) use self::storage::{DirStorage, KeyValueStorage};
#[cfg(test)]
pub(crate) use self::storage::{MemoryStorage, StorageError};
