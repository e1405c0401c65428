use super::key::DateKey;
use super::record::DayRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every recorded day, keyed by date
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub(crate) struct DayStore(BTreeMap<DateKey, DayRecord>);

impl DayStore {
    pub(crate) fn new() -> DayStore {
        DayStore::default()
    }

    /// Returns the record for `key`, or an empty record if nothing has been
    /// saved for that day.  Never modifies the store.
    pub(crate) fn get(&self, key: DateKey) -> DayRecord {
        self.lookup(key).cloned().unwrap_or_default()
    }

    pub(crate) fn lookup(&self, key: DateKey) -> Option<&DayRecord> {
        self.0.get(&key)
    }

    /// Returns a copy of the store with `key` set to `record`
    pub(crate) fn with(&self, key: DateKey, record: DayRecord) -> DayStore {
        let mut days = self.0.clone();
        days.insert(key, record);
        DayStore(days)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the records saved for days in `first..=last`
    pub(crate) fn range(
        &self,
        first: DateKey,
        last: DateKey,
    ) -> impl Iterator<Item = (DateKey, &DayRecord)> + '_ {
        self.0.range(first..=last).map(|(&k, r)| (k, r))
    }

    pub(crate) fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub(crate) fn from_json(s: &str) -> Result<DayStore, serde_json::Error> {
        serde_json::from_str(s)
    }
}
