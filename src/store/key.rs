use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

pub(crate) static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The canonical `YYYY-MM-DD` identifier of a calendar day
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct DateKey(Date);

impl From<Date> for DateKey {
    fn from(date: Date) -> DateKey {
        DateKey(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(YMD_FMT).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<DateKey, DateKeyError> {
        Date::parse(s, YMD_FMT)
            .map(DateKey)
            .map_err(|source| DateKeyError {
                value: s.to_owned(),
                source,
            })
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(s: String) -> Result<DateKey, DateKeyError> {
        s.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> String {
        key.to_string()
    }
}

#[derive(Debug, Error)]
#[error("invalid date key {value:?}")]
pub(crate) struct DateKeyError {
    value: String,
    source: time::error::Parse,
}
