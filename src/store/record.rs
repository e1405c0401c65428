use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A completion percentage.  Every way of constructing one clamps to
/// `0..=100`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(from = "i64", into = "u8")]
pub(crate) struct Progress(u8);

impl Progress {
    pub(crate) const MAX: Progress = Progress(100);

    pub(crate) fn clamped(value: i64) -> Progress {
        Progress(u8::try_from(value.clamp(0, i64::from(Self::MAX.0))).unwrap_or(Self::MAX.0))
    }

    pub(crate) fn get(self) -> u8 {
        self.0
    }

    pub(crate) fn adjusted(self, delta: i64) -> Progress {
        Progress::clamped(i64::from(self.0).saturating_add(delta))
    }
}

impl From<i64> for Progress {
    fn from(value: i64) -> Progress {
        Progress::clamped(value)
    }
}

impl From<Progress> for u8 {
    fn from(value: Progress) -> u8 {
        value.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// What was recorded for a single day
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct DayRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) note: String,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) progress: Progress,
}

impl DayRecord {
    pub(crate) fn new<S: Into<String>>(note: S, progress: i64) -> DayRecord {
        DayRecord {
            note: note.into(),
            progress: Progress::clamped(progress),
        }
    }

    pub(crate) fn has_note(&self) -> bool {
        !self.note.trim().is_empty()
    }

    /// The first line of the note, for one-line summaries
    pub(crate) fn headline(&self) -> &str {
        self.note.lines().next().unwrap_or_default().trim()
    }
}

// A stored `null` reads the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
