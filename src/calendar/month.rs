use std::fmt;
use std::iter::successors;
use thiserror::Error;
use time::{Date, Month};

/// A displayed month: a year plus a month of that year
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
// Invariant: the wrapped date is always the first of its month
pub(crate) struct YearMonth(Date);

impl YearMonth {
    #[cfg(test)]
    pub(crate) fn new(year: i32, month: Month) -> Result<YearMonth, OutOfTimeError> {
        Date::from_calendar_date(year, month, 1)
            .map(YearMonth)
            .map_err(|_| OutOfTimeError)
    }

    pub(crate) fn containing(date: Date) -> YearMonth {
        YearMonth(
            Date::from_calendar_date(date.year(), date.month(), 1)
                .expect("the first of a date's own month should be representable"),
        )
    }

    pub(crate) fn year(self) -> i32 {
        self.0.year()
    }

    pub(crate) fn month(self) -> Month {
        self.0.month()
    }

    pub(crate) fn first_day(self) -> Date {
        self.0
    }

    /// Iterate over every date in the month in ascending order
    pub(crate) fn days(self) -> impl Iterator<Item = Date> {
        let month = self.month();
        successors(Some(self.0), |d| d.next_day()).take_while(move |d| d.month() == month)
    }

    pub(crate) fn last_day(self) -> Date {
        self.days().last().unwrap_or(self.0)
    }

    pub(crate) fn day_count(self) -> u8 {
        self.last_day().day()
    }

    /// Returns the following month, carrying into the next year after
    /// December
    pub(crate) fn following(self) -> Result<YearMonth, OutOfTimeError> {
        self.last_day()
            .next_day()
            .map(YearMonth)
            .ok_or(OutOfTimeError)
    }

    /// Returns the preceding month, carrying into the previous year before
    /// January
    pub(crate) fn preceding(self) -> Result<YearMonth, OutOfTimeError> {
        self.0
            .previous_day()
            .map(YearMonth::containing)
            .ok_or(OutOfTimeError)
    }

    /// Returns the date in this month with day number `day`, or the last day
    /// of the month if the month is too short
    pub(crate) fn clamp_day(self, day: u8) -> Date {
        let day = day.clamp(1, self.day_count());
        Date::from_calendar_date(self.year(), self.month(), day)
            .expect("a day within the month's length should be valid")
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month(), self.year())
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
