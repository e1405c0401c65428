use super::month::YearMonth;
use time::{Date, Weekday, Weekday::*};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Weekdays in column order
pub(crate) const WEEKDAYS: [Weekday; DAYS_IN_WEEK] = [
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
];

pub(crate) trait WeekdayExt {
    fn index0(&self) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }
}

/// One row of a month grid, starting on Sunday.  A `None` cell is a
/// placeholder for a day outside the month.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Week([Option<Date>; DAYS_IN_WEEK]);

impl Week {
    fn empty() -> Self {
        Week([None; DAYS_IN_WEEK])
    }

    fn set(&mut self, date: Date) {
        if let Some(cell) = self.0.get_mut(date.weekday().index0()) {
            *cell = Some(date);
        }
    }

    fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub(crate) fn get(&self, wd: Weekday) -> Option<Date> {
        self.0.get(wd.index0()).copied().flatten()
    }

    /// Iterate over all seven cells, placeholders included
    pub(crate) fn cells(&self) -> impl Iterator<Item = Option<Date>> + '_ {
        self.0.iter().copied()
    }

    /// Iterate over the real dates in the week along with their weekdays
    pub(crate) fn enumerate(&self) -> impl Iterator<Item = (Weekday, Date)> + '_ {
        std::iter::zip(WEEKDAYS, self.0).filter_map(|(wd, cell)| cell.map(|d| (wd, d)))
    }
}

/// The week-major grid of one month's dates
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    month: YearMonth,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub(crate) fn month(&self) -> YearMonth {
        self.month
    }

    pub(crate) fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Returns the date at the given row & column, or `None` if the cell is a
    /// placeholder or lies outside the grid
    pub(crate) fn cell(&self, week: usize, wd: Weekday) -> Option<Date> {
        self.weeks.get(week).and_then(|w| w.get(wd))
    }

    /// Iterate over the real dates of the grid in reading order
    #[cfg(test)]
    pub(crate) fn dates(&self) -> impl DoubleEndedIterator<Item = Date> + '_ {
        self.weeks.iter().flat_map(|w| w.0.iter().flatten().copied())
    }
}

/// Lay out the dates of `month` in rows of seven, Sunday first.
///
/// The first week is preceded by placeholders for the days of the previous
/// month, and the last week is padded with placeholders to a full row.
pub(crate) fn build_month_grid(month: YearMonth) -> MonthGrid {
    let mut weeks = Vec::with_capacity(6);
    let mut week = Week::empty();
    for date in month.days() {
        week.set(date);
        if date.weekday() == Saturday {
            weeks.push(std::mem::replace(&mut week, Week::empty()));
        }
    }
    if !week.is_empty() {
        weeks.push(week);
    }
    MonthGrid { month, weeks }
}
