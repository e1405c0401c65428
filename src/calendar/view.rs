use super::grid::{build_month_grid, MonthGrid};
use super::month::{OutOfTimeError, YearMonth};
use time::{Date, Duration, Weekday};

/// The currently displayed month along with the selected day
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthView {
    today: Date,
    selected: Date,
    grid: MonthGrid,
}

impl MonthView {
    pub(crate) fn new(today: Date) -> MonthView {
        MonthView {
            today,
            selected: today,
            grid: build_month_grid(YearMonth::containing(today)),
        }
    }

    pub(crate) fn start_date(mut self, date: Date) -> MonthView {
        self.select(date);
        self
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn selected(&self) -> Date {
        self.selected
    }

    pub(crate) fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    // The grid is only rebuilt when the selection leaves the displayed month
    fn select(&mut self, date: Date) {
        let month = YearMonth::containing(date);
        if month != self.grid.month() {
            tracing::debug!(%month, "building month grid");
            self.grid = build_month_grid(month);
        }
        self.selected = date;
    }

    /// Move the selection by `days`, following it into adjacent months
    pub(crate) fn move_days(&mut self, days: i64) -> Result<(), OutOfTimeError> {
        let date = self
            .selected
            .checked_add(Duration::days(days))
            .ok_or(OutOfTimeError)?;
        self.select(date);
        Ok(())
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        let month = self.grid.month().following()?;
        self.select(month.clamp_day(self.selected.day()));
        Ok(())
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        let month = self.grid.month().preceding()?;
        self.select(month.clamp_day(self.selected.day()));
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.select(self.today);
    }

    /// Select the date in the given grid cell.  Placeholder cells are not
    /// selectable, and selecting one returns `None` without changing
    /// anything.
    pub(crate) fn select_cell(&mut self, week: usize, wd: Weekday) -> Option<Date> {
        let date = self.grid.cell(week, wd)?;
        self.select(date);
        Some(date)
    }
}
