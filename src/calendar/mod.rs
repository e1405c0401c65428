mod grid;
mod month;
mod view;
mod widget;
pub(crate) use self::grid::build_month_grid;
pub(crate) use self::month::YearMonth;
pub(crate) use self::view::MonthView;
pub(crate) use self::widget::Calendar;
