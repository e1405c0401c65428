use super::grid::WEEKDAYS;
use super::view::MonthView;
use crate::store::{DateKey, DayRecord, DayStore};
use crate::theme::{
    progress_style, FOOTER_STYLE, NOTE_MARKER_STYLE, SELECTED_STYLE, TITLE_STYLE, TODAY_STYLE,
    WEEKDAY_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use time::Weekday;

static HEADER: &str = " Su     Mo     Tu     We     Th     Fr     Sa ";

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = 46;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar: the day numbers
/// followed by the progress line
const WEEK_LINES: u16 = 2;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

/// Offset from the start of a day's column at which its note marker is drawn
const MARKER_OFFSET: u16 = 4;

const ACS_HLINE: char = '─';

/// The month view: one row per week, with each day's progress beneath its
/// number and a summary of the selected day at the bottom
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Calendar<'a> {
    view: &'a MonthView,
    days: &'a DayStore,
}

impl<'a> Calendar<'a> {
    pub(crate) fn new(view: &'a MonthView, days: &'a DayStore) -> Self {
        Calendar { view, days }
    }

    fn main_area(area: Rect) -> Rect {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        Rect {
            x: area.x.saturating_add(left),
            y: area.y,
            width: MAIN_WIDTH.min(area.width),
            height: area.height,
        }
    }

    /// Map a terminal position inside `area` to the (week, weekday) grid
    /// coordinates drawn there, if any
    pub(crate) fn cell_at(area: Rect, column: u16, row: u16) -> Option<(usize, Weekday)> {
        let main = Self::main_area(area);
        let x = column.checked_sub(main.x)?;
        let y = row.checked_sub(main.y)?.checked_sub(HEADER_LINES)?;
        if x >= main.width || y >= main.height {
            return None;
        }
        let wd = WEEKDAYS.get(usize::from(x / DAY_WIDTH)).copied()?;
        Some((usize::from(y / WEEK_LINES), wd))
    }
}

impl Widget for Calendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = Self::main_area(area);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.view.grid().month().to_string());
        canvas.draw_header();
        let selected = self.view.selected();
        let today = self.view.today();
        let weeks = self.view.grid().weeks();
        for (i, week) in std::iter::zip(0u16.., weeks) {
            for (wd, date) in week.enumerate() {
                let mut style = if date == selected {
                    SELECTED_STYLE
                } else {
                    Style::new()
                };
                if date == today {
                    style = style.patch(TODAY_STYLE);
                }
                canvas.draw_day(i, wd, date.day(), date == selected, style);
                if let Some(record) = self.days.lookup(DateKey::from(date)) {
                    canvas.draw_record_line(i, wd, record);
                }
            }
        }
        let footer_row = u16::try_from(weeks.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(WEEK_LINES)
            .saturating_add(HEADER_LINES);
        let key = DateKey::from(selected);
        let record = self.days.get(key);
        let mut footer = format!("{key}  {}", record.progress);
        if record.has_note() {
            footer.push_str("  ");
            footer.push_str(record.headline());
        }
        canvas.mvprint(footer_row, 0, footer, Some(FOOTER_STYLE));
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(Span::raw(title).width()).unwrap_or(u16::MAX);
        self.mvprint(
            0,
            MAIN_WIDTH.saturating_sub(width) / 2,
            title,
            Some(TITLE_STYLE),
        );
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, wd: Weekday, day: u8, selected: bool, style: Style) {
        let s = if selected {
            format!("[{day:2}]")
        } else {
            format!(" {day:2} ")
        };
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            day_column(wd),
            s,
            Some(style),
        );
    }

    fn draw_record_line(&mut self, week_no: u16, wd: Weekday, record: &DayRecord) {
        let y = week_no * WEEK_LINES + HEADER_LINES + 1;
        let x = day_column(wd);
        if record.progress.get() > 0 {
            let pct = record.progress.to_string();
            self.mvprint(
                y,
                x,
                format!("{pct:>4}"),
                Some(progress_style(record.progress)),
            );
        }
        if record.has_note() {
            self.mvprint(y, x + MARKER_OFFSET, "*", Some(NOTE_MARKER_STYLE));
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // A Paragraph truncates text running past the calendar's area,
            // but the Rect it is given must lie entirely within the frame.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

fn day_column(wd: Weekday) -> u16 {
    DAY_WIDTH * u16::from(wd.number_days_from_sunday())
}
