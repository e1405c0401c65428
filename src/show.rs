use crate::calendar::{build_month_grid, YearMonth};
use crate::store::{DateKey, DayStore};

static HEADER: &str = "Su  Mo  Tu  We  Th  Fr  Sa";

/// Lay out `month` as plain text, marking each recorded day with an asterisk
/// and listing the month's records beneath the calendar
pub(crate) fn render_month(month: YearMonth, days: &DayStore) -> Vec<String> {
    let grid = build_month_grid(month);
    let mut lines = Vec::with_capacity(grid.weeks().len() + 3);
    let title = month.to_string();
    lines.push(format!("{title:^26}").trim_end().to_owned());
    lines.push(HEADER.to_owned());
    for week in grid.weeks() {
        let cells = week
            .cells()
            .map(|cell| match cell {
                Some(date) => {
                    let mark = if days.lookup(DateKey::from(date)).is_some() {
                        '*'
                    } else {
                        ' '
                    };
                    format!("{:>2}{mark}", date.day())
                }
                None => String::from("   "),
            })
            .collect::<Vec<_>>();
        lines.push(cells.join(" ").trim_end().to_owned());
    }
    let mut records = days
        .range(
            DateKey::from(month.first_day()),
            DateKey::from(month.last_day()),
        )
        .peekable();
    if records.peek().is_some() {
        lines.push(String::new());
    }
    for (key, record) in records {
        let pct = record.progress.to_string();
        let mut line = format!("{key}  {pct:>4}");
        if record.has_note() {
            line.push_str("  ");
            line.push_str(record.headline());
        }
        lines.push(line);
    }
    lines
}
