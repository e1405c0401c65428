use crate::store::Progress;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

pub(crate) const NOTE_MARKER_STYLE: Style = BASE_STYLE.fg(Color::LightMagenta);

pub(crate) const FOOTER_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) fn progress_style(progress: Progress) -> Style {
    match progress.get() {
        0 => BASE_STYLE.fg(Color::DarkGray),
        1..=33 => BASE_STYLE.fg(Color::LightRed),
        34..=66 => BASE_STYLE.fg(Color::LightYellow),
        67..=99 => BASE_STYLE.fg(Color::LightBlue),
        _ => BASE_STYLE.fg(Color::LightGreen).add_modifier(Modifier::BOLD),
    }
}

pub(crate) mod editor {
    use super::*;

    pub(crate) const GAUGE_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

    pub(crate) const LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const ERROR_STYLE: Style = BASE_STYLE.fg(Color::LightRed);
}
