use crate::popup::open_popup;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Margin, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "Calendar:",
    "  h, LEFT          Previous day",
    "  l, RIGHT         Next day",
    "  k, UP            Same day last week",
    "  j, DOWN          Same day next week",
    "  p, PAGE UP       Previous month",
    "  n, PAGE DOWN     Next month",
    "  0, HOME          Jump to today",
    "  ENTER, SPACE     Edit selected day",
    "  Left click       Edit clicked day",
    "  ?                Show this help",
    "  q, ESC           Quit",
    "",
    "Editing a day:",
    "  LEFT, RIGHT      Progress -1/+1",
    "  DOWN, UP         Progress -10/+10",
    "  ALT-ENTER, C-j   New line in note",
    "  BACKSPACE        Delete last character",
    "  ENTER            Save",
    "  ESC              Cancel",
    "",
    "Press the Any Key to dismiss.",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from(TEXT.iter().map(|&s| Line::raw(s)).collect::<Vec<_>>());
        // Two columns for the border, plus a column of padding on each side
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let popup = open_popup(area, width, height, self.0, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0)
            .render(popup.inner(Margin::new(1, 0)), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::BASE_STYLE;

    fn render(area: Rect) -> Vec<String> {
        let mut buffer = Buffer::empty(area);
        Help(BASE_STYLE).render(area, &mut buffer);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_render() {
        let rows = render(Rect::new(0, 0, 60, 30));
        assert!(rows.iter().any(|r| r.contains(" Commands ")), "{rows:#?}");
        assert!(
            rows.iter().any(|r| r.contains("│  n, PAGE DOWN     Next month")),
            "{rows:#?}"
        );
        assert!(
            rows.iter().any(|r| r.contains("Press the Any Key to dismiss.")),
            "{rows:#?}"
        );
    }

    #[test]
    fn test_lists_mouse_and_editor_keys() {
        let rows = render(Rect::new(0, 0, 60, 30));
        for entry in [
            "Left click       Edit clicked day",
            "LEFT, RIGHT      Progress -1/+1",
            "DOWN, UP         Progress -10/+10",
            "ALT-ENTER, C-j   New line in note",
            "ESC              Cancel",
        ] {
            assert!(rows.iter().any(|r| r.contains(entry)), "{entry:?}");
        }
    }

    #[test]
    fn test_padding_outside_border() {
        let rows = render(Rect::new(0, 0, 60, 30));
        let top = rows
            .iter()
            .find(|r| r.contains(" Commands "))
            .expect("help title should be drawn");
        let border = top.find('┌').expect("top-left corner should be drawn");
        assert!(border > 0);
    }
}
