use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    widgets::{Block, Clear, Widget},
};

/// Blank out a `width` × `height` box centered in `area`, fill it with
/// `style`, and return it.  The box shrinks to fit a smaller `area`.
pub(crate) fn open_popup(
    area: Rect,
    width: u16,
    height: u16,
    style: Style,
    buf: &mut Buffer,
) -> Rect {
    let [popup] = Layout::horizontal([width.min(area.width)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([height.min(area.height)])
        .flex(Flex::Center)
        .areas(popup);
    Clear.render(popup, buf);
    Block::new().style(style).render(popup, buf);
    popup
}
