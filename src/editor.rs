use crate::popup::open_popup;
use crate::store::Draft;
use crate::theme::{
    editor::{ERROR_STYLE, GAUGE_STYLE, HINT_STYLE, LABEL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Gauge, Paragraph, StatefulWidget, Widget, Wrap},
};

const OUTER_WIDTH: u16 = 50;
const OUTER_HEIGHT: u16 = 16;

static HINTS: &str = "←/→ ±1  ↑/↓ ±10  Enter save  Esc cancel";

/// Modal dialog for editing one day's progress & note
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Editor;

impl StatefulWidget for Editor {
    type State = EditorState;

    /*
     * ..................................................
     * .┌────────────────── 2024-01-15 ────────────────┐.
     * .│Progress                                      │.
     * .│█████████████████████ 57%                     │.
     * .│                                              │.
     * .│Note                                          │.
     * .│went for a run_                               │.
     * .│                                              │.
     * .│                                              │.
     * .│                                              │.
     * .│                                              │.
     * .│←/→ ±1  ↑/↓ ±10  Enter save  Esc cancel       │.
     * .│                                              │.
     * .└──────────────────────────────────────────────┘.
     * ..................................................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let outer_area = open_popup(area, OUTER_WIDTH, OUTER_HEIGHT, BASE_STYLE, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        let block = Block::bordered()
            .title(format!(" {} ", state.draft.key()))
            .title_alignment(Alignment::Center);
        let inner = block.inner(block_area);
        block.render(block_area, buf);
        let [progress_label, gauge_area, _, note_label, note_area, hint_area, error_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);
        Line::styled("Progress", LABEL_STYLE).render(progress_label, buf);
        let progress = state.draft.record().progress;
        Gauge::default()
            .gauge_style(GAUGE_STYLE)
            .percent(progress.get().into())
            .label(progress.to_string())
            .render(gauge_area, buf);
        Line::styled("Note", LABEL_STYLE).render(note_label, buf);
        Paragraph::new(state.note_text())
            .wrap(Wrap { trim: false })
            .render(note_area, buf);
        Line::styled(HINTS, HINT_STYLE).render(hint_area, buf);
        if let Some(error) = state.error() {
            Line::styled(error, ERROR_STYLE).render(error_area, buf);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct EditorState {
    draft: Draft,
    error: Option<String>,
}

impl EditorState {
    pub(crate) fn new(draft: Draft) -> EditorState {
        EditorState { draft, error: None }
    }

    /// Reopen a draft whose save failed, displaying `error`
    pub(crate) fn with_error(draft: Draft, error: String) -> EditorState {
        EditorState {
            draft,
            error: Some(error),
        }
    }

    pub(crate) fn draft(&self) -> &Draft {
        &self.draft
    }

    pub(crate) fn into_draft(self) -> Draft {
        self.draft
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn note_text(&self) -> Text<'static> {
        // Splitting on '\n' rather than using lines() keeps a trailing empty
        // line so that the cursor lands after a just-typed newline.
        let mut lines = self
            .draft
            .record()
            .note
            .split('\n')
            .map(|ln| Line::styled(ln.to_owned(), BASE_STYLE))
            .collect::<Vec<_>>();
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("_", HINT_STYLE));
        }
        Text::from(lines)
    }

    pub(crate) fn handle_input(&mut self, input: EditorInput) -> EditorOutput {
        match input {
            EditorInput::Char(ch) => {
                self.draft.push_char(ch);
                EditorOutput::Ok
            }
            EditorInput::Newline => {
                self.draft.push_char('\n');
                EditorOutput::Ok
            }
            EditorInput::Backspace => {
                if self.draft.pop_char() {
                    EditorOutput::Ok
                } else {
                    EditorOutput::Invalid
                }
            }
            EditorInput::Progress(delta) => {
                let before = self.draft.record().progress;
                self.draft.adjust_progress(delta);
                if self.draft.record().progress == before {
                    EditorOutput::Invalid
                } else {
                    EditorOutput::Ok
                }
            }
            EditorInput::Save => EditorOutput::Save,
            EditorInput::Cancel => EditorOutput::Cancel,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EditorInput {
    Char(char),
    Newline,
    Backspace,
    Progress(i64),
    Save,
    Cancel,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EditorOutput {
    Ok,
    Invalid,
    Save,
    Cancel,
}
