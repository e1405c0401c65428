use crate::calendar::{Calendar, MonthView};
use crate::editor::{Editor, EditorInput, EditorOutput, EditorState};
use crate::help::Help;
use crate::store::{DateKey, DayBook, Draft, KeyValueStorage};
use crate::theme::BASE_STYLE;
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

#[derive(Debug)]
pub(crate) struct App<S> {
    view: MonthView,
    book: DayBook<S>,
    state: AppState,
    area: Rect,
}

impl<S: KeyValueStorage> App<S> {
    pub(crate) fn new(view: MonthView, book: DayBook<S>) -> App<S> {
        App {
            view,
            book,
            state: AppState::Calendar,
            area: Rect::default(),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let event = read()?;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !self.handle_key(code, modifiers) {
                self.beep()?;
            }
        } else if let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = event
        {
            // Clicks on placeholder cells are ignored
            self.handle_click(column, row);
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match &mut self.state {
            AppState::Calendar if !normal_modifiers.contains(modifiers) => false,
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.view.move_days(-1).is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.view.move_days(1).is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.view.move_days(-7).is_ok(),
                KeyCode::Char('j') | KeyCode::Down => self.view.move_days(7).is_ok(),
                KeyCode::Char('p') | KeyCode::PageUp => self.view.previous_month().is_ok(),
                KeyCode::Char('n') | KeyCode::PageDown => self.view.next_month().is_ok(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.view.jump_to_today();
                    true
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open_selected();
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Editing(state) => {
                let input = match key {
                    KeyCode::Enter if modifiers.contains(KeyModifiers::ALT) => EditorInput::Newline,
                    KeyCode::Char('j') if modifiers == KeyModifiers::CONTROL => {
                        EditorInput::Newline
                    }
                    KeyCode::Enter => EditorInput::Save,
                    KeyCode::Esc => EditorInput::Cancel,
                    KeyCode::Backspace => EditorInput::Backspace,
                    KeyCode::Left => EditorInput::Progress(-1),
                    KeyCode::Right => EditorInput::Progress(1),
                    KeyCode::Up => EditorInput::Progress(10),
                    KeyCode::Down => EditorInput::Progress(-10),
                    KeyCode::Char(ch) if normal_modifiers.contains(modifiers) => {
                        EditorInput::Char(ch)
                    }
                    _ => return false,
                };
                match state.handle_input(input) {
                    EditorOutput::Ok => true,
                    EditorOutput::Invalid => false,
                    EditorOutput::Save => self.save_draft(),
                    EditorOutput::Cancel => {
                        if let AppState::Editing(state) =
                            std::mem::replace(&mut self.state, AppState::Calendar)
                        {
                            state.into_draft().discard();
                        }
                        true
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the click did not land on a date
    fn handle_click(&mut self, column: u16, row: u16) -> bool {
        if self.state != AppState::Calendar {
            return false;
        }
        let Some((week, wd)) = Calendar::cell_at(self.area, column, row) else {
            return false;
        };
        if self.view.select_cell(week, wd).is_some() {
            self.open_selected();
            true
        } else {
            false
        }
    }

    fn open_selected(&mut self) {
        let draft = Draft::open(&self.book, DateKey::from(self.view.selected()));
        self.state = AppState::Editing(EditorState::new(draft));
    }

    // Returns `false` if the save failed, in which case the editor stays open
    // with the error shown
    fn save_draft(&mut self) -> bool {
        let AppState::Editing(state) = std::mem::replace(&mut self.state, AppState::Calendar)
        else {
            return false;
        };
        match state.into_draft().save(&mut self.book) {
            Ok(key) => {
                tracing::info!(%key, "saved day");
                true
            }
            Err(failure) => {
                tracing::error!(error = %failure, cause = %failure.source, "failed to save day");
                let message = format!("{failure}: {}", failure.source);
                self.state = AppState::Editing(EditorState::with_error(failure.draft, message));
                false
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl<S: KeyValueStorage> Widget for &mut App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        self.area = area;
        Calendar::new(&self.view, self.book.days()).render(area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Editing(ref mut state) = self.state {
            Editor.render(area, buf, state);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Editing(EditorState),
    Quitting,
}
