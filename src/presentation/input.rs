use crate::application::{App, AppMode, Effect};
use crate::domain::{Action, Operation};
use crate::presentation::keypad::button_at;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(
        app: &mut App,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Option<Effect> {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Help => {
                Self::handle_help_mode(app, key);
                None
            }
        }
    }

    /// Activates the keypad button under a left click.
    ///
    /// `keypad` must be the area the keypad was last drawn in.
    pub fn handle_mouse_event(app: &mut App, event: MouseEvent, keypad: Rect) -> Option<Effect> {
        if app.mode != AppMode::Normal {
            return None;
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let button = button_at(keypad, event.column, event.row)?;
                app.dispatch(button.action)
            }
            _ => None,
        }
    }

    /// Calculator action bound to a key, if any.
    pub fn key_to_action(key: KeyCode) -> Option<Action> {
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => Some(Action::Digit(c)),
            KeyCode::Char('m') => Some(Action::Operation(Operation::Modulo)),
            KeyCode::Char('%') => Some(Action::Percent),
            KeyCode::Char('=') | KeyCode::Enter => Some(Action::Equals),
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Delete => Some(Action::ClearEntry),
            KeyCode::Char('n') | KeyCode::F(9) => Some(Action::ToggleSign),
            KeyCode::Esc => Some(Action::AllClear),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Operation::from_key(c).map(Action::Operation),
            _ => None,
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Option<Effect> {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return match key {
                KeyCode::Char('c') => Some(app.request_copy()),
                _ => None,
            };
        }

        match key {
            KeyCode::Char('q') => Some(Effect::Quit),
            KeyCode::Char('y') => Some(app.request_copy()),
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.toggle_help();
                None
            }
            _ => {
                let action = Self::key_to_action(key)?;
                app.dispatch(action)
            }
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.toggle_help();
            }
            KeyCode::Up | KeyCode::Char('k') => app.scroll_help(-1),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_help(1),
            KeyCode::PageUp => app.scroll_help(-5),
            KeyCode::PageDown => app.scroll_help(5),
            KeyCode::Home => app.help_scroll = 0,
            _ => {}
        }
    }
}
