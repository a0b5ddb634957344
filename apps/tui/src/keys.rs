//! Key bindings.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::board_view::Field;

/// What the board is doing when a key arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Editing,
    Popup,
}

/// A user request produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Activate(usize),
    ActivateSelected,
    PageDelta(i32),
    Close,
    Move { rows: i32, cols: i32 },
    BeginEdit(Field),
    Input(char),
    Backspace,
    CommitEdit,
    CancelEdit,
    Dismiss,
}

/// Maps a key press to an action.
///
/// F1–F12 activate slots 1–12 of the current page from every mode except
/// editing, mirroring the global hotkeys while the board has focus.
pub fn map_key(mode: Mode, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Close);
    }

    match mode {
        Mode::Editing => match code {
            KeyCode::Enter => Some(Action::CommitEdit),
            KeyCode::Esc => Some(Action::CancelEdit),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Input(c)),
            _ => None,
        },
        Mode::Popup => match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::Dismiss),
            KeyCode::F(n) => function_key(n),
            _ => None,
        },
        Mode::Browse => match code {
            KeyCode::F(n) => function_key(n),
            KeyCode::Enter => Some(Action::ActivateSelected),
            KeyCode::Char('+') | KeyCode::PageDown => Some(Action::PageDelta(1)),
            KeyCode::Char('-') | KeyCode::PageUp => Some(Action::PageDelta(-1)),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::Move { rows: -1, cols: 0 }),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Move { rows: 1, cols: 0 }),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::Move { rows: 0, cols: -1 }),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::Move { rows: 0, cols: 1 }),
            KeyCode::Char('c') => Some(Action::BeginEdit(Field::Command)),
            KeyCode::Char('d') => Some(Action::BeginEdit(Field::Description)),
            KeyCode::Char('p') => Some(Action::BeginEdit(Field::PageDescription)),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Close),
            _ => None,
        },
    }
}

fn function_key(n: u8) -> Option<Action> {
    (1..=12).contains(&n).then(|| Action::Activate(usize::from(n) - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_keys_activate_first_twelve_slots() {
        assert_eq!(map_key(Mode::Browse, KeyCode::F(1), KeyModifiers::NONE), Some(Action::Activate(0)));
        assert_eq!(map_key(Mode::Popup, KeyCode::F(12), KeyModifiers::NONE), Some(Action::Activate(11)));
        assert_eq!(map_key(Mode::Browse, KeyCode::F(13), KeyModifiers::NONE), None);
        assert_eq!(map_key(Mode::Editing, KeyCode::F(3), KeyModifiers::NONE), None);
    }

    #[test]
    fn test_editing_captures_characters() {
        assert_eq!(map_key(Mode::Editing, KeyCode::Char('q'), KeyModifiers::NONE), Some(Action::Input('q')));
        assert_eq!(map_key(Mode::Editing, KeyCode::Char('+'), KeyModifiers::SHIFT), Some(Action::Input('+')));
        assert_eq!(map_key(Mode::Editing, KeyCode::Esc, KeyModifiers::NONE), Some(Action::CancelEdit));
    }

    #[test]
    fn test_browse_bindings() {
        assert_eq!(map_key(Mode::Browse, KeyCode::Char('+'), KeyModifiers::NONE), Some(Action::PageDelta(1)));
        assert_eq!(map_key(Mode::Browse, KeyCode::PageUp, KeyModifiers::NONE), Some(Action::PageDelta(-1)));
        assert_eq!(map_key(Mode::Browse, KeyCode::Char('q'), KeyModifiers::NONE), Some(Action::Close));
        assert_eq!(map_key(Mode::Editing, KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Action::Close));
    }
}
