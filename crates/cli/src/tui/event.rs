//! Event handling: maps keyboard events to application messages.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use memov2_core::category::DialogMode;

use super::app::{App, Message, Mode};

/// Map a key event to an optional message based on current app mode.
pub fn map_key_event(app: &App, key: KeyEvent) -> Option<Message> {
    // Global bindings (work in any mode)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Message::Quit);
    }

    match &app.mode {
        Mode::Browse => map_browse_keys(key),
        Mode::Rename => map_input_keys(key),
        Mode::Category(dialog) => match dialog.mode() {
            DialogMode::Normal => map_dialog_keys(key),
            DialogMode::Input { .. } => map_input_keys(key),
        },
    }
}

fn map_browse_keys(key: KeyEvent) -> Option<Message> {
    match key.code {
        // Vim-style navigation
        KeyCode::Char('j') | KeyCode::Down => Some(Message::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::SelectPrev),

        // Actions
        KeyCode::Enter => Some(Message::Open),
        KeyCode::Char('c') => Some(Message::OpenCategories),
        KeyCode::Char('r') => Some(Message::StartRename),
        KeyCode::Char('y') => Some(Message::Duplicate),
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),

        _ => None,
    }
}

fn map_dialog_keys(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Message::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::SelectPrev),
        KeyCode::Char(' ') => Some(Message::ToggleSelect),
        KeyCode::Tab => Some(Message::ToggleCollapse),
        KeyCode::Char('n') => Some(Message::NewCategory),
        KeyCode::Enter => Some(Message::Commit),
        KeyCode::Esc => Some(Message::Cancel),
        _ => None,
    }
}

fn map_input_keys(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char(c) => Some(Message::InputChar(c)),
        KeyCode::Backspace => Some(Message::InputBackspace),
        KeyCode::Enter => Some(Message::InputSubmit),
        KeyCode::Esc => Some(Message::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn browse_and_dialog_bindings_differ() {
        assert_eq!(map_browse_keys(key(KeyCode::Enter)), Some(Message::Open));
        assert_eq!(map_dialog_keys(key(KeyCode::Enter)), Some(Message::Commit));
        assert_eq!(map_dialog_keys(key(KeyCode::Char(' '))), Some(Message::ToggleSelect));
        assert_eq!(map_dialog_keys(key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn input_keys_pass_characters_through() {
        assert_eq!(map_input_keys(key(KeyCode::Char('q'))), Some(Message::InputChar('q')));
        assert_eq!(map_input_keys(key(KeyCode::Esc)), Some(Message::Cancel));
    }
}
