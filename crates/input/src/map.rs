//! Key mapping from terminal events to engine keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::QUIT_KEY;

/// Map a key event to the character a raw terminal read would produce.
///
/// Keys with no single-character equivalent (arrows, function keys) map to
/// `None` and are ignored by the reader.
pub fn key_to_char(key: KeyEvent) -> Option<char> {
    if should_quit(key) {
        return Some(QUIT_KEY);
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Enter => Some('\r'),
        KeyCode::Tab => Some('\t'),
        KeyCode::Backspace => Some('\x7f'),
        KeyCode::Esc => Some('\x1b'),
        _ => None,
    }
}

/// Check if key should stop the world loop.
///
/// Ctrl+C is included since raw mode swallows the interrupt signal.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char(QUIT_KEY)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
