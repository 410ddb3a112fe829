//! Blocking single-key reader.

use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;

use tdtbge_core::KeySource;

use crate::map::key_to_char;

/// Reads one key at a time from the controlling terminal.
///
/// Each read switches the terminal to raw mode (no echo, no line buffering)
/// and restores the previous mode before returning.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> io::Result<char> {
        let was_raw = terminal::is_raw_mode_enabled()?;
        if !was_raw {
            terminal::enable_raw_mode()?;
        }
        let key = next_key();
        if !was_raw {
            terminal::disable_raw_mode()?;
        }
        let key = key?;
        log::debug!("key pressed: {}", key.escape_default());
        Ok(key)
    }
}

fn next_key() -> io::Result<char> {
    loop {
        if let Event::Key(key) = event::read()? {
            // Ignore terminal auto-repeat and release events.
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(c) = key_to_char(key) {
                return Ok(c);
            }
        }
    }
}
