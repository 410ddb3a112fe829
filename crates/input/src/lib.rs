//! Terminal input module (engine-facing).
//!
//! Reads single keys from the terminal with crossterm and hands them to the
//! engine as plain `char`s through [`tdtbge_core::KeySource`]. Raw mode is
//! held only for the duration of one read, so frames printed between reads
//! behave like ordinary terminal output.

pub mod map;
pub mod reader;

pub use tdtbge_types as types;

pub use map::{key_to_char, should_quit};
pub use reader::TerminalKeys;
