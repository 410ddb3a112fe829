//! Echo decoded keys until the quit key is pressed.
//!
//! Useful for checking which characters a terminal produces for each key.

use anyhow::Result;

use tdtbge::core::KeySource;
use tdtbge::input::TerminalKeys;
use tdtbge::types::QUIT_KEY;

fn main() -> Result<()> {
    let mut keys = TerminalKeys::new();
    println!("press keys, '{}' to quit", QUIT_KEY);
    loop {
        let key = keys.read_key()?;
        println!("{:?} (U+{:04X})", key, key as u32);
        if key == QUIT_KEY {
            return Ok(());
        }
    }
}
