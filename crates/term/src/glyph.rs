//! Sprite token colouring.
//!
//! A styled token is an ordinary `String` carrying ANSI escape codes; the
//! engine treats it as opaque and interns it like any other token.
//!
//! ```
//! use tdtbge_term::{paint, Color};
//!
//! let food = paint("x", Color::Green);
//! assert!(food.contains('x'));
//! ```

use crossterm::style::Stylize;

pub use crossterm::style::Color;

/// `text` in foreground colour `color`.
pub fn paint(text: &str, color: Color) -> String {
    text.with(color).to_string()
}

/// `text` in bold foreground colour `color`.
pub fn paint_bold(text: &str, color: Color) -> String {
    text.with(color).bold().to_string()
}
