//! Terminal backend module.
//!
//! Implements the engine's output and audio collaborators for a real
//! terminal:
//!
//! - [`TerminalRenderer`] prints each frame as a plain text block, clearing
//!   the screen first unless the world runs in debug mode
//! - [`glyph`] colours sprite tokens before they are handed to entities
//! - [`audio`] plays clips with rodio when the `audio` feature is enabled,
//!   and stays silent otherwise

pub mod audio;
pub mod glyph;
pub mod renderer;

pub use tdtbge_core as core;
pub use tdtbge_types as types;

pub use audio::TerminalAudio;
pub use glyph::{paint, Color};
pub use renderer::{encode_frame_into, TerminalRenderer};
