//! TDTBGE (workspace facade crate).
//!
//! Re-exports the engine crates under one name so game scripts can write
//! `tdtbge::core::World` and `tdtbge::term::paint`, and hosts the small amount
//! of glue ([`app`]) shared by the bundled games.

pub mod app;

pub use tdtbge_core as core;
pub use tdtbge_input as input;
pub use tdtbge_term as term;
pub use tdtbge_types as types;
