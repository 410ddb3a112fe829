//! Core engine module - worlds, entities, and the render loop
//!
//! This crate holds the whole simulation and rendering pipeline of the engine.
//! It performs no terminal or audio I/O itself: input, output, and sound go
//! through the collaborator traits in [`io`], so everything here runs
//! headless in tests.
//!
//! # Module Structure
//!
//! - [`sprite`]: append-only interning of sprite tokens
//! - [`shape`]: composite footprints, rectangle expansion, nested children
//! - [`entity`]: named objects with states, controllers, and attributes
//! - [`world`]: entity ownership, bounds, viewport, update and purge
//! - [`render`]: state resolution, grid rasterization, display layout
//! - [`dispatch`]: render loop, waiting, key dispatch
//! - [`collision`]: adjacency and movement-blocking predicates
//! - [`grid`]: dense sprite-index array covering the world
//!
//! # Example
//!
//! ```
//! use tdtbge_core::{CaptureSink, Entity, ScriptedKeys, Tick, World, WorldConfig};
//! use tdtbge_types::Extent;
//!
//! let capture = CaptureSink::new();
//! let mut world = World::new("demo", Extent::new(3, 3), None, WorldConfig::default())
//!     .unwrap()
//!     .with_input(ScriptedKeys::new(['d']))
//!     .with_output(capture.clone());
//!
//! let player = Entity::new("player", [("default", "O")])
//!     .at(1, 0)
//!     .with_controller('d', |id, world| {
//!         world.entity_mut(id)?.modify_pos(1, 0);
//!         Ok(())
//!     });
//! world.add_entity(player).unwrap();
//!
//! assert_eq!(world.render().unwrap(), Tick::Continue);
//! assert_eq!(world.render().unwrap(), Tick::Quit);
//! assert_eq!(capture.last_frame().unwrap().lines().nth(2), Some("|| - O - ||"));
//! ```

pub mod collision;
pub mod config;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod grid;
pub mod io;
pub mod render;
pub mod shape;
pub mod sprite;
pub mod world;

pub use tdtbge_types as types;

// Re-export commonly used types for convenience
pub use collision::{is_touching, will_collide_with};
pub use config::WorldConfig;
pub use dispatch::Tick;
pub use entity::{Entity, EntityController, EntityId, SpriteState, StateResolver, DEFAULT_STATE};
pub use error::{EngineError, Result};
pub use grid::{Grid, GridCell};
pub use io::{
    AudioSink, CaptureSink, FrameSink, KeySource, NullSink, RecordingAudio, ScriptedKeys,
    SilentAudio,
};
pub use shape::{Shape, ShapeEntry, ShapeSpec};
pub use sprite::{SpriteCache, SpriteIndex};
pub use world::{World, WorldController};
