//! Error taxonomy for world construction and the render loop.
//!
//! Every variant is fatal for the frame that produced it: the loop never
//! retries and never renders a degraded frame.

use tdtbge_types::{Extent, Position};

use crate::entity::EntityId;

/// Errors produced by world and entity operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A sprite token was looked up that was never registered.
    #[error("sprite token {token:?} is not registered in the sprite cache")]
    NotFound { token: String },

    /// A state resolver produced a name that no state of the entity carries.
    #[error("entity '{entity}' resolved to unknown state '{state}'")]
    UnresolvedState { entity: String, state: String },

    /// A placed cell or the viewport falls outside the world bounds.
    #[error("{what} at {position} is outside world bounds {bounds}")]
    OutOfBounds {
        what: String,
        position: Position,
        bounds: Extent,
    },

    /// An entity id that is not (or no longer) part of the world.
    #[error("entity {id} does not exist in the world")]
    UnknownEntity { id: EntityId },

    /// Failure reported by an input, output, or audio collaborator.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
