//! Adjacency and collision predicates.
//!
//! These are queries only. Nothing in the world blocks movement by itself;
//! controllers decide whether to apply a move after asking
//! [`will_collide_with`].

use arrayvec::ArrayVec;
use tdtbge_types::{Offset, Position};

use crate::entity::Entity;

/// The 3x3 block of cells centred on `pos`, row-major.
pub fn neighborhood(pos: Position) -> ArrayVec<Position, 9> {
    let mut cells = ArrayVec::new();
    for dr in -1..=1 {
        for dc in -1..=1 {
            cells.push(pos + Offset::new(dr, dc));
        }
    }
    cells
}

/// True when both entities have a position and are at Chebyshev distance
/// of at most one (same cell included).
pub fn is_touching(a: &Entity, b: &Entity) -> bool {
    match (a.position(), b.position()) {
        (Some(pa), Some(pb)) => neighborhood(pb).contains(&pa),
        _ => false,
    }
}

/// True when `target` is an obstacle for `mover` and the move by `dx`
/// columns and `dy` rows (y pointing up) would land on one of its cells.
///
/// `target` is an obstacle when one of its collision tags is a fragment of
/// `mover`'s name.
pub fn will_collide_with(mover: &Entity, target: &Entity, dx: i32, dy: i32) -> bool {
    let blocks = target
        .collision_tags()
        .iter()
        .any(|tag| mover.name_matches(tag));
    if !blocks {
        return false;
    }

    let (Some(from), Some(anchor)) = (mover.position(), target.position()) else {
        return false;
    };
    let projected = Position::new(from.row - dy, from.col + dx);
    target
        .shape()
        .entries()
        .iter()
        .any(|entry| anchor + entry.offset == projected)
}
