//! Rendering pipeline: state resolution, grid rasterization, display layout.
//!
//! This module is pure apart from lending positions to nested children
//! while their parent's shape is walked.

use tdtbge_types::{Position, BLANK, BORDER, END_WALL, WALL};

use crate::entity::EntityId;
use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::sprite::SpriteIndex;
use crate::world::World;

impl World {
    /// Sprite index an entity should be drawn with right now.
    ///
    /// Fails with [`EngineError::UnresolvedState`] when the resolver names a
    /// state the entity does not have (or, without a resolver, when there is
    /// no `default` state).
    pub fn resolve_state(&self, id: EntityId) -> Result<SpriteIndex> {
        let entity = self.entity(id)?;
        let state = entity.resolve_state_name(self);
        let token = entity
            .sprite_for(&state)
            .ok_or_else(|| EngineError::UnresolvedState {
                entity: entity.name().to_string(),
                state: state.clone(),
            })?;
        self.sprite_cache.lookup(token)
    }

    /// Rasterize every placed entity into a grid the size of the world.
    ///
    /// Entities are drawn in insertion order, so later ones win on overlap.
    /// A nested entry draws the child's own shape anchored at that cell, after
    /// moving the child there.
    pub fn generate_world_array(&mut self) -> Result<Grid> {
        let mut grid = Grid::new(self.bounds());

        let placed: Vec<EntityId> = self
            .entities()
            .filter(|(_, e)| !e.is_abstract())
            .map(|(id, _)| id)
            .collect();

        for id in placed {
            let entity = self.entity(id)?;
            let Some(origin) = entity.position() else {
                continue;
            };
            let entries = entity.shape().entries().to_vec();
            let mut own_sprite = None;

            for entry in entries {
                let anchor = origin + entry.offset;
                match entry.child {
                    None => {
                        let sprite = match own_sprite {
                            Some(sprite) => sprite,
                            None => {
                                let sprite = self.resolve_state(id)?;
                                own_sprite = Some(sprite);
                                sprite
                            }
                        };
                        self.paint(&mut grid, id, anchor, sprite)?;
                    }
                    Some(child) => {
                        self.entity_mut(child)?.set_transient_position(anchor);
                        let sprite = self.resolve_state(child)?;
                        let offsets: Vec<_> = self
                            .entity(child)?
                            .shape()
                            .entries()
                            .iter()
                            .map(|e| e.offset)
                            .collect();
                        for offset in offsets {
                            self.paint(&mut grid, child, anchor + offset, sprite)?;
                        }
                    }
                }
            }
        }

        log::trace!("rasterized {} cells", grid.occupied());
        Ok(grid)
    }

    /// Lay out the bordered text block for the current viewport.
    ///
    /// Produces a top border, one line per viewport row, and a bottom border,
    /// joined by `\n` without a trailing newline.
    pub fn generate_world_display(&self) -> String {
        let viewport = self.viewport();
        let cols = viewport.size.cols;
        let border = format!("{}{}{}", WALL, BORDER.repeat(2 * cols as usize + 1), WALL);

        let mut lines = Vec::with_capacity(viewport.size.rows as usize + 2);
        lines.push(border.clone());
        for line in 0..viewport.size.rows {
            let mut out = String::from(WALL);
            let row = self.grid.row(viewport.world_row(line));
            for column in 0..cols {
                let cell = row.and_then(|r| {
                    let col = viewport.world_col(column);
                    if col < 0 {
                        None
                    } else {
                        r.get(col as usize).copied().flatten()
                    }
                });
                match cell.and_then(|index| self.sprite_cache.get(index)) {
                    Some(token) => {
                        out.push(' ');
                        out.push_str(token);
                    }
                    None => out.push_str(BLANK),
                }
            }
            out.push_str(END_WALL);
            lines.push(out);
        }
        lines.push(border);
        lines.join("\n")
    }

    fn paint(&self, grid: &mut Grid, id: EntityId, pos: Position, sprite: SpriteIndex) -> Result<()> {
        if grid.set(pos, Some(sprite)) {
            Ok(())
        } else {
            self.check_cell(self.entity(id)?.name(), pos)
        }
    }
}
