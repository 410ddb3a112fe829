//! Grid module - dense world array of sprite indices
//!
//! The grid covers the whole world, not just the viewport. Each cell is either
//! empty (`None`) or holds the sprite index of the last entity drawn there.
//! Uses a flat row-major vector for cache locality.

use tdtbge_types::{Extent, Position};

use crate::sprite::SpriteIndex;

/// One grid cell; `None` is the empty marker.
pub type GridCell = Option<SpriteIndex>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: Extent,
    /// Row-major cells (row * cols + col)
    cells: Vec<GridCell>,
}

impl Grid {
    /// Create a grid of `size` with every cell empty.
    pub fn new(size: Extent) -> Self {
        Self {
            size,
            cells: vec![None; size.area()],
        }
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.size.contains(pos) {
            return None;
        }
        Some((pos.row as usize) * (self.size.cols as usize) + (pos.col as usize))
    }

    pub fn size(&self) -> Extent {
        self.size
    }

    pub fn rows(&self) -> u16 {
        self.size.rows
    }

    pub fn cols(&self) -> u16 {
        self.size.cols
    }

    /// Cell at `pos`; `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<GridCell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Write `cell` at `pos`. Returns false if out of bounds.
    pub fn set(&mut self, pos: Position, cell: GridCell) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// One row of cells; `None` when out of bounds.
    pub fn row(&self, row: i32) -> Option<&[GridCell]> {
        if row < 0 || row >= self.size.rows as i32 {
            return None;
        }
        let cols = self.size.cols as usize;
        let start = row as usize * cols;
        Some(&self.cells[start..start + cols])
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}
