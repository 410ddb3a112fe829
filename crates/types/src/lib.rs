//! Core types module - shared data structures and constants
//!
//! This module defines the coordinate and display types used throughout the
//! engine. All types are pure data structures with no external dependencies,
//! so they can be used by the simulation core, the terminal backend, and game
//! scripts alike.
//!
//! # Coordinates
//!
//! World coordinates are `(row, col)` pairs:
//!
//! - **row** grows downwards, starting at 0 on the top line
//! - **col** grows to the right, starting at 0 on the left edge
//!
//! Game scripts usually think in `(x, y)` with `y` pointing *up*; the movement
//! helpers on entities and the viewport translate that convention with
//! `col += x` and `row -= y`.
//!
//! # Display Glyphs
//!
//! | Constant | Value | Used for |
//! |----------|-------|----------|
//! | `WALL` | `\|\|` | Left frame edge of every line |
//! | `END_WALL` | ` \|\|` | Right frame edge of content lines |
//! | `BLANK` | ` -` | Empty world cell |
//! | `BORDER` | `=` | Top/bottom frame fill |
//!
//! # Examples
//!
//! ```
//! use tdtbge_types::{Extent, Offset, Position, Viewport};
//!
//! let pos = Position::new(5, 5);
//! assert_eq!(pos + Offset::new(0, 3), Position::new(5, 8));
//!
//! let world = Extent::new(20, 20);
//! assert!(world.contains(Position::new(19, 0)));
//! assert!(!world.contains(Position::new(20, 0)));
//!
//! let vp = Viewport::new(Position::new(0, 0), Extent::new(10, 10));
//! assert!(vp.fits_within(world));
//! ```

use std::fmt;
use std::ops::Add;

/// Key that stops the interactive loop immediately.
pub const QUIT_KEY: char = '\\';

/// Left frame edge of every display line.
pub const WALL: &str = "||";

/// Right frame edge of a content line.
pub const END_WALL: &str = " ||";

/// Rendered in place of an empty world cell.
pub const BLANK: &str = " -";

/// Fill character of the top and bottom frame rows.
pub const BORDER: &str = "=";

/// Absolute cell in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance between two cells.
    pub fn chebyshev(self, other: Position) -> i32 {
        (self.row - other.row)
            .abs()
            .max((self.col - other.col).abs())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cell offset relative to an anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub row: i32,
    pub col: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl Add<Offset> for Position {
    type Output = Position;

    fn add(self, rhs: Offset) -> Position {
        Position::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.row + rhs.row, self.col + rhs.col)
    }
}

/// Size of a rectangular area in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    pub rows: u16,
    pub cols: u16,
}

impl Extent {
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Number of cells covered.
    pub fn area(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Whether `pos` lies inside `(0, 0) .. (rows, cols)`.
    pub fn contains(self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && pos.row < self.rows as i32 && pos.col < self.cols as i32
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Visible window into the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub origin: Position,
    pub size: Extent,
}

impl Viewport {
    pub const fn new(origin: Position, size: Extent) -> Self {
        Self { origin, size }
    }

    /// A viewport showing the whole of `bounds`.
    pub const fn full(bounds: Extent) -> Self {
        Self {
            origin: Position::new(0, 0),
            size: bounds,
        }
    }

    /// `0 <= origin` and `origin + size <= bounds` on both axes.
    pub fn fits_within(&self, bounds: Extent) -> bool {
        self.origin.row >= 0
            && self.origin.col >= 0
            && self.origin.row + self.size.rows as i32 <= bounds.rows as i32
            && self.origin.col + self.size.cols as i32 <= bounds.cols as i32
    }

    /// World row shown on content line `line`.
    pub fn world_row(&self, line: u16) -> i32 {
        self.origin.row + line as i32
    }

    /// World column shown at content column `column`.
    pub fn world_col(&self, column: u16) -> i32 {
        self.origin.col + column as i32
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.size, self.origin)
    }
}
