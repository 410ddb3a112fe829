//! Shape module - an entity's composite footprint.
//!
//! A shape is an ordered list of cell offsets relative to the owning entity.
//! An entry may also anchor a nested child entity, in which case the child's
//! own shape is drawn starting at that cell. Children are referenced by
//! [`EntityId`] only; the world owns every entity.
//!
//! Declarative rectangles ([`ShapeSpec::Filled`], [`ShapeSpec::Outline`]) are
//! expanded into explicit offsets once, when the shape is built.

use tdtbge_types::Offset;

use crate::entity::EntityId;

/// One raw entry of a shape description, before expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeSpec {
    /// A single occupied cell.
    Cell(Offset),
    /// A cell that anchors a nested entity.
    Nested(Offset, EntityId),
    /// Every cell of `from.row..to.row` x `from.col..to.col`.
    Filled { from: Offset, to: Offset },
    /// Only the border cells of the same half-open rectangle.
    Outline { from: Offset, to: Offset },
}

impl ShapeSpec {
    pub fn cell(row: i32, col: i32) -> Self {
        ShapeSpec::Cell(Offset::new(row, col))
    }

    pub fn nested(row: i32, col: i32, child: EntityId) -> Self {
        ShapeSpec::Nested(Offset::new(row, col), child)
    }

    pub fn filled(r0: i32, c0: i32, r1: i32, c1: i32) -> Self {
        ShapeSpec::Filled {
            from: Offset::new(r0, c0),
            to: Offset::new(r1, c1),
        }
    }

    pub fn outline(r0: i32, c0: i32, r1: i32, c1: i32) -> Self {
        ShapeSpec::Outline {
            from: Offset::new(r0, c0),
            to: Offset::new(r1, c1),
        }
    }
}

/// An expanded shape entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeEntry {
    pub offset: Offset,
    pub child: Option<EntityId>,
}

impl ShapeEntry {
    pub fn cell(offset: Offset) -> Self {
        Self {
            offset,
            child: None,
        }
    }
}

/// Ordered list of expanded shape entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    entries: Vec<ShapeEntry>,
}

impl Default for Shape {
    /// The single cell at the entity's own position.
    fn default() -> Self {
        Self {
            entries: vec![ShapeEntry::cell(Offset::ZERO)],
        }
    }
}

impl Shape {
    /// Expand raw specs into explicit entries, preserving their order.
    ///
    /// Rectangles are emitted row-major. An empty spec list yields an empty
    /// shape (the entity occupies no cell).
    pub fn expand<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = ShapeSpec>,
    {
        let mut entries = Vec::new();
        for spec in specs {
            match spec {
                ShapeSpec::Cell(offset) => entries.push(ShapeEntry::cell(offset)),
                ShapeSpec::Nested(offset, child) => entries.push(ShapeEntry {
                    offset,
                    child: Some(child),
                }),
                ShapeSpec::Filled { from, to } => {
                    for row in from.row..to.row {
                        for col in from.col..to.col {
                            entries.push(ShapeEntry::cell(Offset::new(row, col)));
                        }
                    }
                }
                ShapeSpec::Outline { from, to } => {
                    let last_row = to.row - 1;
                    let last_col = to.col - 1;
                    for row in from.row..to.row {
                        if row == from.row || row == last_row {
                            for col in from.col..to.col {
                                entries.push(ShapeEntry::cell(Offset::new(row, col)));
                            }
                        } else if from.col <= last_col {
                            entries.push(ShapeEntry::cell(Offset::new(row, from.col)));
                            if last_col != from.col {
                                entries.push(ShapeEntry::cell(Offset::new(row, last_col)));
                            }
                        }
                    }
                }
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[ShapeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the ids of nested children, in shape order.
    pub fn children(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entries.iter().filter_map(|e| e.child)
    }

    pub fn references(&self, id: EntityId) -> bool {
        self.entries.iter().any(|e| e.child == Some(id))
    }

    /// Drop every entry anchoring `id`. Returns how many were removed.
    pub fn strip_child(&mut self, id: EntityId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.child != Some(id));
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(shape: &Shape) -> Vec<(i32, i32)> {
        shape
            .entries()
            .iter()
            .map(|e| (e.offset.row, e.offset.col))
            .collect()
    }

    #[test]
    fn default_shape_is_single_origin_cell() {
        let shape = Shape::default();
        assert_eq!(offsets(&shape), vec![(0, 0)]);
    }

    #[test]
    fn filled_rectangle_is_half_open_and_row_major() {
        let shape = Shape::expand([ShapeSpec::filled(0, 0, 2, 3)]);
        assert_eq!(
            offsets(&shape),
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn outline_emits_border_cells_once() {
        let shape = Shape::expand([ShapeSpec::outline(0, 0, 3, 4)]);
        assert_eq!(
            offsets(&shape),
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (0, 3),
                (1, 0),
                (1, 3),
                (2, 0),
                (2, 1),
                (2, 2),
                (2, 3),
            ]
        );
    }

    #[test]
    fn outline_of_single_column_has_no_duplicate_sides() {
        let shape = Shape::expand([ShapeSpec::outline(0, 0, 3, 1)]);
        assert_eq!(offsets(&shape), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn degenerate_rectangles_expand_to_nothing() {
        let shape = Shape::expand([ShapeSpec::filled(2, 2, 2, 5), ShapeSpec::outline(0, 3, 4, 3)]);
        assert!(shape.is_empty());
    }

    #[test]
    fn plain_and_nested_entries_pass_through_in_order() {
        let child = EntityId::from_raw(7);
        let shape = Shape::expand([
            ShapeSpec::cell(1, 1),
            ShapeSpec::nested(0, 3, child),
            ShapeSpec::cell(2, 2),
        ]);
        assert_eq!(offsets(&shape), vec![(1, 1), (0, 3), (2, 2)]);
        assert_eq!(shape.children().collect::<Vec<_>>(), vec![child]);
    }

    #[test]
    fn strip_child_removes_only_that_child() {
        let a = EntityId::from_raw(1);
        let b = EntityId::from_raw(2);
        let mut shape = Shape::expand([
            ShapeSpec::nested(0, 0, a),
            ShapeSpec::cell(0, 1),
            ShapeSpec::nested(0, 2, b),
            ShapeSpec::nested(1, 0, a),
        ]);
        assert_eq!(shape.strip_child(a), 2);
        assert!(!shape.references(a));
        assert!(shape.references(b));
        assert_eq!(shape.len(), 2);
        assert_eq!(shape.strip_child(a), 0);
    }
}
