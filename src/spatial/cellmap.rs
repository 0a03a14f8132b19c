//! Sparse occupancy map from integer grid coordinates to piece indices
//!
//! Each connected component of the solver owns one map. Coordinates are
//! unbounded in both directions; the occupied bounding box is tracked
//! incrementally so densification never rescans the map.

use std::collections::HashMap;

/// Inclusive bounding box of the occupied cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    /// Smallest occupied row
    pub min_row: i32,
    /// Largest occupied row
    pub max_row: i32,
    /// Smallest occupied column
    pub min_col: i32,
    /// Largest occupied column
    pub max_col: i32,
}

impl CellBounds {
    /// Number of rows covered by the box
    pub const fn rows(&self) -> usize {
        (self.max_row - self.min_row + 1) as usize
    }

    /// Number of columns covered by the box
    pub const fn cols(&self) -> usize {
        (self.max_col - self.min_col + 1) as usize
    }
}

/// Sparse mapping from `(row, col)` cells to piece indices
#[derive(Debug, Clone, Default)]
pub struct CellMap {
    cells: HashMap<(i32, i32), usize>,
    bounds: Option<CellBounds>,
}

impl CellMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map holding a single piece at the origin
    pub fn singleton(piece: usize) -> Self {
        let mut map = Self::new();
        map.insert((0, 0), piece);
        map
    }

    /// Place a piece on a cell, returning any piece previously there
    pub fn insert(&mut self, cell: (i32, i32), piece: usize) -> Option<usize> {
        self.bounds = Some(match self.bounds {
            None => CellBounds {
                min_row: cell.0,
                max_row: cell.0,
                min_col: cell.1,
                max_col: cell.1,
            },
            Some(bounds) => CellBounds {
                min_row: bounds.min_row.min(cell.0),
                max_row: bounds.max_row.max(cell.0),
                min_col: bounds.min_col.min(cell.1),
                max_col: bounds.max_col.max(cell.1),
            },
        });
        self.cells.insert(cell, piece)
    }

    /// Piece occupying the given cell, if any
    pub fn piece_at(&self, cell: (i32, i32)) -> Option<usize> {
        self.cells.get(&cell).copied()
    }

    /// Whether the given cell is occupied
    pub fn is_occupied(&self, cell: (i32, i32)) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box of the occupied cells, `None` while empty
    pub const fn bounds(&self) -> Option<CellBounds> {
        self.bounds
    }

    /// Iterate over `(cell, piece)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), usize)> + '_ {
        self.cells.iter().map(|(&cell, &piece)| (cell, piece))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_occupies_origin() {
        let map = CellMap::singleton(7);
        assert_eq!(map.piece_at((0, 0)), Some(7));
        assert_eq!(map.len(), 1);
        assert!(!map.is_occupied((0, 1)));
    }

    #[test]
    fn test_bounds_grow_with_inserts() {
        let mut map = CellMap::singleton(0);
        map.insert((-2, 3), 1);
        map.insert((1, -1), 2);

        let bounds = map.bounds();
        assert_eq!(
            bounds,
            Some(CellBounds {
                min_row: -2,
                max_row: 1,
                min_col: -1,
                max_col: 3,
            })
        );
        assert!(bounds.is_some_and(|b| b.rows() == 4 && b.cols() == 5));
    }

    #[test]
    fn test_insert_reports_displaced_piece() {
        let mut map = CellMap::singleton(0);
        assert_eq!(map.insert((0, 0), 9), Some(0));
        assert_eq!(map.piece_at((0, 0)), Some(9));
    }
}
