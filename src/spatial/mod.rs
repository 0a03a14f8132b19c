//! Grid geometry shared by the solver core
//!
//! Side numbering, rigid rotations of cell coordinates, and the sparse
//! occupancy map each connected component carries.

/// Sparse cell-to-piece occupancy map with incremental bounds
pub mod cellmap;
/// Side numbering and clockwise rotation arithmetic
pub mod orientation;

pub use cellmap::{CellBounds, CellMap};
