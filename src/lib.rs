//! Jigsaw puzzle reassembly from unordered, arbitrarily rotated pieces
//!
//! The solver ranks every pairing of piece edges by a compatibility score,
//! then greedily merges pieces along the best-ranked pairs using a
//! disjoint-set structure that tracks a 2D placement grid and a rotation
//! per piece, rejecting merges that would stack two pieces on one cell.

#![forbid(unsafe_code)]

/// Input/output operations, CLI, and error handling
pub mod io;
/// Piece model, synthetic piece source, and edge scoring
pub mod pieces;
/// Assembly core: candidate ranking, grid disjoint set, solve driver
pub mod solver;
/// Grid geometry shared by the solver core
pub mod spatial;

pub use io::error::{PuzzleError, Result};
