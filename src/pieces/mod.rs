//! Piece model, synthetic piece source, and edge scoring

/// Synthetic piece source cutting an image into shuffled rotated tiles
pub mod dissection;
/// Piece and edge types with boundary strip sampling
pub mod piece;
/// Edge compatibility scoring trait and the default strip scorer
pub mod scoring;

pub use piece::{Edge, Piece};
pub use scoring::{EdgeScorer, StripScorer};
