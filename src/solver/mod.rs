//! Greedy edge-matching assembly core

/// Grid-aware disjoint set and the dense Solution grid
pub mod components;
/// Rank-ordered join loop and solve outcomes
pub mod driver;
/// Parallel candidate scoring and global ranking
pub mod matching;
