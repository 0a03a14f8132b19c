//! Runtime configuration defaults and output naming

// Default values for configurable parameters
/// Fixed seed for reproducible shuffling and rotation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of rows the source image is cut into
pub const DEFAULT_GRID_ROWS: usize = 3;

/// Default number of columns the source image is cut into
pub const DEFAULT_GRID_COLS: usize = 3;

// Output settings
/// Suffix added to reassembled output filenames
pub const OUTPUT_SUFFIX: &str = "_solved";

/// Suffix of the directory holding per-piece debug bitmaps
pub const PIECES_DIR_SUFFIX: &str = "_pieces";
