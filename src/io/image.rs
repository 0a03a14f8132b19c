//! Image loading and composite rendering of solved layouts

use image::{RgbaImage, imageops};
use std::path::Path;

use crate::io::error::{PuzzleError, Result, invalid_piece_set};
use crate::pieces::Piece;
use crate::solver::components::Solution;

/// Load an image from disk as RGBA
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a valid image.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| PuzzleError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// Composite the placed pieces into a single image
///
/// Pieces must already be finalized (rotated to their placement); each is
/// pasted at its cell's pixel origin. Unplaced cells stay transparent.
///
/// # Errors
///
/// Returns an error if the solution places no pieces at all.
pub fn compose_solution(solution: &Solution, pieces: &[Piece]) -> Result<RgbaImage> {
    let (tile_width, tile_height) = placed_tile_dimensions(solution, pieces)
        .ok_or_else(|| invalid_piece_set(&"solution places no pieces"))?;

    let width = solution.cols() as u32 * tile_width;
    let height = solution.rows() as u32 * tile_height;
    let mut canvas = RgbaImage::new(width, height);

    for row in 0..solution.rows() {
        for col in 0..solution.cols() {
            let Some(piece_index) = solution.piece_at(row, col) else {
                continue;
            };
            if let Some(piece) = pieces.get(piece_index) {
                let x = i64::from(col as u32 * tile_width);
                let y = i64::from(row as u32 * tile_height);
                imageops::replace(&mut canvas, piece.image(), x, y);
            }
        }
    }

    Ok(canvas)
}

/// Render the solved layout and save it as an image file
///
/// # Errors
///
/// Returns an error if composition fails, the parent directory cannot be
/// created, or the image cannot be saved.
pub fn render_solution(solution: &Solution, pieces: &[Piece], output_path: &str) -> Result<()> {
    let canvas = compose_solution(solution, pieces)?;

    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| PuzzleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas
        .save(output_path)
        .map_err(|e| PuzzleError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}

/// Save every piece bitmap into a directory for inspection
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a bitmap cannot
/// be saved.
pub fn export_piece_images(pieces: &[Piece], directory: &Path) -> Result<()> {
    std::fs::create_dir_all(directory).map_err(|e| PuzzleError::FileSystem {
        path: directory.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    for piece in pieces {
        let path = directory.join(format!("piece_{:03}.png", piece.index()));
        piece.image().save(&path).map_err(|e| PuzzleError::ImageExport {
            path,
            source: e,
        })?;
    }

    Ok(())
}

// Tile size comes from the first placed piece; synthetic dissection keeps
// all tiles the same size.
fn placed_tile_dimensions(solution: &Solution, pieces: &[Piece]) -> Option<(u32, u32)> {
    for row in 0..solution.rows() {
        for col in 0..solution.cols() {
            if let Some(piece) = solution.piece_at(row, col).and_then(|i| pieces.get(i)) {
                let (width, height) = piece.image().dimensions();
                if width > 0 && height > 0 {
                    return Some((width, height));
                }
            }
        }
    }
    None
}
