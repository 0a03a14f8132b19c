//! Synthetic piece source: cut, shuffle, and rotate
//!
//! Stands in for photographic segmentation. A source image is cut into a
//! `rows x cols` grid of uniform rectangular tiles; the tiles are then
//! shuffled and each is rotated by a random number of quarter-turns, all
//! seeded, so the solver receives an unordered, arbitrarily-oriented piece
//! set with a reproducible ground truth.

use image::{RgbaImage, imageops};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::io::error::{Result, invalid_parameter};
use crate::pieces::piece::{Piece, rotate_image};

/// Cut an image into shuffled, randomly rotated pieces
///
/// Tile dimensions are `width / cols` by `height / rows`; any remainder of
/// the source image is cropped away. Piece indices follow the shuffled
/// order, so they carry no information about the original layout.
///
/// # Errors
///
/// Returns an error if `rows` or `cols` is zero, or if the image is too
/// small to yield at least one pixel per tile.
pub fn dissect(image: &RgbaImage, rows: usize, cols: usize, seed: u64) -> Result<Vec<Piece>> {
    if rows == 0 {
        return Err(invalid_parameter("rows", &rows, &"must be at least 1"));
    }
    if cols == 0 {
        return Err(invalid_parameter("cols", &cols, &"must be at least 1"));
    }

    let tile_width = image.width() / cols as u32;
    let tile_height = image.height() / rows as u32;
    if tile_width == 0 || tile_height == 0 {
        return Err(invalid_parameter(
            "grid",
            &format!("{rows}x{cols}"),
            &format!(
                "image of {}x{} pixels is too small for this grid",
                image.width(),
                image.height()
            ),
        ));
    }

    let mut tiles = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let x = col as u32 * tile_width;
            let y = row as u32 * tile_height;
            tiles.push(imageops::crop_imm(image, x, y, tile_width, tile_height).to_image());
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    tiles.shuffle(&mut rng);

    Ok(tiles
        .into_iter()
        .enumerate()
        .map(|(index, tile)| {
            let turns = rng.random_range(0..4u8);
            Piece::new(index, rotate_image(&tile, turns))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn source(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 3) as u8, (y * 3) as u8, (x + y) as u8, 255])
        })
    }

    #[test]
    fn test_dissect_produces_sequential_indices() {
        let pieces = dissect(&source(30, 30), 3, 3, 7).unwrap_or_default();
        assert_eq!(pieces.len(), 9);
        for (position, piece) in pieces.iter().enumerate() {
            assert_eq!(piece.index(), position);
            assert_eq!(piece.rotation(), 0);
        }
    }

    #[test]
    fn test_dissect_is_deterministic_per_seed() {
        let image = source(40, 20);
        let first = dissect(&image, 2, 4, 99).unwrap_or_default();
        let second = dissect(&image, 2, 4, 99).unwrap_or_default();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.image(), b.image());
        }
    }

    #[test]
    fn test_dissect_rejects_zero_rows() {
        assert!(dissect(&source(10, 10), 0, 2, 0).is_err());
    }

    #[test]
    fn test_dissect_rejects_oversized_grid() {
        assert!(dissect(&source(4, 4), 8, 8, 0).is_err());
    }
}
