//! Piece and edge model backing the solver
//!
//! A piece is an RGBA bitmap with four edges sampled from its boundary in a
//! fixed clockwise order: top, right, bottom, left. Edge strips are sampled
//! once at construction; the sampling order makes them rotation-equivariant,
//! so a bitmap rotated by `k` quarter-turns yields the same strips shifted
//! by `k` sides.

use image::{RgbaImage, imageops};

use crate::spatial::orientation::{SIDE_COUNT, compose_rotation};

/// One side of a piece, identified by `(piece, side)` and carrying the
/// boundary pixel strip used for compatibility scoring
#[derive(Debug, Clone)]
pub struct Edge {
    piece: usize,
    side: usize,
    strip: Vec<[u8; 4]>,
}

impl Edge {
    /// Index of the piece this edge belongs to
    pub const fn piece(&self) -> usize {
        self.piece
    }

    /// Side index within the piece (0 = top, clockwise)
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Boundary pixels sampled clockwise along this side
    pub fn strip(&self) -> &[[u8; 4]] {
        &self.strip
    }

    /// Number of sampled boundary pixels
    pub fn len(&self) -> usize {
        self.strip.len()
    }

    /// Whether the side has no sampled pixels
    pub fn is_empty(&self) -> bool {
        self.strip.is_empty()
    }
}

/// A single puzzle piece: bitmap, four edges, and a rotation state
///
/// The rotation state counts clockwise quarter-turns applied since
/// construction. It stays 0 for the whole solve and is mutated only by the
/// driver's finalization step, which re-orients the bitmap to match the
/// piece's placement.
#[derive(Debug, Clone)]
pub struct Piece {
    index: usize,
    image: RgbaImage,
    edges: [Edge; 4],
    rotation: u8,
}

impl Piece {
    /// Construct a piece from its bitmap, sampling all four edge strips
    pub fn new(index: usize, image: RgbaImage) -> Self {
        let edges = sample_edges(index, &image);
        Self {
            index,
            image,
            edges,
            rotation: 0,
        }
    }

    /// Identity index of the piece
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Clockwise quarter-turns applied since construction
    pub const fn rotation(&self) -> u8 {
        self.rotation
    }

    /// The piece's current bitmap
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// All four edges in side order
    pub const fn edges(&self) -> &[Edge; 4] {
        &self.edges
    }

    /// Edge on the given side, if the side index is valid
    pub fn edge(&self, side: usize) -> Option<&Edge> {
        self.edges.get(side)
    }

    /// Physically rotate the bitmap by clockwise quarter-turns
    ///
    /// Re-orients the stored image, updates the rotation state, and
    /// resamples the edge strips so the piece stays self-consistent.
    pub fn rotate(&mut self, turns: u8) {
        let turns = turns % 4;
        if turns == 0 {
            return;
        }
        self.image = rotate_image(&self.image, turns);
        self.rotation = compose_rotation(self.rotation, turns);
        self.edges = sample_edges(self.index, &self.image);
    }

    /// Consume the piece, yielding its bitmap
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Rotate a bitmap by the given number of clockwise quarter-turns
pub fn rotate_image(image: &RgbaImage, turns: u8) -> RgbaImage {
    match turns % 4 {
        1 => imageops::rotate90(image),
        2 => imageops::rotate180(image),
        3 => imageops::rotate270(image),
        _ => image.clone(),
    }
}

fn sample_edges(piece: usize, image: &RgbaImage) -> [Edge; 4] {
    [0, 1, 2, 3].map(|side| Edge {
        piece,
        side,
        strip: sample_strip(image, side),
    })
}

// Strips run clockwise around the piece: top left-to-right, right
// top-to-bottom, bottom right-to-left, left bottom-to-top.
fn sample_strip(image: &RgbaImage, side: usize) -> Vec<[u8; 4]> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    match side % SIDE_COUNT {
        0 => (0..width).map(|x| image.get_pixel(x, 0).0).collect(),
        1 => (0..height)
            .map(|y| image.get_pixel(width - 1, y).0)
            .collect(),
        2 => (0..width)
            .rev()
            .map(|x| image.get_pixel(x, height - 1).0)
            .collect(),
        _ => (0..height).rev().map(|y| image.get_pixel(0, y).0).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x * 7) as u8, (y * 11) as u8, (x + y) as u8, 255])
        })
    }

    #[test]
    fn test_edges_sampled_clockwise() {
        let piece = Piece::new(0, gradient_image(3, 2));

        let top: Vec<[u8; 4]> = piece.edge(0).map(|e| e.strip().to_vec()).unwrap_or_default();
        assert_eq!(top.len(), 3);
        assert_eq!(top.first().copied(), Some([0, 0, 0, 255]));
        assert_eq!(top.last().copied(), Some([14, 0, 2, 255]));

        let bottom: Vec<[u8; 4]> = piece.edge(2).map(|e| e.strip().to_vec()).unwrap_or_default();
        // Bottom runs right-to-left
        assert_eq!(bottom.first().copied(), Some([14, 11, 3, 255]));
        assert_eq!(bottom.last().copied(), Some([0, 11, 1, 255]));
    }

    #[test]
    fn test_rotation_shifts_strips_by_one_side() {
        let original = Piece::new(0, gradient_image(4, 4));
        let mut rotated = original.clone();
        rotated.rotate(1);

        assert_eq!(rotated.rotation(), 1);
        // After one clockwise turn the old top strip lies on the right side
        let pairs = [(1, 0), (2, 1), (3, 2), (0, 3)];
        for (new_side, old_side) in pairs {
            let matches = rotated
                .edge(new_side)
                .zip(original.edge(old_side))
                .is_some_and(|(a, b)| a.strip() == b.strip());
            assert!(matches, "side {old_side} should move to side {new_side}");
        }
    }

    #[test]
    fn test_four_turns_restore_the_bitmap() {
        let original = Piece::new(3, gradient_image(5, 2));
        let mut piece = original.clone();
        for _ in 0..4 {
            piece.rotate(1);
        }
        assert_eq!(piece.rotation(), 0);
        assert_eq!(piece.image(), original.image());
    }

    #[test]
    fn test_empty_image_yields_empty_strips() {
        let piece = Piece::new(0, RgbaImage::new(0, 0));
        assert!(piece.edges().iter().all(Edge::is_empty));
    }
}
