//! Globally ranked edge match candidates
//!
//! Every unordered pair of edges across the whole piece set is scored once
//! and the pairs are sorted ascending by cost. Scoring is the dominant cost
//! of a solve (`O(E^2)` scorer calls for `E = 4 * piece_count`) and every
//! call is independent, so rows are scored in parallel and merged before a
//! single final sort.

use std::cmp::Ordering;

use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::pieces::{EdgeScorer, Piece};
use crate::spatial::orientation::SIDE_COUNT;

/// A scored pairing of two global edge indices, with `edge_a <= edge_b`
#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate {
    /// First edge of the pair (global index)
    pub edge_a: usize,
    /// Second edge of the pair (global index)
    pub edge_b: usize,
    /// Scorer cost; lower is better
    pub score: f64,
}

/// Total number of edges across the piece set
pub const fn edge_count(pieces: &[Piece]) -> usize {
    pieces.len() * SIDE_COUNT
}

/// Flat global index of a piece side
pub const fn global_edge_index(piece: usize, side: usize) -> usize {
    piece * SIDE_COUNT + side
}

/// Recover `(piece, side)` from a global edge index
pub const fn split_edge_index(edge: usize) -> (usize, usize) {
    (edge / SIDE_COUNT, edge % SIDE_COUNT)
}

/// Score every unordered edge pair and sort ascending
///
/// Returns exactly `E * (E + 1) / 2` candidates, self-pairs included (they
/// rank like any other pair but can never join). Ties are broken by
/// enumeration order so repeated runs rank identically.
pub fn rank_candidates<S>(pieces: &[Piece], scorer: &S) -> Vec<MatchCandidate>
where
    S: EdgeScorer + ?Sized,
{
    let mut candidates: Vec<MatchCandidate> = (0..edge_count(pieces))
        .into_par_iter()
        .flat_map_iter(|edge_a| score_row(pieces, scorer, edge_a))
        .collect();
    sort_candidates(&mut candidates);
    candidates
}

/// Like [`rank_candidates`], ticking the progress bar once per edge row
pub fn rank_candidates_with_progress<S>(
    pieces: &[Piece],
    scorer: &S,
    progress: &ProgressBar,
) -> Vec<MatchCandidate>
where
    S: EdgeScorer + ?Sized,
{
    let mut candidates: Vec<MatchCandidate> = (0..edge_count(pieces))
        .into_par_iter()
        .progress_with(progress.clone())
        .flat_map_iter(|edge_a| score_row(pieces, scorer, edge_a))
        .collect();
    sort_candidates(&mut candidates);
    candidates
}

fn score_row<'a, S>(
    pieces: &'a [Piece],
    scorer: &'a S,
    edge_a: usize,
) -> impl Iterator<Item = MatchCandidate> + 'a
where
    S: EdgeScorer + ?Sized,
{
    (edge_a..edge_count(pieces)).map(move |edge_b| MatchCandidate {
        edge_a,
        edge_b,
        score: score_edges(pieces, scorer, edge_a, edge_b),
    })
}

fn score_edges<S>(pieces: &[Piece], scorer: &S, edge_a: usize, edge_b: usize) -> f64
where
    S: EdgeScorer + ?Sized,
{
    let (piece_a, side_a) = split_edge_index(edge_a);
    let (piece_b, side_b) = split_edge_index(edge_b);
    let first = pieces.get(piece_a).and_then(|piece| piece.edge(side_a));
    let second = pieces.get(piece_b).and_then(|piece| piece.edge(side_b));
    first
        .zip(second)
        .map_or(f64::INFINITY, |(a, b)| scorer.score(a, b))
}

fn sort_candidates(candidates: &mut [MatchCandidate]) {
    candidates.sort_unstable_by(|a, b| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| (a.edge_a, a.edge_b).cmp(&(b.edge_a, b.edge_b)))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    struct ReverseIndexScorer;

    impl EdgeScorer for ReverseIndexScorer {
        fn score(&self, a: &crate::pieces::Edge, b: &crate::pieces::Edge) -> f64 {
            // Higher edge indices score better, inverting enumeration order
            let total = (global_edge_index(a.piece(), a.side())
                + global_edge_index(b.piece(), b.side())) as f64;
            -total
        }
    }

    fn solid_pieces(count: usize) -> Vec<Piece> {
        (0..count)
            .map(|index| Piece::new(index, RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]))))
            .collect()
    }

    #[test]
    fn test_rank_covers_every_unordered_pair_once() {
        let pieces = solid_pieces(2);
        let candidates = rank_candidates(&pieces, &ReverseIndexScorer);

        let edges = edge_count(&pieces);
        assert_eq!(candidates.len(), edges * (edges + 1) / 2);
        for candidate in &candidates {
            assert!(candidate.edge_a <= candidate.edge_b);
        }
    }

    #[test]
    fn test_rank_sorts_ascending_by_score() {
        let pieces = solid_pieces(3);
        let candidates = rank_candidates(&pieces, &ReverseIndexScorer);

        for window in candidates.windows(2) {
            let ordered = window
                .first()
                .zip(window.last())
                .is_some_and(|(a, b)| a.score <= b.score);
            assert!(ordered);
        }
    }

    #[test]
    fn test_equal_scores_keep_enumeration_order() {
        struct FlatScorer;
        impl EdgeScorer for FlatScorer {
            fn score(&self, _: &crate::pieces::Edge, _: &crate::pieces::Edge) -> f64 {
                1.0
            }
        }

        let pieces = solid_pieces(2);
        let candidates = rank_candidates(&pieces, &FlatScorer);
        let mut expected_a = 0;
        let mut expected_b = 0;
        for candidate in &candidates {
            assert_eq!((candidate.edge_a, candidate.edge_b), (expected_a, expected_b));
            expected_b += 1;
            if expected_b == edge_count(&pieces) {
                expected_a += 1;
                expected_b = expected_a;
            }
        }
    }
}
