//! Greedy rank-ordered assembly driver
//!
//! Joins are attempted strictly in ranked order until one component covers
//! every piece or the candidate sequence runs dry. Individual rejections
//! are silent; only the final complete-or-partial distinction is surfaced,
//! as an explicit value rather than a flag on shared state.

use crate::io::error::{Result, invalid_piece_set};
use crate::pieces::{Edge, EdgeScorer, Piece};
use crate::solver::components::{GridUnionFind, Solution, UNPLACED};
use crate::solver::matching::{MatchCandidate, rank_candidates};

/// Outcome of a solve: complete or best-effort partial
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// Every piece placed in a single connected grid
    Solved(Solution),
    /// Candidates ran dry first; the largest component, with unplaced
    /// cells marked
    Partial(Solution),
}

impl SolveOutcome {
    /// The assembled grid, complete or partial
    pub const fn solution(&self) -> &Solution {
        match self {
            Self::Solved(solution) | Self::Partial(solution) => solution,
        }
    }

    /// Whether every piece was placed
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    /// Consume the outcome, yielding the grid
    pub fn into_solution(self) -> Solution {
        match self {
            Self::Solved(solution) | Self::Partial(solution) => solution,
        }
    }
}

/// Rank all edge pairs with the given scorer and assemble the pieces
///
/// On return every placed piece has been physically rotated to match its
/// cell in the Solution grid.
///
/// # Errors
///
/// Returns an error if the piece set is degenerate: empty, a piece whose
/// identity index disagrees with its position, or a piece with an empty
/// edge strip.
pub fn solve<S>(pieces: &mut [Piece], scorer: &S) -> Result<SolveOutcome>
where
    S: EdgeScorer + ?Sized,
{
    validate_pieces(pieces)?;
    let candidates = rank_candidates(pieces, scorer);
    assemble(pieces, &candidates)
}

/// Assemble the pieces from an externally ranked candidate sequence
///
/// The sequence is consumed in the order given; determinism of the result
/// is inherited from determinism of the sequence.
///
/// # Errors
///
/// Same degenerate-input conditions as [`solve`].
pub fn solve_with_candidates(
    pieces: &mut [Piece],
    candidates: &[MatchCandidate],
) -> Result<SolveOutcome> {
    validate_pieces(pieces)?;
    assemble(pieces, candidates)
}

fn validate_pieces(pieces: &[Piece]) -> Result<()> {
    if pieces.is_empty() {
        return Err(invalid_piece_set(&"piece set is empty"));
    }
    for (position, piece) in pieces.iter().enumerate() {
        if piece.index() != position {
            return Err(invalid_piece_set(&format!(
                "piece at position {position} carries index {}",
                piece.index()
            )));
        }
        if piece.edges().iter().any(Edge::is_empty) {
            return Err(invalid_piece_set(&format!(
                "piece {position} has an empty edge strip"
            )));
        }
    }
    Ok(())
}

fn assemble(pieces: &mut [Piece], candidates: &[MatchCandidate]) -> Result<SolveOutcome> {
    let mut grid = GridUnionFind::new(pieces.len());

    for candidate in candidates {
        if grid.is_fully_joined() {
            break;
        }
        let _ = grid.join(candidate.edge_a, candidate.edge_b);
    }

    let complete = grid.is_fully_joined();
    let root = if complete {
        grid.find(0)
    } else {
        grid.largest_component()
            .ok_or_else(|| invalid_piece_set(&"no component to extract"))?
    };
    let solution = grid
        .extract(root)
        .ok_or_else(|| invalid_piece_set(&"no component to extract"))?;

    apply_rotations(pieces, &solution);

    Ok(if complete {
        SolveOutcome::Solved(solution)
    } else {
        SolveOutcome::Partial(solution)
    })
}

// Finalization: normalize each placed piece's bitmap to its grid cell.
fn apply_rotations(pieces: &mut [Piece], solution: &Solution) {
    for ((row, col), &piece_index) in solution.placements.indexed_iter() {
        if piece_index == UNPLACED {
            continue;
        }
        let turns = solution.rotations.get([row, col]).copied().unwrap_or(0);
        if let Some(piece) = pieces.get_mut(piece_index as usize) {
            piece.rotate(turns);
        }
    }
}
