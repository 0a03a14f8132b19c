//! Edge compatibility scoring
//!
//! The solver consumes scoring through the [`EdgeScorer`] trait and never
//! looks inside the score: lower means a better fit, there is no upper
//! bound, and rejections during assembly are purely geometric. The default
//! [`StripScorer`] compares sampled boundary strips.

use crate::pieces::piece::Edge;

/// Pairwise edge compatibility scorer consumed by the candidate ranker
///
/// Implementations must be pure: the ranker invokes `score` concurrently
/// across threads and relies on a given pair always producing the same
/// value.
pub trait EdgeScorer: Sync {
    /// Cost of mating two edges; lower is better
    fn score(&self, a: &Edge, b: &Edge) -> f64;
}

/// Boundary-strip scorer: mean squared channel difference against the
/// mate's reversed strip
///
/// Strips are sampled clockwise around each piece, so two edges that share
/// a boundary traverse it in opposite directions; reversing one aligns the
/// pixels. Strips of unequal length cannot share a boundary between
/// same-size rectangular pieces and score infinitely bad.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripScorer;

impl EdgeScorer for StripScorer {
    fn score(&self, a: &Edge, b: &Edge) -> f64 {
        let strip_a = a.strip();
        let strip_b = b.strip();
        if strip_a.is_empty() || strip_a.len() != strip_b.len() {
            return f64::INFINITY;
        }

        let total: f64 = strip_a
            .iter()
            .zip(strip_b.iter().rev())
            .map(|(pixel_a, pixel_b)| {
                pixel_a
                    .iter()
                    .zip(pixel_b.iter())
                    .map(|(&channel_a, &channel_b)| {
                        let diff = f64::from(channel_a) - f64::from(channel_b);
                        diff * diff
                    })
                    .sum::<f64>()
            })
            .sum();

        total / strip_a.len() as f64
    }
}
