//! Performance measurement for candidate ranking and grid assembly

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};
use jigsolve::pieces::StripScorer;
use jigsolve::pieces::dissection::dissect;
use jigsolve::solver::driver::solve_with_candidates;
use jigsolve::solver::matching::rank_candidates;
use std::hint::black_box;

fn gradient_source(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 2) as u8, (y * 2) as u8, (x + y) as u8, 255])
    })
}

/// Measures the parallel scoring and sort across all edge pairs
fn bench_rank_candidates(c: &mut Criterion) {
    let source = gradient_source(96, 96);
    let Ok(pieces) = dissect(&source, 4, 4, 7) else {
        return;
    };

    c.bench_function("rank_candidates_4x4", |b| {
        b.iter(|| rank_candidates(black_box(&pieces), &StripScorer));
    });
}

/// Measures the sequential join loop over a pre-ranked sequence
fn bench_assemble(c: &mut Criterion) {
    let source = gradient_source(96, 96);
    let Ok(pieces) = dissect(&source, 4, 4, 7) else {
        return;
    };
    let candidates = rank_candidates(&pieces, &StripScorer);

    c.bench_function("assemble_4x4", |b| {
        b.iter(|| {
            let mut working = pieces.clone();
            solve_with_candidates(black_box(&mut working), &candidates)
        });
    });
}

criterion_group!(benches, bench_rank_candidates, bench_assemble);
criterion_main!(benches);
