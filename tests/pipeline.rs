//! Dissect, solve, and render round trips over synthetic images

use image::{Rgba, RgbaImage};
use jigsolve::io::cli::{Cli, FileProcessor};
use jigsolve::io::image::{compose_solution, render_solution};
use jigsolve::pieces::StripScorer;
use jigsolve::pieces::dissection::dissect;
use jigsolve::pieces::piece::rotate_image;
use jigsolve::solver::driver::solve;
use std::path::PathBuf;

// Smooth, asymmetric gradients: boundary strips are unique along their
// position and costly to match reversed, so true matches rank first.
fn gradient_source(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 3) as u8, (y * 3) as u8, (x + y) as u8, 255])
    })
}

#[test]
fn test_roundtrip_reassembles_the_source_image() {
    let source = gradient_source(60, 60);
    let mut pieces = match dissect(&source, 3, 3, 1234) {
        Ok(pieces) => pieces,
        Err(error) => unreachable!("dissect failed: {error}"),
    };

    let outcome = match solve(&mut pieces, &StripScorer) {
        Ok(outcome) => outcome,
        Err(error) => unreachable!("solve failed: {error}"),
    };
    assert!(outcome.is_complete(), "3x3 gradient must solve completely");

    let composed = match compose_solution(outcome.solution(), &pieces) {
        Ok(image) => image,
        Err(error) => unreachable!("composition failed: {error}"),
    };

    // The component frame is anchored to an arbitrarily rotated piece, so
    // the assembly may come back as the whole source turned by a quarter
    let reassembled = (0..4).any(|turns| rotate_image(&source, turns) == composed);
    assert!(reassembled, "composed image must match the source layout");
}

#[test]
fn test_roundtrip_is_seed_independent() {
    let source = gradient_source(40, 40);
    for seed in [0, 7, 4242] {
        let mut pieces = match dissect(&source, 2, 2, seed) {
            Ok(pieces) => pieces,
            Err(error) => unreachable!("dissect failed: {error}"),
        };
        let outcome = match solve(&mut pieces, &StripScorer) {
            Ok(outcome) => outcome,
            Err(error) => unreachable!("solve failed: {error}"),
        };
        assert!(outcome.is_complete(), "seed {seed} failed to solve");
        assert_eq!(outcome.solution().unplaced_count(), 0);
    }
}

#[test]
fn test_render_solution_creates_parent_directories() {
    let Ok(dir) = tempfile::tempdir() else {
        unreachable!("failed to create temp dir");
    };
    let output = dir.path().join("nested/out/solved.png");

    let source = gradient_source(40, 40);
    let mut pieces = match dissect(&source, 2, 2, 9) {
        Ok(pieces) => pieces,
        Err(error) => unreachable!("dissect failed: {error}"),
    };
    let outcome = match solve(&mut pieces, &StripScorer) {
        Ok(outcome) => outcome,
        Err(error) => unreachable!("solve failed: {error}"),
    };

    let path_string = output.to_string_lossy().to_string();
    assert!(render_solution(outcome.solution(), &pieces, &path_string).is_ok());
    assert!(output.exists());

    let saved = image::open(&output).map(|img| img.to_rgba8().dimensions());
    assert_eq!(saved.ok(), Some((40, 40)));
}

#[test]
fn test_file_processor_writes_output_and_debug_pieces() {
    let Ok(dir) = tempfile::tempdir() else {
        unreachable!("failed to create temp dir");
    };
    let input = dir.path().join("puzzle.png");
    assert!(gradient_source(60, 60).save(&input).is_ok());

    let cli = Cli {
        target: input.clone(),
        rows: 2,
        cols: 2,
        seed: 5,
        quiet: true,
        no_skip: false,
        debug: true,
    };
    let mut processor = FileProcessor::new(cli);
    assert!(processor.process().is_ok());

    assert!(dir.path().join("puzzle_solved.png").exists());

    let pieces_dir = dir.path().join("puzzle_pieces");
    assert!(pieces_dir.is_dir());
    let piece_files: Vec<PathBuf> = (0..4)
        .map(|index| pieces_dir.join(format!("piece_{index:03}.png")))
        .collect();
    assert!(piece_files.iter().all(|path| path.exists()));
}

#[test]
fn test_file_processor_skips_existing_output() {
    let Ok(dir) = tempfile::tempdir() else {
        unreachable!("failed to create temp dir");
    };
    let input = dir.path().join("puzzle.png");
    let output = dir.path().join("puzzle_solved.png");
    assert!(gradient_source(40, 40).save(&input).is_ok());
    assert!(gradient_source(1, 1).save(&output).is_ok());

    let cli = Cli {
        target: input,
        rows: 2,
        cols: 2,
        seed: 5,
        quiet: true,
        no_skip: false,
        debug: false,
    };
    let mut processor = FileProcessor::new(cli);
    assert!(processor.process().is_ok());

    // Pre-existing output must be left untouched
    let untouched = image::open(&output).map(|img| img.to_rgba8().dimensions());
    assert_eq!(untouched.ok(), Some((1, 1)));
}
