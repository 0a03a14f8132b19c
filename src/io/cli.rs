//! Command-line interface for reassembling dissected images
//!
//! Each input PNG is cut into a seeded, shuffled, randomly rotated piece
//! set, solved, and written back as `<stem>_solved.png`. Directories are
//! processed in sorted order, skipping files whose output already exists.

use crate::io::configuration::{
    DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, DEFAULT_SEED, OUTPUT_SUFFIX, PIECES_DIR_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{export_piece_images, load_rgba, render_solution};
use crate::io::progress::ProgressManager;
use crate::pieces::StripScorer;
use crate::pieces::dissection::dissect;
use crate::solver::components::{Solution, UNPLACED};
use crate::solver::driver::{SolveOutcome, solve_with_candidates};
use crate::solver::matching::{edge_count, rank_candidates, rank_candidates_with_progress};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "jigsolve")]
#[command(
    author,
    version,
    about = "Reassemble a dissected image by greedy edge matching"
)]
/// Command-line arguments for the reassembly tool
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Number of rows to cut the source image into
    #[arg(short, long, default_value_t = DEFAULT_GRID_ROWS)]
    pub rows: usize,

    /// Number of columns to cut the source image into
    #[arg(short, long, default_value_t = DEFAULT_GRID_COLS)]
    pub cols: usize,

    /// Random seed for reproducible shuffling and rotation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Save each dissected piece bitmap next to the output
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates dissection and reassembly of PNG files
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(crate::io::error::io_error(
                    "Target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(crate::io::error::io_error(
                "Target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for skip messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for user feedback for the outcome summary
    #[allow(clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        let source = load_rgba(input_path)?;
        let mut pieces = dissect(&source, self.cli.rows, self.cli.cols, self.cli.seed)?;

        if self.cli.debug {
            export_piece_images(&pieces, &Self::get_pieces_dir(input_path))?;
        }

        let scorer = StripScorer;
        let candidates = if let Some(ref pm) = self.progress_manager {
            let bar = pm.scoring_bar(edge_count(&pieces) as u64);
            let candidates = rank_candidates_with_progress(&pieces, &scorer, &bar);
            bar.finish_and_clear();
            candidates
        } else {
            rank_candidates(&pieces, &scorer)
        };

        let outcome = solve_with_candidates(&mut pieces, &candidates)?;

        if !self.cli.quiet {
            match &outcome {
                SolveOutcome::Solved(solution) => {
                    eprintln!(
                        "{}: solved {}x{} in {:.2?}",
                        input_path.display(),
                        solution.rows(),
                        solution.cols(),
                        start_time.elapsed()
                    );
                    print_grid(solution);
                }
                SolveOutcome::Partial(solution) => {
                    eprintln!(
                        "{}: candidates exhausted, partial layout with {} open cell(s)",
                        input_path.display(),
                        solution.unplaced_count()
                    );
                    print_grid(solution);
                }
            }
        }

        render_solution(
            outcome.solution(),
            &pieces,
            output_path
                .to_str()
                .ok_or_else(|| crate::io::error::io_error("Invalid output path"))?,
        )
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    fn get_pieces_dir(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let dir_name = format!("{}{}", stem.to_string_lossy(), PIECES_DIR_SUFFIX);

        if let Some(parent) = input_path.parent() {
            parent.join(dir_name)
        } else {
            PathBuf::from(dir_name)
        }
    }
}

// Echo the placement grid, one row per line, "." marking open cells.
#[allow(clippy::print_stderr)]
fn print_grid(solution: &Solution) {
    for row in solution.placements.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|&piece| {
                if piece == UNPLACED {
                    ".".to_string()
                } else {
                    piece.to_string()
                }
            })
            .collect();
        eprintln!("  {}", line.join(" "));
    }
}
