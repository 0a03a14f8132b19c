//! Progress display for the scoring stage
//!
//! Candidate scoring dominates a solve's wall time, so it gets a real
//! progress bar (ticked from the parallel ranking loop); everything after
//! it completes in milliseconds.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static SCORING_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display for a solve run
pub struct ProgressManager {
    multi_progress: MultiProgress,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
        }
    }

    /// Bar ticking once per edge row during candidate scoring
    pub fn scoring_bar(&self, edge_rows: u64) -> ProgressBar {
        let bar = ProgressBar::new(edge_rows);
        bar.set_style(SCORING_STYLE.clone());
        bar.set_message("scoring edges");
        self.multi_progress.add(bar)
    }

    /// Clear all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
