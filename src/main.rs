//! CLI entry point for the jigsaw reassembly tool

use clap::Parser;
use jigsolve::io::cli::{Cli, FileProcessor};

fn main() -> jigsolve::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
