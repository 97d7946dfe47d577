use std::path::PathBuf;

use amaze_engine::{MazeGenerator, maze_file};
use anyhow::Context;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GenerateCorpusArg {
    /// Directory to write the mazes into
    #[arg(long, default_value = "mazes")]
    dir: PathBuf,
    /// Number of mazes to generate
    #[arg(long, default_value_t = 100)]
    count: usize,
    /// Maze width in cells
    #[arg(long, default_value_t = 10)]
    width: usize,
    /// Maze height in cells
    #[arg(long, default_value_t = 10)]
    height: usize,
    /// Random seed (drawn at random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &GenerateCorpusArg) -> anyhow::Result<()> {
    let GenerateCorpusArg {
        dir,
        count,
        width,
        height,
        seed,
    } = arg;

    let mut generator = seed.map_or_else(MazeGenerator::new, MazeGenerator::with_seed);
    eprintln!(
        "Generating {count} mazes of {width}x{height} (seed {})...",
        generator.seed()
    );
    let mazes = (0..*count)
        .map(|_| generator.generate(*width, *height).map(|g| g.maze))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to generate maze")?;
    let paths = maze_file::save_corpus(dir, &mazes)?;

    eprintln!("Saved {} mazes to {}", paths.len(), dir.display());
    Ok(())
}
