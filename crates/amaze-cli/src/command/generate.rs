use std::path::PathBuf;

use amaze_engine::{MazeGenerator, maze_file};
use anyhow::Context;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Maze width in cells
    #[arg(long, default_value_t = 20)]
    width: usize,
    /// Maze height in cells
    #[arg(long, default_value_t = 20)]
    height: usize,
    /// Random seed (drawn at random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Maze file to write
    #[arg(long)]
    output: Option<PathBuf>,
    /// Write the carve log as JSON to this file (`-` for stdout)
    #[arg(long)]
    steps: Option<PathBuf>,
    /// Print the maze even when writing a file
    #[arg(long)]
    print: bool,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        width,
        height,
        seed,
        output,
        steps,
        print,
    } = arg;

    let mut generator = seed.map_or_else(MazeGenerator::new, MazeGenerator::with_seed);
    let generated = generator
        .generate(*width, *height)
        .context("Failed to generate maze")?;
    eprintln!(
        "Generated {width}x{height} maze in {} steps (seed {})",
        generated.steps.len(),
        generator.seed()
    );

    if let Some(path) = output {
        maze_file::save(path, &generated.maze)?;
        eprintln!("  Maze: {}", path.display());
    }
    if let Some(path) = steps {
        Output::save_json(&generated.steps, path)?;
        eprintln!("  Steps: {}", path.display());
    }
    if *print || output.is_none() {
        print!("{}", generated.maze);
    }

    Ok(())
}
