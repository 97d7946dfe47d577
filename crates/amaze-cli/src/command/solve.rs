use std::path::PathBuf;

use amaze_engine::{Cell, maze_file};
use amaze_evaluator::path_solver::{self, SearchOutcome};
use anyhow::Context;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SolveArg {
    /// Maze file to solve
    maze: PathBuf,
    /// Start cell as `x,y` (default: top-left corner)
    #[arg(long)]
    start: Option<Cell>,
    /// Goal cell as `x,y` (default: bottom-right corner)
    #[arg(long)]
    goal: Option<Cell>,
    /// Write the search trace as JSON to this file (`-` for stdout)
    #[arg(long)]
    trace: Option<PathBuf>,
    /// Print the maze with the path marked
    #[arg(long)]
    print: bool,
}

pub(crate) fn run(arg: &SolveArg) -> anyhow::Result<()> {
    let SolveArg {
        maze,
        start,
        goal,
        trace,
        print,
    } = arg;

    let path = maze;
    let maze = maze_file::load(path)?;
    let start = start.unwrap_or_else(|| maze.default_start());
    let goal = goal.unwrap_or_else(|| maze.default_goal());

    let search = path_solver::solve(&maze, start, goal)
        .with_context(|| format!("Failed to solve {}", path.display()))?;

    eprintln!(
        "Searched {}x{} maze from {start} to {goal}: {} cells expanded",
        maze.width(),
        maze.height(),
        search.visited.len()
    );
    match &search.outcome {
        SearchOutcome::Found { path } => {
            eprintln!("  Shortest path: {} steps", path.len() - 1);
            let cells = path.iter().map(ToString::to_string).collect::<Vec<_>>();
            println!("{}", cells.join(" "));
        }
        SearchOutcome::Unreachable => eprintln!("  Goal is unreachable"),
    }

    if let Some(trace_path) = trace {
        Output::save_json(&search, trace_path)?;
        eprintln!("  Trace: {}", trace_path.display());
    }
    if *print {
        let path = search.outcome.path().unwrap_or_default();
        print!("{}", maze.render_with_path(path));
    }

    Ok(())
}
