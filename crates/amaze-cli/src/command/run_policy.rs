use std::path::PathBuf;

use amaze_engine::{Cell, maze_file};
use amaze_evaluator::{
    path_solver,
    policy::{FeatureScheme, LinearPolicy},
    policy_evaluator::{FitnessParams, PolicyEvaluator},
};
use amaze_training::policy_file;
use anyhow::Context;

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RunPolicyArg {
    /// Trained policy file
    policy: PathBuf,
    /// Maze file to walk through
    maze: PathBuf,
    /// Feature scheme the policy was trained with
    #[arg(long, default_value = "offset")]
    features: FeatureScheme,
    /// Step budget
    #[arg(long)]
    max_steps: Option<usize>,
    /// Start cell as `x,y` (default: top-left corner)
    #[arg(long)]
    start: Option<Cell>,
    /// Goal cell as `x,y` (default: bottom-right corner)
    #[arg(long)]
    goal: Option<Cell>,
    /// Seed for tie-breaking (drawn at random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Print the maze with the walked cells marked
    #[arg(long)]
    print: bool,
}

pub(crate) fn run(arg: &RunPolicyArg) -> anyhow::Result<()> {
    let RunPolicyArg {
        policy,
        maze,
        features,
        max_steps,
        start,
        goal,
        seed,
        print,
    } = arg;

    let chromosome = policy_file::load(policy, features.gene_count())?;
    let maze_path = maze;
    let maze = maze_file::load(maze_path)?;
    let start = start.unwrap_or_else(|| maze.default_start());
    let goal = goal.unwrap_or_else(|| maze.default_goal());

    let mut params = FitnessParams::default();
    if let Some(max_steps) = max_steps {
        params.max_steps = *max_steps;
    }
    let evaluator = PolicyEvaluator::new(*features, params);
    let policy = LinearPolicy::new(*features, chromosome.genes());
    let (mut rng, seed) = util::seeded_rng(*seed);

    let run = evaluator
        .run(&policy, &maze, start, goal, &mut rng)
        .with_context(|| format!("Failed to run policy on {}", maze_path.display()))?;
    let fitness = params.fitness(&maze, &run);

    eprintln!("Policy run from {start} to {goal} (seed {seed})");
    let result = if run.reached_goal {
        "reached goal"
    } else {
        "out of steps"
    };
    eprintln!("  Result: {result}");
    eprintln!(
        "  Steps: {} ({} wasted on walls)",
        run.steps_used, run.wasted_steps
    );
    eprintln!(
        "  Final cell: {} ({} from goal)",
        run.final_cell(),
        run.final_distance
    );
    eprintln!("  Fitness: {fitness:.3}");
    let shortest = path_solver::solve(&maze, start, goal)
        .ok()
        .and_then(|search| search.outcome.path_len());
    if let Some(len) = shortest {
        eprintln!("  Shortest path: {len} steps");
    }

    if *print {
        print!("{}", maze.render_with_path(&run.trace));
    }
    Ok(())
}
