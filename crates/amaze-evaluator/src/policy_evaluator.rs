//! Policy evaluation: fitness functions for training navigation policies.
//!
//! # How It Works
//!
//! 1. **Run** - the policy walks from the start cell for at most `max_steps` steps
//! 2. **Record** - cells entered, steps used, whether the goal was reached
//! 3. **Score** - [`FitnessParams::fitness`] turns the run into a scalar
//!
//! Each step the policy picks a direction. A move into a wall or off the grid wastes the
//! step: the counter advances and the agent stays put. Poor policies are penalized this way
//! rather than rejected. The run ends early as soon as the goal is entered.
//!
//! # Fitness
//!
//! ```text
//! fitness = goal_bonus · (width + height) · reached
//!         + step_reward · (max_steps − steps_used)
//!         − distance_weight · final_manhattan_distance
//! ```
//!
//! - the goal bonus scales with maze size so larger mazes are worth more
//! - unused steps reward fast solves; a run that never reaches the goal uses every step
//! - the distance penalty orders failed runs by how close they got
//!
//! All constants are configuration ([`FitnessParams`]), not part of the contract.
//!
//! # Corpus Fitness
//!
//! During training a chromosome is scored on every maze of a fixed corpus and its fitness
//! is the mean. [`FitnessEvaluator::evaluate_corpus`] returns `None` for an empty corpus
//! instead of dividing by zero.

use std::fmt;

use amaze_engine::{Cell, GridMaze, MazeError};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::policy::{FeatureScheme, LinearPolicy};

/// Tunable fitness constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessParams {
    /// Step budget per maze
    pub max_steps: usize,
    /// Reward for reaching the goal, multiplied by `width + height`
    pub goal_bonus: f32,
    /// Reward per unused step
    pub step_reward: f32,
    /// Penalty per cell of remaining Manhattan distance
    pub distance_weight: f32,
}

impl Default for FitnessParams {
    fn default() -> Self {
        Self {
            max_steps: 200,
            goal_bonus: 1.0,
            step_reward: 0.1,
            distance_weight: 1.0,
        }
    }
}

impl FitnessParams {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fitness(&self, maze: &GridMaze, run: &PolicyRun) -> f32 {
        let reached = if run.reached_goal { 1.0 } else { 0.0 };
        let unused = self.max_steps.saturating_sub(run.steps_used) as f32;
        let size = (maze.width() + maze.height()) as f32;
        self.goal_bonus * size * reached + self.step_reward * unused
            - self.distance_weight * run.final_distance as f32
    }
}

/// Record of one bounded policy walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRun {
    /// Start cell followed by every cell entered, in order.
    pub trace: Vec<Cell>,
    pub steps_used: usize,
    /// Steps spent bumping into walls or the border.
    pub wasted_steps: usize,
    pub reached_goal: bool,
    pub final_distance: usize,
}

impl PolicyRun {
    #[must_use]
    pub fn final_cell(&self) -> Cell {
        // trace always holds at least the start cell
        self.trace[self.trace.len() - 1]
    }
}

/// Scores a flat gene vector against mazes.
///
/// Used by the genetic algorithm to compute chromosome fitness; implementations must be
/// shareable across evaluation threads.
pub trait FitnessEvaluator: fmt::Debug + Send + Sync {
    /// Number of genes a chromosome must have.
    fn gene_count(&self) -> usize;

    /// Fitness of `genes` on a single maze.
    fn evaluate_maze(&self, genes: &[f32], maze: &GridMaze, rng: &mut dyn RngCore) -> f32;

    /// Mean fitness over `corpus`, or `None` if the corpus is empty.
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_corpus(
        &self,
        genes: &[f32],
        corpus: &[GridMaze],
        rng: &mut dyn RngCore,
    ) -> Option<f32> {
        if corpus.is_empty() {
            return None;
        }
        let total = corpus
            .iter()
            .map(|maze| self.evaluate_maze(genes, maze, rng))
            .sum::<f32>();
        Some(total / corpus.len() as f32)
    }
}

/// Runs linear policies from the top-left to the bottom-right corner of each maze.
#[derive(Debug, Clone, Default)]
pub struct PolicyEvaluator {
    scheme: FeatureScheme,
    params: FitnessParams,
}

impl PolicyEvaluator {
    #[must_use]
    pub fn new(scheme: FeatureScheme, params: FitnessParams) -> Self {
        Self { scheme, params }
    }

    #[must_use]
    pub fn scheme(&self) -> FeatureScheme {
        self.scheme
    }

    #[must_use]
    pub fn params(&self) -> &FitnessParams {
        &self.params
    }

    /// Walks `policy` from `start` toward `goal` for at most `max_steps` steps.
    pub fn run<R>(
        &self,
        policy: &LinearPolicy<'_>,
        maze: &GridMaze,
        start: Cell,
        goal: Cell,
        rng: &mut R,
    ) -> Result<PolicyRun, MazeError>
    where
        R: RngCore + ?Sized,
    {
        maze.check_contains(start)?;
        maze.check_contains(goal)?;
        Ok(self.walk(policy, maze, start, goal, rng))
    }

    /// Walks from the top-left to the bottom-right corner, which every maze contains.
    #[must_use]
    pub fn run_corners<R>(
        &self,
        policy: &LinearPolicy<'_>,
        maze: &GridMaze,
        rng: &mut R,
    ) -> PolicyRun
    where
        R: RngCore + ?Sized,
    {
        self.walk(policy, maze, maze.default_start(), maze.default_goal(), rng)
    }

    fn walk<R>(
        &self,
        policy: &LinearPolicy<'_>,
        maze: &GridMaze,
        start: Cell,
        goal: Cell,
        rng: &mut R,
    ) -> PolicyRun
    where
        R: RngCore + ?Sized,
    {
        let mut current = start;
        let mut trace = vec![start];
        let mut steps_used = 0;
        let mut wasted_steps = 0;

        while current != goal && steps_used < self.params.max_steps {
            let direction = policy.choose(maze, current, goal, rng);
            steps_used += 1;
            match maze.step(current, direction) {
                Some(next) => {
                    current = next;
                    trace.push(next);
                }
                None => wasted_steps += 1,
            }
        }

        PolicyRun {
            trace,
            steps_used,
            wasted_steps,
            reached_goal: current == goal,
            final_distance: current.manhattan_distance(goal),
        }
    }
}

impl FitnessEvaluator for PolicyEvaluator {
    fn gene_count(&self) -> usize {
        self.scheme.gene_count()
    }

    fn evaluate_maze(&self, genes: &[f32], maze: &GridMaze, rng: &mut dyn RngCore) -> f32 {
        let policy = LinearPolicy::new(self.scheme, genes);
        let run = self.run_corners(&policy, maze, rng);
        self.params.fitness(maze, &run)
    }
}

#[cfg(test)]
mod tests {
    use amaze_engine::{Direction, MazeGenerator};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    /// A 1-wide vertical corridor from (0, 0) down to (0, len - 1).
    fn corridor(len: usize) -> GridMaze {
        MazeGenerator::with_seed(0).generate(1, len).unwrap().maze
    }

    /// Genes whose bias pushes every decision toward `direction`.
    fn always(direction: Direction) -> Vec<f32> {
        let scheme = FeatureScheme::Offset;
        let inputs = scheme.input_count();
        let mut genes = vec![0.0; scheme.gene_count()];
        genes[direction.index() * inputs + inputs - 1] = 1.0;
        genes
    }

    #[test]
    fn test_run_reaches_goal_and_stops() {
        let maze = corridor(5);
        let evaluator = PolicyEvaluator::default();
        let genes = always(Direction::South);
        let policy = LinearPolicy::new(FeatureScheme::Offset, &genes);
        let mut rng = Pcg32::seed_from_u64(1);
        let run = evaluator
            .run(&policy, &maze, maze.default_start(), maze.default_goal(), &mut rng)
            .unwrap();
        assert!(run.reached_goal);
        assert_eq!(run.steps_used, 4);
        assert_eq!(run.wasted_steps, 0);
        assert_eq!(run.trace.len(), 5);
        assert_eq!(run.final_cell(), Cell::new(0, 4));
        assert_eq!(run.final_distance, 0);

        // (1 + 5) * 1.0 + 0.1 * (200 - 4)
        let fitness = evaluator.params().fitness(&maze, &run);
        assert!((fitness - 25.6).abs() < 1e-4, "{fitness}");
    }

    #[test]
    fn test_run_corners_matches_checked_run() {
        let maze = MazeGenerator::with_seed(11).generate(6, 4).unwrap().maze;
        let evaluator = PolicyEvaluator::default();
        let genes = always(Direction::East);
        let policy = LinearPolicy::new(FeatureScheme::Offset, &genes);
        let corners = evaluator.run_corners(&policy, &maze, &mut Pcg32::seed_from_u64(2));
        let checked = evaluator
            .run(
                &policy,
                &maze,
                maze.default_start(),
                maze.default_goal(),
                &mut Pcg32::seed_from_u64(2),
            )
            .unwrap();
        assert_eq!(corners, checked);
        assert_eq!(corners.trace[0], Cell::new(0, 0));
    }

    #[test]
    fn test_blocked_moves_waste_steps() {
        let maze = corridor(5);
        let params = FitnessParams {
            max_steps: 10,
            ..FitnessParams::default()
        };
        let evaluator = PolicyEvaluator::new(FeatureScheme::Offset, params);
        let genes = always(Direction::East);
        let policy = LinearPolicy::new(FeatureScheme::Offset, &genes);
        let mut rng = Pcg32::seed_from_u64(1);
        let run = evaluator
            .run(&policy, &maze, maze.default_start(), maze.default_goal(), &mut rng)
            .unwrap();
        assert!(!run.reached_goal);
        assert_eq!(run.steps_used, 10);
        assert_eq!(run.wasted_steps, 10);
        assert_eq!(run.trace, vec![Cell::new(0, 0)]);
        assert_eq!(run.final_distance, 4);
        let fitness = evaluator.params().fitness(&maze, &run);
        assert!((fitness + 4.0).abs() < 1e-6, "{fitness}");
    }

    #[test]
    fn test_start_on_goal_uses_no_steps() {
        let maze = GridMaze::new(1, 1).unwrap();
        let evaluator = PolicyEvaluator::default();
        let mut rng = Pcg32::seed_from_u64(0);
        let fitness = evaluator.evaluate_maze(&always(Direction::North), &maze, &mut rng);
        // 2 * 1.0 + 0.1 * 200
        assert!((fitness - 22.0).abs() < 1e-4, "{fitness}");
    }

    #[test]
    fn test_run_rejects_outside_cells() {
        let maze = corridor(3);
        let evaluator = PolicyEvaluator::default();
        let genes = always(Direction::South);
        let policy = LinearPolicy::new(FeatureScheme::Offset, &genes);
        let mut rng = Pcg32::seed_from_u64(0);
        assert!(
            evaluator
                .run(&policy, &maze, Cell::new(1, 0), Cell::new(0, 2), &mut rng)
                .is_err()
        );
    }

    #[test]
    fn test_reaching_goal_beats_failing() {
        let maze = corridor(6);
        let evaluator = PolicyEvaluator::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let good = evaluator.evaluate_maze(&always(Direction::South), &maze, &mut rng);
        let bad = evaluator.evaluate_maze(&always(Direction::North), &maze, &mut rng);
        assert!(good > bad);
    }

    #[test]
    fn test_corpus_mean() {
        let evaluator = PolicyEvaluator::default();
        let mut rng = Pcg32::seed_from_u64(0);
        let genes = always(Direction::South);
        let corpus = [corridor(3), corridor(5)];
        let a = evaluator.evaluate_maze(&genes, &corpus[0], &mut rng);
        let b = evaluator.evaluate_maze(&genes, &corpus[1], &mut rng);
        let mean = evaluator.evaluate_corpus(&genes, &corpus, &mut rng).unwrap();
        assert!((mean - (a + b) / 2.0).abs() < 1e-4);
        assert_eq!(evaluator.evaluate_corpus(&genes, &[], &mut rng), None);
    }

    #[test]
    fn test_same_seed_same_run() {
        let maze = MazeGenerator::with_seed(6).generate(8, 8).unwrap().maze;
        let evaluator = PolicyEvaluator::new(FeatureScheme::Distance, FitnessParams::default());
        let genes = vec![0.0; FeatureScheme::Distance.gene_count()];
        let policy = LinearPolicy::new(FeatureScheme::Distance, &genes);
        let start = maze.default_start();
        let goal = maze.default_goal();
        let a = evaluator
            .run(&policy, &maze, start, goal, &mut Pcg32::seed_from_u64(9))
            .unwrap();
        let b = evaluator
            .run(&policy, &maze, start, goal, &mut Pcg32::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: FitnessParams = serde_json::from_str(r#"{"max_steps": 50}"#).unwrap();
        assert_eq!(params.max_steps, 50);
        assert_eq!(params.step_reward, FitnessParams::default().step_reward);
    }
}
