//! Maze solving: exact A* search and learned linear policies.
//!
//! This crate offers two ways of getting from a start cell to a goal cell:
//!
//! 1. **Global search** ([`path_solver`]) - A* over the full wall grid. Always finds a
//!    shortest path if one exists and records the order in which cells were expanded.
//!
//! 2. **Local policy** ([`policy`], [`policy_evaluator`]) - a linear policy that only sees the
//!    walls around its current cell plus a goal feature, and greedily picks a direction each
//!    step. [`PolicyEvaluator`](policy_evaluator::PolicyEvaluator) runs a policy for a bounded
//!    number of steps and turns the run into a fitness score for training.
//!
//! # Architecture
//!
//! ```text
//! Fitness (per maze, averaged over the corpus)
//!     ↓ computed from
//! Policy Run (bounded walk through one maze)
//!     ↓ driven by
//! Linear Policy (direction scores = weights · features)
//!     ↓ reads
//! Feature Scheme (walls + goal features of the current cell)
//! ```
//!
//! Neither solver keeps a reference to a maze between calls. [`PathSolver`](path_solver::PathSolver)
//! owns scratch buffers sized for one maze shape and must be rebuilt before it is used on a maze
//! of another shape.
//!
//! # Example
//!
//! ```
//! use amaze_engine::MazeGenerator;
//! use amaze_evaluator::path_solver;
//!
//! let maze = MazeGenerator::with_seed(7).generate(10, 10).unwrap().maze;
//! let trace = path_solver::solve(&maze, maze.default_start(), maze.default_goal()).unwrap();
//! let path = trace.outcome.path().unwrap();
//! assert_eq!(path.first(), Some(&maze.default_start()));
//! assert_eq!(path.last(), Some(&maze.default_goal()));
//! ```

pub mod path_solver;
pub mod policy;
pub mod policy_evaluator;
