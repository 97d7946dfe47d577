//! Maze construction.
//!
//! - [`MazeGenerator`] - carves a perfect maze by randomized depth-first search
//! - [`GeneratedMaze`] - the carved maze paired with its [`GenerationStep`] log
//!
//! The step log is an audit trail: carving does not depend on it, but
//! replaying it from a fully walled grid with [`GridMaze::replay`](crate::GridMaze::replay)
//! reproduces the generated maze bit for bit.

pub use self::generator::*;

mod generator;
