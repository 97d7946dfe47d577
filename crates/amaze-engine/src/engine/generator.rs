use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{Cell, Direction, GridMaze, MazeError};

/// A single carve event: the wall between `cell` and its neighbor in
/// `direction` was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStep {
    pub cell: Cell,
    pub direction: Direction,
}

impl GenerationStep {
    #[must_use]
    pub const fn new(cell: Cell, direction: Direction) -> Self {
        Self { cell, direction }
    }

    /// Re-applies this carve event to `maze`.
    pub fn apply(&self, maze: &mut GridMaze) -> Result<(), MazeError> {
        maze.remove_wall(self.cell, self.direction)
    }
}

/// Output of [`MazeGenerator::generate`].
#[derive(Debug, Clone)]
pub struct GeneratedMaze {
    pub maze: GridMaze,
    /// Carve events in the order they happened.
    pub steps: Vec<GenerationStep>,
}

/// Randomized depth-first maze carver.
///
/// Produces perfect mazes: the carved passages form a spanning tree of the
/// grid graph, rooted at the top-left cell. Every cell is reachable and there
/// is exactly one simple path between any two cells.
///
/// # Algorithm
///
/// On entering a cell, the four directions are shuffled. They are then tried
/// in shuffled order: an in-bounds, unvisited neighbor gets the wall between
/// it and the current cell removed, is marked visited and is fully explored
/// before the next direction is tried.
///
/// The traversal uses an explicit stack instead of recursion, so a serpentine
/// maze with depth `width × height` cannot exhaust the call stack. The order
/// of random draws is the same as in the recursive formulation.
///
/// # Determinism
///
/// Output depends only on the seed and the call sequence. Two generators
/// created with the same seed produce identical mazes and step logs.
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    seed: u64,
    rng: Pcg32,
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct Frame {
    cell: Cell,
    directions: [Direction; Direction::LEN],
    next: usize,
}

impl MazeGenerator {
    /// Creates a generator seeded from the thread-local random source.
    ///
    /// The chosen seed is available via [`Self::seed`] so runs can be reproduced.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Creates and carves a new `width × height` maze.
    pub fn generate(&mut self, width: usize, height: usize) -> Result<GeneratedMaze, MazeError> {
        let mut maze = GridMaze::new(width, height)?;
        let steps = self.carve(&mut maze);
        Ok(GeneratedMaze { maze, steps })
    }

    /// Resets `maze` to fully walled and carves a fresh perfect maze into it.
    ///
    /// Returns the carve log.
    pub fn carve(&mut self, maze: &mut GridMaze) -> Vec<GenerationStep> {
        maze.reset();

        let mut visited = vec![false; maze.cell_count()];
        let mut steps = Vec::with_capacity(maze.cell_count() - 1);
        let start = maze.default_start();

        visited[maze.index_of(start)] = true;
        let mut stack = vec![self.enter(start)];

        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = frame.directions.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let cell = frame.cell;

            let Some(neighbor) = maze.neighbor(cell, direction) else {
                continue;
            };
            let neighbor_index = maze.index_of(neighbor);
            if visited[neighbor_index] {
                continue;
            }

            maze.open_passage(cell, neighbor, direction);
            steps.push(GenerationStep::new(cell, direction));
            visited[neighbor_index] = true;
            let frame = self.enter(neighbor);
            stack.push(frame);
        }

        log::debug!(
            "carved {}x{} maze (seed {}) in {} steps",
            maze.width(),
            maze.height(),
            self.seed,
            steps.len()
        );
        steps
    }

    fn enter(&mut self, cell: Cell) -> Frame {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        Frame {
            cell,
            directions,
            next: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    fn reachable_from_origin(maze: &GridMaze) -> usize {
        let mut seen = vec![false; maze.cell_count()];
        let mut queue = VecDeque::from([Cell::new(0, 0)]);
        seen[0] = true;
        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for next in maze.open_neighbors(cell) {
                let index = maze.index_of(next);
                if !seen[index] {
                    seen[index] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    #[test]
    fn test_generates_spanning_tree() {
        let mut generator = MazeGenerator::with_seed(1);
        for (width, height) in [(1, 1), (1, 7), (7, 1), (2, 2), (5, 5), (13, 9), (30, 20)] {
            let generated = generator.generate(width, height).unwrap();
            let cells = width * height;
            assert_eq!(generated.maze.passage_count(), cells - 1, "{width}x{height}");
            assert_eq!(generated.steps.len(), cells - 1);
            assert_eq!(reachable_from_origin(&generated.maze), cells);
            generated.maze.check_wall_consistency().unwrap();
        }
    }

    #[test]
    fn test_single_cell_has_no_steps() {
        let generated = MazeGenerator::with_seed(0).generate(1, 1).unwrap();
        assert!(generated.steps.is_empty());
        assert_eq!(generated.maze, GridMaze::new(1, 1).unwrap());
    }

    #[test]
    fn test_rejects_invalid_dimension() {
        let mut generator = MazeGenerator::with_seed(0);
        assert!(matches!(
            generator.generate(0, 3),
            Err(MazeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_replay_reproduces_maze() {
        let generated = MazeGenerator::with_seed(99).generate(17, 11).unwrap();
        let replayed = GridMaze::replay(17, 11, &generated.steps).unwrap();
        assert_eq!(replayed, generated.maze);
        assert_eq!(replayed.wall_masks(), generated.maze.wall_masks());
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = MazeGenerator::with_seed(1234).generate(10, 10).unwrap();
        let b = MazeGenerator::with_seed(1234).generate(10, 10).unwrap();
        assert_eq!(a.maze, b.maze);
        assert_eq!(a.steps, b.steps);
    }

    #[test]
    fn test_steps_are_adjacent_to_carved_region() {
        // Each step must start from a cell already connected to the origin.
        let generated = MazeGenerator::with_seed(5).generate(9, 6).unwrap();
        let mut connected = vec![false; 9 * 6];
        connected[0] = true;
        for step in &generated.steps {
            assert!(connected[step.cell.index(9)], "step from unvisited {}", step.cell);
            let neighbor = generated.maze.neighbor(step.cell, step.direction).unwrap();
            assert!(!connected[neighbor.index(9)], "step into visited {neighbor}");
            connected[neighbor.index(9)] = true;
        }
    }

    #[test]
    fn test_carve_resets_existing_maze() {
        let mut generator = MazeGenerator::with_seed(3);
        let mut maze = generator.generate(6, 4).unwrap().maze;
        let steps = generator.carve(&mut maze);
        assert_eq!(steps.len(), 23);
        assert_eq!(maze.passage_count(), 23);
    }

    #[test]
    fn test_large_serpentine_depth_does_not_overflow() {
        let generated = MazeGenerator::with_seed(8).generate(1, 200_000).unwrap();
        assert_eq!(generated.steps.len(), 199_999);
    }

    #[test]
    fn test_step_log_serializes() {
        let generated = MazeGenerator::with_seed(2).generate(2, 2).unwrap();
        let json = serde_json::to_string(&generated.steps).unwrap();
        let steps: Vec<GenerationStep> = serde_json::from_str(&json).unwrap();
        assert_eq!(steps, generated.steps);
        assert!(json.contains("\"direction\""));
    }
}
