//! A* shortest-path search over a [`GridMaze`].
//!
//! # Algorithm
//!
//! Standard A* with unit edge costs and the Manhattan distance heuristic, which is
//! admissible and consistent for 4-directional movement, so the first time the goal is
//! popped from the frontier its path is optimal.
//!
//! Stale frontier entries (a cell pushed several times before it was closed) are skipped
//! when popped. Every closed cell is appended to the visited trace, including the goal.
//!
//! # Tie-Breaking
//!
//! Frontier entries are ordered by `(f, h, insertion order)` ascending: among equal `f`
//! scores the entry closer to the goal wins, then the one pushed first. This only affects
//! *which* shortest path is recorded when several exist, never its length.
//!
//! # Works on Any Wall Layout
//!
//! Nothing here assumes a perfect maze. Mazes with loops, sealed regions or unreachable
//! goals are handled; an unreachable goal is reported as [`SearchOutcome::Unreachable`],
//! which is a normal outcome rather than an error.

use std::{cmp::Reverse, collections::BinaryHeap};

use amaze_engine::{Cell, Direction, GridMaze, MazeError};
use serde::Serialize;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SolveError {
    #[display(
        "solver is sized for a {solver_width}x{solver_height} maze, got {maze_width}x{maze_height}; rebuild it first"
    )]
    SizeMismatch {
        solver_width: usize,
        solver_height: usize,
        maze_width: usize,
        maze_height: usize,
    },
    #[display("invalid start or goal")]
    OutOfBounds { source: MazeError },
}

/// Result of one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum SearchOutcome {
    /// Shortest path from start to goal, both included.
    Found { path: Vec<Cell> },
    /// The frontier ran dry before reaching the goal.
    Unreachable,
}

impl SearchOutcome {
    #[must_use]
    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            Self::Found { path } => Some(path),
            Self::Unreachable => None,
        }
    }

    /// Number of moves on the found path.
    #[must_use]
    pub fn path_len(&self) -> Option<usize> {
        self.path().map(|path| path.len() - 1)
    }
}

/// Cells in expansion order plus the outcome.
///
/// The visited trace is kept even when the goal is unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchTrace {
    pub visited: Vec<Cell>,
    #[serde(flatten)]
    pub outcome: SearchOutcome,
}

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    g_score: usize,
    f_score: usize,
    parent: Option<usize>,
    closed: bool,
}

impl SearchNode {
    const UNVISITED: Self = Self {
        g_score: usize::MAX,
        f_score: usize::MAX,
        parent: None,
        closed: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    f_score: usize,
    h_score: usize,
    sequence: usize,
    index: usize,
}

/// Reusable A* scratch state for mazes of one shape.
///
/// All per-search state is cleared at the start of every [`PathSolver::solve`] call.
/// Using the solver on a maze of a different shape requires [`PathSolver::rebuild`].
#[derive(Debug, Clone)]
pub struct PathSolver {
    width: usize,
    height: usize,
    nodes: Vec<SearchNode>,
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
}

impl PathSolver {
    /// Creates a solver sized for `maze`.
    #[must_use]
    pub fn for_maze(maze: &GridMaze) -> Self {
        let mut solver = Self {
            width: 0,
            height: 0,
            nodes: vec![],
            frontier: BinaryHeap::new(),
        };
        solver.rebuild(maze);
        solver
    }

    /// Resizes the scratch buffers for `maze`.
    pub fn rebuild(&mut self, maze: &GridMaze) {
        self.width = maze.width();
        self.height = maze.height();
        self.nodes.clear();
        self.nodes.resize(maze.cell_count(), SearchNode::UNVISITED);
        self.frontier.clear();
    }

    fn reset(&mut self) {
        self.nodes.fill(SearchNode::UNVISITED);
        self.frontier.clear();
    }

    /// Searches for a shortest path from `start` to `goal`.
    pub fn solve(
        &mut self,
        maze: &GridMaze,
        start: Cell,
        goal: Cell,
    ) -> Result<SearchTrace, SolveError> {
        if (maze.width(), maze.height()) != (self.width, self.height) {
            return Err(SolveError::SizeMismatch {
                solver_width: self.width,
                solver_height: self.height,
                maze_width: maze.width(),
                maze_height: maze.height(),
            });
        }
        maze.check_contains(start)
            .and_then(|()| maze.check_contains(goal))
            .map_err(|source| SolveError::OutOfBounds { source })?;

        self.reset();

        let start_index = maze.index_of(start);
        let goal_index = maze.index_of(goal);
        let mut sequence = 0;
        let mut visited = vec![];

        let h_start = start.manhattan_distance(goal);
        self.nodes[start_index].g_score = 0;
        self.nodes[start_index].f_score = h_start;
        self.frontier.push(Reverse(FrontierEntry {
            f_score: h_start,
            h_score: h_start,
            sequence,
            index: start_index,
        }));

        while let Some(Reverse(entry)) = self.frontier.pop() {
            let current_index = entry.index;
            if self.nodes[current_index].closed {
                continue;
            }
            self.nodes[current_index].closed = true;
            let current = maze.cell_at(current_index);
            visited.push(current);

            if current_index == goal_index {
                let path = self.reconstruct_path(maze, goal_index);
                log::debug!(
                    "A* reached {goal} from {start}: {} moves, {} cells expanded",
                    path.len() - 1,
                    visited.len()
                );
                return Ok(SearchTrace {
                    visited,
                    outcome: SearchOutcome::Found { path },
                });
            }

            let tentative_g = self.nodes[current_index].g_score + 1;
            for direction in Direction::ALL {
                let Some(neighbor) = maze.step(current, direction) else {
                    continue;
                };
                let neighbor_index = maze.index_of(neighbor);
                let node = &mut self.nodes[neighbor_index];
                if node.closed || tentative_g >= node.g_score {
                    continue;
                }
                let h_score = neighbor.manhattan_distance(goal);
                node.parent = Some(current_index);
                node.g_score = tentative_g;
                node.f_score = tentative_g + h_score;
                sequence += 1;
                self.frontier.push(Reverse(FrontierEntry {
                    f_score: node.f_score,
                    h_score,
                    sequence,
                    index: neighbor_index,
                }));
            }
        }

        log::debug!(
            "A* found no path from {start} to {goal} after expanding {} cells",
            visited.len()
        );
        Ok(SearchTrace {
            visited,
            outcome: SearchOutcome::Unreachable,
        })
    }

    fn reconstruct_path(&self, maze: &GridMaze, goal_index: usize) -> Vec<Cell> {
        let mut path = vec![maze.cell_at(goal_index)];
        let mut index = goal_index;
        while let Some(parent) = self.nodes[index].parent {
            path.push(maze.cell_at(parent));
            index = parent;
        }
        path.reverse();
        path
    }
}

/// One-shot search with a temporary [`PathSolver`].
pub fn solve(maze: &GridMaze, start: Cell, goal: Cell) -> Result<SearchTrace, SolveError> {
    PathSolver::for_maze(maze).solve(maze, start, goal)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use amaze_engine::MazeGenerator;

    use super::*;

    /// Breadth-first shortest distance, for cross-checking A*.
    fn bfs_distance(maze: &GridMaze, start: Cell, goal: Cell) -> Option<usize> {
        let mut dist = vec![None; maze.cell_count()];
        dist[maze.index_of(start)] = Some(0);
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            let d = dist[maze.index_of(cell)]?;
            if cell == goal {
                return Some(d);
            }
            for next in maze.open_neighbors(cell) {
                let slot = &mut dist[maze.index_of(next)];
                if slot.is_none() {
                    *slot = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    fn assert_valid_path(maze: &GridMaze, path: &[Cell], start: Cell, goal: Cell) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for pair in path.windows(2) {
            let [a, b] = [pair[0], pair[1]];
            assert!(
                maze.open_neighbors(a).any(|n| n == b),
                "{a} -> {b} is not an open move"
            );
        }
    }

    /// Grid with every interior wall removed: many equally short paths exist.
    fn open_grid(width: usize, height: usize) -> GridMaze {
        let mut maze = GridMaze::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                maze.remove_wall(Cell::new(x, y), Direction::East).unwrap();
                maze.remove_wall(Cell::new(x, y), Direction::South).unwrap();
            }
        }
        maze
    }

    #[test]
    fn test_matches_bfs_on_generated_mazes() {
        let mut generator = MazeGenerator::with_seed(21);
        for _ in 0..20 {
            let maze = generator.generate(9, 7).unwrap().maze;
            let mut solver = PathSolver::for_maze(&maze);
            for (start, goal) in [
                (Cell::new(0, 0), Cell::new(8, 6)),
                (Cell::new(4, 3), Cell::new(0, 6)),
                (Cell::new(8, 0), Cell::new(8, 0)),
            ] {
                let trace = solver.solve(&maze, start, goal).unwrap();
                let path = trace.outcome.path().unwrap();
                assert_valid_path(&maze, path, start, goal);
                assert_eq!(Some(path.len() - 1), bfs_distance(&maze, start, goal));
                assert_eq!(trace.visited.last(), Some(&goal));
            }
        }
    }

    #[test]
    fn test_matches_bfs_on_mazes_with_loops() {
        let mut generator = MazeGenerator::with_seed(3);
        let mut maze = generator.generate(8, 8).unwrap().maze;
        // knock out extra walls to create cycles
        for i in 0..8 {
            maze.remove_wall(Cell::new(i, i), Direction::East).unwrap();
            maze.remove_wall(Cell::new(7 - i, i), Direction::South).unwrap();
        }
        let start = Cell::new(0, 7);
        let goal = Cell::new(7, 0);
        let trace = solve(&maze, start, goal).unwrap();
        let path = trace.outcome.path().unwrap();
        assert_valid_path(&maze, path, start, goal);
        assert_eq!(Some(path.len() - 1), bfs_distance(&maze, start, goal));
    }

    #[test]
    fn test_open_grid_path_is_manhattan() {
        let maze = open_grid(5, 5);
        let trace = solve(&maze, Cell::new(0, 0), Cell::new(4, 4)).unwrap();
        assert_eq!(trace.outcome.path_len(), Some(8));
        // the heuristic is exact on an open grid, so only path cells are expanded
        assert_eq!(trace.visited.len(), 9);
    }

    #[test]
    fn test_forced_single_path() {
        // serpentine corridor through a 5x5 grid
        let mut maze = GridMaze::new(5, 5).unwrap();
        for y in 0..5 {
            for x in 0..4 {
                maze.remove_wall(Cell::new(x, y), Direction::East).unwrap();
            }
            if y < 4 {
                let x = if y % 2 == 0 { 4 } else { 0 };
                maze.remove_wall(Cell::new(x, y), Direction::South).unwrap();
            }
        }
        let trace = solve(&maze, Cell::new(0, 0), Cell::new(4, 4)).unwrap();
        assert_eq!(trace.outcome.path_len(), Some(24));
    }

    #[test]
    fn test_unreachable_goal() {
        // open 4x4 grid except for the goal corner, which keeps all its walls
        let goal = Cell::new(3, 3);
        let mut maze = GridMaze::new(4, 4).unwrap();
        for index in 0..maze.cell_count() {
            let cell = maze.cell_at(index);
            for dir in [Direction::East, Direction::South] {
                let Some(next) = maze.neighbor(cell, dir) else {
                    continue;
                };
                if cell != goal && next != goal {
                    maze.remove_wall(cell, dir).unwrap();
                }
            }
        }

        let trace = solve(&maze, Cell::new(0, 0), goal).unwrap();
        assert!(trace.outcome.is_unreachable());
        assert_eq!(trace.outcome.path(), None);
        assert_eq!(trace.visited.len(), 15);
        assert!(!trace.visited.contains(&goal));
    }

    #[test]
    fn test_two_by_two_scenario() {
        let mut generator = MazeGenerator::with_seed(0);
        for _ in 0..32 {
            let maze = generator.generate(2, 2).unwrap().maze;
            assert_eq!(maze.passage_count(), 3);
            let trace = solve(&maze, Cell::new(0, 0), Cell::new(1, 1)).unwrap();
            let path = trace.outcome.path().unwrap();
            assert!(matches!(path.len() - 1, 2 | 3), "{path:?}");
            assert_valid_path(&maze, path, Cell::new(0, 0), Cell::new(1, 1));
        }
    }

    #[test]
    fn test_solver_reuse_resets_state() {
        let mut generator = MazeGenerator::with_seed(10);
        let a = generator.generate(6, 6).unwrap().maze;
        let b = generator.generate(6, 6).unwrap().maze;
        let mut solver = PathSolver::for_maze(&a);
        let first = solver.solve(&a, Cell::new(0, 0), Cell::new(5, 5)).unwrap();
        let _ = solver.solve(&b, Cell::new(0, 0), Cell::new(5, 5)).unwrap();
        let again = solver.solve(&a, Cell::new(0, 0), Cell::new(5, 5)).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_size_mismatch_requires_rebuild() {
        let small = GridMaze::new(3, 3).unwrap();
        let large = open_grid(4, 4);
        let mut solver = PathSolver::for_maze(&small);
        assert!(matches!(
            solver.solve(&large, Cell::new(0, 0), Cell::new(3, 3)),
            Err(SolveError::SizeMismatch { .. })
        ));
        solver.rebuild(&large);
        let trace = solver.solve(&large, Cell::new(0, 0), Cell::new(3, 3)).unwrap();
        assert_eq!(trace.outcome.path_len(), Some(6));
    }

    #[test]
    fn test_rejects_out_of_bounds_endpoints() {
        let maze = open_grid(3, 3);
        assert!(matches!(
            solve(&maze, Cell::new(0, 0), Cell::new(3, 0)),
            Err(SolveError::OutOfBounds { .. })
        ));
        assert!(matches!(
            solve(&maze, Cell::new(0, 9), Cell::new(0, 0)),
            Err(SolveError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_start_equals_goal() {
        let maze = GridMaze::new(1, 1).unwrap();
        let trace = solve(&maze, Cell::new(0, 0), Cell::new(0, 0)).unwrap();
        assert_eq!(trace.outcome.path(), Some(&[Cell::new(0, 0)][..]));
        assert_eq!(trace.visited, vec![Cell::new(0, 0)]);
    }

    #[test]
    fn test_trace_json() {
        let maze = GridMaze::new(2, 1).unwrap();
        let trace = solve(&maze, Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["outcome"], "unreachable");
        assert_eq!(json["visited"], serde_json::json!([{"x": 0, "y": 0}]));

        let trace = solve(&maze, Cell::new(0, 0), Cell::new(0, 0)).unwrap();
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["outcome"], "found");
        assert_eq!(json["path"], serde_json::json!([{"x": 0, "y": 0}]));
    }
}
