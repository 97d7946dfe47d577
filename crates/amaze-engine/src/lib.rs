//! Rectangular grid mazes: the data model, randomized generation and file I/O.
//!
//! - [`GridMaze`] - per-cell wall masks with a pairwise-consistent wall-removal primitive
//! - [`MazeGenerator`] - randomized depth-first carving producing perfect mazes
//! - [`GenerationStep`] - replay log entry describing a single carved wall
//! - [`maze_file`] - fixed little-endian binary format and corpus directories
//!
//! # Example
//!
//! ```
//! use amaze_engine::{Cell, GridMaze, MazeGenerator};
//!
//! let mut generator = MazeGenerator::with_seed(42);
//! let generated = generator.generate(8, 6).unwrap();
//!
//! // Every perfect maze has exactly `cells - 1` passages.
//! assert_eq!(generated.maze.passage_count(), 8 * 6 - 1);
//!
//! // The step log replays into the very same maze.
//! let replayed = GridMaze::replay(8, 6, &generated.steps).unwrap();
//! assert_eq!(replayed, generated.maze);
//! # let _ = Cell::new(0, 0);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
pub mod maze_file;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MazeError {
    #[display("invalid maze dimension {width}x{height}: both sides must be positive")]
    InvalidDimension { width: usize, height: usize },
    #[display("cell {cell} is outside the {width}x{height} maze")]
    CellOutOfBounds {
        cell: Cell,
        width: usize,
        height: usize,
    },
    #[display("expected {expected} wall masks, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
    #[display("wall mask {bits:#04x} of cell #{index} uses bits outside the low nibble")]
    InvalidWallMask { index: usize, bits: u8 },
    #[display("wall between {cell} and its {direction} neighbor is only present on one side")]
    InconsistentWalls { cell: Cell, direction: Direction },
}
