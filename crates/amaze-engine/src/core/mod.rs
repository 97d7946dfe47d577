//! Maze data model: coordinates, directions, wall masks and the wall grid.

pub use self::{cell::*, direction::*, grid_maze::*, render::*};

pub(crate) mod cell;
pub(crate) mod direction;
pub(crate) mod grid_maze;
pub(crate) mod render;
