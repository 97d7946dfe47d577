use std::fmt::{self, Write as _};

use crate::{Cell, Direction, GridMaze};

/// ASCII rendering of a maze, optionally with a highlighted path.
///
/// ```text
/// +---+---+
/// | *   * |
/// +---+   +
/// |     * |
/// +---+---+
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MazeRender<'a> {
    maze: &'a GridMaze,
    path: &'a [Cell],
}

impl<'a> MazeRender<'a> {
    #[must_use]
    pub fn new(maze: &'a GridMaze) -> Self {
        Self { maze, path: &[] }
    }

    #[must_use]
    pub fn with_path(maze: &'a GridMaze, path: &'a [Cell]) -> Self {
        Self { maze, path }
    }

    fn on_path(&self, cell: Cell) -> bool {
        self.path.contains(&cell)
    }

    fn write_horizontal(
        &self,
        f: &mut fmt::Formatter<'_>,
        y: usize,
        side: Direction,
    ) -> fmt::Result {
        for x in 0..self.maze.width() {
            f.write_char('+')?;
            let wall = self.maze.has_wall(Cell::new(x, y), side);
            f.write_str(if wall { "---" } else { "   " })?;
        }
        f.write_str("+\n")
    }
}

impl fmt::Display for MazeRender<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let maze = self.maze;
        self.write_horizontal(f, 0, Direction::North)?;
        for y in 0..maze.height() {
            for x in 0..maze.width() {
                let cell = Cell::new(x, y);
                let west = maze.has_wall(cell, Direction::West);
                f.write_char(if west { '|' } else { ' ' })?;
                f.write_str(if self.on_path(cell) { " * " } else { "   " })?;
            }
            let last = Cell::new(maze.width() - 1, y);
            let east = maze.has_wall(last, Direction::East);
            f.write_str(if east { "|\n" } else { " \n" })?;
            self.write_horizontal(f, y, Direction::South)?;
        }
        Ok(())
    }
}

impl GridMaze {
    #[must_use]
    pub fn render_with_path<'a>(&'a self, path: &'a [Cell]) -> MazeRender<'a> {
        MazeRender::with_path(self, path)
    }
}

impl fmt::Display for GridMaze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        MazeRender::new(self).fmt(f)
    }
}
