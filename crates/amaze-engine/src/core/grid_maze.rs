use crate::{Cell, Direction, GenerationStep, MazeError, WallMask};

/// A `width × height` grid of cells, each with a 4-bit [`WallMask`].
///
/// # Invariants
///
/// - `width > 0` and `height > 0`; the grid is never resized in place
/// - walls are pairwise consistent: if a cell has no wall toward an in-bounds
///   neighbor, that neighbor has no wall back toward the cell
///
/// A fresh maze is fully enclosed. Walls only ever disappear, through
/// [`GridMaze::remove_wall`], which clears both sides at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMaze {
    width: usize,
    height: usize,
    cells: Vec<WallMask>,
}

impl GridMaze {
    /// Creates a fully walled maze.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        let cell_count = checked_cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![WallMask::ALL; cell_count],
        })
    }

    /// Builds a maze from raw wall masks in row-major order.
    ///
    /// Used at load boundaries; rejects masks that break the wall symmetry invariant.
    pub fn from_wall_masks(
        width: usize,
        height: usize,
        cells: Vec<WallMask>,
    ) -> Result<Self, MazeError> {
        let expected = checked_cell_count(width, height)?;
        if cells.len() != expected {
            return Err(MazeError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        let maze = Self {
            width,
            height,
            cells,
        };
        maze.check_wall_consistency()?;
        Ok(maze)
    }

    /// Rebuilds a maze by applying a generation log to a fully walled grid.
    pub fn replay(
        width: usize,
        height: usize,
        steps: &[GenerationStep],
    ) -> Result<Self, MazeError> {
        let mut maze = Self::new(width, height)?;
        for step in steps {
            step.apply(&mut maze)?;
        }
        Ok(maze)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Top-left corner, where generation starts and agents spawn by default.
    #[must_use]
    pub fn default_start(&self) -> Cell {
        Cell::new(0, 0)
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn default_goal(&self) -> Cell {
        Cell::new(self.width - 1, self.height - 1)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    pub fn check_contains(&self, cell: Cell) -> Result<(), MazeError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(MazeError::CellOutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
        }
    }

    #[inline]
    #[must_use]
    pub fn index_of(&self, cell: Cell) -> usize {
        debug_assert!(self.contains(cell));
        cell.index(self.width)
    }

    #[inline]
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::from_index(index, self.width)
    }

    /// Returns all wall masks in row-major order.
    #[must_use]
    pub fn wall_masks(&self) -> &[WallMask] {
        &self.cells
    }

    /// Returns the wall mask of `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is outside the maze.
    #[inline]
    #[must_use]
    pub fn walls(&self, cell: Cell) -> WallMask {
        assert!(self.contains(cell), "cell {cell} outside maze");
        self.cells[self.index_of(cell)]
    }

    #[inline]
    #[must_use]
    pub fn has_wall(&self, cell: Cell, direction: Direction) -> bool {
        self.walls(cell).has(direction)
    }

    /// Returns the in-bounds neighbor of `cell` in `direction`, ignoring walls.
    #[inline]
    #[must_use]
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        cell.offset(direction.delta())
            .filter(|neighbor| self.contains(*neighbor))
    }

    /// Returns the neighbor reachable in one step, if no wall or border blocks it.
    #[inline]
    #[must_use]
    pub fn step(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        if self.has_wall(cell, direction) {
            return None;
        }
        self.neighbor(cell, direction)
    }

    #[must_use]
    pub fn can_move(&self, cell: Cell, direction: Direction) -> bool {
        self.step(cell, direction).is_some()
    }

    /// Iterates the cells reachable from `cell` in one step, in [`Direction::ALL`] order.
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(cell, dir))
    }

    /// Removes the wall between `cell` and its neighbor in `direction`.
    ///
    /// Both sides are cleared together. If the neighbor is outside the maze
    /// the call is a no-op: border walls have no pair and stay in place.
    pub fn remove_wall(&mut self, cell: Cell, direction: Direction) -> Result<(), MazeError> {
        self.check_contains(cell)?;
        if let Some(neighbor) = self.neighbor(cell, direction) {
            self.open_passage(cell, neighbor, direction);
        }
        Ok(())
    }

    /// Clears the wall pair between `cell` and its `direction` neighbor `neighbor`.
    ///
    /// # Panics
    ///
    /// Panics if `neighbor` is not the in-bounds neighbor of `cell` in `direction`.
    pub(crate) fn open_passage(&mut self, cell: Cell, neighbor: Cell, direction: Direction) {
        assert_eq!(
            self.neighbor(cell, direction),
            Some(neighbor),
            "{neighbor} is not the {direction} neighbor of {cell}"
        );
        let index = self.index_of(cell);
        let neighbor_index = self.index_of(neighbor);
        self.cells[index].remove(direction.wall());
        self.cells[neighbor_index].remove(direction.opposite().wall());
    }

    /// Restores every cell to fully walled.
    pub fn reset(&mut self) {
        self.cells.fill(WallMask::ALL);
    }

    /// Counts cleared walls between in-bounds neighbor pairs.
    ///
    /// A perfect maze over `n` cells has exactly `n - 1` passages.
    #[must_use]
    pub fn passage_count(&self) -> usize {
        (0..self.cells.len())
            .map(|index| self.cell_at(index))
            .map(|cell| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|dir| self.can_move(cell, *dir))
                    .count()
            })
            .sum()
    }

    /// Verifies the pairwise wall symmetry invariant.
    pub fn check_wall_consistency(&self) -> Result<(), MazeError> {
        for (index, mask) in self.cells.iter().enumerate() {
            if WallMask::from_bits(mask.bits()).is_none() {
                return Err(MazeError::InvalidWallMask {
                    index,
                    bits: mask.bits(),
                });
            }
            let cell = self.cell_at(index);
            for direction in [Direction::East, Direction::South] {
                let Some(neighbor) = self.neighbor(cell, direction) else {
                    continue;
                };
                if mask.has(direction) != self.walls(neighbor).has(direction.opposite()) {
                    return Err(MazeError::InconsistentWalls { cell, direction });
                }
            }
        }
        Ok(())
    }
}

fn checked_cell_count(width: usize, height: usize) -> Result<usize, MazeError> {
    if width == 0 || height == 0 {
        return Err(MazeError::InvalidDimension { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(MazeError::InvalidDimension { width, height })
}
