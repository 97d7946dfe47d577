use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Grid coordinate of a maze cell.
///
/// `(0, 0)` is the top-left cell; `x` grows to the east and `y` to the south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the row-major index `y * width + x`.
    #[inline]
    #[must_use]
    pub const fn index(self, width: usize) -> usize {
        self.y * width + self.x
    }

    #[inline]
    #[must_use]
    pub const fn from_index(index: usize, width: usize) -> Self {
        Self {
            x: index % width,
            y: index / width,
        }
    }

    #[inline]
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the cell one step away by `(dx, dy)`, or `None` if either
    /// coordinate would become negative.
    #[inline]
    #[must_use]
    pub fn offset(self, (dx, dy): (isize, isize)) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Returns whether `self` and `other` share an edge.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid cell {input:?}: expected `x,y`")]
pub struct ParseCellError {
    input: String,
}

/// Parses `"x,y"` (surrounding whitespace allowed).
impl FromStr for Cell {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCellError {
            input: s.to_owned(),
        };
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Self { x, y })
    }
}
