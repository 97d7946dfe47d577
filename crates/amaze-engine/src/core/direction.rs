use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four grid movement directions.
///
/// The declaration order (north, east, south, west) is significant: it is the
/// iteration order used by search and the row order of policy weight matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[display("north")]
    North,
    #[display("east")]
    East,
    #[display("south")]
    South,
    #[display("west")]
    West,
}

impl Direction {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the position of this direction in [`Direction::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the `(dx, dy)` coordinate delta of one step in this direction.
    ///
    /// The y axis grows downwards, so north is `(0, -1)`.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Returns the wall bit guarding this side of a cell.
    #[inline]
    #[must_use]
    pub const fn wall(self) -> WallMask {
        match self {
            Self::North => WallMask::NORTH,
            Self::East => WallMask::EAST,
            Self::South => WallMask::SOUTH,
            Self::West => WallMask::WEST,
        }
    }
}

/// Per-cell 4-bit wall set.
///
/// # Bit Layout
///
/// | bit | side  |
/// |-----|-------|
/// | 0   | north |
/// | 1   | south |
/// | 2   | east  |
/// | 3   | west  |
///
/// A set bit means the side is walled off. This layout is also the on-disk
/// representation used by [`maze_file`](crate::maze_file).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallMask(u8);

impl WallMask {
    pub const NONE: Self = Self(0);
    pub const NORTH: Self = Self(1 << 0);
    pub const SOUTH: Self = Self(1 << 1);
    pub const EAST: Self = Self(1 << 2);
    pub const WEST: Self = Self(1 << 3);
    pub const ALL: Self = Self(Self::NORTH.0 | Self::SOUTH.0 | Self::EAST.0 | Self::WEST.0);

    /// Builds a mask from raw bits, rejecting anything outside the low nibble.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    #[inline]
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns whether the wall toward `direction` is present.
    #[inline]
    #[must_use]
    pub const fn has(self, direction: Direction) -> bool {
        self.contains(direction.wall())
    }
}

impl fmt::Debug for WallMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WallMask(")?;
        let mut first = true;
        for dir in Direction::ALL {
            if self.has(dir) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{dir}")?;
                first = false;
            }
        }
        write!(f, ")")
    }
}
