use crate::direction::Direction;
use std::fmt;

/// A (row, column) cell on a square grid, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub const fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            column: index % size,
        }
    }

    pub const fn to_index(self, size: usize) -> usize {
        self.row * size + self.column
    }

    pub const fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.column < size
    }

    /// The neighbouring cell one step in `direction`, if it stays on the grid.
    pub fn step(self, direction: Direction, size: usize) -> Option<Self> {
        let (dr, dc) = direction.as_offset();
        let row = self.row.checked_add_signed(dr)?;
        let column = self.column.checked_add_signed(dc)?;
        let next = Self { row, column };
        next.in_bounds(size).then_some(next)
    }

    /// Signed (row, column) displacement from `self` to `other`.
    pub fn displacement_to(self, other: Self) -> (isize, isize) {
        (
            other.row as isize - self.row as isize,
            other.column as isize - self.column as isize,
        )
    }

    pub fn manhattan_distance(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
