use crate::direction::Direction;
use crate::error::{LayoutError, PuzzleError};
use crate::position::Position;
use crate::tile::Tile;
use bitvec::prelude::*;
use rand::{seq::SliceRandom, thread_rng, Rng};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use std::sync::Arc;

/// Largest grid width whose tile values all fit in a [`Tile`].
pub const MAX_GRID_SIZE: usize = 256;

fn checked_cell_count(size: usize) -> Result<usize, LayoutError> {
    if size > MAX_GRID_SIZE {
        return Err(LayoutError::TooLarge {
            size,
            max: MAX_GRID_SIZE,
        });
    }
    Ok(size * size)
}

/// Tile values `0..size²` in ascending order.
///
/// # Panics
///
/// If `size` exceeds [`MAX_GRID_SIZE`].
fn tile_values(size: usize) -> Vec<u16> {
    let total = match checked_cell_count(size) {
        Ok(total) => total,
        Err(err) => panic!("{}", err),
    };
    (0..total).filter_map(|v| u16::try_from(v).ok()).collect()
}

/// Which of the two mutually unreachable classes a layout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    const fn from_count(count: usize) -> Self {
        if count % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

/// Immutable snapshot of tile placement on a `size`×`size` grid.
///
/// Tiles are shared behind an `Arc`, so cloning a state is cheap and two
/// states compare and hash cell by cell regardless of how they were built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PuzzleState {
    size: usize,
    empty: Position,
    tiles: Arc<[Tile]>,
}

impl PuzzleState {
    /// Validates `values` (row-major) as a permutation of `0..size*size`.
    pub fn create(size: usize, values: &[u16]) -> Result<Self, PuzzleError> {
        if size == 0 {
            return Err(LayoutError::NotSquare(values.len()).into());
        }
        let total = checked_cell_count(size)?;
        if values.len() != total {
            return Err(LayoutError::SizeMismatch {
                expected: total,
                actual: values.len(),
            }
            .into());
        }

        let max = u16::try_from(total - 1).unwrap_or(u16::MAX);
        let mut seen = bitvec![0; total];
        let mut empty = None;
        for (index, &value) in values.iter().enumerate() {
            if usize::from(value) >= total {
                return Err(LayoutError::OutOfRange { tile: value, max }.into());
            }
            if seen.replace(usize::from(value), true) {
                return Err(LayoutError::Duplicate(value).into());
            }
            if value == 0 {
                empty = Some(Position::from_index(index, size));
            }
        }

        match empty {
            Some(empty) if seen.all() => Ok(Self {
                size,
                empty,
                tiles: values.iter().copied().map(Tile).collect(),
            }),
            _ => Err(LayoutError::SizeMismatch {
                expected: total,
                actual: seen.count_ones(),
            }
            .into()),
        }
    }

    /// Non-failing variant of [`PuzzleState::create`] for pre-validated input.
    pub fn try_create(size: usize, values: &[u16]) -> Option<Self> {
        Self::create(size, values).ok()
    }

    /// Builds a state from a square number of values, inferring the grid size.
    pub fn from_values(values: &[u16]) -> Result<Self, PuzzleError> {
        let size = (1..=values.len())
            .find(|n| n * n >= values.len())
            .filter(|n| n * n == values.len())
            .ok_or(LayoutError::NotSquare(values.len()))?;
        Self::create(size, values)
    }

    /// Tiles `1..n²` in reading order with the empty slot last.
    ///
    /// # Panics
    ///
    /// If `size` exceeds [`MAX_GRID_SIZE`].
    pub fn solved(size: usize) -> Self {
        let mut values = tile_values(size);
        if !values.is_empty() {
            values.rotate_left(1);
        }
        let tiles: Arc<[Tile]> = values.into_iter().map(Tile).collect();
        Self {
            size,
            empty: Position::new(size.saturating_sub(1), size.saturating_sub(1)),
            tiles,
        }
    }

    /// Uniformly shuffled layout; may belong to either parity class.
    ///
    /// # Panics
    ///
    /// If `size` exceeds [`MAX_GRID_SIZE`].
    pub fn random(size: usize) -> Self {
        Self::random_with(size, &mut thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut values = tile_values(size);
        values.shuffle(rng);
        Self::from_shuffled(size, values)
    }

    /// Shuffles until the layout lands in the requested parity class.
    ///
    /// # Panics
    ///
    /// If `size` exceeds [`MAX_GRID_SIZE`].
    pub fn random_solvable<R: Rng + ?Sized>(size: usize, parity: Parity, rng: &mut R) -> Self {
        let mut values = tile_values(size);
        loop {
            values.shuffle(rng);
            let state = Self::from_shuffled(size, values.clone());
            // A 1x1 grid has a single layout, which is always even.
            if state.parity() == parity || size < 2 {
                return state;
            }
        }
    }

    fn from_shuffled(size: usize, values: Vec<u16>) -> Self {
        let index = values.iter().position(|&v| v == 0).unwrap_or_default();
        Self {
            size,
            empty: Position::from_index(index, size),
            tiles: values.into_iter().map(Tile).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn total_cells(&self) -> usize {
        self.tiles.len()
    }

    pub fn empty_position(&self) -> Position {
        self.empty
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Row-major tile values, the inverse of [`PuzzleState::create`].
    pub fn to_values(&self) -> Vec<u16> {
        self.tiles.iter().map(|t| t.0).collect()
    }

    pub fn get(&self, position: Position) -> Option<Tile> {
        position
            .in_bounds(self.size)
            .then(|| self.tiles[position.to_index(self.size)])
    }

    pub fn find(&self, tile: Tile) -> Option<Position> {
        self.tiles
            .iter()
            .position(|&t| t == tile)
            .map(|i| Position::from_index(i, self.size))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.size)
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::solved(self.size)
    }

    /// `target` is on the grid and orthogonally adjacent to the empty tile.
    pub fn can_swap(&self, target: Position) -> bool {
        target.in_bounds(self.size) && self.empty.manhattan_distance(target) == 1
    }

    /// Exchanges the empty tile with `target`, if that is a legal move.
    pub fn swap(&self, target: Position) -> Option<Self> {
        if !self.can_swap(target) {
            return None;
        }
        let mut tiles = self.tiles.to_vec();
        tiles.swap(self.empty.to_index(self.size), target.to_index(self.size));
        Some(Self {
            size: self.size,
            empty: target,
            tiles: tiles.into(),
        })
    }

    /// The state reached by sliding the empty tile one cell in `direction`.
    pub fn moved(&self, direction: Direction) -> Option<Self> {
        self.empty
            .step(direction, self.size)
            .and_then(|target| self.swap(target))
    }

    /// Every legal successor, in [`Direction::ALL`] order.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, PuzzleState)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.moved(dir).map(|next| (dir, next)))
    }

    /// Direction the empty tile travels to turn `self` into `other`.
    pub fn move_direction_to(&self, other: &PuzzleState) -> Result<Direction, PuzzleError> {
        let offset = self.empty.displacement_to(other.empty);
        Direction::from_offset(offset).ok_or(PuzzleError::InvalidTransition {
            from: self.empty,
            to: other.empty,
        })
    }

    /// Pairwise inversion count over the non-empty tiles in reading order.
    pub fn inversions(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &val)| !val.is_empty())
            .map(|(i, &val)| {
                self.tiles[i + 1..]
                    .iter()
                    .filter(|&&next| !next.is_empty() && next < val)
                    .count()
            })
            .sum()
    }

    /// Reachability class. Odd widths use the inversion parity alone; even
    /// widths also count the empty tile's row, since a vertical move there
    /// flips the inversion parity.
    pub fn parity(&self) -> Parity {
        let inversions = self.inversions();
        if self.size % 2 == 1 {
            Parity::from_count(inversions)
        } else {
            Parity::from_count(inversions + self.empty.row)
        }
    }

    pub fn is_even_parity(&self) -> bool {
        self.parity() == Parity::Even
    }

    /// Sum over non-empty tiles of the grid distance to their cell in `goal`.
    pub fn manhattan_distance_to(&self, goal: &PuzzleState) -> usize {
        let mut targets = vec![Position::default(); goal.tiles.len()];
        for (index, tile) in goal.tiles.iter().enumerate() {
            if let Some(slot) = targets.get_mut(usize::from(tile.0)) {
                *slot = Position::from_index(index, goal.size);
            }
        }

        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| !tile.is_empty())
            .filter_map(|(index, tile)| {
                targets
                    .get(usize::from(tile.0))
                    .map(|&target| Position::from_index(index, self.size).manhattan_distance(target))
            })
            .sum()
    }
}

impl Index<Position> for PuzzleState {
    type Output = Tile;

    fn index(&self, position: Position) -> &Tile {
        assert!(
            position.in_bounds(self.size),
            "position {} outside a {}x{} grid",
            position,
            self.size,
            self.size
        );
        &self.tiles[position.to_index(self.size)]
    }
}

impl FromStr for PuzzleState {
    type Err = PuzzleError;

    /// Parses whitespace- or comma-separated tile values in row-major order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<Tile>().map(u16::from))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_values(&values)
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Number of layouts reachable from any state: half of all permutations.
pub fn reachable_states(size: usize) -> usize {
    let cells = size * size;
    let permutations = (2..=cells).try_fold(1usize, |acc, n| acc.checked_mul(n));
    permutations.map_or(usize::MAX, |p| (p / 2).max(1))
}
