use crate::position::Position;
use thiserror::Error;

/// Reasons a list of tile values cannot form a grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("expected {expected} tiles, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("tile {tile} is outside 0..={max}")]
    OutOfRange { tile: u16, max: u16 },
    #[error("tile {0} appears more than once")]
    Duplicate(u16),
    #[error("{0} tiles cannot fill a square grid")]
    NotSquare(usize),
    #[error("cannot parse {0:?} as a tile")]
    Parse(String),
    #[error("a {size}x{size} grid exceeds the {max}x{max} limit")]
    TooLarge { size: usize, max: usize },
}

/// Errors surfaced by the puzzle core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// Malformed grid construction input.
    #[error("invalid layout: {0}")]
    InvalidLayout(#[from] LayoutError),
    /// Two states are not exactly one legal move apart.
    #[error("no single move takes the empty tile from {from} to {to}")]
    InvalidTransition { from: Position, to: Position },
    /// The goal is unreachable or absent from the exploration graph.
    #[error("no path to the goal state")]
    NoPathFound,
    /// Protocol misuse, e.g. stepping a search that is not running.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for PuzzleError {
    fn from(err: figment::Error) -> Self {
        PuzzleError::Config(err.to_string())
    }
}
