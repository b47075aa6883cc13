use crate::error::LayoutError;
use std::fmt;
use std::str::FromStr;

/// A numbered tile; zero is the empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tile(pub u16);

impl Tile {
    pub const EMPTY: Tile = Tile(0);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn value(self) -> u16 {
        self.0
    }
}

impl From<u16> for Tile {
    fn from(value: u16) -> Self {
        Tile(value)
    }
}

impl From<Tile> for u16 {
    fn from(tile: Tile) -> Self {
        tile.0
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Tile {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .map(Tile)
            .map_err(|_| LayoutError::Parse(s.to_string()))
    }
}
