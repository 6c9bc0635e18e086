use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// One grid cell. Position and bomb status are fixed when the grid is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    coords: Coord2,
    bomb: bool,
    discovered: bool,
    flagged: bool,
}

impl Tile {
    pub const fn new(coords: Coord2, bomb: bool) -> Self {
        Self {
            coords,
            bomb,
            discovered: false,
            flagged: false,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn is_bomb(&self) -> bool {
        self.bomb
    }

    pub const fn is_discovered(&self) -> bool {
        self.discovered
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Covered and unflagged, the only state a reveal can act on.
    pub const fn is_revealable(&self) -> bool {
        !self.discovered && !self.flagged
    }

    pub(crate) fn discover(&mut self) {
        debug_assert!(self.is_revealable(), "tile {self} revealed twice");
        self.discovered = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.coords.0, self.coords.1)
    }
}

/// How the host should draw a tile after a change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileVisual {
    /// Covered and unflagged.
    Default,
    /// Revealed, shows the neighbour bomb count.
    Uncovered,
    Flagged,
    /// A bomb shown after the round was lost.
    Bomb,
    /// The bomb that lost the round.
    Lose,
    /// The tile whose reveal won the round.
    Win,
}

impl TileVisual {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Uncovered | Self::Win)
    }
}

impl Default for TileVisual {
    fn default() -> Self {
        Self::Default
    }
}
