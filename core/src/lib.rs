#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use minefield::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod minefield;
mod snapshot;
mod types;

/// Board dimensions and number of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validated config, at least one cell must be free of mines.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::validate_size(size)?;
        if mines >= area(size) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub(crate) fn validate_size((size_x, size_y): Coord2) -> Result<()> {
        if size_x == 0 || size_y == 0 {
            Err(GameError::InvalidSize)
        } else {
            Ok(())
        }
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((10, 10), 10)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
