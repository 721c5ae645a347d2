#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::collections::BTreeSet;
use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use layout::*;
pub use palette::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod grid;
mod layout;
mod palette;
mod types;

/// Board dimensions offered by the board size menu.
pub const BOARD_SIZE_CHOICES: [Coord; 8] = [5, 8, 16, 24, 32, 40, 48, 64];

/// Difference counts offered by the difficulty menu.
pub const DIFFERENCE_CHOICES: RangeInclusive<CellCount> = 1..=5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord,
    pub differences: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord, differences: CellCount) -> Self {
        Self { size, differences }
    }

    /// Checks `size >= 1` and `1 <= differences <= size * size`.
    pub const fn new(size: Coord, differences: CellCount) -> Result<Self> {
        if size == 0 || differences == 0 || differences > mult(size, size) {
            return Err(GameError::InvalidConfiguration { size, differences });
        }
        Ok(Self::new_unchecked(size, differences))
    }

    /// Forces raw UI input into a valid configuration.
    pub fn clamped(size: Coord, differences: CellCount) -> Self {
        let size = size.clamp(1, Coord::MAX);
        let differences = differences.clamp(1, mult(size, size));
        Self::new_unchecked(size, differences)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub(crate) fn validate(self) -> Result<Self> {
        Self::new(self.size, self.differences)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(8, 3)
    }
}

/// A left/right grid pair together with the coordinates where they differ.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    left: Grid,
    right: Grid,
    differences: BTreeSet<Coord2>,
}

#[derive(Deserialize)]
struct BoardRepr {
    left: Grid,
    right: Grid,
    differences: BTreeSet<Coord2>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    /// The stored differences must be exactly the cells where the grids disagree.
    fn try_from(repr: BoardRepr) -> Result<Self> {
        let board = Board::from_grids(repr.left, repr.right)?;
        if board.differences != repr.differences {
            return Err(GameError::InconsistentState);
        }
        Ok(board)
    }
}

impl Board {
    /// Recovers a board from two grids, treating every mismatching cell as a difference.
    pub fn from_grids(left: Grid, right: Grid) -> Result<Self> {
        if left.size() != right.size() || left.len() != right.len() {
            return Err(GameError::InvalidGridShape);
        }
        let size = left.size();
        let differences: BTreeSet<Coord2> = left
            .diff_indices(&right)
            .into_iter()
            .map(|index| coords_of(index, size))
            .collect();
        if differences.is_empty() {
            return Err(GameError::InvalidConfiguration {
                size,
                differences: 0,
            });
        }
        Ok(Self::from_parts(left, right, differences))
    }

    pub(crate) fn from_parts(left: Grid, right: Grid, differences: BTreeSet<Coord2>) -> Self {
        Self {
            left,
            right,
            differences,
        }
    }

    pub fn config(&self) -> BoardConfig {
        // at most `size * size` distinct coordinates
        BoardConfig::new_unchecked(self.size(), self.differences.len() as CellCount)
    }

    pub fn size(&self) -> Coord {
        self.left.size()
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn left(&self) -> &Grid {
        &self.left
    }

    pub fn right(&self) -> &Grid {
        &self.right
    }

    pub fn differences(&self) -> &BTreeSet<Coord2> {
        &self.differences
    }

    pub fn difference_count(&self) -> CellCount {
        self.differences.len() as CellCount
    }

    pub fn difference_indices(&self) -> BTreeSet<CellIndex> {
        let size = self.size();
        self.differences
            .iter()
            .map(|&coords| linear_index(coords, size))
            .collect()
    }

    pub fn is_difference(&self, index: CellIndex) -> bool {
        index < self.total_cells() && self.differences.contains(&coords_of(index, self.size()))
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.total_cells() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex(index))
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    /// Index was absent and the selection is already full.
    NoChange,
    Selected,
    Deselected,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Selected | Self::Deselected => true,
        }
    }
}
