use thiserror::Error;

use crate::{CellCount, CellIndex, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration: size {size} with {differences} differences")]
    InvalidConfiguration { size: Coord, differences: CellCount },
    #[error("Cell index {0} is outside the current board")]
    InvalidIndex(CellIndex),
    #[error("Grid shape does not match declared size")]
    InvalidGridShape,
    #[error("Stored state does not match the board")]
    InconsistentState,
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;
