use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Board needs at least one mine")]
    TooFewMines,
    #[error("Too many mines, at least one cell must be safe")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine layout has {actual} mines, expected {expected}")]
    MineCountMismatch { expected: CellCount, actual: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
