use thiserror::Error;

use crate::{CellCount, CellIndex};

/// Rejections raised at the board boundary, before the win engine sees any input.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BingoError {
    #[error("Cell index {index} is outside a board of {total} cells")]
    InvalidCell { index: CellIndex, total: CellCount },
    #[error("The free cell is always filled and cannot hold a photo")]
    FreeCell,
    #[error("Board size must be at least 1")]
    InvalidBoardSize,
    #[error("Free cell {index} is outside a board of {total} cells")]
    InvalidFreeIndex { index: CellIndex, total: CellCount },
    #[error("Occupied cells belong to a different board than the engine")]
    BoardMismatch,
    #[error("Game already ended, no new photos are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, BingoError>;
