use photobingo_core::{BingoError, CellIndex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Board record rejected: {0}")]
    Board(#[from] BingoError),
    #[error("Malformed record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Board layout has {found} labels, expected {expected}")]
    LayoutSize { found: usize, expected: usize },
    #[error("Board layout must have FREE on cell {0} and nowhere else")]
    MisplacedFree(CellIndex),
}

pub type Result<T> = std::result::Result<T, RecordError>;
