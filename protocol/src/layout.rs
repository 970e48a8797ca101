use std::fmt;

use photobingo_core::{BoardConfig, CellIndex};
use serde::{Deserialize, Serialize};

use crate::*;

/// Printed label of a board cell: a number, or `"FREE"` on the free cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellLabel {
    Number(u8),
    Free(FreeMarker),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreeMarker {
    #[serde(rename = "FREE")]
    Free,
}

impl CellLabel {
    pub const FREE: Self = Self::Free(FreeMarker::Free);

    pub const fn is_free(self) -> bool {
        matches!(self, Self::Free(_))
    }
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => f.pad(&number.to_string()),
            Self::Free(_) => f.pad("FREE"),
        }
    }
}

// 0 marks the free cell
const STANDARD_NUMBERS: [u8; 81] = [
    17, 2, 1, 2, 7, 13, 16, 3, 17, //
    7, 18, 16, 20, 11, 16, 13, 12, 12, //
    5, 6, 7, 5, 15, 20, 11, 1, 9, //
    10, 16, 1, 14, 19, 5, 17, 4, 10, //
    3, 2, 6, 9, 0, 18, 7, 5, 14, //
    20, 2, 12, 20, 19, 4, 10, 1, 14, //
    11, 19, 17, 15, 12, 4, 8, 18, 9, //
    10, 19, 13, 14, 8, 8, 11, 6, 9, //
    8, 15, 3, 15, 4, 13, 6, 18, 3, //
];

/// The single board every player shares, numbered 1 to 20 with `FREE` in the centre.
pub fn standard_layout() -> Vec<CellLabel> {
    STANDARD_NUMBERS
        .iter()
        .map(|&number| match number {
            0 => CellLabel::FREE,
            number => CellLabel::Number(number),
        })
        .collect()
}

/// Checks that a stored layout fits `config`, with `FREE` exactly on the free cell.
pub fn validate_layout(labels: &[CellLabel], config: &BoardConfig) -> Result<()> {
    let expected = usize::from(config.total_cells());
    if labels.len() != expected {
        return Err(RecordError::LayoutSize {
            found: labels.len(),
            expected,
        });
    }
    let misplaced = labels
        .iter()
        .enumerate()
        .any(|(index, label)| label.is_free() != config.is_free(index as CellIndex));
    if misplaced {
        return Err(RecordError::MisplacedFree(config.free_index));
    }
    Ok(())
}
