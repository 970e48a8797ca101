#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use milestone::*;
pub use session::*;
pub use tier::*;
pub use types::*;

mod engine;
mod error;
mod milestone;
mod session;
mod tier;
mod types;

/// Geometry of a square bingo board with one permanently filled cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardGeometry")]
pub struct BoardConfig {
    pub size: Coord,
    pub free_index: CellIndex,
}

impl BoardConfig {
    /// The 9×9 board with the free cell in the exact centre.
    pub const STANDARD: Self = Self::new_unchecked(9, 40);

    pub const fn new_unchecked(size: Coord, free_index: CellIndex) -> Self {
        Self { size, free_index }
    }

    pub fn new(size: Coord, free_index: CellIndex) -> Result<Self> {
        if size == 0 {
            return Err(BingoError::InvalidBoardSize);
        }
        let total = mult(size, size);
        if free_index >= total {
            return Err(BingoError::InvalidFreeIndex {
                index: free_index,
                total,
            });
        }
        Ok(Self::new_unchecked(size, free_index))
    }

    /// Board of the given size with the free cell in the centre (upper-left of
    /// the centre block for even sizes).
    pub fn centered(size: Coord) -> Result<Self> {
        if size == 0 {
            return Err(BingoError::InvalidBoardSize);
        }
        let middle = (size - 1) / 2;
        Self::new(size, Self::new_unchecked(size, 0).index_of((middle, middle)))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    /// Rows, columns and both diagonals.
    pub const fn line_total(&self) -> CellCount {
        (self.size as CellCount).saturating_mul(2).saturating_add(2)
    }

    /// Most photos a board can hold, every cell except the free one.
    pub const fn uploadable_cells(&self) -> CellCount {
        self.total_cells() - 1
    }

    pub const fn is_free(&self, index: CellIndex) -> bool {
        index == self.free_index
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        let total = self.total_cells();
        if index < total {
            Ok(index)
        } else {
            Err(BingoError::InvalidCell { index, total })
        }
    }

    /// Cells a player may place a photo on: in range and not the free cell.
    pub fn check_uploadable(&self, index: CellIndex) -> Result<CellIndex> {
        let index = self.validate_index(index)?;
        if self.is_free(index) {
            Err(BingoError::FreeCell)
        } else {
            Ok(index)
        }
    }

    pub const fn coords_of(&self, index: CellIndex) -> Coord2 {
        let size = self.size as CellIndex;
        ((index / size) as Coord, (index % size) as Coord)
    }

    pub const fn index_of(&self, (row, column): Coord2) -> CellIndex {
        row as CellIndex * self.size as CellIndex + column as CellIndex
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Deserialize)]
struct BoardGeometry {
    size: Coord,
    free_index: CellIndex,
}

impl TryFrom<BoardGeometry> for BoardConfig {
    type Error = BingoError;

    fn try_from(geometry: BoardGeometry) -> Result<Self> {
        Self::new(geometry.size, geometry.free_index)
    }
}

/// Cells that currently hold an uploaded photo. Never contains the free cell:
/// it is always filled, so marking it changes nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OccupiedMask")]
pub struct OccupiedSet {
    config: BoardConfig,
    mask: Array2<bool>,
    count: CellCount,
}

impl OccupiedSet {
    pub fn new(config: BoardConfig) -> Self {
        let side = usize::from(config.size);
        Self {
            config,
            mask: Array2::default([side, side]),
            count: 0,
        }
    }

    pub fn from_indices(
        config: BoardConfig,
        indices: impl IntoIterator<Item = CellIndex>,
    ) -> Result<Self> {
        let mut occupied = Self::new(config);
        for index in indices {
            occupied.insert(index)?;
        }
        Ok(occupied)
    }

    /// Every cell except the free one.
    pub fn full(config: BoardConfig) -> Self {
        let side = usize::from(config.size);
        let mut mask = Array2::from_elem([side, side], true);
        mask[config.coords_of(config.free_index).to_nd_index()] = false;
        Self {
            config,
            mask,
            count: config.uploadable_cells(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn len(&self) -> CellCount {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether a photo sits at `index`. Out-of-range indices are never occupied.
    pub fn contains(&self, index: CellIndex) -> bool {
        index < self.config.total_cells() && self[index]
    }

    pub fn insert(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        let index = self.config.validate_index(index)?;
        if self.config.is_free(index) {
            return Ok(MarkOutcome::NoChange);
        }
        let cell = &mut self.mask[self.config.coords_of(index).to_nd_index()];
        if *cell {
            return Ok(MarkOutcome::NoChange);
        }
        *cell = true;
        self.count += 1;
        Ok(MarkOutcome::Changed)
    }

    pub fn remove(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        let index = self.config.validate_index(index)?;
        if self.config.is_free(index) {
            return Ok(MarkOutcome::NoChange);
        }
        let cell = &mut self.mask[self.config.coords_of(index).to_nd_index()];
        if !*cell {
            return Ok(MarkOutcome::NoChange);
        }
        *cell = false;
        self.count -= 1;
        Ok(MarkOutcome::Changed)
    }

    pub fn clear(&mut self) {
        self.mask.fill(false);
        self.count = 0;
    }

    /// Occupied indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        let size = CellIndex::from(self.config.size);
        self.mask
            .indexed_iter()
            .filter(|&(_, &filled)| filled)
            .map(move |((row, column), _)| row as CellIndex * size + column as CellIndex)
    }

    pub fn to_vec(&self) -> Vec<CellIndex> {
        self.iter().collect()
    }
}

#[derive(Deserialize)]
struct OccupiedMask {
    config: BoardConfig,
    mask: Array2<bool>,
}

impl TryFrom<OccupiedMask> for OccupiedSet {
    type Error = BingoError;

    fn try_from(OccupiedMask { config, mut mask }: OccupiedMask) -> Result<Self> {
        let side = usize::from(config.size);
        if mask.dim() != (side, side) {
            return Err(BingoError::BoardMismatch);
        }
        mask[config.coords_of(config.free_index).to_nd_index()] = false;
        let count = mask.iter().filter(|&&filled| filled).count() as CellCount;
        Ok(Self {
            config,
            mask,
            count,
        })
    }
}

impl Index<CellIndex> for OccupiedSet {
    type Output = bool;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.mask[self.config.coords_of(index).to_nd_index()]
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_board_has_centre_free_cell() {
        let config = BoardConfig::STANDARD;

        assert_eq!(config.total_cells(), 81);
        assert_eq!(config.line_total(), 20);
        assert_eq!(config.coords_of(config.free_index), (4, 4));
        assert_eq!(BoardConfig::centered(9).unwrap(), config);
    }

    #[test]
    fn new_rejects_bad_geometry() {
        assert_eq!(BoardConfig::new(0, 0), Err(BingoError::InvalidBoardSize));
        assert_eq!(
            BoardConfig::new(3, 9),
            Err(BingoError::InvalidFreeIndex { index: 9, total: 9 })
        );
        assert_eq!(BoardConfig::centered(4).unwrap().free_index, 5);
    }

    #[test]
    fn free_cell_is_ignored_and_out_of_range_rejected() {
        let mut occupied = OccupiedSet::new(BoardConfig::STANDARD);

        assert_eq!(occupied.insert(40), Ok(MarkOutcome::NoChange));
        assert_eq!(occupied.remove(40), Ok(MarkOutcome::NoChange));
        assert!(!occupied.contains(40));
        assert_eq!(BoardConfig::STANDARD.check_uploadable(40), Err(BingoError::FreeCell));
        assert_eq!(
            occupied.insert(81),
            Err(BingoError::InvalidCell {
                index: 81,
                total: 81
            })
        );
        assert!(occupied.is_empty());
    }

    #[test]
    fn from_indices_accepts_sets_containing_the_free_cell() {
        let occupied = OccupiedSet::from_indices(BoardConfig::STANDARD, 0..81).unwrap();

        assert_eq!(occupied, OccupiedSet::full(BoardConfig::STANDARD));
        assert_eq!(occupied.len(), 80);
    }

    #[test]
    fn insert_and_remove_track_count() {
        let mut occupied = OccupiedSet::new(BoardConfig::STANDARD);

        assert_eq!(occupied.insert(12).unwrap(), MarkOutcome::Changed);
        assert_eq!(occupied.insert(12).unwrap(), MarkOutcome::NoChange);
        assert_eq!(occupied.insert(80).unwrap(), MarkOutcome::Changed);
        assert_eq!(occupied.len(), 2);
        assert!(occupied.contains(12));
        assert!(!occupied.contains(13));
        assert!(!occupied.contains(500));
        assert_eq!(occupied.to_vec(), [12, 80]);

        assert_eq!(occupied.remove(12).unwrap(), MarkOutcome::Changed);
        assert_eq!(occupied.remove(12).unwrap(), MarkOutcome::NoChange);
        assert_eq!(occupied.len(), 1);
    }

    #[test]
    fn full_board_holds_every_cell_but_the_free_one() {
        let occupied = OccupiedSet::full(BoardConfig::STANDARD);

        assert_eq!(occupied.len(), 80);
        assert!(!occupied.contains(40));
        assert_eq!(occupied.iter().count(), 80);
    }

    #[test]
    fn deserializing_checks_geometry() {
        let config: BoardConfig = serde_json::from_str(r#"{"size":9,"free_index":40}"#).unwrap();
        assert_eq!(config, BoardConfig::STANDARD);

        let error = serde_json::from_str::<BoardConfig>(r#"{"size":9,"free_index":200}"#);
        assert!(error.is_err());
        assert!(serde_json::from_str::<BoardConfig>(r#"{"size":0,"free_index":0}"#).is_err());
    }

    #[test]
    fn deserializing_rebuilds_count_and_clears_free_cell() {
        let mut occupied = OccupiedSet::from_indices(BoardConfig::STANDARD, [0, 1, 2]).unwrap();
        let json = serde_json::to_string(&occupied).unwrap();
        let parsed: OccupiedSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, occupied);

        occupied.mask[(4, 4)] = true;
        occupied.count = 0;
        let json = serde_json::to_string(&occupied).unwrap();
        let parsed: OccupiedSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 3);
        assert!(!parsed.contains(40));
    }

    #[test]
    fn deserializing_rejects_mask_of_another_board() {
        let small = OccupiedSet::new(BoardConfig::centered(3).unwrap());
        let json = serde_json::to_string(&small)
            .unwrap()
            .replace(r#""size":3,"free_index":4"#, r#""size":9,"free_index":40"#);

        assert!(serde_json::from_str::<OccupiedSet>(&json).is_err());
    }
}
