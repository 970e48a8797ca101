use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Row(Coord),
    Column(Coord),
    Diagonal,
    AntiDiagonal,
}

/// A fixed sequence of cells that wins when every one of them is filled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    kind: LineKind,
    cells: SmallVec<[CellIndex; 9]>,
}

impl Line {
    fn new(kind: LineKind, config: &BoardConfig) -> Self {
        let size = config.size;
        let cells = (0..size)
            .map(|i| match kind {
                LineKind::Row(row) => (row, i),
                LineKind::Column(column) => (i, column),
                LineKind::Diagonal => (i, i),
                LineKind::AntiDiagonal => (i, size - 1 - i),
            })
            .map(|coords| config.index_of(coords))
            .collect();
        Self { kind, cells }
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    /// The free cell counts as filled, every other cell needs a photo.
    pub fn is_complete(&self, occupied: &OccupiedSet, free_index: CellIndex) -> bool {
        self.cells
            .iter()
            .all(|&index| index == free_index || occupied.contains(index))
    }
}

/// Completed lines of a board, with every cell they cover for highlighting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineReport {
    pub line_count: CellCount,
    pub completed: Vec<LineKind>,
    pub covered: BTreeSet<CellIndex>,
}

/// Win detection over a fixed board. Built once and shared by every player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "EngineBoard")]
pub struct WinEngine {
    config: BoardConfig,
    lines: Vec<Line>,
}

impl WinEngine {
    pub fn new(config: BoardConfig) -> Self {
        let lines = (0..config.size)
            .map(LineKind::Row)
            .chain((0..config.size).map(LineKind::Column))
            .chain([LineKind::Diagonal, LineKind::AntiDiagonal])
            .map(|kind| Line::new(kind, &config))
            .collect();
        Self { config, lines }
    }

    pub fn standard() -> Self {
        Self::new(BoardConfig::STANDARD)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_total(&self) -> CellCount {
        self.lines.len() as CellCount
    }

    pub fn compute_lines(&self, occupied: &OccupiedSet) -> LineReport {
        let free_index = self.config.free_index;
        let mut report = LineReport::default();
        for line in self
            .lines
            .iter()
            .filter(|line| line.is_complete(occupied, free_index))
        {
            report.line_count += 1;
            report.completed.push(line.kind());
            report.covered.extend(line.cells().iter().copied());
        }
        report
    }

    /// Full board: every line is complete, so every non-free cell holds a photo.
    pub fn is_blackout(&self, occupied: &OccupiedSet) -> bool {
        self.is_blackout_report(&self.compute_lines(occupied))
    }

    pub(crate) fn is_blackout_report(&self, report: &LineReport) -> bool {
        report.line_count == self.line_total()
    }

    pub fn classify_tier(&self, line_count: CellCount, is_blackout: bool) -> Tier {
        Tier::classify(line_count, is_blackout)
    }

    /// Current tier with its live line count, as shown to players and in reports.
    pub fn status(&self, occupied: &OccupiedSet) -> TierStatus {
        let report = self.compute_lines(occupied);
        TierStatus::new(report.line_count, self.is_blackout_report(&report))
    }

    pub(crate) fn check_board(&self, occupied: &OccupiedSet) -> Result<()> {
        if occupied.config() == &self.config {
            Ok(())
        } else {
            Err(BingoError::BoardMismatch)
        }
    }
}

impl Default for WinEngine {
    fn default() -> Self {
        Self::standard()
    }
}

// Lines are always rebuilt from the board, never trusted from input.
#[derive(Deserialize)]
struct EngineBoard {
    config: BoardConfig,
}

impl From<EngineBoard> for WinEngine {
    fn from(board: EngineBoard) -> Self {
        Self::new(board.config)
    }
}
