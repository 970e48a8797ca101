use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Active,
    Over,
}

impl SessionState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

/// What a collaborator needs to persist a player's board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub occupied: Vec<CellIndex>,
    pub milestone: MilestoneState,
    pub is_over: bool,
}

/// One player's board between login and logout. Owns the occupied cells and
/// milestone so nothing about the board lives outside it. Persist it through
/// [`GameSession::snapshot`] and bring it back with [`GameSession::restore`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSession {
    engine: WinEngine,
    occupied: OccupiedSet,
    milestone: MilestoneState,
    state: SessionState,
    status: TierStatus,
    covered: BTreeSet<CellIndex>,
}

impl GameSession {
    /// Fresh board with nothing uploaded and nothing acknowledged.
    pub fn new(engine: WinEngine) -> Self {
        let occupied = OccupiedSet::new(*engine.config());
        let mut session = Self {
            engine,
            occupied,
            milestone: MilestoneState::default(),
            state: SessionState::default(),
            status: TierStatus::default(),
            covered: BTreeSet::new(),
        };
        session.refresh();
        session
    }

    /// Resumes a stored board, evaluated silently so only a champion board is
    /// announced again.
    pub fn restore(
        engine: WinEngine,
        occupied: OccupiedSet,
        milestone: MilestoneState,
        state: SessionState,
    ) -> Result<(Self, EvaluationResult)> {
        engine.check_board(&occupied)?;
        let mut session = Self {
            engine,
            occupied,
            milestone,
            state,
            status: TierStatus::default(),
            covered: BTreeSet::new(),
        };
        let result = session.evaluate(EvaluationMode::Silent);
        log::debug!(
            "Restored board with {} photos as {}",
            session.occupied.len(),
            session.status
        );
        Ok((session, result))
    }

    pub fn engine(&self) -> &WinEngine {
        &self.engine
    }

    pub fn occupied(&self) -> &OccupiedSet {
        &self.occupied
    }

    pub fn milestone(&self) -> MilestoneState {
        self.milestone
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn status(&self) -> TierStatus {
        self.status
    }

    /// Cells on completed lines, for highlighting.
    pub fn covered(&self) -> &BTreeSet<CellIndex> {
        &self.covered
    }

    pub fn uploads(&self) -> CellCount {
        self.occupied.len()
    }

    /// Places a photo on `index`. Replacing an existing photo still re-evaluates.
    pub fn upload(&mut self, index: CellIndex) -> Result<EvaluationResult> {
        self.check_active()?;
        let index = self.engine.config().check_uploadable(index)?;
        self.occupied.insert(index)?;
        Ok(self.evaluate(EvaluationMode::Interactive))
    }

    /// Deletes the photo on `index`. Acknowledged lines stay acknowledged, so
    /// rebuilding a line later does not celebrate it twice.
    pub fn remove(&mut self, index: CellIndex) -> Result<EvaluationResult> {
        self.check_active()?;
        let index = self.engine.config().check_uploadable(index)?;
        self.occupied.remove(index)?;
        Ok(self.evaluate(EvaluationMode::Interactive))
    }

    /// Removes every photo but keeps the milestone.
    pub fn clear_board(&mut self) {
        self.occupied.clear();
        self.state = SessionState::Active;
        self.refresh();
    }

    /// Removes every photo and starts a new milestone.
    pub fn new_game(&mut self) {
        self.milestone = MilestoneState::default();
        self.clear_board();
        log::debug!("Started a new game");
    }

    pub fn finish(&mut self) {
        self.state = SessionState::Over;
    }

    pub fn resume(&mut self) {
        self.state = SessionState::Active;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            occupied: self.occupied.to_vec(),
            milestone: self.milestone,
            is_over: self.state.is_over(),
        }
    }

    fn evaluate(&mut self, mode: EvaluationMode) -> EvaluationResult {
        let result = self.engine.evaluate(&self.occupied, self.milestone, mode);
        self.milestone = result.milestone;
        self.status = result.status;
        self.covered = result.covered.clone();
        result
    }

    fn refresh(&mut self) {
        let report = self.engine.compute_lines(&self.occupied);
        self.status = TierStatus::new(report.line_count, self.engine.is_blackout_report(&report));
        self.covered = report.covered;
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_over() {
            Err(BingoError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
