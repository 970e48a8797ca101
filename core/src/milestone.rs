use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::*;

/// Per-player progress marker used to avoid celebrating the same win twice.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneState {
    /// Line count the player was last shown a celebration for.
    pub acknowledged_line_count: CellCount,
    pub blackout_celebrated: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationMode {
    /// Restoring a stored board: catch up without replaying animations.
    Silent,
    /// Right after a photo changed on the board.
    Interactive,
}

/// One-shot animation request for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    pub tier: Tier,
    pub label: String,
}

impl Celebration {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            label: tier.celebration_title().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub milestone: MilestoneState,
    pub status: TierStatus,
    pub covered: BTreeSet<CellIndex>,
    pub celebration: Option<Celebration>,
}

impl EvaluationResult {
    pub fn has_celebration(&self) -> bool {
        self.celebration.is_some()
    }
}

impl WinEngine {
    /// Advances `milestone` for the current board and decides on at most one
    /// celebration. Pure: persisting the returned milestone is up to the caller.
    pub fn evaluate(
        &self,
        occupied: &OccupiedSet,
        milestone: MilestoneState,
        mode: EvaluationMode,
    ) -> EvaluationResult {
        let report = self.compute_lines(occupied);
        let is_blackout = self.is_blackout_report(&report);
        let line_count = report.line_count;
        let mut milestone = milestone;

        let celebrated = match mode {
            EvaluationMode::Silent => {
                milestone.acknowledged_line_count = line_count;
                // champion is announced again on every reload
                if is_blackout {
                    milestone.blackout_celebrated = true;
                    Some(Tier::Champion)
                } else {
                    None
                }
            }
            EvaluationMode::Interactive if is_blackout && !milestone.blackout_celebrated => {
                milestone.blackout_celebrated = true;
                milestone.acknowledged_line_count = line_count;
                Some(Tier::Champion)
            }
            EvaluationMode::Interactive if line_count > milestone.acknowledged_line_count => {
                let crossed = Tier::newly_crossed(milestone.acknowledged_line_count, line_count);
                milestone.acknowledged_line_count = line_count;
                crossed
            }
            EvaluationMode::Interactive => None,
        };

        if let Some(tier) = celebrated {
            log::debug!("Celebrating {tier:?} at {line_count} lines ({mode:?})");
        }

        EvaluationResult {
            milestone,
            status: TierStatus::new(line_count, is_blackout),
            covered: report.covered,
            celebration: celebrated.map(Celebration::new),
        }
    }
}
