use std::collections::BTreeMap;
use std::fmt;

use photobingo_core::{
    BoardConfig, CellIndex, EvaluationMode, EvaluationResult, GameSession, MilestoneState,
    OccupiedSet, SessionState, WinEngine,
};
use serde::{Deserialize, Serialize};

use crate::*;

/// Stored board of one player, as the server keeps it in `gamestates.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateRecord {
    #[serde(default)]
    pub numbers: Vec<CellLabel>,
    /// Uploaded image URL per cell index.
    #[serde(default)]
    pub cell_images: BTreeMap<CellIndex, String>,
    #[serde(default)]
    pub is_game_over: bool,
    /// Missing on records saved before milestones were tracked.
    #[serde(default)]
    pub milestone: MilestoneState,
}

/// All stored boards keyed by user id.
pub type GameStates = BTreeMap<String, GameStateRecord>;

/// Outcome of loading a player's stored board.
#[derive(Clone, Debug, PartialEq)]
pub struct RestoredGame {
    pub session: GameSession,
    pub evaluation: EvaluationResult,
    /// The stored board used another layout and was replaced by a new game.
    pub was_reset: bool,
}

impl GameStateRecord {
    pub fn new_game(layout: Vec<CellLabel>, config: &BoardConfig) -> Result<Self> {
        validate_layout(&layout, config)?;
        Ok(Self {
            numbers: layout,
            ..Self::default()
        })
    }

    /// Cells holding a photo. A stray image on the free cell is ignored.
    pub fn occupied(&self, config: &BoardConfig) -> Result<OccupiedSet> {
        let indices = self.cell_images.keys().copied().filter(|&index| {
            if config.is_free(index) {
                log::warn!("Ignoring image stored on the free cell {index}");
                false
            } else {
                true
            }
        });
        Ok(OccupiedSet::from_indices(*config, indices)?)
    }

    pub fn session_state(&self) -> SessionState {
        if self.is_game_over {
            SessionState::Over
        } else {
            SessionState::Active
        }
    }

    /// Rebuilds the player's session from this record. A record laid out
    /// differently from `layout` is from an older board and starts over.
    pub fn restore(&self, engine: &WinEngine, layout: &[CellLabel]) -> Result<RestoredGame> {
        if self.numbers != layout {
            log::info!("Stored board does not match the current layout, starting a new game");
            let session = GameSession::new(engine.clone());
            let evaluation = engine.evaluate(
                session.occupied(),
                session.milestone(),
                EvaluationMode::Silent,
            );
            return Ok(RestoredGame {
                session,
                evaluation,
                was_reset: true,
            });
        }

        let occupied = self.occupied(engine.config())?;
        let (session, evaluation) = GameSession::restore(
            engine.clone(),
            occupied,
            self.milestone,
            self.session_state(),
        )?;
        Ok(RestoredGame {
            session,
            evaluation,
            was_reset: false,
        })
    }

    /// Records an uploaded image URL for `index`.
    pub fn set_image(&mut self, index: CellIndex, url: impl Into<String>) {
        self.cell_images.insert(index, url.into());
    }

    /// Writes the session's milestone and game-over flag back, dropping images of
    /// cells the session no longer holds.
    pub fn sync(&mut self, session: &GameSession) {
        let occupied = session.occupied();
        self.cell_images.retain(|&index, _| occupied.contains(index));
        self.milestone = session.milestone();
        self.is_game_over = session.is_over();
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Player,
    Viewer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::Player => "player",
            Self::Viewer => "viewer",
        })
    }
}

/// Entry of `users.json`. Credentials stay with the auth layer and are skipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}
