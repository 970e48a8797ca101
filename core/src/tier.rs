use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Milestone classification of a board, ordered from lowest to highest.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    #[default]
    Playing,
    SustainStart,
    Bingo,
    AdvancedSustain,
    Champion,
}

impl Tier {
    /// Line-count tiers with their thresholds, highest first. Live evaluation and
    /// reports both read this table.
    pub const LADDER: [(Tier, CellCount); 3] = [
        (Tier::AdvancedSustain, 6),
        (Tier::Bingo, 3),
        (Tier::SustainStart, 1),
    ];

    pub fn classify(line_count: CellCount, is_blackout: bool) -> Self {
        if is_blackout {
            return Self::Champion;
        }
        Self::LADDER
            .iter()
            .find(|&&(_, threshold)| line_count >= threshold)
            .map_or(Self::Playing, |&(tier, _)| tier)
    }

    /// Highest line threshold passed on the way from `previous` to `current` lines.
    pub fn newly_crossed(previous: CellCount, current: CellCount) -> Option<Self> {
        Self::LADDER
            .iter()
            .find(|&&(_, threshold)| current >= threshold && previous < threshold)
            .map(|&(tier, _)| tier)
    }

    pub const fn threshold(self) -> Option<CellCount> {
        match self {
            Self::SustainStart => Some(1),
            Self::Bingo => Some(3),
            Self::AdvancedSustain => Some(6),
            Self::Playing | Self::Champion => None,
        }
    }

    pub const fn is_champion(self) -> bool {
        matches!(self, Self::Champion)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::SustainStart => "Sustain Start",
            Self::Bingo => "Bingo",
            Self::AdvancedSustain => "Advanced Sustain",
            Self::Champion => "SUSTAIN CHAMPION",
        }
    }

    /// Text of the one-shot celebration overlay.
    pub const fn celebration_title(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::SustainStart => "Sustain Start!!!",
            Self::Bingo => "Bingo!!!",
            Self::AdvancedSustain => "Advanced Sustain!!!",
            Self::Champion => "SUSTAIN CHAMPION!!!",
        }
    }
}

/// A tier together with the line count it was classified from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStatus {
    pub tier: Tier,
    pub line_count: CellCount,
}

impl TierStatus {
    pub fn new(line_count: CellCount, is_blackout: bool) -> Self {
        Self {
            tier: Tier::classify(line_count, is_blackout),
            line_count,
        }
    }
}

impl fmt::Display for TierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tier {
            Tier::Playing => f.write_str("Playing"),
            Tier::Champion => f.write_str("SUSTAIN CHAMPION (Full)"),
            Tier::SustainStart => write!(f, "Sustain Start ({} Line)", self.line_count),
            tier => write!(f, "{} ({} Lines)", tier.name(), self.line_count),
        }
    }
}
