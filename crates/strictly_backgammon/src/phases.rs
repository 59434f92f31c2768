//! Where a game stands, derived from its latest position.

use crate::Side;
use serde::{Deserialize, Serialize};

/// Phase of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nobody has won the opening roll yet.
    Opening,
    /// The side on turn may double or roll.
    AwaitingRoll(Side),
    /// The side on turn has rolled and must move.
    AwaitingMove(Side),
    /// A double by the given side awaits take or drop.
    AwaitingCubeResponse(Side),
    /// A resignation by the given side awaits accept or reject.
    AwaitingResignResponse(Side),
    /// The game is over.
    Resolved {
        /// Winning side.
        winner: Side,
        /// Points the winner earned.
        points: u32,
    },
}

impl GamePhase {
    /// Whether the game has been decided.
    pub fn is_resolved(&self) -> bool {
        matches!(self, GamePhase::Resolved { .. })
    }

    /// Side expected to act next, if any single side is.
    pub fn actor(&self) -> Option<Side> {
        match self {
            GamePhase::Opening | GamePhase::Resolved { .. } => None,
            GamePhase::AwaitingRoll(side) | GamePhase::AwaitingMove(side) => Some(*side),
            GamePhase::AwaitingCubeResponse(offerer) | GamePhase::AwaitingResignResponse(offerer) => {
                Some(offerer.opponent())
            }
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GamePhase::Opening => write!(f, "Opening roll"),
            GamePhase::AwaitingRoll(side) => write!(f, "{side} to roll or double"),
            GamePhase::AwaitingMove(side) => write!(f, "{side} to move"),
            GamePhase::AwaitingCubeResponse(side) => write!(f, "{side} doubled"),
            GamePhase::AwaitingResignResponse(side) => write!(f, "{side} resigned"),
            GamePhase::Resolved { winner, points } => write!(f, "{winner} wins {points}"),
        }
    }
}
