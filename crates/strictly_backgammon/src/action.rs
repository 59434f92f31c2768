//! First-class action types for backgammon.
//!
//! Actions are domain events, not side effects. They carry exactly the data
//! their kind needs and are applied through the mutator.

use crate::moves::Move;
use serde::{Deserialize, Serialize};

/// Anything a player can do during a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumDiscriminants)]
#[strum_discriminants(name(ActionKind))]
#[strum_discriminants(derive(Hash, Serialize, Deserialize, strum::Display, strum::EnumString, strum::EnumIter))]
pub enum Action {
    /// Dice were rolled.
    Roll {
        /// First die.
        die1: u8,
        /// Second die.
        die2: u8,
    },
    /// Checkers were moved.
    Move(Move),
    /// The cube was offered.
    Double,
    /// A double was accepted.
    Take,
    /// A double was refused.
    Drop,
    /// A resignation worth `value` points was offered.
    Resign {
        /// Points conceded.
        value: u32,
    },
    /// A resignation was accepted.
    Accept,
    /// A resignation was rejected.
    Reject,
}

impl Action {
    /// Convenience constructor for a roll.
    pub fn roll(die1: u8, die2: u8) -> Self {
        Action::Roll { die1, die2 }
    }

    /// Convenience constructor for a resignation.
    pub fn resign(value: u32) -> Self {
        Action::Resign { value }
    }

    /// The kind of this action.
    pub fn kind(&self) -> ActionKind {
        ActionKind::from(self)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Roll { die1, die2 } => write!(f, "Roll {die1}{die2}"),
            Action::Move(mv) => write!(f, "Move {mv}"),
            Action::Resign { value } => write!(f, "Resign {value}"),
            other => write!(f, "{}", other.kind()),
        }
    }
}
