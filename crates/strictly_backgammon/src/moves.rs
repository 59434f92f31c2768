//! Checker moves and their legality status.
//!
//! Points in a [`Movement`] are always counted from the acting side's
//! perspective: `25` is the bar, `0` is off the board, and `from > to`.

use crate::error::RuleError;
use derive_more::Display;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Bar index in the acting side's perspective.
pub const BAR: u8 = 25;

/// Off-the-board index in the acting side's perspective.
pub const OFF: u8 = 0;

/// Most sub-movements a single turn can contain.
pub const MAX_MOVEMENTS: usize = 4;

/// One checker travelling one die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Movement {
    /// Source point (1..=25, 25 = bar).
    pub from: u8,
    /// Destination point (0..=24, 0 = borne off).
    pub to: u8,
    /// Die consumed by this movement.
    pub die: u8,
}

impl Movement {
    /// Whether this movement bears a checker off.
    pub fn is_bear_off(&self) -> bool {
        self.to == OFF
    }

    /// Whether this movement enters a checker from the bar.
    pub fn is_entry(&self) -> bool {
        self.from == BAR
    }
}

/// Diagnostic attached to a [`Move`] by the legality checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum MoveStatus {
    /// A legal play of the dice shown.
    #[default]
    #[display("legal")]
    Legal,
    /// No legal interpretation of the board change.
    #[display("illegal")]
    Illegal,
    /// More than four source points.
    #[display("too many moves")]
    TooManyMoves,
    /// A landing point holds two or more opposing checkers.
    #[display("blocked")]
    Blocked,
    /// More dice could have been played.
    #[display("use all dice")]
    UseAll,
    /// The higher die had to be played.
    #[display("use higher die")]
    UseHigher,
    /// Another order plays both dice.
    #[display("try swapping dice")]
    TrySwap,
    /// Bore off with checkers outside the home board.
    #[display("premature bear-off")]
    PrematureBearOff,
    /// Wasteful bear-off that was not from the backmost point.
    #[display("illegal waste")]
    IllegalWaste,
    /// Moved with checkers still on the bar.
    #[display("dancing")]
    Dancing,
}

impl MoveStatus {
    /// Whether the status marks a legal move.
    pub fn is_legal(self) -> bool {
        self == MoveStatus::Legal
    }

    /// Converts a rejecting status into the matching [`RuleError`].
    pub fn into_error(self) -> Option<RuleError> {
        match self {
            MoveStatus::Legal => None,
            MoveStatus::Illegal => Some(RuleError::Illegal),
            MoveStatus::TooManyMoves => Some(RuleError::TooManyMoves),
            MoveStatus::Blocked => Some(RuleError::Blocked),
            MoveStatus::UseAll => Some(RuleError::UseAll),
            MoveStatus::UseHigher => Some(RuleError::UseHigher),
            MoveStatus::TrySwap => Some(RuleError::TrySwap),
            MoveStatus::PrematureBearOff => Some(RuleError::PrematureBearOff),
            MoveStatus::IllegalWaste => Some(RuleError::IllegalWaste),
            MoveStatus::Dancing => Some(RuleError::Dancing),
        }
    }
}

/// One turn's checker play: the dice rolled and up to four movements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    die1: u8,
    die2: u8,
    movements: Vec<Movement>,
    status: MoveStatus,
}

impl Move {
    /// Builds a move from its movements, validating them eagerly.
    ///
    /// Every movement must run forward (`from > to`), stay on the board
    /// range, and consume one of the dice. The status starts as `Legal`;
    /// only the legality checker can judge the move against a position.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidMove`] if a movement is malformed or the
    /// movements need more dice than were rolled.
    #[instrument]
    pub fn new(die1: u8, die2: u8, movements: &[Movement]) -> Result<Self, RuleError> {
        if !(1..=6).contains(&die1) || !(1..=6).contains(&die2) {
            return Err(RuleError::InvalidMove(format!("dice {die1}{die2} out of range")));
        }
        let mut pool = Self::dice_pool(die1, die2);
        if movements.len() > pool.len() {
            return Err(RuleError::InvalidMove(format!(
                "{} movements for {} dice",
                movements.len(),
                pool.len()
            )));
        }
        for movement in movements {
            if movement.from > BAR || movement.from <= movement.to {
                return Err(RuleError::InvalidMove(format!(
                    "{}/{} does not move forward",
                    movement.from, movement.to
                )));
            }
            let distance = movement.from - movement.to;
            let exact = movement.die == distance;
            let waste = movement.is_bear_off() && movement.die > distance;
            if !exact && !waste {
                return Err(RuleError::InvalidMove(format!(
                    "{}/{} cannot be played with a {}",
                    movement.from, movement.to, movement.die
                )));
            }
            match pool.iter().position(|&d| d == movement.die) {
                Some(slot) => {
                    pool.swap_remove(slot);
                }
                None => {
                    return Err(RuleError::InvalidMove(format!(
                        "die {} is not available",
                        movement.die
                    )));
                }
            }
        }
        Ok(Self {
            die1,
            die2,
            movements: movements.to_vec(),
            status: MoveStatus::Legal,
        })
    }

    /// Builds a move without validation; used by the legality checker,
    /// whose candidates are well-formed by construction.
    pub(crate) fn from_parts(die1: u8, die2: u8, movements: Vec<Movement>, status: MoveStatus) -> Self {
        Self {
            die1,
            die2,
            movements,
            status,
        }
    }

    /// The dice available for a roll: four for a double, two otherwise.
    pub fn dice_pool(die1: u8, die2: u8) -> Vec<u8> {
        if die1 == die2 {
            vec![die1; MAX_MOVEMENTS]
        } else {
            vec![die1, die2]
        }
    }

    /// First die as rolled.
    pub fn die1(&self) -> u8 {
        self.die1
    }

    /// Second die as rolled.
    pub fn die2(&self) -> u8 {
        self.die2
    }

    /// Number of movements actually performed.
    pub fn number(&self) -> usize {
        self.movements.len()
    }

    /// The movements in play order.
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Legality diagnostic.
    pub fn status(&self) -> MoveStatus {
        self.status
    }

    /// Whether the roll was a double.
    pub fn is_double(&self) -> bool {
        self.die1 == self.die2
    }

    /// Whether no checker moved (a dance or a blocked roll).
    pub fn is_forfeit(&self) -> bool {
        self.movements.is_empty()
    }

    /// Whether the mutator may apply this move: a legal play, or a dance
    /// that forfeits the turn.
    pub fn is_playable(&self) -> bool {
        self.status.is_legal() || (self.status == MoveStatus::Dancing && self.is_forfeit())
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}: {}", self.die1, self.die2, crate::notation::compact(&self.movements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_exact_and_waste() {
        let mv = Move::new(
            6,
            5,
            &[Movement::new(24, 18, 6), Movement::new(3, OFF, 5)],
        )
        .expect("valid movements");
        assert_eq!(mv.number(), 2);
        assert!(mv.movements()[1].is_bear_off());
        assert_eq!(mv.status(), MoveStatus::Legal);
    }

    #[test]
    fn test_new_rejects_backward_movement() {
        let result = Move::new(3, 1, &[Movement::new(5, 8, 3)]);
        assert!(matches!(result, Err(RuleError::InvalidMove(_))));
    }

    #[test]
    fn test_new_rejects_unrolled_die() {
        let result = Move::new(3, 1, &[Movement::new(8, 5, 3), Movement::new(8, 5, 3)]);
        assert!(matches!(result, Err(RuleError::InvalidMove(_))));
    }

    #[test]
    fn test_new_allows_four_on_doubles() {
        let movements = [Movement::new(13, 11, 2); 4];
        assert!(Move::new(2, 2, &movements).is_ok());
        assert!(Move::new(2, 1, &movements).is_err());
    }

    #[test]
    fn test_status_maps_to_error() {
        assert_eq!(MoveStatus::Legal.into_error(), None);
        assert_eq!(MoveStatus::TrySwap.into_error(), Some(RuleError::TrySwap));
        assert_eq!(MoveStatus::Dancing.into_error(), Some(RuleError::Dancing));
    }
}
