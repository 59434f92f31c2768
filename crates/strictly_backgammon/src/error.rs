//! Error types for the rules engine and the action log.

use crate::Side;
use derive_more::{Display, Error};
use tracing::instrument;

/// Error returned when an action or move violates the rules.
///
/// The first block mirrors [`MoveStatus`](crate::MoveStatus) so that a
/// rejected move can be reported with the same diagnostic the legality
/// checker produced.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RuleError {
    /// No legal interpretation of the board change.
    #[display("Illegal move")]
    Illegal,

    /// More than four source points moved.
    #[display("Too many checkers moved")]
    TooManyMoves,

    /// A landing point is held by two or more opposing checkers.
    #[display("Landing point is blocked")]
    Blocked,

    /// At least one more die could have been played.
    #[display("All dice must be used")]
    UseAll,

    /// Only the lower die was used although the higher one is playable.
    #[display("The higher die must be used")]
    UseHigher,

    /// Only one die was used although another order plays both.
    #[display("Both dice can be used by playing them in another order")]
    TrySwap,

    /// Bore off while checkers remain outside the home board.
    #[display("Cannot bear off while checkers are outside the home board")]
    PrematureBearOff,

    /// Bore off with a larger die from a point that is not the backmost.
    #[display("Bearing off with a larger die requires the backmost checker")]
    IllegalWaste,

    /// Moved another checker while checkers are still on the bar.
    #[display("Checkers on the bar must enter first")]
    Dancing,

    /// Action by a side whose turn it is not.
    #[display("It is not {}'s turn", _0)]
    NotOnTurn(Side),

    /// Move submitted without a roll.
    #[display("Dice have not been rolled")]
    NoRoll,

    /// Roll submitted with dice already visible.
    #[display("Dice have already been rolled")]
    AlreadyRolled,

    /// Double offered after the dice were rolled.
    #[display("Cannot double after rolling")]
    DoubleAfterRoll,

    /// Double offered by a side that does not own the cube.
    #[display("Only the cube owner may double")]
    DoubleNotCubeOwner,

    /// Double offered during the Crawford game.
    #[display("Doubling is not allowed in the Crawford game")]
    DoubleCrawford,

    /// Take without a pending double.
    #[display("There is no double to take")]
    TakeWithoutDouble,

    /// Drop without a pending double.
    #[display("There is no double to drop")]
    DropWithoutDouble,

    /// Resignation worth nothing.
    #[display("Resignation must be worth at least one point")]
    EmptyResignation,

    /// Accept without a pending resignation from the opponent.
    #[display("There is no resignation to accept")]
    AcceptWithoutResignation,

    /// Reject without a pending resignation from the opponent.
    #[display("There is no resignation to reject")]
    RejectWithoutResignation,

    /// Any other action while a double awaits an answer.
    #[display("A pending double must be answered first")]
    UnrespondedDouble,

    /// Any other action while a resignation awaits an answer.
    #[display("A pending resignation must be answered first")]
    UnrespondedResignation,

    /// Action after the game was resolved.
    #[display("Game is already over")]
    EndOfGame,

    /// Action after the match was decided.
    #[display("Match is already over")]
    EndOfMatch,

    /// Action variant that cannot be applied here.
    #[display("Unsupported action")]
    UnsupportedAction,

    /// Movement list that cannot describe a move at all.
    #[display("Invalid move: {}", _0)]
    InvalidMove(String),

    /// A game was set up from a position that breaks an invariant.
    #[display("Invalid setup: {}", _0)]
    InvalidSetup(String),

    /// An invariant did not hold after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for RuleError {}

/// Error produced while reading or writing an action log.
#[derive(Debug, Clone, Display, Error)]
#[display("Log error: {} at {}:{}", message, file, line)]
pub struct LogError {
    /// Error message, including the offending log line number.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LogError {
    /// Creates a new log error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates an error pointing at a line of the log being read.
    #[track_caller]
    pub fn at(log_line: usize, message: impl std::fmt::Display) -> Self {
        Self::new(format!("line {}: {}", log_line, message))
    }
}
