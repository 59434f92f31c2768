//! Contract-based validation for game actions.
//!
//! Contracts formalize Hoare-style reasoning: {P} action {Q}. The
//! precondition is the pending-response protocol; the postcondition is the
//! full position invariant set.

use crate::action::Action;
use crate::error::RuleError;
use crate::invariants::{InvariantSet, PositionInvariants};
use crate::{Position, Side};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), RuleError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), RuleError>;
}

/// An action together with the side submitting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Submitting side, `None` when implied.
    pub side: Option<Side>,
    /// The action itself.
    pub action: Action,
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: a pending resignation is answered before anything else.
pub struct ResignationAnswered;

impl ResignationAnswered {
    /// Only Accept or Reject by the opponent of the offerer may follow a
    /// resignation.
    #[instrument(skip(pos))]
    pub fn check(attempt: &Attempt, pos: &Position) -> Result<(), RuleError> {
        let Some(offerer) = Side::from_sign(pos.resigned()) else {
            return Ok(());
        };
        let answer = matches!(attempt.action, Action::Accept | Action::Reject);
        if answer && attempt.side != Some(offerer) {
            Ok(())
        } else {
            Err(RuleError::UnrespondedResignation)
        }
    }
}

/// Precondition: a pending double is answered before anything else.
pub struct DoubleAnswered;

impl DoubleAnswered {
    /// Only Take, Drop or (in money games) a beaver by the opponent of the
    /// doubler may follow a double.
    #[instrument(skip(pos))]
    pub fn check(attempt: &Attempt, pos: &Position) -> Result<(), RuleError> {
        let Some(doubler) = pos.cube_turned() else {
            return Ok(());
        };
        let answer = match attempt.action {
            Action::Take | Action::Drop => true,
            Action::Double => pos.match_length() == 0,
            _ => false,
        };
        if answer && attempt.side != Some(doubler) {
            Ok(())
        } else {
            Err(RuleError::UnrespondedDouble)
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Action Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for every game action.
///
/// Preconditions:
/// - A pending resignation is answered first
/// - A pending double is answered first
///
/// Postconditions:
/// - Every position invariant holds
pub struct ActionContract;

impl Contract<Position, Attempt> for ActionContract {
    fn pre(pos: &Position, attempt: &Attempt) -> Result<(), RuleError> {
        ResignationAnswered::check(attempt, pos)?;
        DoubleAnswered::check(attempt, pos)?;
        Ok(())
    }

    fn post(_before: &Position, after: &Position) -> Result<(), RuleError> {
        PositionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            RuleError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
