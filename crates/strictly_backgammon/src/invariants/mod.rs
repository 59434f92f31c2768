//! First-class invariants for backgammon positions.
//!
//! Invariants are logical properties that every position produced by the
//! engine satisfies. They are checked after each action in debug builds
//! and can be tested independently.

mod board;
mod cube;
mod dice;

pub use board::{CheckerConservation, PointCapacity};
pub use cube::{CubePowerOfTwo, OffersExclusive, ScoreBound};
pub use dice::DiceVisibility;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples, so a set is just a type alias.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

// Implement InvariantSet for 6-tuples
impl<S, I1, I2, I3, I4, I5, I6> InvariantSet<S> for (I1, I2, I3, I4, I5, I6)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
    I5: Invariant<S>,
    I6: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        check_one::<S, I4>(state, &mut violations);
        check_one::<S, I5>(state, &mut violations);
        check_one::<S, I6>(state, &mut violations);
        finish(violations)
    }
}

/// Every position invariant as a composable set.
pub type PositionInvariants = (
    CheckerConservation,
    PointCapacity,
    CubePowerOfTwo,
    ScoreBound,
    OffersExclusive,
    DiceVisibility,
);
