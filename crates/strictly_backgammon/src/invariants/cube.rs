//! Cube and offer invariants.

use super::Invariant;
use crate::Position;
use strum::IntoEnumIterator;

/// Invariant: the cube value is a power of two.
pub struct CubePowerOfTwo;

impl Invariant<Position> for CubePowerOfTwo {
    fn holds(pos: &Position) -> bool {
        pos.cube().is_power_of_two()
    }

    fn description() -> &'static str {
        "Cube value is a power of two"
    }
}

/// Invariant: while a game of a limited match is live, no score has run
/// past what one game can add to the match length.
pub struct ScoreBound;

impl Invariant<Position> for ScoreBound {
    fn holds(pos: &Position) -> bool {
        if pos.match_length() == 0 || pos.turn().is_none() {
            return true;
        }
        let bound = pos.match_length().saturating_add(pos.cube().saturating_mul(6));
        crate::Side::iter().all(|side| pos.score_of(side) < bound)
    }

    fn description() -> &'static str {
        "Scores stay below match length plus six cubes during play"
    }
}

/// Invariant: a double and a resignation are never pending together, and
/// neither is pending while dice are visible.
pub struct OffersExclusive;

impl Invariant<Position> for OffersExclusive {
    fn holds(pos: &Position) -> bool {
        let double = pos.cube_turned().is_some();
        let resign = pos.resigned() != 0;
        !(double && resign) && !((double || resign) && pos.has_dice())
    }

    fn description() -> &'static str {
        "At most one offer is pending and never with dice shown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;

    #[test]
    fn test_cube_values() {
        assert!(CubePowerOfTwo::holds(&Position::initial().with_cube(64)));
        assert!(!CubePowerOfTwo::holds(&Position::initial().with_cube(6)));
    }

    #[test]
    fn test_double_and_resign_together_violate() {
        let pos = Position::initial()
            .with_turn(Some(Side::White))
            .with_cube_turned(Some(Side::White))
            .with_resigned(-1);
        assert!(!OffersExclusive::holds(&pos));
    }

    #[test]
    fn test_score_bound_only_during_play() {
        let over = Position::initial().with_match_length(3).with_scores([9, 0]);
        assert!(ScoreBound::holds(&over));
        assert!(!ScoreBound::holds(&over.with_turn(Some(Side::Black))));
    }
}
