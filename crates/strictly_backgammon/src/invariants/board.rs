//! Board invariants: checker conservation and point capacity.

use super::Invariant;
use crate::types::{CHECKERS, Side};
use crate::Position;
use strum::IntoEnumIterator;

/// Invariant: each side owns exactly fifteen checkers on the points, the
/// bar and the tray together.
///
/// The tray is derived, so the invariant reduces to "no more than fifteen
/// on the points and the bar".
pub struct CheckerConservation;

impl Invariant<Position> for CheckerConservation {
    fn holds(pos: &Position) -> bool {
        Side::iter().all(|side| {
            let in_play = pos.checkers_on_board(side) + u32::from(pos.bar(side));
            in_play + u32::from(pos.borne_off(side)) == u32::from(CHECKERS)
                && in_play <= u32::from(CHECKERS)
        })
    }

    fn description() -> &'static str {
        "Each side has exactly fifteen checkers"
    }
}

/// Invariant: no point holds more than fifteen checkers.
pub struct PointCapacity;

impl Invariant<Position> for PointCapacity {
    fn holds(pos: &Position) -> bool {
        pos.points()
            .iter()
            .all(|n| n.unsigned_abs() <= CHECKERS)
    }

    fn description() -> &'static str {
        "No point holds more than fifteen checkers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixteenth_checker_violates() {
        let pos = Position::initial().with_point(3, 1);
        assert!(!CheckerConservation::holds(&pos));
    }

    #[test]
    fn test_borne_off_checkers_are_conserved() {
        let pos = Position::empty().with_point(0, 1).with_point(23, -1);
        assert!(CheckerConservation::holds(&pos));
        assert!(PointCapacity::holds(&pos));
    }
}
