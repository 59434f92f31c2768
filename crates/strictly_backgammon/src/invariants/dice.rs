//! Dice visibility invariant.

use super::Invariant;
use crate::Position;

/// Invariant: dice are only shown when a side is on turn, and each shown
/// die is in `1..=6`.
pub struct DiceVisibility;

impl Invariant<Position> for DiceVisibility {
    fn holds(pos: &Position) -> bool {
        if !pos.has_dice() {
            return true;
        }
        pos.turn().is_some() && pos.dice().iter().all(|d| (1..=6).contains(d))
    }

    fn description() -> &'static str {
        "Dice are shown only with a side on turn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;

    #[test]
    fn test_dice_without_turn_violate() {
        assert!(!DiceVisibility::holds(&Position::initial().with_dice(3, 1)));
        assert!(DiceVisibility::holds(
            &Position::initial().with_dice(3, 1).with_turn(Some(Side::Black))
        ));
    }
}
