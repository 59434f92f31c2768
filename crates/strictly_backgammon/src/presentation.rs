//! Display-only data attached to a position.
//!
//! Front ends keep free-form status text and view toggles here; the rules
//! engine never reads them.

use crate::Position;
use serde::{Deserialize, Serialize};

/// A position plus what a front end shows next to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Presentation {
    position: Position,
    status: String,
    game_info: String,
    dice_swapped: bool,
}

impl Presentation {
    /// Wraps `position` with empty display fields.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// The wrapped position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Free-form status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Free-form game information.
    pub fn game_info(&self) -> &str {
        &self.game_info
    }

    /// Whether the dice are shown in swapped order.
    pub fn dice_swapped(&self) -> bool {
        self.dice_swapped
    }

    /// Dice in display order.
    pub fn displayed_dice(&self) -> [u8; 2] {
        let [die1, die2] = self.position.dice();
        if self.dice_swapped { [die2, die1] } else { [die1, die2] }
    }

    /// Sets the status line.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the game information.
    pub fn with_game_info(mut self, info: impl Into<String>) -> Self {
        self.game_info = info.into();
        self
    }

    /// Toggles the dice order for display.
    pub fn swap_dice(&mut self) {
        self.dice_swapped = !self.dice_swapped;
    }

    /// Compares the wrapped positions, ignoring every display field.
    pub fn equals_technically(&self, other: &Presentation) -> bool {
        self.position.equals_technically(&other.position)
    }

    /// Unwraps the position.
    pub fn into_position(self) -> Position {
        self.position
    }
}

impl From<Position> for Presentation {
    fn from(position: Position) -> Self {
        Self::new(position)
    }
}
