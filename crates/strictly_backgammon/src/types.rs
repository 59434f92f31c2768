//! Core domain types shared by every backgammon module.

use serde::{Deserialize, Serialize};

/// Number of checkers each side owns.
pub const CHECKERS: u8 = 15;

/// Number of points on the board.
pub const POINTS: usize = 24;

/// A side of the board.
///
/// `White` is the first player: its checkers are positive in
/// [`Position::points`](crate::Position::points) and it bears off below index 0.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// First player.
    White,
    /// Second player.
    Black,
}

impl Side {
    /// Returns the opponent side.
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Index into per-side arrays (`0` for white, `1` for black).
    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Sign of this side's checkers and scores (`+1` white, `-1` black).
    pub fn sign(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Side owning a signed value, `None` for zero.
    pub fn from_sign(value: i32) -> Option<Self> {
        match value.signum() {
            1 => Some(Side::White),
            -1 => Some(Side::Black),
            _ => None,
        }
    }

    /// Single-letter code used by the action log.
    pub fn code(self) -> &'static str {
        match self {
            Side::White => "W",
            Side::Black => "B",
        }
    }

    /// Parses a single-letter code (`W` or `B`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "W" => Some(Side::White),
            "B" => Some(Side::Black),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opponent_is_involution() {
        for side in Side::iter() {
            assert_eq!(side.opponent().opponent(), side);
            assert_ne!(side.opponent(), side);
        }
    }

    #[test]
    fn test_sign_round_trips() {
        for side in Side::iter() {
            assert_eq!(Side::from_sign(side.sign() * 3), Some(side));
        }
        assert_eq!(Side::from_sign(0), None);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Side::from_code("W"), Some(Side::White));
        assert_eq!(Side::from_code("B"), Some(Side::Black));
        assert_eq!(Side::from_code("-"), None);
        assert_eq!(Side::Black.to_string(), "black");
    }
}
