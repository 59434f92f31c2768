//! The position value type.
//!
//! A [`Position`] is a plain value: every game snapshot owns its own copy.
//! Board indices are from white's perspective, index 0 being white's ace
//! point and black's 24-point.

use crate::types::{CHECKERS, POINTS, Side};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Standard starting layout from white's perspective.
const STARTING_POINTS: [i8; POINTS] = [
    -2, 0, 0, 0, 0, 5, // white home board
    0, 3, 0, 0, 0, -5, //
    5, 0, 0, 0, -3, 0, //
    -5, 0, 0, 0, 0, 2, // black home board
];

/// Complete state of a backgammon game at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub(crate) match_length: u32,
    pub(crate) players: [String; 2],
    pub(crate) points: [i8; POINTS],
    pub(crate) bar: [u8; 2],
    pub(crate) dice: [u8; 2],
    pub(crate) cube: u32,
    pub(crate) may_double: [bool; 2],
    pub(crate) cube_turned: Option<Side>,
    pub(crate) scores: [u32; 2],
    pub(crate) turn: Option<Side>,
    pub(crate) resigned: i32,
    pub(crate) score: i32,
    pub(crate) crawford: bool,
}

impl Position {
    /// Creates the standard starting position, before the opening roll.
    #[instrument]
    pub fn initial() -> Self {
        Self {
            match_length: 0,
            players: [String::new(), String::new()],
            points: STARTING_POINTS,
            bar: [0, 0],
            dice: [0, 0],
            cube: 1,
            may_double: [false, false],
            cube_turned: None,
            scores: [0, 0],
            turn: None,
            resigned: 0,
            score: 0,
            crawford: false,
        }
    }

    /// Creates a position with an empty board (every checker borne off).
    ///
    /// Handy as a base for setting up bear-off and bar positions.
    pub fn empty() -> Self {
        Self {
            points: [0; POINTS],
            ..Self::initial()
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Match length, `0` for unlimited.
    pub fn match_length(&self) -> u32 {
        self.match_length
    }

    /// Name of the player on `side`.
    pub fn player(&self, side: Side) -> &str {
        &self.players[side.index()]
    }

    /// Signed checker counts, positive for white.
    pub fn points(&self) -> &[i8; POINTS] {
        &self.points
    }

    /// Signed checker count on board index `index` (0..24).
    pub fn point(&self, index: usize) -> i8 {
        self.points[index]
    }

    /// Checkers of `side` on the bar.
    pub fn bar(&self, side: Side) -> u8 {
        self.bar[side.index()]
    }

    /// Dice shown, `[0, 0]` when no roll is visible.
    pub fn dice(&self) -> [u8; 2] {
        self.dice
    }

    /// Value of the doubling cube.
    pub fn cube(&self) -> u32 {
        self.cube
    }

    /// Whether `side` may offer a double.
    pub fn may_double(&self, side: Side) -> bool {
        self.may_double[side.index()]
    }

    /// Side with a pending double offer.
    pub fn cube_turned(&self) -> Option<Side> {
        self.cube_turned
    }

    /// Match scores, white first.
    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    /// Points earned so far by `side`.
    pub fn score_of(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    /// Side on turn, `None` before the opening roll and after the game.
    pub fn turn(&self) -> Option<Side> {
        self.turn
    }

    /// Pending resignation; positive when white offers.
    pub fn resigned(&self) -> i32 {
        self.resigned
    }

    /// Signed value of the most recently concluded game, positive for a
    /// white win.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Whether this position belongs to the Crawford game.
    pub fn is_crawford(&self) -> bool {
        self.crawford
    }

    // ─────────────────────────────────────────────────────────────
    //  Builders
    // ─────────────────────────────────────────────────────────────

    /// Sets the match length.
    pub fn with_match_length(mut self, length: u32) -> Self {
        self.match_length = length;
        self
    }

    /// Sets both player names.
    pub fn with_players(mut self, white: impl Into<String>, black: impl Into<String>) -> Self {
        self.players = [white.into(), black.into()];
        self
    }

    /// Replaces the whole board.
    pub fn with_points(mut self, points: [i8; POINTS]) -> Self {
        self.points = points;
        self
    }

    /// Sets one board index.
    pub fn with_point(mut self, index: usize, checkers: i8) -> Self {
        self.points[index] = checkers;
        self
    }

    /// Sets the bar count of `side`.
    pub fn with_bar(mut self, side: Side, checkers: u8) -> Self {
        self.bar[side.index()] = checkers;
        self
    }

    /// Shows a roll.
    pub fn with_dice(mut self, die1: u8, die2: u8) -> Self {
        self.dice = [die1, die2];
        self
    }

    /// Sets the cube value.
    pub fn with_cube(mut self, cube: u32) -> Self {
        self.cube = cube;
        self
    }

    /// Sets the doubling rights, white first.
    pub fn with_may_double(mut self, may_double: [bool; 2]) -> Self {
        self.may_double = may_double;
        self
    }

    /// Sets the pending double offer.
    pub fn with_cube_turned(mut self, side: Option<Side>) -> Self {
        self.cube_turned = side;
        self
    }

    /// Sets the match scores, white first.
    pub fn with_scores(mut self, scores: [u32; 2]) -> Self {
        self.scores = scores;
        self
    }

    /// Sets the side on turn.
    pub fn with_turn(mut self, turn: Option<Side>) -> Self {
        self.turn = turn;
        self
    }

    /// Sets the pending resignation value (signed by offerer).
    pub fn with_resigned(mut self, resigned: i32) -> Self {
        self.resigned = resigned;
        self
    }

    /// Marks the position as part of the Crawford game.
    pub fn with_crawford(mut self, crawford: bool) -> Self {
        self.crawford = crawford;
        self
    }

    /// Copies board and bar from `other`, leaving everything else.
    pub fn with_board_of(mut self, other: &Position) -> Self {
        self.points = other.points;
        self.bar = other.bar;
        self
    }

    // ─────────────────────────────────────────────────────────────
    //  Derived facts
    // ─────────────────────────────────────────────────────────────

    /// Checkers of `side` on the 24 points.
    pub fn checkers_on_board(&self, side: Side) -> u32 {
        let sign = side.sign() as i8;
        self.points
            .iter()
            .filter(|&&n| n.signum() == sign)
            .map(|&n| u32::from(n.unsigned_abs()))
            .sum()
    }

    /// Checkers of `side` already borne off (derived, never stored).
    pub fn borne_off(&self, side: Side) -> u8 {
        let in_play = self.checkers_on_board(side) + u32::from(self.bar(side));
        u8::try_from(u32::from(CHECKERS).saturating_sub(in_play)).unwrap_or(0)
    }

    /// Pip count of `side`.
    pub fn pip_count(&self, side: Side) -> u32 {
        let sign = side.sign() as i8;
        let on_points: u32 = self
            .points
            .iter()
            .enumerate()
            .filter(|(_, n)| n.signum() == sign)
            .map(|(index, n)| {
                let distance = match side {
                    Side::White => index + 1,
                    Side::Black => POINTS - index,
                };
                distance as u32 * u32::from(n.unsigned_abs())
            })
            .sum();
        on_points + 25 * u32::from(self.bar(side))
    }

    /// Whether a roll is visible.
    pub fn has_dice(&self) -> bool {
        self.dice != [0, 0]
    }

    /// Whether the visible roll is a double.
    pub fn is_double_roll(&self) -> bool {
        self.has_dice() && self.dice[0] == self.dice[1]
    }

    /// Whether the game this position belongs to has been decided.
    pub fn is_resolved(&self) -> bool {
        self.turn.is_none() && self.score != 0
    }

    /// Whether the match is decided in this position.
    pub fn is_match_over(&self) -> bool {
        self.match_length > 0 && self.scores.iter().any(|&s| s >= self.match_length)
    }

    /// Compares every rule-relevant field.
    ///
    /// The dice are compared as an unordered pair and the value of the last
    /// concluded game is ignored.
    #[instrument(skip_all)]
    pub fn equals_technically(&self, other: &Position) -> bool {
        let same_dice = self.dice == other.dice || self.dice == [other.dice[1], other.dice[0]];
        same_dice
            && self.match_length == other.match_length
            && self.players == other.players
            && self.points == other.points
            && self.bar == other.bar
            && self.cube == other.cube
            && self.may_double == other.may_double
            && self.cube_turned == other.cube_turned
            && self.scores == other.scores
            && self.turn == other.turn
            && self.resigned == other.resigned
    }

    /// Swaps colors and reverses the board.
    pub fn mirror(&self) -> Position {
        let mut points = [0; POINTS];
        for (index, slot) in points.iter_mut().enumerate() {
            *slot = -self.points[POINTS - 1 - index];
        }
        Position {
            match_length: self.match_length,
            players: [self.players[1].clone(), self.players[0].clone()],
            points,
            bar: [self.bar[1], self.bar[0]],
            dice: self.dice,
            cube: self.cube,
            may_double: [self.may_double[1], self.may_double[0]],
            cube_turned: self.cube_turned.map(Side::opponent),
            scores: [self.scores[1], self.scores[0]],
            turn: self.turn.map(Side::opponent),
            resigned: -self.resigned,
            score: -self.score,
            crawford: self.crawford,
        }
    }

    /// Fresh opening position of the next game, keeping match data.
    #[instrument(skip(self))]
    pub fn next_game(&self, crawford: bool) -> Position {
        Position {
            match_length: self.match_length,
            players: self.players.clone(),
            scores: self.scores,
            crawford,
            ..Position::initial()
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}
