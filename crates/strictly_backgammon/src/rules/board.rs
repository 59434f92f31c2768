//! Board normalized to the acting side's perspective.
//!
//! Index 0 counts the acting side's borne-off checkers, 25 its bar, and
//! 1..=24 the points with the acting side positive. Black's view is the
//! mirror image of the stored white-based layout.

use crate::moves::{BAR, Movement, OFF};
use crate::types::{CHECKERS, POINTS, Side};
use crate::{Position, RuleError};

/// Backmost value reported once every checker is borne off.
pub const ALL_BORNE_OFF: u8 = 26;

/// Highest point of the home board.
pub const HOME: u8 = 6;

/// A single checker step, acting-side perspective.
pub type Step = (u8, u8);

/// Normalized board used by the legality checker and the mutator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [i32; 26],
    opponent_bar: i32,
}

impl Board {
    /// Normalizes `pos` for `side`.
    pub fn from_position(pos: &Position, side: Side) -> Self {
        let mut cells = [0i32; 26];
        for (point, cell) in cells.iter_mut().enumerate().take(POINTS + 1).skip(1) {
            *cell = match side {
                Side::White => i32::from(pos.points[point - 1]),
                Side::Black => -i32::from(pos.points[POINTS - point]),
            };
        }
        cells[usize::from(BAR)] = i32::from(pos.bar(side));
        let on_board: i32 = cells[1..=POINTS].iter().filter(|&&n| n > 0).sum();
        cells[usize::from(OFF)] = i32::from(CHECKERS) - on_board - cells[usize::from(BAR)];
        Self {
            cells,
            opponent_bar: i32::from(pos.bar(side.opponent())),
        }
    }

    /// Writes points and bars back into `pos`.
    pub fn write_to(&self, pos: &mut Position, side: Side) {
        for point in 1..=POINTS {
            let value = self.cells[point] as i8;
            match side {
                Side::White => pos.points[point - 1] = value,
                Side::Black => pos.points[POINTS - point] = -value,
            }
        }
        pos.bar[side.index()] = self.cells[usize::from(BAR)] as u8;
        pos.bar[side.opponent().index()] = self.opponent_bar as u8;
    }

    /// Signed checker count at a normalized index.
    pub fn at(&self, index: u8) -> i32 {
        self.cells[usize::from(index)]
    }

    /// Checkers of the acting side on the bar.
    pub fn on_bar(&self) -> i32 {
        self.cells[usize::from(BAR)]
    }

    /// Checkers of the acting side borne off.
    pub fn borne_off(&self) -> i32 {
        self.cells[usize::from(OFF)]
    }

    /// Opposing checkers on their bar.
    pub fn opponent_bar(&self) -> i32 {
        self.opponent_bar
    }

    /// Total pips still to travel for the acting side.
    pub fn pips(&self) -> i32 {
        (1..=25).map(|i| self.cells[i].max(0) * i as i32).sum()
    }

    /// Backmost checker: 25 if on the bar, else the highest occupied point,
    /// [`ALL_BORNE_OFF`] when nothing is left.
    pub fn find_backmost(&self) -> u8 {
        (1..=BAR)
            .rev()
            .find(|&i| self.cells[usize::from(i)] > 0)
            .unwrap_or(ALL_BORNE_OFF)
    }

    /// Whether a checker may land on `point` (1..=24).
    pub fn is_open(&self, point: u8) -> bool {
        self.cells[usize::from(point)] >= -1
    }

    /// All legal single steps with `die`.
    pub fn legal_steps(&self, die: u8) -> Vec<Step> {
        if self.on_bar() > 0 {
            let entry = BAR - die;
            return if self.is_open(entry) {
                vec![(BAR, entry)]
            } else {
                Vec::new()
            };
        }
        let backmost = self.find_backmost();
        (1..=POINTS as u8)
            .rev()
            .filter(|&from| self.at(from) > 0)
            .filter_map(|from| {
                if from > die {
                    let to = from - die;
                    self.is_open(to).then_some((from, to))
                } else {
                    let exact = from == die;
                    (backmost <= HOME && (exact || from == backmost)).then_some((from, OFF))
                }
            })
            .collect()
    }

    /// May the acting side play `die` at all?
    pub fn can_move(&self, die: u8) -> bool {
        !self.legal_steps(die).is_empty()
    }

    /// Is there an order that plays `die1` and `die2` consecutively?
    pub fn can_move_pair(&self, die1: u8, die2: u8) -> bool {
        let first_then = |first: u8, second: u8| {
            self.legal_steps(first).into_iter().any(|step| {
                let mut next = self.clone();
                next.apply(step);
                next.can_move(second)
            })
        };
        first_then(die1, die2) || first_then(die2, die1)
    }

    /// Moves one checker without any rule check, hitting a lone opposing
    /// checker on the landing point.
    pub fn apply(&mut self, (from, to): Step) {
        self.cells[usize::from(from)] -= 1;
        self.land(to);
    }

    /// Places a checker on `to`, hitting a blot there.
    pub(crate) fn land(&mut self, to: u8) {
        let cell = &mut self.cells[usize::from(to)];
        if to != OFF && *cell == -1 {
            *cell = 0;
            self.opponent_bar += 1;
        }
        *cell += 1;
    }

    /// Removes a checker from `from` without placing it anywhere.
    pub(crate) fn lift(&mut self, from: u8) {
        self.cells[usize::from(from)] -= 1;
    }

    /// Replays raw movements, checking only that each source holds a
    /// checker of the acting side.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidMove`] if a movement starts on a point
    /// without an own checker or runs backwards.
    pub fn apply_unchecked(&mut self, movements: &[Movement]) -> Result<(), RuleError> {
        for movement in movements {
            if movement.from > BAR || movement.from <= movement.to {
                return Err(RuleError::InvalidMove(format!(
                    "{}/{} does not move forward",
                    movement.from, movement.to
                )));
            }
            if self.at(movement.from) <= 0 {
                return Err(RuleError::InvalidMove(format!(
                    "no checker on {}",
                    movement.from
                )));
            }
            if movement.to != OFF && self.at(movement.to) < -1 {
                return Err(RuleError::Blocked);
            }
            self.apply((movement.from, movement.to));
        }
        Ok(())
    }
}
