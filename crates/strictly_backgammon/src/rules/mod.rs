//! Backgammon move rules: board normalization and the legality checker.

mod board;
mod legality;

pub use board::{ALL_BORNE_OFF, Board, HOME, Step};
pub use legality::check_move;

use crate::moves::{Move, MoveStatus, Movement};
use crate::{Position, Side};
use tracing::instrument;

/// May `side` play `die` from `pos`?
pub fn can_move(pos: &Position, side: Side, die: u8) -> bool {
    Board::from_position(pos, side).can_move(die)
}

/// Is there an order in which `side` plays both dice from `pos`?
pub fn can_move_pair(pos: &Position, side: Side, die1: u8, die2: u8) -> bool {
    Board::from_position(pos, side).can_move_pair(die1, die2)
}

/// Backmost checker of `side`: 25 on the bar, 26 when all are borne off.
pub fn find_backmost(pos: &Position, side: Side) -> u8 {
    Board::from_position(pos, side).find_backmost()
}

/// Board and bars of `pos` after replaying `movements` for `side` without
/// any rule check beyond "a checker is there to move".
///
/// Only points and bars change; everything else is copied from `pos`.
pub fn board_after(pos: &Position, side: Side, movements: &[Movement]) -> Option<Position> {
    let mut board = Board::from_position(pos, side);
    board.apply_unchecked(movements).ok()?;
    let mut after = pos.clone();
    board.write_to(&mut after, side);
    Some(after)
}

/// Judges `side` playing `steps` with the dice shown in `pos`.
///
/// The steps are replayed on the board and the resulting change is handed
/// to [`check_move`], so the returned move carries the checker's
/// interpretation and diagnostic.
#[instrument(skip(pos))]
pub fn play(pos: &Position, side: Side, steps: &[Step]) -> Move {
    let [die1, die2] = pos.dice();
    let movements: Vec<Movement> = steps
        .iter()
        .map(|&(from, to)| Movement::new(from, to, from.saturating_sub(to)))
        .collect();
    match board_after(pos, side, &movements) {
        Some(after) => check_move(pos, &after, side),
        None => Move::from_parts(die1, die2, movements, MoveStatus::Illegal),
    }
}
