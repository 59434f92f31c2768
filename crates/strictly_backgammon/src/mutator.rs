//! Position mutator: applies moves and actions to a position in place.
//!
//! Every precondition violation is returned as a [`RuleError`]; on error
//! the position is left untouched.

use crate::action::Action;
use crate::error::RuleError;
use crate::moves::Move;
use crate::rules::{Board, check_move};
use crate::types::{CHECKERS, Side};
use crate::Position;
use tracing::{debug, instrument};

/// Plays `mv` for `side` without judging it, then hands the turn over.
///
/// Returns the points won if the move bore off the last checker, `0`
/// otherwise. A win is worth the cube times one, two for a gammon (the
/// loser has borne off nothing) or three for a backgammon (the loser
/// still has a checker on the bar or in the winner's home board).
///
/// # Errors
///
/// Returns [`RuleError::InvalidMove`] or [`RuleError::Blocked`] if a
/// movement cannot be replayed on the board at all.
#[instrument(skip(pos, mv), fields(played = %mv))]
pub fn apply_move(pos: &mut Position, mv: &Move, side: Side) -> Result<u32, RuleError> {
    let mut board = Board::from_position(pos, side);
    board.apply_unchecked(mv.movements())?;
    board.write_to(pos, side);
    pos.dice = [0, 0];
    pos.turn = Some(side.opponent());

    if board.borne_off() < i32::from(CHECKERS) {
        return Ok(0);
    }
    let loser = Board::from_position(pos, side.opponent());
    let multiplier = if loser.borne_off() > 0 {
        1
    } else if loser.on_bar() > 0 || (19..=24).any(|point| loser.at(point) > 0) {
        3
    } else {
        2
    };
    let points = pos.cube * multiplier;
    debug!(%side, multiplier, points, "Game won by bearing off");
    end_game(pos, side, points);
    Ok(points)
}

/// Applies `action` by `side` to `pos`.
///
/// `side` may be omitted where it is implied: the opening roll, or any
/// action by the side on turn. The returned action is the one to record,
/// with a move replaced by the legality checker's interpretation.
///
/// # Errors
///
/// Returns the [`RuleError`] describing the first violated precondition.
#[instrument(skip(pos), fields(kind = %action.kind()))]
pub fn apply_action(pos: &mut Position, side: Option<Side>, action: &Action) -> Result<Action, RuleError> {
    match action {
        Action::Roll { die1, die2 } => roll(pos, side, *die1, *die2),
        Action::Move(mv) => play(pos, side, mv),
        Action::Double => double(pos, side),
        Action::Take => take(pos, side),
        Action::Drop => drop_cube(pos, side),
        Action::Resign { value } => resign(pos, side, *value),
        Action::Accept => accept(pos, side),
        Action::Reject => reject(pos, side),
    }
}

/// Ends the game with `winner` scoring `points`.
pub(crate) fn end_game(pos: &mut Position, winner: Side, points: u32) {
    pos.scores[winner.index()] += points;
    pos.score = winner.sign() * points as i32;
    pos.turn = None;
    pos.dice = [0, 0];
    pos.cube_turned = None;
    pos.resigned = 0;
    pos.may_double = [false, false];
}

fn pending_offer(pos: &Position) -> Result<(), RuleError> {
    if pos.cube_turned.is_some() {
        return Err(RuleError::UnrespondedDouble);
    }
    if pos.resigned != 0 {
        return Err(RuleError::UnrespondedResignation);
    }
    Ok(())
}

fn on_turn(pos: &Position, side: Option<Side>) -> Result<Side, RuleError> {
    match (pos.turn, side) {
        (Some(turn), None) => Ok(turn),
        (Some(turn), Some(side)) if turn == side => Ok(side),
        (_, Some(side)) => Err(RuleError::NotOnTurn(side)),
        (None, None) => Err(RuleError::UnsupportedAction),
    }
}

fn roll(pos: &mut Position, side: Option<Side>, die1: u8, die2: u8) -> Result<Action, RuleError> {
    if !(1..=6).contains(&die1) || !(1..=6).contains(&die2) {
        return Err(RuleError::InvalidMove(format!("roll {die1}{die2} out of range")));
    }
    pending_offer(pos)?;
    if pos.has_dice() {
        return Err(RuleError::AlreadyRolled);
    }

    let mover = match pos.turn {
        Some(_) => on_turn(pos, side)?,
        None if die1 == die2 => {
            debug!(die1, "Opening double, rolling again");
            return Ok(Action::roll(die1, die2));
        }
        None => {
            let mover = side.unwrap_or(if die1 > die2 { Side::White } else { Side::Black });
            let may_double = !pos.crawford;
            pos.may_double = [may_double, may_double];
            debug!(%mover, "Opening roll");
            mover
        }
    };
    pos.turn = Some(mover);
    pos.dice = [die1, die2];
    Ok(Action::roll(die1, die2))
}

fn play(pos: &mut Position, side: Option<Side>, mv: &Move) -> Result<Action, RuleError> {
    pending_offer(pos)?;
    let side = match pos.turn {
        Some(_) => on_turn(pos, side)?,
        None => return Err(RuleError::NoRoll),
    };
    if !pos.has_dice() {
        return Err(RuleError::NoRoll);
    }
    let [die1, die2] = pos.dice;
    if [mv.die1(), mv.die2()] != [die1, die2] && [mv.die2(), mv.die1()] != [die1, die2] {
        return Err(RuleError::InvalidMove(format!(
            "move for {}{} but {}{} was rolled",
            mv.die1(),
            mv.die2(),
            die1,
            die2
        )));
    }

    let mut board = Board::from_position(pos, side);
    board.apply_unchecked(mv.movements())?;
    let mut after = pos.clone();
    board.write_to(&mut after, side);

    let judged = check_move(pos, &after, side);
    if !judged.is_playable() {
        return Err(judged.status().into_error().unwrap_or(RuleError::Illegal));
    }
    apply_move(pos, &judged, side)?;
    Ok(Action::Move(judged))
}

fn double(pos: &mut Position, side: Option<Side>) -> Result<Action, RuleError> {
    if let Some(doubler) = pos.cube_turned {
        let beaver = side.unwrap_or(doubler.opponent());
        if beaver != doubler && pos.match_length == 0 {
            pos.cube *= 4;
            pos.cube_turned = None;
            pos.may_double[beaver.index()] = true;
            pos.may_double[doubler.index()] = false;
            debug!(%beaver, cube = pos.cube, "Beaver");
            return Ok(Action::Double);
        }
        return Err(RuleError::UnrespondedDouble);
    }
    if pos.resigned != 0 {
        return Err(RuleError::UnrespondedResignation);
    }

    if pos.crawford {
        return Err(RuleError::DoubleCrawford);
    }
    let side = on_turn(pos, side)?;
    if pos.has_dice() {
        return Err(RuleError::DoubleAfterRoll);
    }
    if !pos.may_double[side.index()] {
        return Err(RuleError::DoubleNotCubeOwner);
    }
    pos.cube_turned = Some(side);
    Ok(Action::Double)
}

fn responder(pending: Option<Side>, side: Option<Side>) -> Option<(Side, Side)> {
    let offerer = pending?;
    let responder = side.unwrap_or(offerer.opponent());
    (responder != offerer).then_some((offerer, responder))
}

fn take(pos: &mut Position, side: Option<Side>) -> Result<Action, RuleError> {
    let (doubler, taker) = responder(pos.cube_turned, side).ok_or(RuleError::TakeWithoutDouble)?;
    pos.cube *= 2;
    pos.cube_turned = None;
    pos.may_double[doubler.index()] = false;
    pos.may_double[taker.index()] = true;
    Ok(Action::Take)
}

fn drop_cube(pos: &mut Position, side: Option<Side>) -> Result<Action, RuleError> {
    let (doubler, _) = responder(pos.cube_turned, side).ok_or(RuleError::DropWithoutDouble)?;
    let points = pos.cube;
    debug!(%doubler, points, "Double dropped");
    end_game(pos, doubler, points);
    Ok(Action::Drop)
}

fn resign(pos: &mut Position, side: Option<Side>, value: u32) -> Result<Action, RuleError> {
    if value == 0 {
        return Err(RuleError::EmptyResignation);
    }
    pending_offer(pos)?;
    let offerer = side.or(pos.turn).ok_or(RuleError::UnsupportedAction)?;
    pos.resigned = offerer.sign() * value as i32;
    pos.dice = [0, 0];
    Ok(Action::resign(value))
}

fn accept(pos: &mut Position, side: Option<Side>) -> Result<Action, RuleError> {
    let (_, acceptor) =
        responder(Side::from_sign(pos.resigned), side).ok_or(RuleError::AcceptWithoutResignation)?;
    let points = pos.resigned.unsigned_abs();
    debug!(%acceptor, points, "Resignation accepted");
    end_game(pos, acceptor, points);
    Ok(Action::Accept)
}

fn reject(pos: &mut Position, side: Option<Side>) -> Result<Action, RuleError> {
    responder(Side::from_sign(pos.resigned), side).ok_or(RuleError::RejectWithoutResignation)?;
    pos.resigned = 0;
    Ok(Action::Reject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Movement;

    fn opening() -> Position {
        let mut pos = Position::initial();
        apply_action(&mut pos, None, &Action::roll(3, 1)).expect("opening roll");
        pos
    }

    #[test]
    fn test_opening_roll_picks_higher_die() {
        let pos = opening();
        assert_eq!(pos.turn(), Some(Side::White));
        assert_eq!(pos.dice(), [3, 1]);
        assert!(pos.may_double(Side::White) && pos.may_double(Side::Black));

        let mut pos = Position::initial();
        apply_action(&mut pos, None, &Action::roll(2, 5)).expect("opening roll");
        assert_eq!(pos.turn(), Some(Side::Black));
    }

    #[test]
    fn test_opening_double_is_rolled_again() {
        let mut pos = Position::initial();
        apply_action(&mut pos, None, &Action::roll(4, 4)).expect("re-roll");
        assert_eq!(pos, Position::initial());
    }

    #[test]
    fn test_move_scores_nothing_midgame() {
        let mut pos = opening();
        let mv = Move::new(3, 1, &[Movement::new(8, 5, 3), Movement::new(6, 5, 1)]).expect("move");
        let recorded = apply_action(&mut pos, None, &Action::Move(mv)).expect("legal");
        assert!(matches!(recorded, Action::Move(ref m) if m.status().is_legal()));
        assert_eq!(pos.turn(), Some(Side::Black));
        assert_eq!(pos.point(4), 2);
        assert!(!pos.has_dice());
    }

    #[test]
    fn test_illegal_move_leaves_position() {
        let mut pos = opening();
        let before = pos.clone();
        let mv = Move::new(3, 1, &[Movement::new(8, 5, 3)]).expect("move");
        let err = apply_action(&mut pos, None, &Action::Move(mv)).unwrap_err();
        assert_eq!(err, RuleError::UseAll);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_gammon_and_backgammon() {
        let base = Position::empty()
            .with_point(0, 1)
            .with_turn(Some(Side::White))
            .with_dice(2, 1)
            .with_cube(2);
        let mv = Move::new(2, 1, &[Movement::new(1, 0, 2)]).expect("move");

        let mut single = base.clone().with_point(20, -14);
        assert_eq!(apply_move(&mut single, &mv, Side::White), Ok(2));

        let mut gammon = base.clone().with_point(10, -15);
        assert_eq!(apply_move(&mut gammon, &mv, Side::White), Ok(4));
        assert_eq!(gammon.score(), 4);
        assert_eq!(gammon.scores(), [4, 0]);

        let mut backgammon = base.with_point(10, -14).with_point(3, -1);
        assert_eq!(apply_move(&mut backgammon, &mv, Side::White), Ok(6));
        assert!(backgammon.is_resolved());
    }

    #[test]
    fn test_double_take_transfers_cube() {
        let mut pos = Position::initial()
            .with_turn(Some(Side::White))
            .with_may_double([true, true]);
        apply_action(&mut pos, None, &Action::Double).expect("double");
        assert_eq!(pos.cube_turned(), Some(Side::White));
        apply_action(&mut pos, Some(Side::Black), &Action::Take).expect("take");
        assert_eq!(pos.cube(), 2);
        assert_eq!(pos.may_double, [false, true]);
        assert_eq!(pos.turn(), Some(Side::White));

        let err = apply_action(&mut pos, Some(Side::White), &Action::Double).unwrap_err();
        assert_eq!(err, RuleError::DoubleNotCubeOwner);
    }

    #[test]
    fn test_drop_ends_game() {
        let mut pos = Position::initial()
            .with_turn(Some(Side::Black))
            .with_cube(2)
            .with_may_double([false, true]);
        apply_action(&mut pos, Some(Side::Black), &Action::Double).expect("double");
        apply_action(&mut pos, Some(Side::White), &Action::Drop).expect("drop");
        assert_eq!(pos.scores(), [0, 2]);
        assert_eq!(pos.score(), -2);
        assert!(pos.is_resolved());
    }

    #[test]
    fn test_beaver_only_in_money_games() {
        let start = Position::initial()
            .with_turn(Some(Side::White))
            .with_may_double([true, true]);
        let mut money = start.clone();
        apply_action(&mut money, None, &Action::Double).expect("double");
        apply_action(&mut money, Some(Side::Black), &Action::Double).expect("beaver");
        assert_eq!(money.cube(), 4);
        assert_eq!(money.cube_turned(), None);
        assert_eq!(money.may_double, [false, true]);

        let mut matched = start.with_match_length(7);
        apply_action(&mut matched, None, &Action::Double).expect("double");
        let err = apply_action(&mut matched, Some(Side::Black), &Action::Double).unwrap_err();
        assert_eq!(err, RuleError::UnrespondedDouble);
    }

    #[test]
    fn test_resign_hides_dice_and_accept_scores() {
        let mut pos = opening();
        apply_action(&mut pos, Some(Side::White), &Action::resign(2)).expect("resign");
        assert_eq!(pos.resigned(), 2);
        assert!(!pos.has_dice());
        let err = apply_action(&mut pos, Some(Side::White), &Action::Accept).unwrap_err();
        assert_eq!(err, RuleError::AcceptWithoutResignation);
        apply_action(&mut pos, Some(Side::Black), &Action::Accept).expect("accept");
        assert_eq!(pos.scores(), [0, 2]);
    }

    #[test]
    fn test_no_double_in_crawford_game() {
        let mut pos = Position::initial().with_crawford(true);
        let err = apply_action(&mut pos, Some(Side::White), &Action::Double).unwrap_err();
        assert_eq!(err, RuleError::DoubleCrawford);
        apply_action(&mut pos, None, &Action::roll(6, 2)).expect("opening roll");
        assert_eq!(pos.may_double, [false, false]);
    }

    #[test]
    fn test_empty_resignation() {
        let mut pos = opening();
        let err = apply_action(&mut pos, None, &Action::resign(0)).unwrap_err();
        assert_eq!(err, RuleError::EmptyResignation);
    }

    #[test]
    fn test_responses_without_offer() {
        let mut pos = opening();
        assert_eq!(
            apply_action(&mut pos, None, &Action::Take).unwrap_err(),
            RuleError::TakeWithoutDouble
        );
        assert_eq!(
            apply_action(&mut pos, None, &Action::Drop).unwrap_err(),
            RuleError::DropWithoutDouble
        );
        assert_eq!(
            apply_action(&mut pos, None, &Action::Reject).unwrap_err(),
            RuleError::RejectWithoutResignation
        );
    }
}
