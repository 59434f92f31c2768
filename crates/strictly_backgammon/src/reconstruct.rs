//! Reconstruction of missing actions between two observed positions.
//!
//! The search is an iterative deepening over action types: at every step
//! only the actions the position allows are tried (answers to a pending
//! offer, then cube and resignation actions, then rolls, then the move the
//! dice imply), and every candidate is applied through the mutator. The
//! first sequence found is therefore also a shortest one.

use crate::action::Action;
use crate::match_play::{Match, crawford_applies};
use crate::mutator::apply_action;
use crate::rules::check_move;
use crate::{Position, Side};
use strum::IntoEnumIterator;
use tracing::{debug, instrument, trace};

/// Longest action sequence the search will consider.
pub const MAX_DEPTH: usize = 8;

/// Actions found by the reconstructor, each with its acting side.
pub type ActionPath = Vec<(Action, Option<Side>)>;

/// Finds action sequences leading from a match's position to a target.
#[derive(Debug, Clone)]
pub struct Reconstructor {
    start: Position,
    crawford: bool,
    had_crawford: bool,
}

impl Reconstructor {
    /// Prepares a reconstruction from the current position of `m`.
    pub fn new(m: &Match) -> Self {
        Self {
            start: m.position().clone(),
            crawford: m.crawford(),
            had_crawford: m.games().iter().any(|g| g.is_crawford()),
        }
    }

    /// Prepares a reconstruction from a bare position.
    pub fn from_position(start: Position, crawford: bool) -> Self {
        let had_crawford = start.is_crawford();
        Self {
            start,
            crawford,
            had_crawford,
        }
    }

    /// Searches for the shortest action sequence turning the start
    /// position into one technically equal to `target`.
    ///
    /// Returns an empty list if the two are already equal and `None` if no
    /// sequence of at most [`MAX_DEPTH`] actions exists.
    #[instrument(skip_all)]
    pub fn reconstruct(&self, target: &Position) -> Option<ActionPath> {
        if !self.reachable(target) {
            debug!("Target rejected before search");
            return None;
        }
        let mut path = Vec::new();
        for depth in 0..=MAX_DEPTH {
            trace!(depth, "Deepening");
            if self.search(&self.start, self.had_crawford, target, depth, &mut path) {
                debug!(actions = path.len(), "Reconstruction found");
                return Some(path);
            }
        }
        debug!("No reconstruction within depth limit");
        None
    }

    /// Cheap checks that rule out a target without searching.
    fn reachable(&self, target: &Position) -> bool {
        let start = &self.start;
        if Side::iter().any(|side| start.player(side) != target.player(side)) {
            return false;
        }
        if start.match_length() != target.match_length() {
            return false;
        }
        if Side::iter().any(|side| target.score_of(side) < start.score_of(side)) {
            return false;
        }
        let delta: u32 = Side::iter()
            .map(|side| target.score_of(side) - start.score_of(side))
            .sum();
        delta <= 6 * start.cube().max(target.cube())
    }

    fn search(
        &self,
        state: &Position,
        had_crawford: bool,
        target: &Position,
        budget: usize,
        path: &mut ActionPath,
    ) -> bool {
        if state.equals_technically(target) {
            return true;
        }
        if state.is_resolved() {
            if state.is_match_over() {
                return false;
            }
            let crawford = crawford_applies(state.match_length(), self.crawford, state.scores(), had_crawford);
            let next = state.next_game(crawford);
            return self.search(&next, had_crawford || crawford, target, budget, path);
        }
        if budget == 0 {
            return false;
        }

        for (side, action) in candidates(state, target) {
            let mut next = state.clone();
            let recorded = match apply_action(&mut next, side, &action) {
                Ok(recorded) => recorded,
                Err(error) => {
                    trace!(%action, %error, "Candidate rejected");
                    continue;
                }
            };
            if Side::iter().any(|s| next.score_of(s) > target.score_of(s)) {
                continue;
            }
            path.push((recorded, side));
            if self.search(&next, had_crawford, target, budget - 1, path) {
                return true;
            }
            path.pop();
        }
        false
    }
}

/// Actions worth trying from `state`, in preference order.
fn candidates(state: &Position, target: &Position) -> Vec<(Option<Side>, Action)> {
    if let Some(offerer) = Side::from_sign(state.resigned()) {
        return vec![(Some(offerer.opponent()), Action::Accept)];
    }
    if let Some(doubler) = state.cube_turned() {
        let taker = Some(doubler.opponent());
        return vec![(taker, Action::Take), (taker, Action::Drop)];
    }
    if state.has_dice() {
        return move_candidate(state, target).into_iter().collect();
    }

    let mut out = Vec::new();
    if let Some(side) = state.turn() {
        let cube_changes = target.cube() > state.cube()
            || target.cube_turned().is_some()
            || target.scores() != state.scores();
        if cube_changes && state.may_double(side) && !state.is_crawford() {
            out.push((Some(side), Action::Double));
        }
    }
    out.extend(resign_candidates(state, target));
    out.extend(roll_candidates(state, target));
    out
}

fn move_candidate(state: &Position, target: &Position) -> Option<(Option<Side>, Action)> {
    let side = state.turn()?;
    let judged = check_move(state, &state.clone().with_board_of(target), side);
    judged
        .is_playable()
        .then_some((Some(side), Action::Move(judged)))
}

fn resign_candidates(state: &Position, target: &Position) -> Vec<(Option<Side>, Action)> {
    if target.scores() == state.scores() {
        return match Side::from_sign(target.resigned()) {
            Some(offerer) => vec![(Some(offerer), Action::resign(target.resigned().unsigned_abs()))],
            None => Vec::new(),
        };
    }
    Side::iter()
        .filter_map(|gainer| {
            let gain = target.score_of(gainer).checked_sub(state.score_of(gainer))?;
            (gain > 0).then_some((Some(gainer.opponent()), Action::resign(gain)))
        })
        .collect()
}

fn same_board(a: &Position, b: &Position) -> bool {
    a.points() == b.points() && Side::iter().all(|side| a.bar(side) == b.bar(side))
}

/// The 21 distinct rolls, higher die first.
fn all_rolls() -> impl Iterator<Item = (u8, u8)> {
    (1..=6u8).flat_map(|high| (1..=high).map(move |low| (high, low)))
}

fn roll_candidates(state: &Position, target: &Position) -> Vec<(Option<Side>, Action)> {
    let shown = same_board(state, target) && target.has_dice();
    match state.turn() {
        Some(side) => {
            if shown && target.turn() == Some(side) {
                let [die1, die2] = target.dice();
                return vec![(Some(side), Action::roll(die1, die2))];
            }
            all_rolls()
                .map(|(die1, die2)| (Some(side), Action::roll(die1, die2)))
                .filter(|(side, roll)| roll_reaches(state, *side, roll, target))
                .collect()
        }
        None => {
            if shown {
                if let Some(side) = target.turn() {
                    let [die1, die2] = target.dice();
                    let (high, low) = (die1.max(die2), die1.min(die2));
                    let roll = match side {
                        Side::White => Action::roll(high, low),
                        Side::Black => Action::roll(low, high),
                    };
                    return vec![(None, roll)];
                }
            }
            all_rolls()
                .filter(|(high, low)| high != low)
                .flat_map(|(high, low)| [Action::roll(high, low), Action::roll(low, high)])
                .map(|roll| (None, roll))
                .filter(|(side, roll)| roll_reaches(state, *side, roll, target))
                .collect()
        }
    }
}

/// Whether rolling `roll` lets the mover reach the target board in one move.
fn roll_reaches(state: &Position, side: Option<Side>, roll: &Action, target: &Position) -> bool {
    let mut rolled = state.clone();
    if apply_action(&mut rolled, side, roll).is_err() {
        return false;
    }
    let Some(mover) = rolled.turn() else {
        return false;
    };
    let judged = check_move(&rolled, &rolled.clone().with_board_of(target), mover);
    judged.is_playable() && (judged.number() > 0 || same_board(state, target))
}
