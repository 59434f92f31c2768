//! Legality checker: judges a board change against the dice shown.
//!
//! The checker never fails. It reconstructs every way the dice could have
//! produced the observed change, tags each candidate with the first rule it
//! broke, applies the global dice constraints, and reports the most specific
//! diagnostic. The board change alone decides which points were sources;
//! candidates may only start from those points or continue a checker that
//! already moved this turn.

use super::board::{Board, HOME};
use crate::moves::{BAR, MAX_MOVEMENTS, Move, MoveStatus, Movement, OFF};
use crate::{Position, Side};
use tracing::{debug, instrument, trace};

/// A way the dice could explain the observed change.
#[derive(Debug, Clone)]
struct Candidate {
    steps: Vec<Movement>,
    fault: Option<MoveStatus>,
}

/// Scratch state of the candidate search.
#[derive(Debug, Clone)]
struct Search {
    board: Board,
    /// Departures still allowed per normalized point.
    budget: [u8; 26],
    /// Checkers hovering over a blocked point, waiting to continue.
    hovering: [u8; 26],
}

/// Checks whether going from `before` to `after` is a legal play of the
/// dice shown in `before` by `side`.
///
/// The returned [`Move`] always carries the movements of the best
/// interpretation found (possibly none) and a precise [`MoveStatus`].
#[instrument(skip(before, after), fields(dice = ?before.dice()))]
pub fn check_move(before: &Position, after: &Position, side: Side) -> Move {
    let [die1, die2] = before.dice();
    if !(1..=6).contains(&die1) || !(1..=6).contains(&die2) {
        return Move::from_parts(die1, die2, Vec::new(), MoveStatus::Illegal);
    }

    let from_board = Board::from_position(before, side);
    let to_board = Board::from_position(after, side);

    let mut budget = [0u8; 26];
    let mut sources = 0;
    for point in (1..=BAR).rev() {
        let was = from_board.at(point);
        let now = to_board.at(point);
        if was > 0 && now < was {
            sources += 1;
            budget[usize::from(point)] = (was - now.max(0)) as u8;
        }
    }
    if sources > MAX_MOVEMENTS {
        debug!(sources, "Too many source points");
        return Move::from_parts(die1, die2, Vec::new(), MoveStatus::TooManyMoves);
    }

    let mut candidates = Vec::new();
    let search = Search {
        board: from_board.clone(),
        budget,
        hovering: [0; 26],
    };
    explore(
        &search,
        &to_board,
        &Move::dice_pool(die1, die2),
        &mut Vec::new(),
        None,
        &mut candidates,
    );
    trace!(count = candidates.len(), "Candidates matching the board change");

    let best = candidates
        .into_iter()
        .map(|candidate| {
            let status = match candidate.fault {
                Some(fault) => fault,
                None => judge(&from_board, &to_board, die1, die2, &candidate.steps),
            };
            (status, candidate.steps)
        })
        .min_by_key(|(status, steps)| {
            let dice_used: u32 = steps.iter().map(|s| u32::from(s.die)).sum();
            (rank(*status), std::cmp::Reverse(steps.len()), std::cmp::Reverse(dice_used))
        });

    match best {
        Some((status, steps)) => {
            debug!(%status, movements = steps.len(), "Move judged");
            Move::from_parts(die1, die2, steps, status)
        }
        None => {
            debug!("No interpretation matches the board change");
            Move::from_parts(die1, die2, Vec::new(), MoveStatus::Illegal)
        }
    }
}

/// Preference order among diagnostics, lower is better.
fn rank(status: MoveStatus) -> u8 {
    match status {
        MoveStatus::Legal => 0,
        MoveStatus::UseAll | MoveStatus::UseHigher | MoveStatus::TrySwap => 1,
        MoveStatus::Dancing => 2,
        MoveStatus::PrematureBearOff | MoveStatus::IllegalWaste => 3,
        MoveStatus::Blocked => 4,
        MoveStatus::Illegal | MoveStatus::TooManyMoves => 5,
    }
}

/// Depth-first enumeration of step sequences restricted to the source
/// budget. Every step moves a checker forward, so the pip count falls
/// strictly and a sequence can match `target` at most once.
fn explore(
    state: &Search,
    target: &Board,
    dice: &[u8],
    steps: &mut Vec<Movement>,
    fault: Option<MoveStatus>,
    out: &mut Vec<Candidate>,
) {
    let settled = state.hovering.iter().all(|&n| n == 0);
    if settled && state.board == *target {
        out.push(Candidate {
            steps: steps.clone(),
            fault,
        });
        return;
    }
    if state.pips() < target.pips() {
        return;
    }

    let mut tried = Vec::with_capacity(2);
    for (slot, &die) in dice.iter().enumerate() {
        if tried.contains(&die) {
            continue;
        }
        tried.push(die);
        let mut rest = dice.to_vec();
        rest.remove(slot);

        for from in (1..=BAR).rev() {
            let index = usize::from(from);
            if state.budget[index] == 0 && state.hovering[index] == 0 {
                continue;
            }
            let mut next = state.clone();
            let (to, step_fault) = next.step(from, die);
            steps.push(Movement::new(from, to, die));
            explore(&next, target, &rest, steps, fault.or(step_fault), out);
            steps.pop();
        }
    }
}

impl Search {
    /// Moves one checker from `from` by `die`, tagging the first rule broken.
    fn step(&mut self, from: u8, die: u8) -> (u8, Option<MoveStatus>) {
        let index = usize::from(from);
        let mut fault = None;
        if from != BAR && self.board.on_bar() > 0 {
            fault = Some(MoveStatus::Dancing);
        }

        let to = from.saturating_sub(die);
        if to == OFF {
            let backmost = self.backmost_with_hovering();
            if backmost > HOME {
                fault = fault.or(Some(MoveStatus::PrematureBearOff));
            } else if die > from && from != backmost {
                fault = fault.or(Some(MoveStatus::IllegalWaste));
            }
        }

        if self.hovering[index] > 0 {
            self.hovering[index] -= 1;
        } else {
            self.budget[index] -= 1;
            self.board.lift(from);
        }

        if to != OFF && !self.board.is_open(to) {
            fault = fault.or(Some(MoveStatus::Blocked));
            self.hovering[usize::from(to)] += 1;
        } else {
            self.board.land(to);
            if to != OFF {
                self.budget[usize::from(to)] += 1;
            }
        }
        (to, fault)
    }

    /// Pips left, counting hovering checkers where they hover.
    fn pips(&self) -> i32 {
        let hovering: i32 = (1..=BAR)
            .map(|i| i32::from(self.hovering[usize::from(i)]) * i32::from(i))
            .sum();
        self.board.pips() + hovering
    }

    fn backmost_with_hovering(&self) -> u8 {
        let hovering = (1..=BAR).rev().find(|&i| self.hovering[usize::from(i)] > 0);
        let on_board = self.board.find_backmost();
        match hovering {
            Some(point) if point > on_board || on_board > BAR => point,
            _ => on_board,
        }
    }
}

/// Applies the global dice constraints to a physically valid candidate.
fn judge(before: &Board, after: &Board, die1: u8, die2: u8, steps: &[Movement]) -> MoveStatus {
    if after.on_bar() > 0 && steps.iter().any(|s| !s.is_entry()) {
        return MoveStatus::Dancing;
    }

    let mut unused = Move::dice_pool(die1, die2);
    for step in steps {
        if let Some(slot) = unused.iter().position(|&d| d == step.die) {
            unused.swap_remove(slot);
        }
    }
    if unused.is_empty() {
        return MoveStatus::Legal;
    }
    if unused.iter().any(|&die| after.can_move(die)) {
        return MoveStatus::UseAll;
    }
    if steps.is_empty() && before.on_bar() > 0 {
        // A dance: reported, but the forfeit itself is accepted.
        return MoveStatus::Dancing;
    }
    if die1 == die2 || steps.len() != 1 {
        return MoveStatus::Legal;
    }

    if before.can_move_pair(die1, die2) {
        return MoveStatus::TrySwap;
    }

    let played = steps[0];
    let higher = die1.max(die2);
    if played.die < higher && before.can_move(higher) {
        let backmost = before.find_backmost();
        let same_checker = played.is_bear_off() && played.from == backmost && played.from <= higher;
        if !same_checker {
            return MoveStatus::UseHigher;
        }
    }
    MoveStatus::Legal
}
