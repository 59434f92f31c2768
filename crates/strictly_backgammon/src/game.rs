//! A single game: an initial position and an append-only snapshot log.

use crate::action::{Action, ActionKind};
use crate::contracts::{ActionContract, Attempt, Contract};
use crate::error::RuleError;
use crate::mutator::apply_action;
use crate::phases::GamePhase;
use crate::{Position, Side};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One entry of a game's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Snapshot {
    /// The action as recorded.
    action: Action,
    /// Acting side; `None` only for an implicit opening roll.
    side: Option<Side>,
    /// Position after the action.
    position: Position,
    /// When the action happened, if known.
    timestamp: Option<DateTime<Utc>>,
}

/// A game in progress or finished.
///
/// Every snapshot's position is exactly the mutator applied to the previous
/// position (or the initial one) with the snapshot's action and side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    initial: Position,
    snapshots: Vec<Snapshot>,
    is_crawford: bool,
    score: i32,
}

impl Game {
    /// Starts a game from `initial`; its Crawford flag is taken from there.
    #[instrument(skip(initial), fields(crawford = initial.is_crawford()))]
    pub fn new(initial: Position) -> Self {
        let is_crawford = initial.is_crawford();
        let score = if initial.is_resolved() { initial.score() } else { 0 };
        Self {
            initial,
            snapshots: Vec::new(),
            is_crawford,
            score,
        }
    }

    /// Position the game started from.
    pub fn initial(&self) -> &Position {
        &self.initial
    }

    /// Snapshot log in insertion order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Whether this is the Crawford game.
    pub fn is_crawford(&self) -> bool {
        self.is_crawford
    }

    /// Signed value of the game: `0` while live, positive for a white win.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Latest position.
    pub fn position(&self) -> &Position {
        self.snapshots
            .last()
            .map(Snapshot::position)
            .unwrap_or(&self.initial)
    }

    /// Whether no action has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Whether the game has been decided.
    pub fn is_resolved(&self) -> bool {
        self.score != 0
    }

    /// Winner of a resolved game.
    pub fn winner(&self) -> Option<Side> {
        Side::from_sign(self.score)
    }

    /// Where the game stands.
    pub fn phase(&self) -> GamePhase {
        let pos = self.position();
        if let Some(winner) = self.winner() {
            return GamePhase::Resolved {
                winner,
                points: self.score.unsigned_abs(),
            };
        }
        if let Some(offerer) = Side::from_sign(pos.resigned()) {
            return GamePhase::AwaitingResignResponse(offerer);
        }
        if let Some(doubler) = pos.cube_turned() {
            return GamePhase::AwaitingCubeResponse(doubler);
        }
        match pos.turn() {
            None => GamePhase::Opening,
            Some(side) if pos.has_dice() => GamePhase::AwaitingMove(side),
            Some(side) => GamePhase::AwaitingRoll(side),
        }
    }

    /// Applies `action` by `side` and records the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EndOfGame`] once the game is resolved,
    /// [`RuleError::UnrespondedDouble`] or
    /// [`RuleError::UnrespondedResignation`] while a response is owed, and
    /// any mutator error otherwise. The game is unchanged on error.
    #[instrument(skip(self, action, timestamp), fields(kind = %action.kind()))]
    pub fn add_action(
        &mut self,
        side: Option<Side>,
        action: Action,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<&Snapshot, RuleError> {
        if self.is_resolved() {
            return Err(RuleError::EndOfGame);
        }
        let current = self.position();
        let attempt = Attempt { side, action };
        ActionContract::pre(current, &attempt)?;

        let actor = acting_side(current, &attempt);
        let mut next = current.clone();
        let recorded = apply_action(&mut next, attempt.side, &attempt.action)?;

        if recorded.kind() == ActionKind::Reject {
            next.dice = self.dice_before_resignation();
        }

        #[cfg(debug_assertions)]
        ActionContract::post(current, &next)?;

        if next.is_resolved() {
            self.score = next.score();
            debug!(score = self.score, "Game resolved");
        }
        self.snapshots.push(Snapshot::new(recorded, actor, next, timestamp));
        let index = self.snapshots.len() - 1;
        Ok(&self.snapshots[index])
    }

    /// Dice visible right before the pending resignation was offered.
    fn dice_before_resignation(&self) -> [u8; 2] {
        let Some(index) = self
            .snapshots
            .iter()
            .rposition(|s| s.action.kind() == ActionKind::Resign)
        else {
            return [0, 0];
        };
        let before = match index {
            0 => &self.initial,
            i => &self.snapshots[i - 1].position,
        };
        before.dice()
    }

    /// Rewrites every stored position, initial one included.
    pub(crate) fn rewrite_positions(&mut self, mut edit: impl FnMut(&mut Position)) {
        edit(&mut self.initial);
        for snapshot in &mut self.snapshots {
            edit(&mut snapshot.position);
        }
    }
}

/// The side an action belongs to when the caller left it implicit.
fn acting_side(pos: &Position, attempt: &Attempt) -> Option<Side> {
    if attempt.side.is_some() {
        return attempt.side;
    }
    match attempt.action {
        Action::Roll { .. } if pos.turn().is_none() => None,
        Action::Take | Action::Drop | Action::Double if pos.cube_turned().is_some() => {
            pos.cube_turned().map(Side::opponent)
        }
        Action::Accept | Action::Reject => Side::from_sign(pos.resigned()).map(Side::opponent),
        _ => pos.turn(),
    }
}
