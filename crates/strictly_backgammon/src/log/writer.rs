//! Serializes a match into the action log.

use super::escape::escape;
use super::{FORMAT, REVISION};
use crate::action::Action;
use crate::game::Snapshot;
use crate::match_play::Match;
use crate::notation;
use crate::{Position, Side};
use std::fmt::Write as _;
use strum::IntoEnumIterator;
use tracing::instrument;

/// Writes `m` as an action log, one record per line.
#[instrument(skip(m), fields(games = m.games().len()))]
pub fn write_match(m: &Match) -> String {
    let mut out = String::new();
    let mut line = |text: String| {
        out.push_str(&text);
        out.push('\n');
    };

    line(format!("{FORMAT}-{REVISION} # strictly_gammon action log"));
    line(match m.length() {
        0 => "Length: unlimited".to_string(),
        n => format!("Length: {n}"),
    });
    for side in Side::iter() {
        line(format!("Player:{}: {}", side.code(), escape(m.player(side))));
    }
    for side in Side::iter() {
        if !m.rank(side).is_empty() {
            line(format!("Rank:{}: {}", side.code(), escape(m.rank(side))));
        }
    }
    if !m.location().is_empty() {
        line(format!("Location: {}", escape(m.location())));
    }
    if m.crawford() {
        line("Rule: Crawford".to_string());
    }

    for (index, game) in m.games().iter().enumerate() {
        let natural = m.natural_opening(index);
        line(game_record(game.initial(), &natural));
        for snapshot in game.snapshots() {
            line(action_record(snapshot));
        }
    }
    out
}

/// `Game:` record, with setup clauses only when the game did not start
/// from its natural opening position.
fn game_record(initial: &Position, natural: &Position) -> String {
    if initial == natural {
        return "Game:".to_string();
    }
    let mut record = String::from("Game:");
    let [white, black] = initial.scores();
    let _ = write!(record, " Scores{{{white} {black}}}");

    let _ = write!(record, " Points{{{}", initial.bar(Side::White));
    for checkers in initial.points() {
        let _ = write!(record, " {checkers}");
    }
    let _ = write!(record, " {}}}", initial.bar(Side::Black));

    if initial.has_dice() {
        let [die1, die2] = initial.dice();
        let _ = write!(record, " Dice{{{die1} {die2}}}");
    }
    let _ = write!(record, " Cube{{{}}}", initial.cube());
    if let Some(turn) = initial.turn() {
        let _ = write!(record, " Turn{{{}}}", turn.code());
    }
    let flag = |b: bool| u8::from(b);
    let _ = write!(
        record,
        " May-Double{{{} {}}}",
        flag(initial.may_double(Side::White)),
        flag(initial.may_double(Side::Black))
    );
    if initial.is_crawford() != natural.is_crawford() {
        let _ = write!(record, " Crawford{{{}}}", flag(initial.is_crawford()));
    }
    record
}

fn action_record(snapshot: &Snapshot) -> String {
    let side = snapshot.side().map(Side::code).unwrap_or("-");
    let timestamp = snapshot
        .timestamp()
        .map(|ts| ts.timestamp().to_string())
        .unwrap_or_default();
    let action = snapshot.action();
    let head = format!("{}:{}:{}", action.kind(), side, timestamp);
    match action {
        Action::Roll { die1, die2 } => format!("{head}: {die1} {die2}"),
        Action::Move(mv) if mv.is_forfeit() => format!("{head}:"),
        Action::Move(mv) => format!("{head}: {}", notation::plain(mv.movements())),
        Action::Resign { value } => format!("{head}: {value}"),
        Action::Double | Action::Take | Action::Drop | Action::Accept | Action::Reject => head,
    }
}
