//! Parses an action log back into a match by replaying every record.

use super::escape::unescape;
use super::FORMAT;
use crate::action::{Action, ActionKind};
use crate::error::LogError;
use crate::match_play::Match;
use crate::notation;
use crate::types::{CHECKERS, POINTS};
use crate::{Position, Side};
use chrono::{DateTime, Utc};
use std::str::FromStr;
use tracing::{debug, instrument};

/// Reads an action log, replaying each action through the match.
///
/// # Errors
///
/// Returns a [`LogError`] naming the offending line for a malformed
/// record or an action the rules reject.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn read_match(text: &str) -> Result<Match, LogError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (number, header) = lines.next().ok_or_else(|| LogError::new("empty log"))?;
    let format = header.split('#').next().unwrap_or_default().trim();
    if !format.starts_with(&format!("{FORMAT}-")) {
        return Err(LogError::at(number, format!("not a {FORMAT} log: '{format}'")));
    }

    let mut m = Match::new("", "", 0, false);
    for (number, line) in lines {
        read_record(&mut m, line).map_err(|message| LogError::at(number, message))?;
    }
    debug!(games = m.games().len(), "Log read");
    Ok(m)
}

fn read_record(m: &mut Match, line: &str) -> Result<(), String> {
    let (name, rest) = line
        .split_once(':')
        .ok_or_else(|| format!("'{line}' is not a record"))?;
    match name {
        "Length" => {
            let length = match rest.trim() {
                "unlimited" => 0,
                n => n.parse().map_err(|_| format!("bad length '{n}'"))?,
            };
            m.set_length(length);
        }
        "Player" | "Rank" => {
            let (side, value) = rest
                .split_once(": ")
                .or_else(|| rest.strip_suffix(':').map(|side| (side, "")))
                .ok_or_else(|| format!("bad {name} record"))?;
            let side = parse_side(side)?.ok_or_else(|| format!("{name} needs a side"))?;
            let value = unescape(value).map_err(|e| e.message)?;
            match (name, side) {
                ("Player", Side::White) => m.set_white(value),
                ("Player", Side::Black) => m.set_black(value),
                _ => m.set_rank(side, value),
            }
        }
        "Location" => {
            let value = unescape(rest.strip_prefix(' ').unwrap_or(rest)).map_err(|e| e.message)?;
            m.set_location(value);
        }
        "Rule" => match rest.trim() {
            "Crawford" => m.set_crawford(true),
            other => return Err(format!("unknown rule '{other}'")),
        },
        "Game" => {
            let setup = if rest.trim().is_empty() {
                None
            } else {
                Some(apply_clauses(m.next_game_position(), rest)?)
            };
            m.start_game(setup).map_err(|e| e.to_string())?;
        }
        kind => {
            let kind = ActionKind::from_str(kind).map_err(|_| format!("unknown record '{kind}'"))?;
            let (side, timestamp, payload) = split_action(rest)?;
            let action = parse_action(m.position(), kind, payload)?;
            m.add_action(side, action, timestamp).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

fn parse_side(code: &str) -> Result<Option<Side>, String> {
    match code {
        "-" => Ok(None),
        code => Side::from_code(code)
            .map(Some)
            .ok_or_else(|| format!("bad side '{code}'")),
    }
}

/// Splits `side:timestamp[: payload]`.
fn split_action(rest: &str) -> Result<(Option<Side>, Option<DateTime<Utc>>, &str), String> {
    let (side, rest) = rest
        .split_once(':')
        .ok_or_else(|| "missing timestamp field".to_string())?;
    let side = parse_side(side)?;
    let (timestamp, payload) = rest.split_once(':').unwrap_or((rest, ""));
    let timestamp = match timestamp.trim() {
        "" => None,
        secs => {
            let secs: i64 = secs.parse().map_err(|_| format!("bad timestamp '{secs}'"))?;
            Some(DateTime::from_timestamp(secs, 0).ok_or_else(|| format!("timestamp {secs} out of range"))?)
        }
    };
    Ok((side, timestamp, payload.trim()))
}

fn parse_action(pos: &Position, kind: ActionKind, payload: &str) -> Result<Action, String> {
    let action = match kind {
        ActionKind::Roll => {
            let dice: Vec<u8> = payload
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<_, _>>()
                .map_err(|_| format!("bad dice '{payload}'"))?;
            match dice[..] {
                [die1, die2] => Action::roll(die1, die2),
                _ => return Err(format!("a roll needs two dice, got '{payload}'")),
            }
        }
        ActionKind::Move => {
            let [die1, die2] = pos.dice();
            let mv = notation::parse_move(payload, die1, die2).map_err(|e| e.to_string())?;
            Action::Move(mv)
        }
        ActionKind::Resign => {
            let value = payload.parse().map_err(|_| format!("bad resignation value '{payload}'"))?;
            Action::resign(value)
        }
        ActionKind::Double => Action::Double,
        ActionKind::Take => Action::Take,
        ActionKind::Drop => Action::Drop,
        ActionKind::Accept => Action::Accept,
        ActionKind::Reject => Action::Reject,
    };
    Ok(action)
}

/// Applies `Name{values}` setup clauses to `base`.
fn apply_clauses(mut pos: Position, text: &str) -> Result<Position, String> {
    let mut rest = text.trim();
    while !rest.is_empty() {
        let open = rest.find('{').ok_or_else(|| format!("clause without values: '{rest}'"))?;
        let close = rest.find('}').ok_or_else(|| format!("unterminated clause: '{rest}'"))?;
        if close < open {
            return Err(format!("malformed clause: '{rest}'"));
        }
        let name = rest[..open].trim();
        let values: Vec<&str> = rest[open + 1..close].split_whitespace().collect();
        pos = apply_clause(pos, name, &values)?;
        rest = rest[close + 1..].trim_start();
    }
    Ok(pos)
}

fn numbers<T: FromStr>(name: &str, values: &[&str], count: usize) -> Result<Vec<T>, String> {
    if values.len() != count {
        return Err(format!("{name} needs {count} values, got {}", values.len()));
    }
    values
        .iter()
        .map(|v| v.parse().map_err(|_| format!("bad value '{v}' in {name}")))
        .collect()
}

fn apply_clause(pos: Position, name: &str, values: &[&str]) -> Result<Position, String> {
    let flag = |value: u8| value != 0;
    Ok(match name {
        "Scores" => {
            let scores: Vec<u32> = numbers(name, values, 2)?;
            pos.with_scores([scores[0], scores[1]])
        }
        "Points" => {
            let cells: Vec<i8> = numbers(name, values, POINTS + 2)?;
            if let Some(n) = cells.iter().find(|n| n.unsigned_abs() > CHECKERS) {
                return Err(format!("{n} checkers on one point in Points"));
            }
            let mut points = [0i8; POINTS];
            points.copy_from_slice(&cells[1..=POINTS]);
            let bar = |n: i8| u8::try_from(n).map_err(|_| format!("negative bar count {n}"));
            pos.with_points(points)
                .with_bar(Side::White, bar(cells[0])?)
                .with_bar(Side::Black, bar(cells[POINTS + 1])?)
        }
        "Dice" => {
            let dice: Vec<u8> = numbers(name, values, 2)?;
            pos.with_dice(dice[0], dice[1])
        }
        "Cube" => {
            let value: u32 = values
                .first()
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| "Cube needs a value".to_string())?;
            let pos = pos.with_cube(value);
            match values.get(1) {
                None => pos,
                Some(code) => {
                    let owner = parse_side(code)?.ok_or_else(|| "cube owner cannot be '-'".to_string())?;
                    let mut may_double = [false, false];
                    may_double[owner.index()] = true;
                    pos.with_may_double(may_double)
                }
            }
        }
        "Turn" => match values {
            [code] => pos.with_turn(parse_side(code)?),
            _ => return Err("Turn needs one side".to_string()),
        },
        "May-Double" => {
            let flags: Vec<u8> = numbers(name, values, 2)?;
            pos.with_may_double([flag(flags[0]), flag(flags[1])])
        }
        "Crawford" => {
            let flags: Vec<u8> = numbers(name, values, 1)?;
            pos.with_crawford(flag(flags[0]))
        }
        other => return Err(format!("unknown setup clause '{other}'")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_foreign_header() {
        let err = read_match("SGF-4 # nope\n").unwrap_err();
        assert!(err.message.contains("line 1"));
    }

    #[test]
    fn test_reports_offending_line() {
        let text = "GSGF-1.0 #\nLength: 3\nGame:\nRoll:-:: 3 1\nMove:W:: 8/4 6/5\n";
        let err = read_match(text).unwrap_err();
        assert!(err.message.starts_with("line 5:"), "{}", err.message);
    }

    #[test]
    fn test_setup_clauses_apply_on_base() {
        let pos = apply_clauses(Position::initial(), "Scores{2 1} Cube{4 B} Turn{W} Dice{5 5}")
            .expect("valid clauses");
        assert_eq!(pos.scores(), [2, 1]);
        assert_eq!(pos.cube(), 4);
        assert!(pos.may_double(Side::Black) && !pos.may_double(Side::White));
        assert_eq!(pos.turn(), Some(Side::White));
        assert_eq!(pos.dice(), [5, 5]);
    }

    #[test]
    fn test_points_clause_caps_each_cell() {
        let mut cells = vec!["0"; POINTS + 2];
        cells[1] = "16";
        let text = format!("Points{{{}}}", cells.join(" "));
        let err = apply_clauses(Position::initial(), &text).unwrap_err();
        assert!(err.contains("16 checkers"), "{err}");
    }

    #[test]
    fn test_setup_with_extra_checkers_is_rejected() {
        let mut cells = vec!["0"; POINTS + 2];
        cells[1] = "15";
        cells[2] = "3";
        cells[24] = "-15";
        let text = format!(
            "GSGF-1.0 #\nLength: 0\nGame: Points{{{}}} Turn{{W}}\nRoll:W:: 3 1\n",
            cells.join(" ")
        );
        let err = read_match(&text).unwrap_err();
        assert!(err.message.starts_with("line 3:"), "{}", err.message);
        assert!(err.message.contains("Invalid setup"), "{}", err.message);
    }

    #[test]
    fn test_trailing_spaces_in_names_survive() {
        let text = "GSGF-1.0 #\nPlayer:W: alice  \nLocation:  cellar \n";
        let m = read_match(text).expect("valid log");
        assert_eq!(m.player(Side::White), "alice  ");
        assert_eq!(m.location(), " cellar ");
    }

    #[test]
    fn test_unknown_clause() {
        assert!(apply_clauses(Position::initial(), "Weather{sunny}").is_err());
        assert!(apply_clauses(Position::initial(), "Points{1 2}").is_err());
    }
}
