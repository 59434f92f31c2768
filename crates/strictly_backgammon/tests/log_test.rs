//! Tests for writing and reading the action log.

use chrono::DateTime;
use strictly_backgammon::log::{EXTENSION, read_match, write_match};
use strictly_backgammon::{Action, Match, Position, Side, notation};

fn play(m: &mut Match, text: &str, at: i64) {
    let [die1, die2] = m.position().dice();
    let mv = notation::parse_move(text, die1, die2).expect("Notation should parse");
    let side = m.position().turn();
    m.add_action(side, Action::Move(mv), DateTime::from_timestamp(at, 0))
        .expect("Move should be legal");
}

fn act(m: &mut Match, side: Option<Side>, action: Action, at: i64) {
    m.add_action(side, action, DateTime::from_timestamp(at, 0))
        .expect("Action should be accepted");
}

/// A three-point match: a set-up first game, then the Crawford game.
fn sample_match() -> Match {
    let mut m = Match::new("alice", "bob \"the cube\" smith", 3, true);
    m.set_rank(Side::White, "1712.5/420");
    m.set_location("Club\tnight");

    let setup = Position::initial()
        .with_cube(2)
        .with_turn(Some(Side::White))
        .with_may_double([false, true]);
    m.start_game(Some(setup)).expect("Setup game should start");

    act(&mut m, None, Action::roll(5, 2), 1_700_000_000);
    play(&mut m, "13/8 13/11", 1_700_000_010);
    act(&mut m, Some(Side::Black), Action::resign(1), 1_700_000_020);
    act(&mut m, Some(Side::White), Action::Reject, 1_700_000_030);
    act(&mut m, Some(Side::Black), Action::roll(6, 6), 1_700_000_040);
    play(&mut m, "24/18 24/18 13/7 13/7", 1_700_000_050);
    act(&mut m, Some(Side::White), Action::resign(2), 1_700_000_060);
    act(&mut m, Some(Side::Black), Action::Accept, 1_700_000_070);

    act(&mut m, None, Action::roll(1, 4), 1_700_000_100);
    play(&mut m, "24/23 13/9", 1_700_000_110);
    m
}

#[test]
fn test_round_trip_restores_match() {
    let m = sample_match();
    assert_eq!(m.scores(), [0, 2]);
    assert_eq!(m.games().len(), 2);
    assert!(m.current_game().is_crawford());

    let text = write_match(&m);
    let restored = read_match(&text).expect("Log should read back");
    assert_eq!(restored, m);
    assert_eq!(write_match(&restored), text);
}

#[test]
fn test_log_layout() {
    let text = write_match(&sample_match());
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("GSGF-1.0"));
    assert!(lines.contains(&"Length: 3"));
    assert!(lines.contains(&"Player:B: bob \\\"the cube\\\" smith"));
    assert!(lines.contains(&"Location: Club\\tnight"));
    assert!(lines.contains(&"Roll:-:1700000100: 1 4"));
    assert!(lines.contains(&"Resign:B:1700000020: 1"));
    assert!(lines.contains(&"Move:B:1700000050: 24/18 24/18 13/7 13/7"));

    let games: Vec<&&str> = lines.iter().filter(|l| l.starts_with("Game:")).collect();
    assert_eq!(games.len(), 2);
    assert!(games[0].contains("Cube{2}"));
    assert_eq!(*games[1], "Game:");
    assert_eq!(EXTENSION, "gsgf");
}

#[test]
fn test_forfeit_is_logged_without_movements() {
    let mut m = Match::new("alice", "bob", 0, false);
    let mut closed = Position::empty()
        .with_bar(Side::White, 1)
        .with_point(0, 14)
        .with_turn(Some(Side::White));
    for index in 18..24 {
        closed = closed.with_point(index, -2);
    }
    m.start_game(Some(closed.with_point(17, -3))).expect("Setup game should start");
    act(&mut m, None, Action::roll(5, 3), 1_700_000_000);
    let forfeit = notation::parse_move("", 5, 3).expect("empty move");
    act(&mut m, None, Action::Move(forfeit), 1_700_000_001);

    let text = write_match(&m);
    assert!(text.lines().any(|l| l == "Move:W:1700000001:"));
    let restored = read_match(&text).expect("Log should read back");
    assert_eq!(restored, m);
    assert_eq!(restored.position().turn(), Some(Side::Black));
}

#[test]
fn test_names_keep_surrounding_spaces() {
    let mut m = Match::new("alice ", " bob", 0, false);
    m.set_rank(Side::Black, " 1500 ");
    m.set_location(" back room");
    act(&mut m, None, Action::roll(3, 1), 1_700_000_000);

    let text = write_match(&m);
    assert!(text.lines().any(|l| l == "Player:W: alice\\x20"));
    let restored = read_match(&text).expect("Log should read back");
    assert_eq!(restored.player(Side::White), "alice ");
    assert_eq!(restored.player(Side::Black), " bob");
    assert_eq!(restored.rank(Side::Black), " 1500 ");
    assert_eq!(restored.location(), " back room");
    assert_eq!(restored, m);
}
