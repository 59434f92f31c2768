//! Tests for single games: phases, offers and the snapshot log.

use strictly_backgammon::{Action, Game, GamePhase, Position, RuleError, Side, notation};

fn opened(die1: u8, die2: u8) -> Game {
    let mut game = Game::new(Position::initial());
    game.add_action(None, Action::roll(die1, die2), None)
        .expect("Opening roll should be accepted");
    game
}

fn play(game: &mut Game, text: &str) {
    let [die1, die2] = game.position().dice();
    let mv = notation::parse_move(text, die1, die2).expect("Notation should parse");
    game.add_action(None, Action::Move(mv), None)
        .expect("Move should be legal");
}

#[test]
fn test_phases_through_a_dropped_double() {
    let mut game = Game::new(Position::initial());
    assert_eq!(game.phase(), GamePhase::Opening);

    game.add_action(None, Action::roll(3, 1), None).expect("roll");
    assert_eq!(game.phase(), GamePhase::AwaitingMove(Side::White));

    play(&mut game, "8/5 6/5");
    assert_eq!(game.phase(), GamePhase::AwaitingRoll(Side::Black));

    game.add_action(Some(Side::Black), Action::Double, None).expect("double");
    assert_eq!(game.phase(), GamePhase::AwaitingCubeResponse(Side::Black));
    assert_eq!(game.phase().actor(), Some(Side::White));

    game.add_action(Some(Side::White), Action::Drop, None).expect("drop");
    assert_eq!(
        game.phase(),
        GamePhase::Resolved {
            winner: Side::Black,
            points: 1
        }
    );
    assert_eq!(game.score(), -1);
    assert_eq!(game.winner(), Some(Side::Black));
    assert_eq!(game.snapshots().len(), 4);
}

#[test]
fn test_resolved_game_rejects_actions() {
    let mut game = opened(3, 1);
    game.add_action(Some(Side::White), Action::resign(1), None).expect("resign");
    game.add_action(Some(Side::Black), Action::Accept, None).expect("accept");

    let err = game.add_action(None, Action::roll(6, 5), None).unwrap_err();
    assert_eq!(err, RuleError::EndOfGame);
}

#[test]
fn test_pending_double_blocks_other_actions() {
    let mut game = opened(3, 1);
    play(&mut game, "8/5 6/5");
    game.add_action(None, Action::Double, None).expect("double");

    let err = game.add_action(Some(Side::Black), Action::roll(4, 2), None).unwrap_err();
    assert_eq!(err, RuleError::UnrespondedDouble);

    // The implicit responder is the doubler's opponent.
    let snapshot = game.add_action(None, Action::Take, None).expect("take");
    assert_eq!(*snapshot.side(), Some(Side::White));
    assert_eq!(game.position().cube(), 2);
    assert!(game.position().may_double(Side::White));
    assert!(!game.position().may_double(Side::Black));
}

#[test]
fn test_rejected_resignation_restores_dice() {
    let mut game = opened(6, 2);
    game.add_action(Some(Side::White), Action::resign(2), None).expect("resign");
    assert!(!game.position().has_dice());
    assert_eq!(game.phase(), GamePhase::AwaitingResignResponse(Side::White));

    let err = game.add_action(Some(Side::White), Action::Accept, None).unwrap_err();
    assert_eq!(err, RuleError::UnrespondedResignation);

    game.add_action(Some(Side::Black), Action::Reject, None).expect("reject");
    assert_eq!(game.position().dice(), [6, 2]);
    assert_eq!(game.phase(), GamePhase::AwaitingMove(Side::White));
}

#[test]
fn test_failed_action_leaves_game_unchanged() {
    let mut game = opened(3, 1);
    let before = game.clone();
    let mv = notation::parse_move("8/5", 3, 1).expect("notation");
    let err = game.add_action(None, Action::Move(mv), None).unwrap_err();
    assert_eq!(err, RuleError::UseAll);
    assert_eq!(game, before);
}

#[test]
fn test_recorded_move_carries_judgement() {
    let mut game = opened(6, 4);
    play(&mut game, "24/18 13/9");
    let Action::Move(mv) = game.snapshots()[1].action() else {
        panic!("Second snapshot should be a move");
    };
    assert!(mv.status().is_legal());
    assert_eq!(mv.number(), 2);
    assert_eq!(game.position().turn(), Some(Side::Black));
}

#[test]
fn test_game_serializes() {
    let mut game = opened(5, 2);
    play(&mut game, "13/8 13/11");
    let json = serde_json::to_string(&game).expect("Serialize failed");
    let restored: Game = serde_json::from_str(&json).expect("Deserialize failed");
    assert_eq!(restored, game);
}

#[test]
fn test_roll_twice_is_rejected() {
    let mut game = opened(3, 1);
    let err = game.add_action(None, Action::roll(2, 2), None).unwrap_err();
    assert_eq!(err, RuleError::AlreadyRolled);
    assert_eq!(game.position().dice(), [3, 1]);
}

#[test]
fn test_move_by_side_off_turn() {
    let mut game = opened(3, 1);
    let mv = notation::parse_move("8/5 6/5", 3, 1).expect("notation");
    let err = game
        .add_action(Some(Side::Black), Action::Move(mv), None)
        .unwrap_err();
    assert_eq!(err, RuleError::NotOnTurn(Side::Black));
}

#[test]
fn test_double_after_rolling() {
    let mut game = opened(3, 1);
    play(&mut game, "8/5 6/5");
    game.add_action(Some(Side::Black), Action::roll(6, 4), None)
        .expect("roll");
    let err = game
        .add_action(Some(Side::Black), Action::Double, None)
        .unwrap_err();
    assert_eq!(err, RuleError::DoubleAfterRoll);
}

#[test]
fn test_move_before_rolling() {
    let mv = notation::parse_move("8/5 6/5", 3, 1).expect("notation");

    let mut fresh = Game::new(Position::initial());
    let err = fresh
        .add_action(None, Action::Move(mv.clone()), None)
        .unwrap_err();
    assert_eq!(err, RuleError::NoRoll);

    let mut game = opened(3, 1);
    play(&mut game, "8/5 6/5");
    let err = game
        .add_action(Some(Side::Black), Action::Move(mv), None)
        .unwrap_err();
    assert_eq!(err, RuleError::NoRoll);
}

#[test]
fn test_resignation_without_any_side() {
    let mut game = Game::new(Position::initial());
    let err = game.add_action(None, Action::resign(1), None).unwrap_err();
    assert_eq!(err, RuleError::UnsupportedAction);
    assert!(game.snapshots().is_empty());
}
