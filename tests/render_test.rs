//! Tests for the text board renderer.

use strictly_backgammon::{Position, Presentation, Side};
use strictly_gammon::render;

#[test]
fn test_starting_position_layout() {
    let pos = Position::initial().with_players("alice", "bob").with_match_length(5);
    let text = render(&Presentation::new(pos));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], " 13 14 15 16 17 18   19 20 21 22 23 24");
    assert_eq!(lines[1], " 5X  .  .  . 3O  .   5O  .  .  .  . 2X");
    assert_eq!(lines[2], " 5O  .  .  . 3X  .   5X  .  .  .  . 2O");
    assert_eq!(lines[3], " 12 11 10  9  8  7    6  5  4  3  2  1");
    assert_eq!(lines[4], "Bar: X 0  O 0   Off: X 0  O 0");
    assert_eq!(lines[5], "Cube: 1 (frozen)");
    assert_eq!(lines[6], "Score: alice 0 - bob 0 (5 points)");
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_dice_turn_and_display_fields() {
    let pos = Position::initial()
        .with_players("alice", "bob")
        .with_dice(6, 2)
        .with_turn(Some(Side::Black))
        .with_cube(2)
        .with_may_double([true, false]);
    let mut view = Presentation::new(pos)
        .with_status("Black to move")
        .with_game_info("Game 1 of 1");
    view.swap_dice();

    let text = render(&view);
    assert!(text.contains("Cube: 2 (alice)\n"));
    assert!(text.contains("Score: alice 0 - bob 0 (unlimited)\n"));
    assert!(text.contains("Dice: 2 6\n"));
    assert!(text.contains("Turn: bob (O)\n"));
    assert!(text.ends_with("Black to move\nGame 1 of 1\n"));
}
