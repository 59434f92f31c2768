//! Plain-text board rendering.
//!
//! The board is drawn from white's side: points 13-24 on top, 12-1 below.
//! White checkers are `X`, black checkers `O`.

use strictly_backgammon::{Position, Presentation, Side};

/// Checker glyph of `side`.
fn side_mark(side: Side) -> char {
    match side {
        Side::White => 'X',
        Side::Black => 'O',
    }
}

fn cell(checkers: i8) -> String {
    let text = match checkers {
        0 => ".".to_string(),
        n if n > 0 => format!("{}{}", n, side_mark(Side::White)),
        n => format!("{}{}", -n, side_mark(Side::Black)),
    };
    format!("{text:>3}")
}

fn row(pos: &Position, points: impl Iterator<Item = usize>) -> String {
    let cells: Vec<String> = points.map(|point| cell(pos.point(point - 1))).collect();
    format!("{}  {}", cells[..6].concat(), cells[6..].concat())
}

fn labels(points: impl Iterator<Item = usize>) -> String {
    let labels: Vec<String> = points.map(|point| format!("{point:>3}")).collect();
    format!("{}  {}", labels[..6].concat(), labels[6..].concat())
}

fn cube_line(pos: &Position) -> String {
    let owner = match (pos.may_double(Side::White), pos.may_double(Side::Black)) {
        (true, true) => "centered".to_string(),
        (true, false) => pos.player(Side::White).to_string(),
        (false, true) => pos.player(Side::Black).to_string(),
        (false, false) => "frozen".to_string(),
    };
    match pos.cube_turned() {
        Some(side) => format!("Cube: {} ({}, offered by {})", pos.cube(), owner, pos.player(side)),
        None => format!("Cube: {} ({})", pos.cube(), owner),
    }
}

/// Renders the board and the match state around it.
pub fn render(view: &Presentation) -> String {
    let pos = view.position();
    let mut lines = vec![
        labels(13..=24),
        row(pos, 13..=24),
        row(pos, (1..=12).rev()),
        labels((1..=12).rev()),
        format!(
            "Bar: {} {}  {} {}   Off: {} {}  {} {}",
            side_mark(Side::White),
            pos.bar(Side::White),
            side_mark(Side::Black),
            pos.bar(Side::Black),
            side_mark(Side::White),
            pos.borne_off(Side::White),
            side_mark(Side::Black),
            pos.borne_off(Side::Black),
        ),
        cube_line(pos),
    ];

    let [white, black] = pos.scores();
    let length = match pos.match_length() {
        0 => "unlimited".to_string(),
        n => format!("{n} points"),
    };
    let crawford = if pos.is_crawford() { ", Crawford" } else { "" };
    lines.push(format!(
        "Score: {} {} - {} {} ({length}{crawford})",
        pos.player(Side::White),
        white,
        pos.player(Side::Black),
        black
    ));

    if pos.has_dice() {
        let [die1, die2] = view.displayed_dice();
        lines.push(format!("Dice: {die1} {die2}"));
    }
    if let Some(turn) = pos.turn() {
        lines.push(format!("Turn: {} ({})", pos.player(turn), side_mark(turn)));
    }
    if !view.status().is_empty() {
        lines.push(view.status().to_string());
    }
    if !view.game_info().is_empty() {
        lines.push(view.game_info().to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
