//! Move notation: `24/18 13/9` for the log, `8/5(2)` for display.
//!
//! Point labels are looked up in a table built once on first use.

use crate::error::RuleError;
use crate::moves::{BAR, Move, Movement, OFF};
use std::sync::LazyLock;
use tracing::instrument;

/// Labels for every acting-side index: `off`, `1`..`24`, `bar`.
static LABELS: LazyLock<Vec<String>> = LazyLock::new(|| {
    (OFF..=BAR)
        .map(|index| match index {
            OFF => "off".to_string(),
            BAR => "bar".to_string(),
            point => point.to_string(),
        })
        .collect()
});

/// Label of an acting-side index.
pub fn label(index: u8) -> &'static str {
    LABELS
        .get(usize::from(index))
        .map(String::as_str)
        .unwrap_or("?")
}

/// Parses a point label back into an acting-side index.
pub fn parse_label(label: &str) -> Option<u8> {
    LABELS
        .iter()
        .position(|candidate| candidate == label)
        .and_then(|index| u8::try_from(index).ok())
}

/// Space-separated `from/to` pairs in play order.
pub fn plain(movements: &[Movement]) -> String {
    movements
        .iter()
        .map(|m| format!("{}/{}", label(m.from), label(m.to)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display form: repeated identical movements collapse to `from/to(n)`.
pub fn compact(movements: &[Movement]) -> String {
    if movements.is_empty() {
        return "-".to_string();
    }
    let mut groups: Vec<((u8, u8), usize)> = Vec::new();
    for movement in movements {
        let key = (movement.from, movement.to);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => groups.push((key, 1)),
        }
    }
    groups
        .into_iter()
        .map(|((from, to), count)| match count {
            1 => format!("{}/{}", label(from), label(to)),
            n => format!("{}/{}({})", label(from), label(to), n),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses one `from/to` token such as `bar/21` or `3/off`.
///
/// # Errors
///
/// Returns [`RuleError::InvalidMove`] for unknown labels or a token that
/// does not move forward.
pub fn parse_step(token: &str) -> Result<(u8, u8), RuleError> {
    let (from, to) = token
        .split_once('/')
        .ok_or_else(|| RuleError::InvalidMove(format!("'{token}' is not a from/to pair")))?;
    let from = parse_label(from)
        .filter(|&index| index != OFF)
        .ok_or_else(|| RuleError::InvalidMove(format!("bad source in '{token}'")))?;
    let to = parse_label(to)
        .filter(|&index| index != BAR)
        .ok_or_else(|| RuleError::InvalidMove(format!("bad destination in '{token}'")))?;
    if from <= to {
        return Err(RuleError::InvalidMove(format!("'{token}' does not move forward")));
    }
    Ok((from, to))
}

/// Parses a space-separated list of steps played with `die1`/`die2`,
/// assigning each step the die that played it.
///
/// Exact dice are preferred; a bear-off may consume a larger die.
///
/// # Errors
///
/// Returns [`RuleError::InvalidMove`] if a token is malformed or no
/// assignment of the dice covers all steps.
#[instrument]
pub fn parse_move(text: &str, die1: u8, die2: u8) -> Result<Move, RuleError> {
    let steps = text
        .split_whitespace()
        .map(parse_step)
        .collect::<Result<Vec<_>, _>>()?;
    let mut assigned = Vec::with_capacity(steps.len());
    if !assign_dice(&steps, &mut Move::dice_pool(die1, die2), &mut assigned) {
        return Err(RuleError::InvalidMove(format!(
            "'{text}' cannot be played with {die1}{die2}"
        )));
    }
    Move::new(die1, die2, &assigned)
}

fn assign_dice(steps: &[(u8, u8)], pool: &mut Vec<u8>, out: &mut Vec<Movement>) -> bool {
    let Some(&(from, to)) = steps.first() else {
        return true;
    };
    let distance = from - to;
    let mut options: Vec<u8> = pool
        .iter()
        .copied()
        .filter(|&die| die == distance || (to == OFF && die > distance))
        .collect();
    options.sort_unstable();
    options.dedup();
    for die in options {
        if let Some(slot) = pool.iter().position(|&d| d == die) {
            pool.swap_remove(slot);
            out.push(Movement::new(from, to, die));
            if assign_dice(&steps[1..], pool, out) {
                return true;
            }
            out.pop();
            pool.push(die);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(label(0), "off");
        assert_eq!(label(13), "13");
        assert_eq!(label(25), "bar");
        assert_eq!(parse_label("bar"), Some(25));
        assert_eq!(parse_label("0"), None);
    }

    #[test]
    fn test_compact_groups_repeats() {
        let movements = [
            Movement::new(8, 5, 3),
            Movement::new(8, 5, 3),
            Movement::new(6, 3, 3),
            Movement::new(6, 3, 3),
        ];
        assert_eq!(compact(&movements), "8/5(2) 6/3(2)");
        assert_eq!(plain(&movements), "8/5 8/5 6/3 6/3");
        assert_eq!(compact(&[]), "-");
    }

    #[test]
    fn test_parse_move_assigns_waste_die() {
        let mv = parse_move("bar/20 2/off", 6, 5).expect("parsable");
        assert_eq!(mv.movements()[0], Movement::new(25, 20, 5));
        assert_eq!(mv.movements()[1], Movement::new(2, 0, 6));
    }

    #[test]
    fn test_parse_move_prefers_exact_die() {
        // 5/off needs the 5 exactly, so 3/off must take the 6.
        let mv = parse_move("5/off 3/off", 6, 5).expect("parsable");
        assert_eq!(mv.movements()[0].die, 5);
        assert_eq!(mv.movements()[1].die, 6);
        assert!(parse_move("13/9", 6, 5).is_err());
    }

    #[test]
    fn test_parse_step_rejects_garbage() {
        assert!(parse_step("13-9").is_err());
        assert!(parse_step("off/3").is_err());
        assert!(parse_step("9/13").is_err());
    }
}
