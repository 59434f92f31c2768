//! Backslash escaping for free-text record values.

use crate::error::LogError;

/// Escapes control characters, quotes and backslashes, plus spaces at
/// either end of the value.
///
/// Everything else, including non-ASCII text, passes through unchanged.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let last = text.chars().count().saturating_sub(1);
    for (index, c) in text.chars().enumerate() {
        match c {
            ' ' if index == 0 || index == last => out.push_str("\\x20"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && c.is_ascii() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Reverses [`escape`].
///
/// # Errors
///
/// Returns a [`LogError`] on a dangling backslash or an unknown escape.
pub fn unescape(text: &str) -> Result<String, LogError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                let bad = || LogError::new(format!("bad hex escape '\\x{hex}'"));
                if hex.len() != 2 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(bad());
                }
                let code = u8::from_str_radix(&hex, 16).map_err(|_| bad())?;
                out.push(char::from(code));
            }
            Some(other) => return Err(LogError::new(format!("unknown escape '\\{other}'"))),
            None => return Err(LogError::new("dangling backslash")),
        }
    }
    Ok(out)
}
