//! Line-oriented action log.
//!
//! One record per line: a header, match data (`Length`, `Player`, `Rank`,
//! `Location`, `Rule`), then for every game a `Game` record with optional
//! setup clauses followed by its actions. Writing a match and reading it
//! back yields the same match.

mod escape;
mod reader;
mod writer;

pub use escape::{escape, unescape};
pub use reader::read_match;
pub use writer::write_match;

/// Format name in the header line.
pub const FORMAT: &str = "GSGF";

/// Format revision in the header line.
pub const REVISION: &str = "1.0";

/// File extension of saved logs.
pub const EXTENSION: &str = "gsgf";
