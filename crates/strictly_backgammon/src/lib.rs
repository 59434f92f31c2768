//! Strictly Backgammon - a pure backgammon rules engine
//!
//! Given two positions and a roll, the engine decides whether the change
//! between them is a legal move and which rule it breaks if it is not. On
//! top of that it tracks games and matches as sequences of actions,
//! reconstructs actions missing between two observed positions, and reads
//! and writes a line-oriented action log.
//!
//! # Architecture
//!
//! - **Position**: complete, serializable state of a game at one moment
//! - **Rules**: normalized board, legality search and judging
//! - **Mutator**: applies rolls, moves, cube and resignation actions
//! - **Contracts**: preconditions and invariants checked around every action
//! - **Game / Match**: action histories with scoring and the Crawford rule
//! - **Reconstructor**: shortest action sequence between two positions
//! - **Log**: the `GSGF` action log
//!
//! # Example
//!
//! ```
//! use strictly_backgammon::{Action, Match, Side, notation};
//!
//! # fn example() -> Result<(), strictly_backgammon::RuleError> {
//! let mut m = Match::new("alice", "bob", 5, true);
//! m.add_action(None, Action::roll(3, 1), None)?;
//! let mv = notation::parse_move("8/5 6/5", 3, 1)?;
//! m.add_action(Some(Side::White), Action::Move(mv), None)?;
//! assert_eq!(m.position().point(4), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod contracts;
mod error;
mod game;
mod match_play;
mod moves;
mod mutator;
mod phases;
mod position;
mod presentation;
mod reconstruct;
mod types;

// Public namespaces
pub mod invariants;
pub mod log;
pub mod notation;
pub mod rules;

// Crate-level exports - Core types
pub use position::Position;
pub use types::{CHECKERS, POINTS, Side};

// Crate-level exports - Moves and actions
pub use action::{Action, ActionKind};
pub use moves::{BAR, MAX_MOVEMENTS, Move, MoveStatus, Movement, OFF};

// Crate-level exports - Errors
pub use error::{LogError, RuleError};

// Crate-level exports - Action application
pub use contracts::{ActionContract, Attempt, Contract, DoubleAnswered, ResignationAnswered};
pub use mutator::{apply_action, apply_move};

// Crate-level exports - Games and matches
pub use game::{Game, Snapshot};
pub use match_play::{Match, crawford_applies};
pub use phases::GamePhase;

// Crate-level exports - Reconstruction and display
pub use presentation::Presentation;
pub use reconstruct::{ActionPath, MAX_DEPTH, Reconstructor};

// Crate-level exports - Legality
pub use rules::check_move;
