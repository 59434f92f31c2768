//! Strictly Gammon - backgammon match tooling
//!
//! Desktop-side helpers around the `strictly_backgammon` rules engine.
//!
//! # Architecture
//!
//! - **Config**: TOML client configuration with defaults for new matches
//! - **Library**: saved action logs scanned from a directory
//! - **Render**: plain-text board for terminals
//!
//! # Example
//!
//! ```no_run
//! use strictly_gammon::{ClientConfig, MatchLibrary};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::from_file("strictly_gammon.toml")?;
//! if let Some(dir) = config.library_dir() {
//!     let library = MatchLibrary::scan(dir)?;
//!     println!("{} saved matches", library.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod library;
mod render;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, DEFAULT_CONFIG_FILE};

// Crate-level exports - Match library
pub use library::{MatchLibrary, SavedMatch};

// Crate-level exports - Rendering
pub use render::render;
