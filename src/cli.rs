//! Command-line interface for strictly_gammon.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Gammon - backgammon action log tooling
#[derive(Parser, Debug)]
#[command(name = "strictly_gammon")]
#[command(about = "Replay, inspect and normalize backgammon action logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the client configuration (defaults to ./strictly_gammon.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a log, printing every action and the final board
    Replay {
        /// Action log to replay
        path: PathBuf,

        /// Print the final position as JSON instead of a board
        #[arg(long)]
        json: bool,
    },

    /// Show the latest position of a game in a log
    Show {
        /// Action log to read
        path: PathBuf,

        /// Game number, starting at 1 (defaults to the last game)
        #[arg(short, long)]
        game: Option<usize>,

        /// Show the dice in swapped order
        #[arg(long)]
        swap_dice: bool,
    },

    /// Rewrite a log in canonical form
    Normalize {
        /// Action log to read
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the saved matches in a directory
    Library {
        /// Directory to scan (defaults to `library_dir` from the config)
        dir: Option<PathBuf>,
    },

    /// Start a new match and write its log
    New {
        /// White player (defaults to the configured name)
        #[arg(long)]
        white: Option<String>,

        /// Black player (defaults to the configured name)
        #[arg(long)]
        black: Option<String>,

        /// Match length, 0 for unlimited (defaults to the configured length)
        #[arg(short, long)]
        length: Option<u32>,

        /// Play without the Crawford rule
        #[arg(long)]
        no_crawford: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
