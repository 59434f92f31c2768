//! Strictly Gammon - Unified CLI
//!
//! Replays, inspects and normalizes backgammon action logs.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use strictly_backgammon::log::{read_match, write_match};
use strictly_backgammon::{Match, Presentation, Side};
use strictly_gammon::{ClientConfig, MatchLibrary, render};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ClientConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
    debug!(?config, "Configuration resolved");

    match cli.command {
        Command::Replay { path, json } => run_replay(&path, json),
        Command::Show {
            path,
            game,
            swap_dice,
        } => run_show(&path, game, swap_dice),
        Command::Normalize { path, output } => run_normalize(&path, output),
        Command::Library { dir } => run_library(dir, &config),
        Command::New {
            white,
            black,
            length,
            no_crawford,
            output,
        } => run_new(&config, white, black, length, no_crawford, output),
    }
}

/// Reads and replays the log at `path`.
#[instrument]
fn load_match(path: &Path) -> Result<Match> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let m = read_match(&text).with_context(|| format!("Invalid action log {}", path.display()))?;
    info!(games = m.games().len(), "Match loaded");
    Ok(m)
}

/// Writes `text` to `output`, or stdout without one.
fn emit(text: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Log written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Print every recorded action followed by the final board
fn run_replay(path: &Path, json: bool) -> Result<()> {
    let m = load_match(path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(m.position())?);
        return Ok(());
    }

    for (index, game) in m.games().iter().enumerate() {
        println!("Game {}", index + 1);
        for (number, snapshot) in game.snapshots().iter().enumerate() {
            let actor = snapshot
                .side()
                .map(|side| m.player(side).to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("{:>4}. {actor}: {}", number + 1, snapshot.action());
        }
        println!("      {}", game.phase());
    }
    println!();
    print!("{}", render(&Presentation::new(m.position().clone())));
    Ok(())
}

/// Render the latest position of one game
fn run_show(path: &Path, game: Option<usize>, swap_dice: bool) -> Result<()> {
    let m = load_match(path)?;
    let count = m.games().len();
    let number = game.unwrap_or(count);
    let Some(selected) = number.checked_sub(1).and_then(|i| m.games().get(i)) else {
        bail!("Game {number} does not exist, the match has {count}");
    };

    let mut view = Presentation::new(selected.position().clone())
        .with_status(selected.phase().to_string())
        .with_game_info(format!("Game {number} of {count}"));
    if swap_dice {
        view.swap_dice();
    }
    print!("{}", render(&view));
    Ok(())
}

/// Rewrite a log in canonical form
fn run_normalize(path: &Path, output: Option<PathBuf>) -> Result<()> {
    let m = load_match(path)?;
    emit(&write_match(&m), output)
}

/// List saved matches with their scores
fn run_library(dir: Option<PathBuf>, config: &ClientConfig) -> Result<()> {
    let Some(dir) = dir.or_else(|| config.library_dir().clone()) else {
        bail!("No directory given and no library_dir configured");
    };
    let library = MatchLibrary::scan(&dir)?;
    if library.is_empty() {
        println!("No saved matches in {}", dir.display());
    }
    for saved in library.matches() {
        let m = saved.record();
        let [white, black] = m.scores();
        let state = match m.winner() {
            Some(side) => format!("won by {}", m.player(side)),
            None => format!("{} games", m.games().len()),
        };
        println!(
            "{:<24} {} {} - {} {}  ({})",
            saved.name(),
            m.player(Side::White),
            white,
            m.player(Side::Black),
            black,
            state
        );
    }
    Ok(())
}

/// Start a new match from the configured defaults
fn run_new(
    config: &ClientConfig,
    white: Option<String>,
    black: Option<String>,
    length: Option<u32>,
    no_crawford: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let m = Match::new(
        white.unwrap_or_else(|| config.white().clone()),
        black.unwrap_or_else(|| config.black().clone()),
        length.unwrap_or(*config.default_length()),
        *config.crawford() && !no_crawford,
    );
    info!(length = m.length(), crawford = m.crawford(), "New match");
    emit(&write_match(&m), output)
}
