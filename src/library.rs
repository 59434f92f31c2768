//! Saved-match library: scans a directory for action logs.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use strictly_backgammon::Match;
use strictly_backgammon::log::{EXTENSION, read_match};
use tracing::{debug, info, instrument, warn};

use crate::ConfigError;

/// A match read from an action log on disk.
#[derive(Debug, Clone, Getters)]
pub struct SavedMatch {
    /// File stem, used as the match name.
    name: String,
    /// Where the log lives.
    path: PathBuf,
    /// The replayed match.
    record: Match,
}

impl SavedMatch {
    /// Reads and replays the log at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is not a
    /// valid action log.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read {}: {}", path.display(), e)))?;
        let record = read_match(&text)
            .map_err(|e| ConfigError::new(format!("Invalid log {}: {}", path.display(), e)))?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self {
            name,
            path: path.to_path_buf(),
            record,
        })
    }
}

/// A scanned collection of saved matches.
#[derive(Debug, Clone, Default)]
pub struct MatchLibrary {
    matches: Vec<SavedMatch>,
}

impl MatchLibrary {
    /// Scans `dir_path` for action logs and replays each one.
    ///
    /// Files with another extension are ignored; unreadable or invalid logs
    /// are skipped with a warning. An empty directory yields an empty
    /// library.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the path does not exist, is not a
    /// directory, or cannot be read.
    #[instrument(skip(dir_path), fields(path = %dir_path.as_ref().display()))]
    pub fn scan(dir_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir_path.as_ref();
        info!(path = %path.display(), "Scanning directory for saved matches");

        if !path.exists() {
            return Err(ConfigError::new(format!(
                "Match library directory not found: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(ConfigError::new(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        let entries = std::fs::read_dir(path).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read directory {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut matches = Vec::new();

        for entry_result in entries {
            let entry = entry_result
                .map_err(|e| ConfigError::new(format!("Failed to read directory entry: {}", e)))?;

            let entry_path = entry.path();

            if !entry_path.is_file() {
                debug!(path = %entry_path.display(), "Skipping non-file entry");
                continue;
            }

            if entry_path.extension().and_then(|s| s.to_str()) != Some(EXTENSION) {
                debug!(path = %entry_path.display(), "Skipping file without log extension");
                continue;
            }

            match SavedMatch::load(&entry_path) {
                Ok(saved) => {
                    debug!(name = %saved.name(), games = saved.record().games().len(), "Loaded match");
                    matches.push(saved);
                }
                Err(e) => {
                    warn!(
                        path = %entry_path.display(),
                        error = %e,
                        "Skipping invalid action log"
                    );
                }
            }
        }

        matches.sort_by(|a, b| a.name().cmp(b.name()));

        info!(count = matches.len(), "Match library loaded");
        Ok(Self { matches })
    }

    /// All loaded matches, sorted by name.
    pub fn matches(&self) -> &[SavedMatch] {
        &self.matches
    }

    /// Looks up a match by exact name.
    #[instrument(skip(self))]
    pub fn get_by_name(&self, name: &str) -> Option<&SavedMatch> {
        self.matches.iter().find(|m| m.name() == name)
    }

    /// Number of loaded matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether no match was loaded.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
