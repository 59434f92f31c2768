//! A match: a sequence of games between two players.

use crate::action::Action;
use crate::error::RuleError;
use crate::game::{Game, Snapshot};
use crate::invariants::{InvariantSet, PositionInvariants};
use crate::{Position, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Whether the next game of a match is the Crawford game.
///
/// It is when the rule is enabled, the match is limited, exactly one side
/// is one point away from winning, and no earlier game was the Crawford
/// game.
pub fn crawford_applies(length: u32, enabled: bool, scores: [u32; 2], had_crawford: bool) -> bool {
    if !enabled || length == 0 || had_crawford {
        return false;
    }
    let one_away = scores.iter().filter(|&&score| score + 1 == length).count();
    let won = scores.iter().any(|&score| score >= length);
    one_away == 1 && !won
}

/// Match between two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    players: [String; 2],
    ranks: [String; 2],
    length: u32,
    crawford: bool,
    location: String,
    games: Vec<Game>,
}

impl Match {
    /// Creates a match with its first game at the starting position.
    #[instrument(skip(white, black))]
    pub fn new(white: impl Into<String>, black: impl Into<String>, length: u32, crawford: bool) -> Self {
        let players = [white.into(), black.into()];
        let initial = Position::initial()
            .with_players(players[0].clone(), players[1].clone())
            .with_match_length(length);
        Self {
            players,
            ranks: [String::new(), String::new()],
            length,
            crawford,
            location: String::new(),
            games: vec![Game::new(initial)],
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Name of the player on `side`.
    pub fn player(&self, side: Side) -> &str {
        &self.players[side.index()]
    }

    /// Rank or rating record of the player on `side`.
    pub fn rank(&self, side: Side) -> &str {
        &self.ranks[side.index()]
    }

    /// Match length, `0` for unlimited.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Whether the Crawford rule is enabled.
    pub fn crawford(&self) -> bool {
        self.crawford
    }

    /// Free-form location (server, club, venue).
    pub fn location(&self) -> &str {
        &self.location
    }

    /// All games, oldest first.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// The game actions are routed to.
    pub fn current_game(&self) -> &Game {
        // A match always holds at least one game.
        &self.games[self.games.len() - 1]
    }

    fn current_game_mut(&mut self) -> &mut Game {
        let last = self.games.len() - 1;
        &mut self.games[last]
    }

    /// Latest position of the match; the borrow ends at the next mutation.
    pub fn position(&self) -> &Position {
        self.current_game().position()
    }

    /// Match scores, white first.
    pub fn scores(&self) -> [u32; 2] {
        self.position().scores()
    }

    /// Whether one side has reached the match length.
    pub fn is_over(&self) -> bool {
        self.position().is_match_over()
    }

    /// Winner of a finished match.
    pub fn winner(&self) -> Option<Side> {
        if !self.is_over() {
            return None;
        }
        let [white, black] = self.scores();
        Some(if white > black { Side::White } else { Side::Black })
    }

    // ─────────────────────────────────────────────────────────────
    //  Match data
    // ─────────────────────────────────────────────────────────────

    /// Renames white in the match and in every stored position.
    pub fn set_white(&mut self, name: impl Into<String>) {
        self.set_player(Side::White, name.into());
    }

    /// Renames black in the match and in every stored position.
    pub fn set_black(&mut self, name: impl Into<String>) {
        self.set_player(Side::Black, name.into());
    }

    fn set_player(&mut self, side: Side, name: String) {
        for game in &mut self.games {
            game.rewrite_positions(|pos| pos.players[side.index()] = name.clone());
        }
        self.players[side.index()] = name;
    }

    /// Changes the match length in the match and in every stored position.
    pub fn set_length(&mut self, length: u32) {
        self.length = length;
        for game in &mut self.games {
            game.rewrite_positions(|pos| pos.match_length = length);
        }
    }

    /// Enables or disables the Crawford rule for future games.
    pub fn set_crawford(&mut self, crawford: bool) {
        self.crawford = crawford;
    }

    /// Sets the rank record of `side`.
    pub fn set_rank(&mut self, side: Side, rank: impl Into<String>) {
        self.ranks[side.index()] = rank.into();
    }

    /// Sets the location.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    // ─────────────────────────────────────────────────────────────
    //  Play
    // ─────────────────────────────────────────────────────────────

    /// Opening position [`Match::start_game`] uses without a setup, with
    /// Crawford detection applied.
    pub fn next_game_position(&self) -> Position {
        self.natural_opening(self.next_slot())
    }

    /// Index the next started game takes; an empty current game is reused.
    fn next_slot(&self) -> usize {
        if self.current_game().is_empty() {
            self.games.len() - 1
        } else {
            self.games.len()
        }
    }

    /// Opening position game `index` gets when nothing is set up: the
    /// standard start for the first game, otherwise the previous game's
    /// final scores with Crawford detection.
    pub(crate) fn natural_opening(&self, index: usize) -> Position {
        let Some(previous) = index.checked_sub(1).and_then(|i| self.games.get(i)) else {
            return Position::initial()
                .with_players(self.players[0].clone(), self.players[1].clone())
                .with_match_length(self.length);
        };
        let had_crawford = self.games[..index].iter().any(Game::is_crawford);
        let position = previous.position();
        let crawford = crawford_applies(self.length, self.crawford, position.scores(), had_crawford);
        if crawford {
            debug!(scores = ?position.scores(), "Next game is the Crawford game");
        }
        position.next_game(crawford)
    }

    /// Starts a new game, from `initial` or the regular next opening
    /// position. An empty current game is replaced rather than kept.
    ///
    /// Player names and match length of `initial` are overwritten with the
    /// match's own.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EndOfMatch`] if the match is over, or
    /// [`RuleError::InvalidSetup`] if `initial` breaks a position invariant.
    #[instrument(skip(self, initial))]
    pub fn start_game(&mut self, initial: Option<Position>) -> Result<&Game, RuleError> {
        if self.is_over() {
            return Err(RuleError::EndOfMatch);
        }
        let position = match initial {
            Some(pos) => {
                let pos = pos
                    .with_players(self.players[0].clone(), self.players[1].clone())
                    .with_match_length(self.length);
                PositionInvariants::check_all(&pos).map_err(|violations| {
                    let descriptions: Vec<String> =
                        violations.into_iter().map(|v| v.description).collect();
                    warn!(?descriptions, "Rejected setup position");
                    RuleError::InvalidSetup(descriptions.join("; "))
                })?;
                pos
            }
            None => self.next_game_position(),
        };
        let game = Game::new(position);
        if self.next_slot() < self.games.len() {
            *self.current_game_mut() = game;
        } else {
            self.games.push(game);
        }
        info!(game = self.games.len(), "Game started");
        Ok(self.current_game())
    }

    /// Routes `action` by `side` to the current game, starting the next
    /// game first if the current one is resolved.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EndOfMatch`] once the match is decided, or the
    /// game's error for the action.
    #[instrument(skip(self, action, timestamp), fields(kind = %action.kind()))]
    pub fn add_action(
        &mut self,
        side: Option<Side>,
        action: Action,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<&Snapshot, RuleError> {
        if self.is_over() {
            return Err(RuleError::EndOfMatch);
        }
        if self.current_game().is_resolved() {
            let next = self.next_game_position();
            self.games.push(Game::new(next));
            debug!(game = self.games.len(), "Next game started");
        }
        self.current_game_mut().add_action(side, action, timestamp)
    }
}
