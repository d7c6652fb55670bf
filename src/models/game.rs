//! Scoring state for a single tennis match: sides, modes, game/set counters and display types.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a scoring session (one `MatchState` lifecycle).
pub type ScoringMatchId = Uuid;

/// Number of servers a short-format match must be created with (one per possible game).
pub const SHORT_FORMAT_SERVERS: usize = 3;

/// Errors returned by the scoring engine. The prior state is never touched when one is returned.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ScoringError {
    #[error("invalid match mode: {0}")]
    InvalidMode(String),
    #[error("invalid team: {0}")]
    InvalidSide(String),
    #[error("both teams must have at least one player")]
    EmptyTeam,
    #[error("short-format mode requires exactly {expected} servers (got {actual})")]
    ServerCountMismatch { expected: usize, actual: usize },
    #[error("standard mode must not specify servers (got {count})")]
    UnexpectedServers { count: usize },
    #[error("cannot score point: match is already completed")]
    MatchCompleted,
    /// Short-format play tried to start a game with no server slot left.
    #[error("no server assigned for game {game_number}")]
    GameLimitExceeded { game_number: u32 },
}

/// One side of a tennis match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

impl FromStr for Side {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Side::A),
            "B" | "b" => Ok(Side::B),
            other => Err(ScoringError::InvalidSide(other.to_string())),
        }
    }
}

/// Scoring format of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Points → games → sets → match, best of 3 sets.
    Standard,
    /// Points → games → match, best of 3 games, fixed server per game.
    #[serde(rename = "short")]
    ShortFormat,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Standard => write!(f, "standard"),
            MatchMode::ShortFormat => write!(f, "short"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(MatchMode::Standard),
            "short" | "short_format" => Ok(MatchMode::ShortFormat),
            _ => Err(ScoringError::InvalidMode(s.to_string())),
        }
    }
}

/// State of the game in progress, derived from raw point counts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    InProgress,
    Deuce,
    Advantage(Side),
}

/// Player assignment for both sides.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamPlayers {
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
}

impl TeamPlayers {
    pub fn new(team_a: Vec<PlayerId>, team_b: Vec<PlayerId>) -> Self {
        Self { team_a, team_b }
    }
}

/// Point counters for the game being played.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CurrentGame {
    /// Raw point count; never displayed directly.
    pub points_a: u32,
    pub points_b: u32,
    /// 1-based. Standard: game within the current set. Short-format: 1, 2 or 3.
    pub game_number: u32,
    /// Index into `MatchState::servers` (short-format only).
    pub server_index: usize,
}

impl CurrentGame {
    fn start() -> Self {
        Self {
            points_a: 0,
            points_b: 0,
            game_number: 1,
            server_index: 0,
        }
    }

    pub(crate) fn add_point(&mut self, side: Side) {
        match side {
            Side::A => self.points_a += 1,
            Side::B => self.points_b += 1,
        }
    }

    pub(crate) fn reset_points(&mut self) {
        self.points_a = 0;
        self.points_b = 0;
    }
}

/// Complete scoring state of a match. Transitions never mutate a state in place;
/// they clone it and return the updated copy.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub mode: MatchMode,
    pub players: TeamPlayers,
    /// Short-format only: servers[n] serves game n+1. Empty in standard mode.
    pub servers: Vec<PlayerId>,
    pub current_game: CurrentGame,
    /// Standard: games in the current set. Short-format: games won in the match.
    pub games_a: u32,
    pub games_b: u32,
    /// Standard only.
    pub sets_a: u32,
    pub sets_b: u32,
    pub current_set: u32,
    /// Set exactly when `completed` is true.
    pub winner: Option<Side>,
    pub completed: bool,
}

impl MatchState {
    pub(crate) fn initial(mode: MatchMode, players: TeamPlayers, servers: Vec<PlayerId>) -> Self {
        Self {
            mode,
            players,
            servers,
            current_game: CurrentGame::start(),
            games_a: 0,
            games_b: 0,
            sets_a: 0,
            sets_b: 0,
            current_set: 1,
            winner: None,
            completed: false,
        }
    }

    pub fn games(&self, side: Side) -> u32 {
        match side {
            Side::A => self.games_a,
            Side::B => self.games_b,
        }
    }

    pub fn sets(&self, side: Side) -> u32 {
        match side {
            Side::A => self.sets_a,
            Side::B => self.sets_b,
        }
    }

    pub(crate) fn add_game(&mut self, side: Side) {
        match side {
            Side::A => self.games_a += 1,
            Side::B => self.games_b += 1,
        }
    }

    pub(crate) fn add_set(&mut self, side: Side) {
        match side {
            Side::A => self.sets_a += 1,
            Side::B => self.sets_b += 1,
        }
    }

    pub(crate) fn finish(&mut self, winner: Side) {
        self.winner = Some(winner);
        self.completed = true;
    }
}

/// Point score in tennis notation ("0", "15", "30", "40", "Deuce", "Ad").
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointDisplay {
    pub a: String,
    pub b: String,
}

/// Plain per-side count (games or sets).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreCount {
    pub a: u32,
    pub b: u32,
}

/// UI-ready view of a match. Never exposes raw point counts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchDisplay {
    pub points: PointDisplay,
    pub games: ScoreCount,
    /// None in short-format.
    pub sets: Option<ScoreCount>,
    /// None in short-format.
    pub current_set: Option<u32>,
    pub game_number: u32,
    /// Some(3) in short-format; standard has no fixed total.
    pub total_games: Option<u32>,
    pub server: Option<PlayerId>,
    pub is_tie_break: bool,
}
