//! Point events as recorded court-side, the scoring session that logs them,
//! and the summary derived from them.

use crate::models::game::{MatchMode, MatchState, ScoringError, ScoringMatchId, Side};
use crate::models::player::{PlayerId, PlayerMatchStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Most events accepted in one batch.
pub const MAX_EVENT_BATCH: usize = 1000;

/// Errors from recording or importing point events. Scoring failures are wrapped as-is.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EventError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("invalid serve type: {0}")]
    InvalidServeType(String),
    #[error("event id is required")]
    MissingEventId,
    #[error("event belongs to match {actual}, not {expected}")]
    WrongMatch {
        expected: ScoringMatchId,
        actual: ScoringMatchId,
    },
    /// Events must arrive in timestamp order so a replay matches the live score.
    #[error("event at {timestamp} is earlier than the last recorded event at {last}")]
    OutOfOrder {
        timestamp: DateTime<Utc>,
        last: DateTime<Utc>,
    },
    #[error("events array is required")]
    EmptyBatch,
    #[error("maximum 1000 events per request (got {count})")]
    BatchTooLarge { count: usize },
    #[error("could not read point events: {0}")]
    Import(String),
}

/// How the point was served.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeType {
    First,
    Second,
    DoubleFault,
}

impl fmt::Display for ServeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeType::First => write!(f, "first"),
            ServeType::Second => write!(f, "second"),
            ServeType::DoubleFault => write!(f, "double_fault"),
        }
    }
}

impl FromStr for ServeType {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first" => Ok(ServeType::First),
            "second" => Ok(ServeType::Second),
            "double_fault" => Ok(ServeType::DoubleFault),
            other => Err(EventError::InvalidServeType(other.to_string())),
        }
    }
}

/// A single point played.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointEvent {
    pub id: Uuid,
    pub match_id: ScoringMatchId,
    pub timestamp: DateTime<Utc>,
    pub server_player_id: PlayerId,
    pub serve_type: ServeType,
    pub point_winner_team: Side,
}

impl PointEvent {
    pub fn new(
        match_id: ScoringMatchId,
        timestamp: DateTime<Utc>,
        server_player_id: PlayerId,
        serve_type: ServeType,
        point_winner_team: Side,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_id,
            timestamp,
            server_player_id,
            serve_type,
            point_winner_team,
        }
    }
}

/// Computed statistics for a match, built by replaying its point events.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: ScoringMatchId,
    pub mode: MatchMode,
    /// Total points won.
    pub team_a_score: u32,
    pub team_b_score: u32,
    /// Games won across the whole match.
    pub games_a: u32,
    pub games_b: u32,
    /// Standard mode only; zero in short-format.
    pub sets_a: u32,
    pub sets_b: u32,
    pub winner: Option<Side>,
    pub completed: bool,
    pub player_stats: Vec<PlayerMatchStats>,
}

/// A live match and the events applied to it, in the order they were applied.
///
/// `events` is never out of timestamp order, so replaying it reproduces `state`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoringSession {
    pub match_id: ScoringMatchId,
    pub state: MatchState,
    pub events: Vec<PointEvent>,
}

impl ScoringSession {
    pub fn has_event(&self, event_id: Uuid) -> bool {
        self.events.iter().any(|e| e.id == event_id)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.events.last().map(|e| e.timestamp)
    }
}

/// Result of applying a batch: the updated session and how many events were new.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchOutcome {
    pub session: ScoringSession,
    pub inserted: usize,
    pub total: usize,
}
