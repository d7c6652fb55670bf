//! Data structures for tennis scoring and doubles tournaments.

mod event;
mod game;
mod player;
mod tournament;

pub use event::{
    BatchOutcome, EventError, MatchSummary, PointEvent, ScoringSession, ServeType, MAX_EVENT_BATCH,
};
pub use game::{
    CurrentGame, GameState, MatchDisplay, MatchMode, MatchState, PointDisplay, ScoreCount,
    ScoringError, ScoringMatchId, Side, TeamPlayers, SHORT_FORMAT_SERVERS,
};
pub use player::{PlayerId, PlayerMatchStats, VenueId};
pub use tournament::{
    Match, MatchId, MatchResult, MatchStage, Team, TeamId, TeamStanding, TournamentError,
    TournamentId, TournamentStage, TournamentState, MIN_PLAYERS, MIN_TEAMS,
};
