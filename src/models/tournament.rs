//! Tournament, Team, bracket Match, TeamStanding and MatchResult.

use crate::models::game::ScoringMatchId;
use crate::models::player::{PlayerId, VenueId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Unique identifier for a doubles team.
pub type TeamId = Uuid;

/// Unique identifier for a bracket match (not a scoring session).
pub type MatchId = Uuid;

/// Minimum players for a doubles tournament.
pub const MIN_PLAYERS: usize = 4;

/// Minimum teams needed to play anything (a single final).
pub const MIN_TEAMS: usize = 2;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TournamentError {
    #[error("venue ID is required")]
    MissingVenue,
    #[error("minimum 4 players required for tournament (got {count})")]
    NotEnoughPlayers { count: usize },
    #[error("player count must be even for doubles (got {count})")]
    OddPlayerCount { count: usize },
    #[error("minimum 2 teams required for tournament")]
    NotEnoughTeams,
    /// Tournament is not in the stage this action needs.
    #[error("action requires {expected} stage, tournament is in {actual}")]
    InvalidStage {
        expected: TournamentStage,
        actual: TournamentStage,
    },
    #[error("team has invalid ID")]
    InvalidTeamId,
    #[error("duplicate team ID: {0}")]
    DuplicateTeamId(TeamId),
    #[error("team {team_number} has invalid player ID")]
    InvalidPlayerId { team_number: u32 },
    #[error("team {team_number} has same player twice")]
    SamePlayerTwice { team_number: u32 },
    #[error("player {0} appears in multiple teams")]
    PlayerInMultipleTeams(PlayerId),
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),
    #[error("match not found in tournament: {0}")]
    MatchNotFound(MatchId),
    #[error("match already completed: {0}")]
    MatchAlreadyCompleted(MatchId),
    /// Result names teams other than the two in the match (or the match teams are still pending).
    #[error("result does not match the teams of match {0}")]
    ResultTeamsMismatch(MatchId),
    #[error("round-robin not complete")]
    RoundRobinIncomplete,
    #[error("semifinals not complete")]
    SemifinalsIncomplete,
    #[error("could not determine semifinal winners")]
    SemifinalWinnersUnresolved,
    #[error("final match not found")]
    FinalNotFound,
    #[error("scoring match is not completed")]
    ScoringIncomplete,
    #[error("scoring match {scoring_match_id} is not linked to match {match_id}")]
    ScoringMatchNotLinked {
        match_id: MatchId,
        scoring_match_id: ScoringMatchId,
    },
}

/// Current stage of the tournament. Only ever moves forward.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStage {
    /// Players registered, teams not yet formed.
    #[default]
    Setup,
    /// Every team plays every other team once.
    RoundRobin,
    /// Semifinals and/or final.
    Knockout,
    /// Final played, winner declared.
    Completed,
}

impl fmt::Display for TournamentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentStage::Setup => write!(f, "setup"),
            TournamentStage::RoundRobin => write!(f, "round_robin"),
            TournamentStage::Knockout => write!(f, "knockout"),
            TournamentStage::Completed => write!(f, "completed"),
        }
    }
}

/// Which part of the bracket a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    RoundRobin,
    #[serde(rename = "semi")]
    Semifinal,
    Final,
}

/// A doubles pair.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    /// Display only (1, 2, 3, ...).
    pub team_number: u32,
}

impl Team {
    pub fn new(player1_id: PlayerId, player2_id: PlayerId, team_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            player1_id,
            player2_id,
            team_number,
        }
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }
}

/// A bracket match between two teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// None while pending (final before semifinals resolve).
    pub team_a_id: Option<TeamId>,
    pub team_b_id: Option<TeamId>,
    pub stage: MatchStage,
    /// Round-robin: sequential from 1. Semifinals: 1 and 2. Final: 1 (3 teams) or 3.
    pub match_order: u32,
    /// Link to the scoring session this match is played in.
    pub scoring_match_id: Option<ScoringMatchId>,
    pub winner_team_id: Option<TeamId>,
    pub completed: bool,
}

impl Match {
    pub fn new(
        tournament_id: TournamentId,
        team_a_id: Option<TeamId>,
        team_b_id: Option<TeamId>,
        stage: MatchStage,
        match_order: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            team_a_id,
            team_b_id,
            stage,
            match_order,
            scoring_match_id: None,
            winner_team_id: None,
            completed: false,
        }
    }

    /// Both team slots, once known.
    pub fn teams(&self) -> Option<(TeamId, TeamId)> {
        self.team_a_id.zip(self.team_b_id)
    }
}

/// A team's round-robin record.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    /// 1-based after ranking; 0 until then.
    pub rank: u32,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    /// 1 per win, 0 per loss.
    pub points: u32,
}

impl TeamStanding {
    pub fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            ..Default::default()
        }
    }

    pub fn add_win(&mut self) {
        self.played += 1;
        self.won += 1;
        self.points += 1;
    }

    pub fn add_loss(&mut self) {
        self.played += 1;
        self.lost += 1;
    }
}

/// Outcome of a played match; the only thing the tournament engine learns from scoring.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: MatchId,
    pub winner_team_id: TeamId,
    pub loser_team_id: TeamId,
}

/// Full tournament snapshot. Transitions return a new snapshot and leave this one untouched.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentState {
    pub id: TournamentId,
    pub venue_id: VenueId,
    pub player_ids: Vec<PlayerId>,
    /// Empty until set in Setup; fixed afterwards.
    pub teams: Vec<Team>,
    pub stage: TournamentStage,
    pub round_robin_matches: Vec<Match>,
    pub standings: Vec<TeamStanding>,
    pub knockout_matches: Vec<Match>,
    pub winner: Option<TeamId>,
    pub completed: bool,
}

impl TournamentState {
    pub(crate) fn new(venue_id: VenueId, player_ids: Vec<PlayerId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            venue_id,
            player_ids,
            teams: Vec::new(),
            stage: TournamentStage::Setup,
            round_robin_matches: Vec::new(),
            standings: Vec::new(),
            knockout_matches: Vec::new(),
            winner: None,
            completed: false,
        }
    }

    /// Error unless the tournament is in `expected`.
    pub fn require_stage(&self, expected: TournamentStage) -> Result<(), TournamentError> {
        if self.stage != expected {
            return Err(TournamentError::InvalidStage {
                expected,
                actual: self.stage,
            });
        }
        Ok(())
    }

    /// Matches of the stage currently being played (empty in Setup and Completed).
    pub fn active_matches(&self) -> &[Match] {
        match self.stage {
            TournamentStage::RoundRobin => &self.round_robin_matches,
            TournamentStage::Knockout => &self.knockout_matches,
            TournamentStage::Setup | TournamentStage::Completed => &[],
        }
    }

    pub(crate) fn active_matches_mut(&mut self) -> Option<&mut Vec<Match>> {
        match self.stage {
            TournamentStage::RoundRobin => Some(&mut self.round_robin_matches),
            TournamentStage::Knockout => Some(&mut self.knockout_matches),
            TournamentStage::Setup | TournamentStage::Completed => None,
        }
    }
}
