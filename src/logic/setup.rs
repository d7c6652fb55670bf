//! Setup stage: create the tournament and lock in its teams (Setup → RoundRobin).

use crate::logic::round_robin::generate_round_robin_matches;
use crate::logic::standings::initialize_standings;
use crate::logic::teams::{check_player_count, validate_teams};
use crate::models::{PlayerId, Team, TournamentError, TournamentStage, TournamentState, VenueId};

/// New tournament in Setup with no teams. Needs a venue and an even number (≥ 4) of players.
pub fn new_tournament(venue_id: VenueId, player_ids: Vec<PlayerId>) -> Result<TournamentState, TournamentError> {
    if venue_id.is_nil() {
        return Err(TournamentError::MissingVenue);
    }
    check_player_count(player_ids.len())?;

    let tournament = TournamentState::new(venue_id, player_ids);
    log::info!(
        "Created tournament {} at venue {} with {} players",
        tournament.id,
        venue_id,
        tournament.player_ids.len()
    );
    Ok(tournament)
}

/// Store the teams, zero the standings, schedule the round-robin and move to RoundRobin.
/// Only valid in Setup; teams cannot change afterwards.
pub fn set_teams(state: &TournamentState, teams: Vec<Team>) -> Result<TournamentState, TournamentError> {
    state.require_stage(TournamentStage::Setup)?;
    validate_teams(&teams)?;

    let mut next = state.clone();
    next.standings = initialize_standings(&teams);
    next.round_robin_matches = generate_round_robin_matches(next.id, &teams);
    next.teams = teams;
    next.stage = TournamentStage::RoundRobin;

    log::info!(
        "Tournament {} entering round-robin: {} teams, {} matches",
        next.id,
        next.teams.len(),
        next.round_robin_matches.len()
    );
    Ok(next)
}
