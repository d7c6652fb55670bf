//! Doubles team formation: seeded random pairing, manual pairing, and validation.

use crate::models::{PlayerId, Team, TeamId, TournamentError, MIN_PLAYERS, MIN_TEAMS};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

/// Check the player count a doubles tournament needs: at least 4, and even.
pub(crate) fn check_player_count(count: usize) -> Result<(), TournamentError> {
    if count < MIN_PLAYERS {
        return Err(TournamentError::NotEnoughPlayers { count });
    }
    if count % 2 != 0 {
        return Err(TournamentError::OddPlayerCount { count });
    }
    Ok(())
}

/// Shuffle the players with an RNG seeded from `seed`, then pair them in order:
/// shuffled[0]+shuffled[1], shuffled[2]+shuffled[3], ...
///
/// The same seed and player list always produce the same teams (ids aside).
pub fn generate_random_teams(player_ids: &[PlayerId], seed: u64) -> Result<Vec<Team>, TournamentError> {
    check_player_count(player_ids.len())?;

    let mut shuffled = player_ids.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let teams: Vec<Team> = shuffled
        .chunks_exact(2)
        .zip(1..)
        .map(|(pair, number)| Team::new(pair[0], pair[1], number))
        .collect();

    validate_teams(&teams)?;
    Ok(teams)
}

/// Build teams from explicit pairs, numbered in the order given.
pub fn generate_manual_teams(pairs: &[(PlayerId, PlayerId)]) -> Result<Vec<Team>, TournamentError> {
    if pairs.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams);
    }

    let mut assigned: HashSet<PlayerId> = HashSet::new();
    let mut teams = Vec::with_capacity(pairs.len());

    for (&(p1, p2), team_number) in pairs.iter().zip(1..) {
        check_pair(p1, p2, team_number)?;
        for player in [p1, p2] {
            if !assigned.insert(player) {
                return Err(TournamentError::PlayerInMultipleTeams(player));
            }
        }
        teams.push(Team::new(p1, p2, team_number));
    }

    Ok(teams)
}

fn check_pair(p1: PlayerId, p2: PlayerId, team_number: u32) -> Result<(), TournamentError> {
    if p1.is_nil() || p2.is_nil() {
        return Err(TournamentError::InvalidPlayerId { team_number });
    }
    if p1 == p2 {
        return Err(TournamentError::SamePlayerTwice { team_number });
    }
    Ok(())
}

/// At least 2 teams, non-nil unique team ids, two distinct non-nil players per team,
/// and no player in more than one team.
pub fn validate_teams(teams: &[Team]) -> Result<(), TournamentError> {
    if teams.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams);
    }

    let mut team_ids: HashSet<TeamId> = HashSet::new();
    let mut players: HashSet<PlayerId> = HashSet::new();

    for team in teams {
        if team.id.is_nil() {
            return Err(TournamentError::InvalidTeamId);
        }
        if !team_ids.insert(team.id) {
            return Err(TournamentError::DuplicateTeamId(team.id));
        }
        check_pair(team.player1_id, team.player2_id, team.team_number)?;
        for player in [team.player1_id, team.player2_id] {
            if !players.insert(player) {
                return Err(TournamentError::PlayerInMultipleTeams(player));
            }
        }
    }

    Ok(())
}

pub fn get_team_by_id(teams: &[Team], team_id: TeamId) -> Result<&Team, TournamentError> {
    teams
        .iter()
        .find(|t| t.id == team_id)
        .ok_or(TournamentError::TeamNotFound(team_id))
}
