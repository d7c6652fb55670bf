//! Round-robin standings: win = 1 point, loss = 0, no draws.
//!
//! Ranking is by points only. Ties keep their prior relative order; there is no
//! head-to-head or games-difference tie-break.

use crate::models::{MatchResult, Team, TeamId, TeamStanding};
use std::cmp::Reverse;

/// Zeroed standings in team order, unranked.
pub fn initialize_standings(teams: &[Team]) -> Vec<TeamStanding> {
    teams.iter().map(|t| TeamStanding::new(t.id)).collect()
}

/// Copy of `standings` with the result folded in.
pub fn update_standings_with_result(standings: &[TeamStanding], result: &MatchResult) -> Vec<TeamStanding> {
    let mut updated = standings.to_vec();
    for standing in &mut updated {
        if standing.team_id == result.winner_team_id {
            standing.add_win();
        } else if standing.team_id == result.loser_team_id {
            standing.add_loss();
        }
    }
    updated
}

/// Stable sort by points descending, then assign positional ranks from 1.
pub fn calculate_rankings(standings: &[TeamStanding]) -> Vec<TeamStanding> {
    let mut ranked = standings.to_vec();
    ranked.sort_by_key(|s| Reverse(s.points));
    for (standing, rank) in ranked.iter_mut().zip(1..) {
        standing.rank = rank;
    }
    ranked
}

pub fn get_standing_by_team_id(standings: &[TeamStanding], team_id: TeamId) -> Option<&TeamStanding> {
    standings.iter().find(|s| s.team_id == team_id)
}

/// The first `n` teams after ranking (fewer if there aren't `n`).
pub fn get_top_teams(standings: &[TeamStanding], n: usize) -> Vec<TeamStanding> {
    let mut ranked = calculate_rankings(standings);
    ranked.truncate(n);
    ranked
}

/// Every team has played each of the other T − 1 teams.
pub fn is_standings_complete(standings: &[TeamStanding]) -> bool {
    let Some(expected) = standings.len().checked_sub(1) else {
        return false;
    };
    standings.iter().all(|s| s.played as usize == expected)
}
