//! Round-robin stage: every team plays every other team exactly once.

use crate::models::{Match, MatchId, MatchStage, Team, TournamentId};

/// All unordered pairs (i, j) with i < j in team order: T × (T − 1) / 2 matches,
/// numbered 1.. in generation order.
pub fn generate_round_robin_matches(tournament_id: TournamentId, teams: &[Team]) -> Vec<Match> {
    let n = teams.len();
    let mut matches = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    let mut match_order = 1;

    for (i, team_a) in teams.iter().enumerate() {
        for team_b in &teams[i + 1..] {
            matches.push(Match::new(
                tournament_id,
                Some(team_a.id),
                Some(team_b.id),
                MatchStage::RoundRobin,
                match_order,
            ));
            match_order += 1;
        }
    }

    matches
}

pub fn get_match_by_id(matches: &[Match], match_id: MatchId) -> Option<&Match> {
    matches.iter().find(|m| m.id == match_id)
}

pub fn get_matches_by_stage(matches: &[Match], stage: MatchStage) -> Vec<&Match> {
    matches.iter().filter(|m| m.stage == stage).collect()
}

pub fn get_completed_matches(matches: &[Match]) -> Vec<&Match> {
    matches.iter().filter(|m| m.completed).collect()
}

pub fn get_pending_matches(matches: &[Match]) -> Vec<&Match> {
    matches.iter().filter(|m| !m.completed).collect()
}

/// True when there is at least one round-robin match and all of them are completed.
pub fn is_round_robin_complete(matches: &[Match]) -> bool {
    let round_robin = get_matches_by_stage(matches, MatchStage::RoundRobin);
    !round_robin.is_empty() && round_robin.iter().all(|m| m.completed)
}
