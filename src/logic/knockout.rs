//! Knockout stage: semifinals and final seeded from the round-robin ranking.
//!
//! 2 or 3 teams: a single final, rank 1 vs rank 2.
//! 4+ teams: top 4 advance; SF1 = rank 1 vs rank 4, SF2 = rank 2 vs rank 3,
//! and the final waits for both winners.

use crate::logic::round_robin::get_matches_by_stage;
use crate::logic::standings::{calculate_rankings, is_standings_complete};
use crate::models::{Match, MatchStage, TeamId, TeamStanding, TournamentError, TournamentId, MIN_TEAMS};

/// `match_order` of the final when it is the only knockout match.
const FINAL_ONLY_ORDER: u32 = 1;
/// `match_order` of the final when it follows two semifinals.
const FINAL_AFTER_SEMIS_ORDER: u32 = 3;

pub fn generate_knockout_matches(
    tournament_id: TournamentId,
    standings: &[TeamStanding],
) -> Result<Vec<Match>, TournamentError> {
    if standings.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams);
    }
    if !is_standings_complete(standings) {
        return Err(TournamentError::RoundRobinIncomplete);
    }

    let ranked = calculate_rankings(standings);

    if ranked.len() < 4 {
        return Ok(vec![Match::new(
            tournament_id,
            Some(ranked[0].team_id),
            Some(ranked[1].team_id),
            MatchStage::Final,
            FINAL_ONLY_ORDER,
        )]);
    }

    let semi = |a: usize, b: usize, order: u32| {
        Match::new(
            tournament_id,
            Some(ranked[a].team_id),
            Some(ranked[b].team_id),
            MatchStage::Semifinal,
            order,
        )
    };

    Ok(vec![
        semi(0, 3, 1),
        semi(1, 2, 2),
        Match::new(tournament_id, None, None, MatchStage::Final, FINAL_AFTER_SEMIS_ORDER),
    ])
}

/// True only when exactly two semifinals exist and both are completed.
pub fn are_semifinals_complete(matches: &[Match]) -> bool {
    let semis = get_matches_by_stage(matches, MatchStage::Semifinal);
    semis.len() == 2 && semis.iter().all(|m| m.completed)
}

/// Winners of SF1 and SF2, identified by their fixed `match_order` (1 and 2).
pub fn get_semifinal_winners(matches: &[Match]) -> Result<(TeamId, TeamId), TournamentError> {
    let semis = get_matches_by_stage(matches, MatchStage::Semifinal);
    if semis.len() != 2 || semis.iter().any(|m| !m.completed) {
        return Err(TournamentError::SemifinalsIncomplete);
    }

    let winner_of = |order: u32| {
        semis
            .iter()
            .find(|m| m.match_order == order)
            .and_then(|m| m.winner_team_id)
    };

    match (winner_of(1), winner_of(2)) {
        (Some(sf1), Some(sf2)) => Ok((sf1, sf2)),
        _ => Err(TournamentError::SemifinalWinnersUnresolved),
    }
}

/// Copy of `matches` with the final's team slots filled.
pub fn update_final_matchup(
    matches: &[Match],
    sf1_winner: TeamId,
    sf2_winner: TeamId,
) -> Result<Vec<Match>, TournamentError> {
    let mut updated = matches.to_vec();
    let final_match = updated
        .iter_mut()
        .find(|m| m.stage == MatchStage::Final)
        .ok_or(TournamentError::FinalNotFound)?;
    final_match.team_a_id = Some(sf1_winner);
    final_match.team_b_id = Some(sf2_winner);
    Ok(updated)
}
