//! Tournament progression: recording results, moving into the knockout stage,
//! filling the final, and read-only queries over the bracket.

use crate::logic::knockout::{generate_knockout_matches, get_semifinal_winners, update_final_matchup};
use crate::logic::round_robin::is_round_robin_complete;
use crate::logic::scoring::get_winner;
use crate::logic::standings::{calculate_rankings, update_standings_with_result};
use crate::models::{
    Match, MatchId, MatchResult, MatchStage, MatchState, ScoringMatchId, Side, TournamentError,
    TournamentStage, TournamentState,
};

/// Mark a match of the active stage as won.
///
/// Round-robin results also update the standings. Winning the final completes the
/// tournament. Semifinal results only mark the match; call [`prepare_final`] afterwards.
pub fn record_match_result(
    state: &TournamentState,
    result: MatchResult,
) -> Result<TournamentState, TournamentError> {
    let mut next = state.clone();
    let stage = next.stage;

    let matches = next
        .active_matches_mut()
        .ok_or(TournamentError::MatchNotFound(result.match_id))?;
    let m = matches
        .iter_mut()
        .find(|m| m.id == result.match_id)
        .ok_or(TournamentError::MatchNotFound(result.match_id))?;
    if m.completed {
        return Err(TournamentError::MatchAlreadyCompleted(m.id));
    }
    check_result_teams(m, &result)?;

    m.winner_team_id = Some(result.winner_team_id);
    m.completed = true;
    let is_final = m.stage == MatchStage::Final;

    match stage {
        TournamentStage::RoundRobin => {
            next.standings = update_standings_with_result(&next.standings, &result);
            if is_round_robin_complete(&next.round_robin_matches) {
                log::info!("Tournament {}: round-robin complete", next.id);
            }
        }
        TournamentStage::Knockout if is_final => {
            next.winner = Some(result.winner_team_id);
            next.completed = true;
            next.stage = TournamentStage::Completed;
            log::info!(
                "Tournament {} completed, winner team {}",
                next.id,
                result.winner_team_id
            );
        }
        _ => {}
    }

    Ok(next)
}

fn check_result_teams(m: &Match, result: &MatchResult) -> Result<(), TournamentError> {
    let (w, l) = (result.winner_team_id, result.loser_team_id);
    match m.teams() {
        Some((a, b)) if (a == w && b == l) || (a == l && b == w) => Ok(()),
        _ => Err(TournamentError::ResultTeamsMismatch(m.id)),
    }
}

/// RoundRobin → Knockout once every round-robin match is played.
/// Rankings are final at this point and seed the bracket.
pub fn advance_to_knockout(state: &TournamentState) -> Result<TournamentState, TournamentError> {
    state.require_stage(TournamentStage::RoundRobin)?;
    if !is_round_robin_complete(&state.round_robin_matches) {
        return Err(TournamentError::RoundRobinIncomplete);
    }

    let ranked = calculate_rankings(&state.standings);
    let knockout = generate_knockout_matches(state.id, &ranked)?;

    let mut next = state.clone();
    next.standings = ranked;
    next.knockout_matches = knockout;
    next.stage = TournamentStage::Knockout;

    log::info!(
        "Tournament {} entering knockout with {} matches",
        next.id,
        next.knockout_matches.len()
    );
    Ok(next)
}

/// Put the SF1 and SF2 winners into the final's team slots.
pub fn prepare_final(state: &TournamentState) -> Result<TournamentState, TournamentError> {
    state.require_stage(TournamentStage::Knockout)?;

    let (sf1_winner, sf2_winner) = get_semifinal_winners(&state.knockout_matches)?;

    let mut next = state.clone();
    next.knockout_matches = update_final_matchup(&next.knockout_matches, sf1_winner, sf2_winner)?;

    log::info!(
        "Tournament {}: final set, team {} vs team {}",
        next.id,
        sf1_winner,
        sf2_winner
    );
    Ok(next)
}

/// Link a match of the active stage to the scoring session it will be played in.
pub fn assign_scoring_match(
    state: &TournamentState,
    match_id: MatchId,
    scoring_match_id: ScoringMatchId,
) -> Result<TournamentState, TournamentError> {
    let mut next = state.clone();
    let m = next
        .active_matches_mut()
        .and_then(|matches| matches.iter_mut().find(|m| m.id == match_id))
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.completed {
        return Err(TournamentError::MatchAlreadyCompleted(match_id));
    }
    if m.teams().is_none() {
        return Err(TournamentError::ResultTeamsMismatch(match_id));
    }
    m.scoring_match_id = Some(scoring_match_id);
    Ok(next)
}

/// Build the result for a bracket match from its finished scoring session.
/// The session must be the one linked with [`assign_scoring_match`].
/// Side A of the scoring match is the bracket match's team A.
pub fn match_result_from_scoring(
    m: &Match,
    scoring_match_id: ScoringMatchId,
    scoring: &MatchState,
) -> Result<MatchResult, TournamentError> {
    if m.scoring_match_id != Some(scoring_match_id) {
        return Err(TournamentError::ScoringMatchNotLinked {
            match_id: m.id,
            scoring_match_id,
        });
    }
    let winner = get_winner(scoring).ok_or(TournamentError::ScoringIncomplete)?;
    let (team_a, team_b) = m.teams().ok_or(TournamentError::ResultTeamsMismatch(m.id))?;
    let (winner_team_id, loser_team_id) = match winner {
        Side::A => (team_a, team_b),
        Side::B => (team_b, team_a),
    };
    Ok(MatchResult {
        match_id: m.id,
        winner_team_id,
        loser_team_id,
    })
}

/// First incomplete match of the active stage.
pub fn get_next_match(state: &TournamentState) -> Option<&Match> {
    state.active_matches().iter().find(|m| !m.completed)
}

/// Round-robin matches followed by knockout matches.
pub fn get_all_matches(state: &TournamentState) -> Vec<Match> {
    state
        .round_robin_matches
        .iter()
        .chain(state.knockout_matches.iter())
        .cloned()
        .collect()
}
