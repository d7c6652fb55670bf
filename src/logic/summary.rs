//! Replaying recorded point events through the scoring engine, and the match summary
//! (points, games, sets and per-player serve statistics) built from them.

use crate::logic::scoring::{new_match_state, score_point};
use crate::models::{
    EventError, MatchMode, MatchState, MatchSummary, PlayerId, PlayerMatchStats, PointEvent,
    ScoreCount, ScoringError, ScoringMatchId, ServeType, Side, TeamPlayers,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::Read;

/// Sort events by ascending timestamp. Events with equal timestamps keep their order.
pub fn sort_events(events: &mut [PointEvent]) {
    events.sort_by_key(|e| e.timestamp);
}

/// Build a fresh match and drive it with the events in timestamp order.
pub fn replay_events(
    mode: MatchMode,
    players: TeamPlayers,
    servers: Vec<PlayerId>,
    events: &[PointEvent],
) -> Result<MatchState, ScoringError> {
    let mut ordered = events.to_vec();
    sort_events(&mut ordered);
    let initial = new_match_state(mode, players, servers)?;
    ordered
        .iter()
        .try_fold(initial, |state, event| score_point(&state, event.point_winner_team))
}

/// Compute the summary of a match from its point events.
///
/// Games are totals across the whole match, counted while replaying; sets come from
/// the final state (always zero in short-format).
pub fn summarize_match(
    match_id: ScoringMatchId,
    mode: MatchMode,
    players: TeamPlayers,
    servers: Vec<PlayerId>,
    events: &[PointEvent],
) -> Result<MatchSummary, ScoringError> {
    let mut ordered = events.to_vec();
    sort_events(&mut ordered);

    let mut player_stats: Vec<PlayerMatchStats> = players
        .team_a
        .iter()
        .map(|&p| PlayerMatchStats::new(p, Side::A))
        .chain(players.team_b.iter().map(|&p| PlayerMatchStats::new(p, Side::B)))
        .collect();

    let mut points = ScoreCount::default();
    let mut games = ScoreCount::default();
    let mut state = new_match_state(mode, players, servers)?;

    for event in &ordered {
        let winner = event.point_winner_team;
        record_serve(&mut player_stats, event);
        for stats in player_stats.iter_mut().filter(|s| s.team == winner) {
            stats.add_point_won();
        }
        bump(&mut points, winner);

        let next = score_point(&state, winner)?;
        if ends_game(&next) {
            bump(&mut games, winner);
        }
        state = next;
    }

    Ok(MatchSummary {
        match_id,
        mode,
        team_a_score: points.a,
        team_b_score: points.b,
        games_a: games.a,
        games_b: games.b,
        sets_a: state.sets_a,
        sets_b: state.sets_b,
        winner: state.winner,
        completed: state.completed,
        player_stats,
    })
}

fn bump(count: &mut ScoreCount, side: Side) {
    match side {
        Side::A => count.a += 1,
        Side::B => count.b += 1,
    }
}

/// A point can only leave the counters at 0-0 by finishing a game; a finished match
/// keeps its final point counts.
fn ends_game(after: &MatchState) -> bool {
    after.completed || (after.current_game.points_a == 0 && after.current_game.points_b == 0)
}

fn record_serve(player_stats: &mut [PlayerMatchStats], event: &PointEvent) {
    // Servers outside both teams are not tracked.
    let Some(stats) = player_stats
        .iter_mut()
        .find(|s| s.player_id == event.server_player_id)
    else {
        return;
    };
    let won = stats.team == event.point_winner_team;
    match event.serve_type {
        ServeType::First => stats.record_first_serve(won),
        ServeType::Second => stats.record_second_serve(won),
        ServeType::DoubleFault => stats.record_double_fault(),
    }
}

/// One CSV row: `timestamp,server_player_id,serve_type,point_winner_team`.
#[derive(Debug, Deserialize)]
struct EventRow {
    timestamp: DateTime<Utc>,
    server_player_id: PlayerId,
    serve_type: String,
    point_winner_team: String,
}

/// Import point events for `match_id` from CSV with a header row, sorted by timestamp.
pub fn read_events_csv<R: Read>(match_id: ScoringMatchId, reader: R) -> Result<Vec<PointEvent>, EventError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut events = Vec::new();

    for row in csv_reader.deserialize::<EventRow>() {
        let row = row.map_err(|e| EventError::Import(e.to_string()))?;
        events.push(PointEvent::new(
            match_id,
            row.timestamp,
            row.server_player_id,
            row.serve_type.parse()?,
            row.point_winner_team.parse::<Side>()?,
        ));
    }

    sort_events(&mut events);
    Ok(events)
}
