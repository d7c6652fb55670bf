//! Integration tests for event replay, match summaries and CSV import.

use chrono::{DateTime, Duration, TimeZone, Utc};
use tennis_tournament_web::{
    read_events_csv, replay_events, sort_events, summarize_match, EventError, MatchMode, PlayerId,
    PlayerMatchStats, PointEvent, ScoringError, ServeType, Side, TeamPlayers,
};
use uuid::Uuid;

fn start() -> DateTime<Utc> {
    Utc.timestamp_opt(1_714_557_600, 0).unwrap()
}

/// One first-serve event per winner, a second apart.
fn events(match_id: Uuid, server: impl Fn(usize) -> PlayerId, winners: &[Side]) -> Vec<PointEvent> {
    winners
        .iter()
        .enumerate()
        .map(|(i, &side)| {
            PointEvent::new(
                match_id,
                start() + Duration::seconds(i as i64),
                server(i),
                ServeType::First,
                side,
            )
        })
        .collect()
}

fn stats_for(stats: &[PlayerMatchStats], player: PlayerId) -> &PlayerMatchStats {
    stats.iter().find(|s| s.player_id == player).unwrap()
}

#[test]
fn short_format_summary_with_serve_stats() {
    let players = TeamPlayers::new(
        vec![Uuid::new_v4(), Uuid::new_v4()],
        vec![Uuid::new_v4(), Uuid::new_v4()],
    );
    let (a1, a2) = (players.team_a[0], players.team_a[1]);
    let (b1, b2) = (players.team_b[0], players.team_b[1]);
    let servers = vec![a1, b1, a2];
    let match_id = Uuid::new_v4();

    let winners: Vec<Side> = [[Side::A; 4], [Side::B; 4], [Side::B; 4]].concat();
    let mut evs = events(match_id, |i| servers[i / 4], &winners);
    // a2 double faults the last point of game 3.
    evs[11].serve_type = ServeType::DoubleFault;

    let summary = summarize_match(match_id, MatchMode::ShortFormat, players, servers.clone(), &evs).unwrap();
    assert_eq!(summary.match_id, match_id);
    assert_eq!((summary.team_a_score, summary.team_b_score), (4, 8));
    assert_eq!((summary.games_a, summary.games_b), (1, 2));
    assert_eq!((summary.sets_a, summary.sets_b), (0, 0));
    assert_eq!(summary.winner, Some(Side::B));
    assert!(summary.completed);

    let s = stats_for(&summary.player_stats, a1);
    assert_eq!((s.first_serves_total, s.first_serves_in, s.first_serve_won), (4, 4, 4));

    let s = stats_for(&summary.player_stats, a2);
    assert_eq!(s.team, Side::A);
    assert_eq!(s.first_serves_total, 4);
    assert_eq!(s.first_serves_in, 3);
    assert_eq!(s.first_serve_won, 0);
    assert_eq!(s.second_serves_total, 1);
    assert_eq!(s.second_serves_in, 0);
    assert_eq!(s.double_faults, 1);

    let s = stats_for(&summary.player_stats, b1);
    assert_eq!((s.first_serves_total, s.first_serve_won), (4, 4));

    for (player, won) in [(a1, 4), (a2, 4), (b1, 8), (b2, 8)] {
        assert_eq!(stats_for(&summary.player_stats, player).total_points_won, won);
    }
    assert_eq!(stats_for(&summary.player_stats, b2).first_serves_total, 0);
}

#[test]
fn standard_summary_counts_games_across_sets() {
    let players = TeamPlayers::new(vec![Uuid::new_v4()], vec![Uuid::new_v4()]);
    let server = players.team_a[0];
    let match_id = Uuid::new_v4();

    let mut winners = vec![Side::B; 4];
    winners.extend([Side::A; 24]);
    // Six more A games start set two.
    winners.extend([Side::A; 8]);
    let evs = events(match_id, |_| server, &winners);

    let summary = summarize_match(match_id, MatchMode::Standard, players, Vec::new(), &evs).unwrap();
    assert_eq!((summary.games_a, summary.games_b), (8, 1));
    assert_eq!((summary.sets_a, summary.sets_b), (1, 0));
    assert_eq!((summary.team_a_score, summary.team_b_score), (32, 4));
    assert_eq!(summary.winner, None);
    assert!(!summary.completed);
}

#[test]
fn events_are_applied_in_timestamp_order() {
    let players = TeamPlayers::new(vec![Uuid::new_v4()], vec![Uuid::new_v4()]);
    let servers = vec![players.team_a[0], players.team_b[0], players.team_a[0]];
    let match_id = Uuid::new_v4();

    let mut evs = events(match_id, |_| servers[0], &[Side::A; 4]);
    evs.extend(events(match_id, |_| servers[1], &[Side::B; 4]));
    // Shift B's game before A's.
    for e in &mut evs[4..] {
        e.timestamp = e.timestamp - Duration::seconds(60);
    }

    let state = replay_events(MatchMode::ShortFormat, players, servers, &evs).unwrap();
    assert_eq!((state.games_a, state.games_b), (1, 1));
    assert_eq!(state.current_game.game_number, 3);

    let mut sorted = evs.clone();
    sort_events(&mut sorted);
    assert!(sorted[..4].iter().all(|e| e.point_winner_team == Side::B));
}

#[test]
fn sort_keeps_ties_in_insertion_order() {
    let server = Uuid::new_v4();
    let match_id = Uuid::new_v4();
    let mut evs: Vec<PointEvent> = [Side::A, Side::B, Side::A]
        .into_iter()
        .map(|side| PointEvent::new(match_id, start(), server, ServeType::First, side))
        .collect();
    let ids: Vec<Uuid> = evs.iter().map(|e| e.id).collect();
    sort_events(&mut evs);
    assert_eq!(evs.iter().map(|e| e.id).collect::<Vec<_>>(), ids);
}

#[test]
fn events_after_the_match_ended_are_rejected() {
    let players = TeamPlayers::new(vec![Uuid::new_v4()], vec![Uuid::new_v4()]);
    let servers = vec![players.team_a[0], players.team_b[0], players.team_a[0]];
    let match_id = Uuid::new_v4();
    let evs = events(match_id, |_| servers[0], &[Side::A; 9]);

    assert_eq!(
        replay_events(MatchMode::ShortFormat, players.clone(), servers.clone(), &evs),
        Err(ScoringError::MatchCompleted)
    );
    assert_eq!(
        summarize_match(match_id, MatchMode::ShortFormat, players, servers, &evs),
        Err(ScoringError::MatchCompleted)
    );
}

#[test]
fn csv_import_parses_and_sorts() {
    let server = Uuid::new_v4();
    let match_id = Uuid::new_v4();
    let data = format!(
        "timestamp,server_player_id,serve_type,point_winner_team\n\
         2024-05-01T10:00:05Z,{server},second,B\n\
         2024-05-01T10:00:01Z, {server} ,first,A\n\
         2024-05-01T10:00:09Z,{server},double_fault,B\n"
    );

    let evs = read_events_csv(match_id, data.as_bytes()).unwrap();
    assert_eq!(evs.len(), 3);
    assert!(evs.iter().all(|e| e.match_id == match_id && e.server_player_id == server));

    let kinds: Vec<(ServeType, Side)> = evs.iter().map(|e| (e.serve_type, e.point_winner_team)).collect();
    assert_eq!(
        kinds,
        [
            (ServeType::First, Side::A),
            (ServeType::Second, Side::B),
            (ServeType::DoubleFault, Side::B),
        ]
    );
    assert!(evs.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn csv_import_reports_bad_rows() {
    let server = Uuid::new_v4();
    let header = "timestamp,server_player_id,serve_type,point_winner_team\n";

    let bad_serve = format!("{header}2024-05-01T10:00:05Z,{server},ace,A\n");
    assert_eq!(
        read_events_csv(Uuid::new_v4(), bad_serve.as_bytes()),
        Err(EventError::InvalidServeType("ace".to_string()))
    );

    let bad_side = format!("{header}2024-05-01T10:00:05Z,{server},first,C\n");
    assert!(matches!(
        read_events_csv(Uuid::new_v4(), bad_side.as_bytes()),
        Err(EventError::Scoring(ScoringError::InvalidSide(_)))
    ));

    let bad_id = format!("{header}2024-05-01T10:00:05Z,not-a-uuid,first,A\n");
    assert!(matches!(
        read_events_csv(Uuid::new_v4(), bad_id.as_bytes()),
        Err(EventError::Import(_))
    ));
}
