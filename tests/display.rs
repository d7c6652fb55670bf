//! Integration tests for tennis notation and the match display.

use tennis_tournament_web::{
    game_display, game_state, get_match_display, is_game_won, is_set_won, is_tie_break,
    new_match_state, point_display, score_points, GameState, MatchMode, PointDisplay, ScoreCount,
    Side, TeamPlayers,
};
use uuid::Uuid;

fn display(a: &str, b: &str) -> PointDisplay {
    PointDisplay {
        a: a.to_string(),
        b: b.to_string(),
    }
}

fn singles() -> TeamPlayers {
    TeamPlayers::new(vec![Uuid::new_v4()], vec![Uuid::new_v4()])
}

#[test]
fn raw_points_map_to_tennis_notation() {
    let shown: Vec<_> = (0..=4).map(point_display).collect();
    assert_eq!(shown, ["0", "15", "30", "40", "40"]);
}

#[test]
fn game_display_handles_deuce_and_advantage() {
    assert_eq!(game_display(3, 3), display("Deuce", "Deuce"));
    assert_eq!(game_display(5, 5), display("Deuce", "Deuce"));
    assert_eq!(game_display(4, 3), display("Ad", "40"));
    assert_eq!(game_display(3, 4), display("40", "Ad"));
    assert_eq!(game_display(1, 2), display("15", "30"));
    assert_eq!(game_display(3, 0), display("40", "0"));
}

#[test]
fn game_state_classifies_deuce_territory() {
    assert_eq!(game_state(2, 2), GameState::InProgress);
    assert_eq!(game_state(3, 3), GameState::Deuce);
    assert_eq!(game_state(6, 5), GameState::Advantage(Side::A));
    assert_eq!(game_state(5, 6), GameState::Advantage(Side::B));
    // Already won; the caller handles it.
    assert_eq!(game_state(5, 3), GameState::InProgress);
}

#[test]
fn game_win_requires_four_points_and_two_clear() {
    assert_eq!(is_game_won(4, 0), Some(Side::A));
    assert_eq!(is_game_won(4, 2), Some(Side::A));
    assert_eq!(is_game_won(4, 3), None);
    assert_eq!(is_game_won(3, 1), None);
    assert_eq!(is_game_won(5, 7), Some(Side::B));
}

#[test]
fn set_win_conditions() {
    assert_eq!(is_set_won(6, 0), Some(Side::A));
    assert_eq!(is_set_won(6, 5), None);
    assert_eq!(is_set_won(7, 5), Some(Side::A));
    assert_eq!(is_set_won(7, 6), Some(Side::A));
    assert_eq!(is_set_won(6, 7), Some(Side::B));
    assert_eq!(is_set_won(6, 6), None);
    assert_eq!(is_set_won(4, 6), Some(Side::B));
}

#[test]
fn tie_break_only_at_six_all() {
    assert!(is_tie_break(6, 6));
    assert!(!is_tie_break(6, 5));
    assert!(!is_tie_break(7, 6));
}

#[test]
fn short_format_display_shows_server_and_no_sets() {
    let players = singles();
    let servers = vec![players.team_a[0], players.team_b[0], players.team_a[0]];
    let state = new_match_state(MatchMode::ShortFormat, players, servers.clone()).unwrap();
    let state = score_points(&state, [Side::A, Side::B, Side::B]).unwrap();

    let shown = get_match_display(&state);
    assert_eq!(shown.points, display("15", "30"));
    assert_eq!(shown.games, ScoreCount { a: 0, b: 0 });
    assert_eq!(shown.sets, None);
    assert_eq!(shown.current_set, None);
    assert_eq!(shown.total_games, Some(3));
    assert_eq!(shown.game_number, 1);
    assert_eq!(shown.server, Some(servers[0]));
    assert!(!shown.is_tie_break);
}

#[test]
fn standard_display_shows_sets_and_tie_break_flag() {
    let state = new_match_state(MatchMode::Standard, singles(), Vec::new()).unwrap();
    let shown = get_match_display(&state);
    assert_eq!(shown.points, display("0", "0"));
    assert_eq!(shown.sets, Some(ScoreCount { a: 0, b: 0 }));
    assert_eq!(shown.current_set, Some(1));
    assert_eq!(shown.total_games, None);
    assert_eq!(shown.server, None);
    assert!(!shown.is_tie_break);

    let mut state = state;
    for _ in 0..6 {
        state = score_points(&state, [Side::A; 4]).unwrap();
        state = score_points(&state, [Side::B; 4]).unwrap();
    }
    let shown = get_match_display(&state);
    assert_eq!(shown.games, ScoreCount { a: 6, b: 6 });
    assert!(shown.is_tie_break);
    assert_eq!(shown.game_number, 13);
}
