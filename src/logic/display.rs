//! Tennis notation and the win predicates shared by both scoring modes.

use crate::logic::short_format::get_current_server;
use crate::models::{GameState, MatchDisplay, MatchMode, MatchState, PointDisplay, ScoreCount, Side};

/// Games in a short-format match, for display.
const SHORT_FORMAT_TOTAL_GAMES: u32 = 3;

/// Raw point count to tennis notation. Never shows anything beyond "40".
pub fn point_display(points: u32) -> &'static str {
    match points {
        0 => "0",
        1 => "15",
        2 => "30",
        _ => "40",
    }
}

/// Deuce/advantage classification. A lead of 2+ with both at 3+ is a won game,
/// which the caller is expected to have detected already; it reports `InProgress`.
pub fn game_state(points_a: u32, points_b: u32) -> GameState {
    if points_a >= 3 && points_b >= 3 {
        return match i64::from(points_a) - i64::from(points_b) {
            0 => GameState::Deuce,
            1 => GameState::Advantage(Side::A),
            -1 => GameState::Advantage(Side::B),
            _ => GameState::InProgress,
        };
    }
    GameState::InProgress
}

/// A game is won with at least 4 points and a lead of at least 2.
pub fn is_game_won(points_a: u32, points_b: u32) -> Option<Side> {
    if points_a >= 4 && points_a >= points_b + 2 {
        Some(Side::A)
    } else if points_b >= 4 && points_b >= points_a + 2 {
        Some(Side::B)
    } else {
        None
    }
}

/// Both sides' point score as shown to players.
pub fn game_display(points_a: u32, points_b: u32) -> PointDisplay {
    let (a, b) = match game_state(points_a, points_b) {
        GameState::Deuce => ("Deuce", "Deuce"),
        GameState::Advantage(Side::A) => ("Ad", "40"),
        GameState::Advantage(Side::B) => ("40", "Ad"),
        GameState::InProgress => (point_display(points_a), point_display(points_b)),
    };
    PointDisplay {
        a: a.to_string(),
        b: b.to_string(),
    }
}

/// Standard mode: 6+ games with a 2-game lead, or 7-6 after a tie-break.
pub fn is_set_won(games_a: u32, games_b: u32) -> Option<Side> {
    if games_a >= 6 && games_a >= games_b + 2 {
        return Some(Side::A);
    }
    if games_b >= 6 && games_b >= games_a + 2 {
        return Some(Side::B);
    }
    match (games_a, games_b) {
        (7, 6) => Some(Side::A),
        (6, 7) => Some(Side::B),
        _ => None,
    }
}

/// The next game is a tie-break exactly at 6-6.
pub fn is_tie_break(games_a: u32, games_b: u32) -> bool {
    games_a == 6 && games_b == 6
}

/// UI-ready view of the match.
pub fn get_match_display(state: &MatchState) -> MatchDisplay {
    let points = game_display(state.current_game.points_a, state.current_game.points_b);
    let games = ScoreCount {
        a: state.games_a,
        b: state.games_b,
    };

    match state.mode {
        MatchMode::ShortFormat => MatchDisplay {
            points,
            games,
            sets: None,
            current_set: None,
            game_number: state.current_game.game_number,
            total_games: Some(SHORT_FORMAT_TOTAL_GAMES),
            server: get_current_server(state),
            is_tie_break: false,
        },
        MatchMode::Standard => MatchDisplay {
            points,
            games,
            sets: Some(ScoreCount {
                a: state.sets_a,
                b: state.sets_b,
            }),
            current_set: Some(state.current_set),
            game_number: state.current_game.game_number,
            total_games: None,
            server: None,
            is_tie_break: is_tie_break(state.games_a, state.games_b),
        },
    }
}
