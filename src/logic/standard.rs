//! Standard mode: points → games → sets → match, best of 3 sets.

use crate::logic::display::is_set_won;
use crate::models::{MatchMode, MatchState, Side};

/// Sets needed to win a standard match.
pub const SETS_TO_WIN: u32 = 2;

/// Credit a game to `winner`, then either close the set (and maybe the match)
/// or move on to the next game of the same set.
pub(crate) fn handle_standard_game_won(state: &mut MatchState, winner: Side) {
    state.add_game(winner);
    log::debug!(
        "game to {} (set {}: {}-{})",
        winner,
        state.current_set,
        state.games_a,
        state.games_b
    );

    match is_set_won(state.games_a, state.games_b) {
        Some(set_winner) => handle_set_won(state, set_winner),
        None => start_next_game_in_set(state),
    }
}

fn handle_set_won(state: &mut MatchState, winner: Side) {
    state.add_set(winner);
    log::debug!(
        "set {} to {} (sets {}-{})",
        state.current_set,
        winner,
        state.sets_a,
        state.sets_b
    );

    if state.sets(winner) >= SETS_TO_WIN {
        log::debug!("match to {}", winner);
        state.finish(winner);
        return;
    }
    start_new_set(state);
}

fn start_new_set(state: &mut MatchState) {
    state.current_set += 1;
    state.games_a = 0;
    state.games_b = 0;
    state.current_game.reset_points();
    state.current_game.game_number = 1;
}

fn start_next_game_in_set(state: &mut MatchState) {
    state.current_game.reset_points();
    state.current_game.game_number = state.games_a + state.games_b + 1;
}

/// `(sets_a, sets_b, games_a, games_b)` for standard mode; all zeros for short-format.
pub fn get_set_score(state: &MatchState) -> (u32, u32, u32, u32) {
    match state.mode {
        MatchMode::Standard => (state.sets_a, state.sets_b, state.games_a, state.games_b),
        MatchMode::ShortFormat => (0, 0, 0, 0),
    }
}
