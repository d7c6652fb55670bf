//! Short-format mode: best of 3 games, no sets.
//!
//! Game N is always served by `servers[N-1]`, whatever happened in earlier games.
//! If one side takes games 1 and 2, game 3 is never created.

use crate::models::{MatchMode, MatchState, PlayerId, ScoringError, Side};

/// Games needed to win a short-format match.
pub const GAMES_TO_WIN: u32 = 2;

pub(crate) fn handle_short_format_game_won(
    state: &mut MatchState,
    winner: Side,
) -> Result<(), ScoringError> {
    state.add_game(winner);
    log::debug!(
        "short-format game {} to {} ({}-{})",
        state.current_game.game_number,
        winner,
        state.games_a,
        state.games_b
    );

    if state.games(winner) >= GAMES_TO_WIN {
        log::debug!("match to {}", winner);
        state.finish(winner);
        return Ok(());
    }
    advance_to_next_game(state)
}

/// Reset points and hand the serve to the next fixed slot.
fn advance_to_next_game(state: &mut MatchState) -> Result<(), ScoringError> {
    let next_index = state.current_game.server_index + 1;
    let next_game = state.current_game.game_number + 1;
    // Unreachable in valid play: game 3 always decides the match.
    if next_index >= state.servers.len() {
        return Err(ScoringError::GameLimitExceeded {
            game_number: next_game,
        });
    }
    state.current_game.reset_points();
    state.current_game.game_number = next_game;
    state.current_game.server_index = next_index;
    Ok(())
}

/// Server of the current game; None in standard mode.
pub fn get_current_server(state: &MatchState) -> Option<PlayerId> {
    match state.mode {
        MatchMode::ShortFormat => state.servers.get(state.current_game.server_index).copied(),
        MatchMode::Standard => None,
    }
}
