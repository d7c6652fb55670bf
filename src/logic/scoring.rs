//! Scoring engine entry points: create a match and feed it points.
//!
//! Every transition clones the incoming state, applies the point and returns the copy,
//! so a rejected point leaves the caller's state exactly as it was.

use crate::logic::display::is_game_won;
use crate::logic::short_format::handle_short_format_game_won;
use crate::logic::standard::handle_standard_game_won;
use crate::models::{
    MatchMode, MatchState, PlayerId, ScoringError, Side, TeamPlayers, SHORT_FORMAT_SERVERS,
};

/// Create a match at game 1, 0-0, set 1.
///
/// Short-format needs exactly 3 servers (one per possible game); standard takes none.
pub fn new_match_state(
    mode: MatchMode,
    players: TeamPlayers,
    servers: Vec<PlayerId>,
) -> Result<MatchState, ScoringError> {
    if players.team_a.is_empty() || players.team_b.is_empty() {
        return Err(ScoringError::EmptyTeam);
    }
    match mode {
        MatchMode::ShortFormat if servers.len() != SHORT_FORMAT_SERVERS => {
            return Err(ScoringError::ServerCountMismatch {
                expected: SHORT_FORMAT_SERVERS,
                actual: servers.len(),
            });
        }
        MatchMode::Standard if !servers.is_empty() => {
            return Err(ScoringError::UnexpectedServers {
                count: servers.len(),
            });
        }
        _ => {}
    }
    Ok(MatchState::initial(mode, players, servers))
}

/// Award one point to `side` and return the resulting state.
pub fn score_point(state: &MatchState, side: Side) -> Result<MatchState, ScoringError> {
    if state.completed {
        return Err(ScoringError::MatchCompleted);
    }

    let mut next = state.clone();
    next.current_game.add_point(side);

    if let Some(winner) = is_game_won(next.current_game.points_a, next.current_game.points_b) {
        handle_game_won(&mut next, winner)?;
    }
    Ok(next)
}

fn handle_game_won(state: &mut MatchState, winner: Side) -> Result<(), ScoringError> {
    match state.mode {
        MatchMode::Standard => {
            handle_standard_game_won(state, winner);
            Ok(())
        }
        MatchMode::ShortFormat => handle_short_format_game_won(state, winner),
    }
}

/// Feed a sequence of point winners, stopping at the first error.
pub fn score_points<I>(state: &MatchState, sides: I) -> Result<MatchState, ScoringError>
where
    I: IntoIterator<Item = Side>,
{
    sides
        .into_iter()
        .try_fold(state.clone(), |acc, side| score_point(&acc, side))
}

pub fn is_match_complete(state: &MatchState) -> bool {
    state.completed
}

/// The winner, only once the match is over.
pub fn get_winner(state: &MatchState) -> Option<Side> {
    if state.completed {
        state.winner
    } else {
        None
    }
}
