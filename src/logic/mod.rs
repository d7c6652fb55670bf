//! Scoring engine (points → games → sets → match) and tournament engine
//! (teams → round-robin → knockout → winner).

mod display;
mod engine;
mod knockout;
mod round_robin;
mod scoring;
mod session;
mod setup;
mod short_format;
mod standard;
mod standings;
mod summary;
mod teams;

pub use display::{
    game_display, game_state, get_match_display, is_game_won, is_set_won, is_tie_break,
    point_display,
};
pub use engine::{
    advance_to_knockout, assign_scoring_match, get_all_matches, get_next_match,
    match_result_from_scoring, prepare_final, record_match_result,
};
pub use knockout::{
    are_semifinals_complete, generate_knockout_matches, get_semifinal_winners,
    update_final_matchup,
};
pub use round_robin::{
    generate_round_robin_matches, get_completed_matches, get_match_by_id, get_matches_by_stage,
    get_pending_matches, is_round_robin_complete,
};
pub use scoring::{get_winner, is_match_complete, new_match_state, score_point, score_points};
pub use session::{apply_event_batch, record_event, start_session, summarize_session};
pub use setup::{new_tournament, set_teams};
pub use short_format::{get_current_server, GAMES_TO_WIN};
pub use standard::{get_set_score, SETS_TO_WIN};
pub use standings::{
    calculate_rankings, get_standing_by_team_id, get_top_teams, initialize_standings,
    is_standings_complete, update_standings_with_result,
};
pub use summary::{read_events_csv, replay_events, sort_events, summarize_match};
pub use teams::{generate_manual_teams, generate_random_teams, get_team_by_id, validate_teams};
