//! Scoring sessions: a live match plus the log of point events that drove it.
//!
//! Events are only accepted in timestamp order, so replaying the log always lands
//! on the live state. Batches are idempotent: an event id is applied at most once.

use crate::logic::scoring::{new_match_state, score_point};
use crate::logic::summary::{sort_events, summarize_match};
use crate::models::{
    BatchOutcome, EventError, MatchMode, MatchSummary, PlayerId, PointEvent, ScoringError,
    ScoringMatchId, ScoringSession, TeamPlayers, MAX_EVENT_BATCH,
};
use std::collections::HashSet;

pub fn start_session(
    match_id: ScoringMatchId,
    mode: MatchMode,
    players: TeamPlayers,
    servers: Vec<PlayerId>,
) -> Result<ScoringSession, ScoringError> {
    Ok(ScoringSession {
        match_id,
        state: new_match_state(mode, players, servers)?,
        events: Vec::new(),
    })
}

/// Score one event and append it to the log.
pub fn record_event(session: &ScoringSession, event: PointEvent) -> Result<ScoringSession, EventError> {
    if event.id.is_nil() {
        return Err(EventError::MissingEventId);
    }
    if event.match_id != session.match_id {
        return Err(EventError::WrongMatch {
            expected: session.match_id,
            actual: event.match_id,
        });
    }
    if let Some(last) = session.last_timestamp() {
        if event.timestamp < last {
            return Err(EventError::OutOfOrder {
                timestamp: event.timestamp,
                last,
            });
        }
    }

    let state = score_point(&session.state, event.point_winner_team)?;
    let mut next = session.clone();
    next.state = state;
    next.events.push(event);
    Ok(next)
}

/// Apply a batch of events. Ids already in the log (or repeated within the batch)
/// are skipped; the rest are applied in timestamp order. All or nothing: on error
/// the session is left as it was.
pub fn apply_event_batch(session: &ScoringSession, batch: Vec<PointEvent>) -> Result<BatchOutcome, EventError> {
    let total = batch.len();
    if total == 0 {
        return Err(EventError::EmptyBatch);
    }
    if total > MAX_EVENT_BATCH {
        return Err(EventError::BatchTooLarge { count: total });
    }

    let mut seen: HashSet<_> = session.events.iter().map(|e| e.id).collect();
    let mut fresh: Vec<PointEvent> = batch.into_iter().filter(|e| seen.insert(e.id)).collect();
    sort_events(&mut fresh);

    let inserted = fresh.len();
    let session = fresh
        .into_iter()
        .try_fold(session.clone(), |acc, event| record_event(&acc, event))?;

    if inserted < total {
        log::debug!(
            "match {}: skipped {} already recorded event(s)",
            session.match_id,
            total - inserted
        );
    }
    Ok(BatchOutcome {
        session,
        inserted,
        total,
    })
}

/// Summary of the session's events; agrees with the live state.
pub fn summarize_session(session: &ScoringSession) -> Result<MatchSummary, ScoringError> {
    let state = &session.state;
    summarize_match(
        session.match_id,
        state.mode,
        state.players.clone(),
        state.servers.clone(),
        &session.events,
    )
}
