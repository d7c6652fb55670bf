//! Single binary web server: JSON API over the scoring and tournament engines.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, INACTIVITY_TIMEOUT_SECS.
//!
//! State is in memory only. Every transition runs under the write lock of its map,
//! so there is at most one transition in flight per match or tournament.

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tennis_tournament_web::{
    advance_to_knockout, apply_event_batch, assign_scoring_match, generate_manual_teams,
    generate_random_teams, get_all_matches, get_match_by_id, get_match_display, get_next_match,
    match_result_from_scoring, new_tournament, prepare_final, record_event, record_match_result,
    set_teams, start_session, summarize_session, MatchDisplay, MatchId, MatchMode, MatchResult,
    MatchState, PlayerId, PointEvent, ScoringMatchId, ScoringSession, ServeType, Side, TeamPlayers,
    TournamentError, TournamentId, TournamentState, VenueId,
};
use uuid::Uuid;

/// Scoring session + last activity time (for auto-cleanup).
struct ScoringEntry {
    session: ScoringSession,
    last_activity: Instant,
}

/// Tournament snapshot + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: TournamentState,
    last_activity: Instant,
}

type MatchesState = Data<RwLock<HashMap<ScoringMatchId, ScoringEntry>>>;
type TournamentsState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Runtime settings read from the environment.
struct Config {
    host: String,
    port: u16,
    inactivity_timeout: Duration,
}

impl Config {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let timeout_secs = std::env::var("INACTIVITY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(12 * 3600);
        Self {
            host,
            port,
            inactivity_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct MatchView<'a> {
    id: ScoringMatchId,
    state: &'a MatchState,
    display: MatchDisplay,
}

#[derive(Deserialize)]
struct CreateMatchBody {
    mode: String,
    team_a: Vec<PlayerId>,
    team_b: Vec<PlayerId>,
    #[serde(default)]
    servers: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct ScorePointBody {
    point_winner_team: String,
    server_player_id: PlayerId,
    #[serde(default = "default_serve_type")]
    serve_type: ServeType,
    timestamp: Option<DateTime<Utc>>,
}

fn default_serve_type() -> ServeType {
    ServeType::First
}

/// One event of a batch. The id is chosen by the client so retries are idempotent.
#[derive(Deserialize)]
struct EventBody {
    id: Uuid,
    timestamp: DateTime<Utc>,
    server_player_id: PlayerId,
    serve_type: ServeType,
    point_winner_team: Side,
}

#[derive(Deserialize)]
struct EventsBody {
    events: Vec<EventBody>,
}

#[derive(Serialize)]
struct EventsResponse<'a> {
    inserted: usize,
    total: usize,
    #[serde(flatten)]
    view: MatchView<'a>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    venue_id: VenueId,
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct RandomTeamsBody {
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct ManualTeamsBody {
    pairs: Vec<(PlayerId, PlayerId)>,
}

#[derive(Deserialize)]
struct ScoringLinkBody {
    match_id: MatchId,
    scoring_match_id: ScoringMatchId,
}

#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

fn bad_request(e: impl Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": format!("No {}", what) }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn match_view(id: ScoringMatchId, state: &MatchState) -> MatchView<'_> {
    MatchView {
        id,
        state,
        display: get_match_display(state),
    }
}

/// Run one transition against a stored tournament. The snapshot is only replaced on success.
fn apply_tournament<F>(state: &TournamentsState, id: TournamentId, transition: F) -> HttpResponse
where
    F: FnOnce(&TournamentState) -> Result<TournamentState, TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found("tournament"),
    };
    entry.last_activity = Instant::now();
    match transition(&entry.tournament) {
        Ok(next) => {
            entry.tournament = next;
            HttpResponse::Ok().json(&entry.tournament)
        }
        Err(e) => bad_request(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tennis-tournament-web",
    })
}

/// Start a scoring session.
#[post("/api/matches")]
async fn api_create_match(matches: MatchesState, body: Json<CreateMatchBody>) -> HttpResponse {
    let body = body.into_inner();
    let mode: MatchMode = match body.mode.parse() {
        Ok(m) => m,
        Err(e) => return bad_request(e),
    };
    let id = Uuid::new_v4();
    let session = match start_session(id, mode, TeamPlayers::new(body.team_a, body.team_b), body.servers) {
        Ok(s) => s,
        Err(e) => return bad_request(e),
    };
    let mut g = match matches.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    log::info!("Created {} scoring match {}", mode, id);
    let entry = g.entry(id).or_insert(ScoringEntry {
        session,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(match_view(id, &entry.session.state))
}

#[get("/api/matches/{id}")]
async fn api_get_match(matches: MatchesState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match matches.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(match_view(path.id, &entry.session.state))
        }
        None => not_found("match"),
    }
}

/// Record one point and advance the score. A timestamp earlier than the last
/// recorded point is rejected.
#[post("/api/matches/{id}/points")]
async fn api_score_point(matches: MatchesState, path: Path<IdPath>, body: Json<ScorePointBody>) -> HttpResponse {
    let side: Side = match body.point_winner_team.parse() {
        Ok(s) => s,
        Err(e) => return bad_request(e),
    };
    let mut g = match matches.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found("match"),
    };
    entry.last_activity = Instant::now();
    let event = PointEvent::new(
        path.id,
        body.timestamp.unwrap_or_else(Utc::now),
        body.server_player_id,
        body.serve_type,
        side,
    );
    match record_event(&entry.session, event) {
        Ok(next) => {
            entry.session = next;
            if entry.session.state.completed {
                log::info!("Scoring match {} completed", path.id);
            }
            HttpResponse::Ok().json(match_view(path.id, &entry.session.state))
        }
        Err(e) => bad_request(e),
    }
}

/// Idempotent batch of point events: ids already recorded are skipped.
#[post("/api/matches/{id}/events")]
async fn api_add_events(matches: MatchesState, path: Path<IdPath>, body: Json<EventsBody>) -> HttpResponse {
    let batch: Vec<PointEvent> = body
        .into_inner()
        .events
        .into_iter()
        .map(|e| PointEvent {
            id: e.id,
            match_id: path.id,
            timestamp: e.timestamp,
            server_player_id: e.server_player_id,
            serve_type: e.serve_type,
            point_winner_team: e.point_winner_team,
        })
        .collect();
    let mut g = match matches.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found("match"),
    };
    entry.last_activity = Instant::now();
    match apply_event_batch(&entry.session, batch) {
        Ok(outcome) => {
            entry.session = outcome.session;
            HttpResponse::Ok().json(EventsResponse {
                inserted: outcome.inserted,
                total: outcome.total,
                view: match_view(path.id, &entry.session.state),
            })
        }
        Err(e) => bad_request(e),
    }
}

#[get("/api/matches/{id}/summary")]
async fn api_match_summary(matches: MatchesState, path: Path<IdPath>) -> HttpResponse {
    let g = match matches.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return not_found("match"),
    };
    match summarize_session(&entry.session) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => bad_request(e),
    }
}

#[post("/api/tournaments")]
async fn api_create_tournament(tournaments: TournamentsState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let tournament = match new_tournament(body.venue_id, body.player_ids) {
        Ok(t) => t,
        Err(e) => return bad_request(e),
    };
    let id = tournament.id;
    let mut g = match tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = g.entry(id).or_insert(TournamentEntry {
        tournament,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(&entry.tournament)
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(tournaments: TournamentsState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => not_found("tournament"),
    }
}

/// Seeded random pairing of the tournament's players (Setup only).
#[post("/api/tournaments/{id}/teams/random")]
async fn api_random_teams(
    tournaments: TournamentsState,
    path: Path<IdPath>,
    body: Option<Json<RandomTeamsBody>>,
) -> HttpResponse {
    let seed = body.and_then(|b| b.seed).unwrap_or_else(rand::random);
    apply_tournament(&tournaments, path.id, |t| {
        let teams = generate_random_teams(&t.player_ids, seed)?;
        set_teams(t, teams)
    })
}

/// Explicit pairs (Setup only).
#[post("/api/tournaments/{id}/teams/manual")]
async fn api_manual_teams(tournaments: TournamentsState, path: Path<IdPath>, body: Json<ManualTeamsBody>) -> HttpResponse {
    apply_tournament(&tournaments, path.id, |t| {
        let teams = generate_manual_teams(&body.pairs)?;
        set_teams(t, teams)
    })
}

#[post("/api/tournaments/{id}/results")]
async fn api_record_result(tournaments: TournamentsState, path: Path<IdPath>, body: Json<MatchResult>) -> HttpResponse {
    let result = body.into_inner();
    apply_tournament(&tournaments, path.id, |t| record_match_result(t, result))
}

/// Record a bracket match result from its finished scoring session.
#[post("/api/tournaments/{id}/results/from-scoring")]
async fn api_record_result_from_scoring(
    matches: MatchesState,
    tournaments: TournamentsState,
    path: Path<IdPath>,
    body: Json<ScoringLinkBody>,
) -> HttpResponse {
    // Lock order: matches before tournaments.
    let scoring = {
        let g = match matches.read() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match g.get(&body.scoring_match_id) {
            Some(entry) => entry.session.state.clone(),
            None => return not_found("match"),
        }
    };
    apply_tournament(&tournaments, path.id, |t| {
        let m = get_match_by_id(&get_all_matches(t), body.match_id)
            .cloned()
            .ok_or(TournamentError::MatchNotFound(body.match_id))?;
        let result = match_result_from_scoring(&m, body.scoring_match_id, &scoring)?;
        record_match_result(t, result)
    })
}

#[post("/api/tournaments/{id}/scoring-link")]
async fn api_link_scoring(tournaments: TournamentsState, path: Path<IdPath>, body: Json<ScoringLinkBody>) -> HttpResponse {
    apply_tournament(&tournaments, path.id, |t| {
        assign_scoring_match(t, body.match_id, body.scoring_match_id)
    })
}

#[post("/api/tournaments/{id}/knockout")]
async fn api_advance_to_knockout(tournaments: TournamentsState, path: Path<IdPath>) -> HttpResponse {
    apply_tournament(&tournaments, path.id, advance_to_knockout)
}

#[post("/api/tournaments/{id}/final")]
async fn api_prepare_final(tournaments: TournamentsState, path: Path<IdPath>) -> HttpResponse {
    apply_tournament(&tournaments, path.id, prepare_final)
}

#[get("/api/tournaments/{id}/next-match")]
async fn api_next_match(tournaments: TournamentsState, path: Path<IdPath>) -> HttpResponse {
    let g = match tournaments.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(get_next_match(&entry.tournament)),
        None => not_found("tournament"),
    }
}

#[get("/api/tournaments/{id}/matches")]
async fn api_all_matches(tournaments: TournamentsState, path: Path<IdPath>) -> HttpResponse {
    let g = match tournaments.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(get_all_matches(&entry.tournament)),
        None => not_found("tournament"),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let matches: MatchesState = Data::new(RwLock::new(HashMap::new()));
    let tournaments: TournamentsState = Data::new(RwLock::new(HashMap::new()));

    // Background task: every 30 minutes, drop entries idle longer than the timeout.
    let matches_cleanup = matches.clone();
    let tournaments_cleanup = tournaments.clone();
    let timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            if let Ok(mut g) = matches_cleanup.write() {
                let before = g.len();
                g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
                let removed = before - g.len();
                if removed > 0 {
                    log::info!("Cleaned up {} inactive scoring match(es)", removed);
                }
            }
            if let Ok(mut g) = tournaments_cleanup.write() {
                let before = g.len();
                g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
                let removed = before - g.len();
                if removed > 0 {
                    log::info!("Cleaned up {} inactive tournament(s)", removed);
                }
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(matches.clone())
            .app_data(tournaments.clone())
            .service(api_health)
            .service(api_create_match)
            .service(api_get_match)
            .service(api_score_point)
            .service(api_add_events)
            .service(api_match_summary)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_random_teams)
            .service(api_manual_teams)
            .service(api_record_result)
            .service(api_record_result_from_scoring)
            .service(api_link_scoring)
            .service(api_advance_to_knockout)
            .service(api_prepare_final)
            .service(api_next_match)
            .service(api_all_matches)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
