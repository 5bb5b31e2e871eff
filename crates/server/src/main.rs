// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use club_ladder_api::{
    AcceptDateProposalRequest, ApiError, Caller, ChallengeResponse, ClearUnavailabilityRequest,
    ConfirmResultRequest, ConfirmResultResponse, CreateChallengeRequest, CreateSeasonRequest,
    DeclineDateProposalRequest, DisputeResultRequest, EnrollTeamRequest, EnterResultRequest,
    ForfeitRequest, ProposeDateRequest, SetUnavailabilityRequest, WithdrawRequest,
    accept_date_proposal, activate_season, add_team_to_standings, clear_unavailability, club_feed,
    confirm_result, create_challenge, create_season, decline_date_proposal, dispute_result,
    end_season,
    enroll_team, enter_result, forfeit, get_match, head_to_head, import_roster, notifications,
    propose_date, rank_history, set_unavailability, standings, teams_with_open_challenge,
    unavailable_teams, withdraw,
};
use club_ladder_persistence::Persistence;

mod live;

use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// Club Ladder Server - HTTP server for the Club Ladder System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, serialized behind a mutex.
    persistence: Arc<Mutex<Persistence>>,
    /// Broadcaster for the live WebSocket feed.
    live: Arc<LiveEventBroadcaster>,
}

impl axum::extract::FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live)
    }
}

/// Actor fields carried by every mutating request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CallerFields {
    /// The caller's role: "admin" or "player".
    actor_role: String,
    /// The acting player, required for the "player" role.
    actor_player_id: Option<i64>,
}

/// A mutating request: actor fields flattened next to the operation body.
#[derive(Debug, Deserialize)]
struct ApiRequest<T> {
    #[serde(flatten)]
    caller: CallerFields,
    #[serde(flatten)]
    body: T,
}

/// Error body returned for failed operations.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Resolves the caller from the request's actor fields.
fn resolve_caller(fields: &CallerFields) -> Result<Caller, ApiError> {
    match fields.actor_role.as_str() {
        "admin" => Ok(Caller::admin()),
        "player" => fields
            .actor_player_id
            .map(Caller::player)
            .ok_or_else(|| ApiError::InvalidInput {
                field: String::from("actor_player_id"),
                message: String::from("the player role requires actor_player_id"),
            }),
        other => Err(ApiError::InvalidInput {
            field: String::from("actor_role"),
            message: format!("unknown role '{other}'"),
        }),
    }
}

/// Maps an API error onto an HTTP status code.
const fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        ApiError::DomainRuleViolation { .. } | ApiError::InvalidInput { .. } => {
            StatusCode::BAD_REQUEST
        }
        ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::Conflict { .. } => StatusCode::CONFLICT,
        ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a handler result as a JSON response.
fn json_result<T: Serialize>(result: Result<T, ApiError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(err) => {
            error!(%err, "Request failed");
            (
                status_for(&err),
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Season administration
// ============================================================================

async fn handle_create_season(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<CreateSeasonRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let mut persistence = state.persistence.lock().await;
    json_result(create_season(&mut persistence, &caller, &req.body))
}

/// Body for season lifecycle transitions.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SeasonIdBody {
    season_id: i64,
}

async fn handle_activate_season(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<SeasonIdBody>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let mut persistence = state.persistence.lock().await;
    json_result(activate_season(&mut persistence, &caller, req.body.season_id))
}

async fn handle_end_season(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<SeasonIdBody>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let mut persistence = state.persistence.lock().await;
    json_result(end_season(&mut persistence, &caller, req.body.season_id))
}

// ============================================================================
// Enrollment
// ============================================================================

async fn handle_enroll_team(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<EnrollTeamRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let season_id: i64 = req.body.season_id;
    let mut persistence = state.persistence.lock().await;
    let result = enroll_team(&mut persistence, &caller, &req.body);
    if let Ok(enrolled) = &result {
        state.live.broadcast(&LiveEvent::TeamEnrolled {
            season_id,
            team_id: enrolled.team_id,
            rank: enrolled.rank,
        });
    }
    json_result(result)
}

/// Body for appending an existing team to the standings.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AddTeamBody {
    season_id: i64,
    team_id: i64,
}

async fn handle_add_team_to_standings(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<AddTeamBody>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let mut persistence = state.persistence.lock().await;
    json_result(add_team_to_standings(
        &mut persistence,
        &caller,
        req.body.season_id,
        req.body.team_id,
    ))
}

/// Body for roster imports.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RosterBody {
    season_id: i64,
    csv_data: String,
}

async fn handle_import_roster(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<RosterBody>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let mut persistence = state.persistence.lock().await;
    json_result(import_roster(
        &mut persistence,
        &caller,
        req.body.season_id,
        &req.body.csv_data,
    ))
}

// ============================================================================
// Challenges & match lifecycle
// ============================================================================

async fn handle_create_challenge(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<CreateChallengeRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let season_id: i64 = req.body.season_id;
    let mut persistence = state.persistence.lock().await;
    let result: Result<ChallengeResponse, ApiError> =
        create_challenge(&mut persistence, &caller, &req.body);
    if let Ok(response) = &result {
        state.live.broadcast(&LiveEvent::ChallengeCreated {
            season_id,
            match_id: response.match_id,
        });
    }
    json_result(result)
}

async fn handle_propose_date(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<ProposeDateRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let mut persistence = state.persistence.lock().await;
    json_result(propose_date(&mut persistence, &caller, &req.body))
}

async fn handle_accept_date_proposal(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<AcceptDateProposalRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let match_id: i64 = req.body.match_id;
    let mut persistence = state.persistence.lock().await;
    let result = accept_date_proposal(&mut persistence, &caller, &req.body);
    if result.is_ok() {
        state.live.broadcast(&LiveEvent::DateSet { match_id });
    }
    json_result(result)
}

async fn handle_decline_date_proposal(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<DeclineDateProposalRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let mut persistence = state.persistence.lock().await;
    json_result(decline_date_proposal(&mut persistence, &caller, &req.body))
}

async fn handle_enter_result(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<EnterResultRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let match_id: i64 = req.body.match_id;
    let mut persistence = state.persistence.lock().await;
    let result = enter_result(&mut persistence, &caller, &req.body);
    if result.is_ok() {
        state.live.broadcast(&LiveEvent::ResultEntered { match_id });
    }
    json_result(result)
}

async fn handle_confirm_result(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<ConfirmResultRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let match_id: i64 = req.body.match_id;
    let mut persistence = state.persistence.lock().await;
    let result: Result<ConfirmResultResponse, ApiError> =
        confirm_result(&mut persistence, &caller, &req.body);
    if let Ok(completion) = &result
        && let Ok(record) = get_match(&mut persistence, match_id)
    {
        state.live.broadcast(&LiveEvent::MatchCompleted {
            season_id: record.season_id,
            match_id,
            winner_team_id: completion.winner_team_id,
        });
    }
    json_result(result)
}

async fn handle_dispute_result(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<DisputeResultRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let match_id: i64 = req.body.match_id;
    let mut persistence = state.persistence.lock().await;
    let result = dispute_result(&mut persistence, &caller, &req.body);
    if result.is_ok() {
        state.live.broadcast(&LiveEvent::MatchDisputed { match_id });
    }
    json_result(result)
}

async fn handle_withdraw(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<WithdrawRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let match_id: i64 = req.body.match_id;
    let mut persistence = state.persistence.lock().await;
    let result = withdraw(&mut persistence, &caller, &req.body);
    if result.is_ok() {
        state.live.broadcast(&LiveEvent::MatchWithdrawn { match_id });
    }
    json_result(result)
}

async fn handle_forfeit(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<ForfeitRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let match_id: i64 = req.body.match_id;
    let mut persistence = state.persistence.lock().await;
    let result: Result<ConfirmResultResponse, ApiError> =
        forfeit(&mut persistence, &caller, &req.body);
    if let Ok(completion) = &result
        && let Ok(record) = get_match(&mut persistence, match_id)
    {
        state.live.broadcast(&LiveEvent::MatchCompleted {
            season_id: record.season_id,
            match_id,
            winner_team_id: completion.winner_team_id,
        });
    }
    json_result(result)
}

// ============================================================================
// Unavailability
// ============================================================================

async fn handle_set_unavailability(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<SetUnavailabilityRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let mut persistence = state.persistence.lock().await;
    json_result(set_unavailability(&mut persistence, &caller, &req.body))
}

async fn handle_clear_unavailability(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApiRequest<ClearUnavailabilityRequest>>,
) -> Response {
    let caller: Caller = match resolve_caller(&req.caller) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let mut persistence = state.persistence.lock().await;
    json_result(clear_unavailability(&mut persistence, &caller, &req.body))
}

// ============================================================================
// Read queries
// ============================================================================

/// Query parameters naming a season.
#[derive(Debug, Deserialize)]
struct SeasonQuery {
    season_id: i64,
}

async fn handle_standings(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<SeasonQuery>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    json_result(standings(&mut persistence, query.season_id))
}

/// Query parameters for a team's rank history.
#[derive(Debug, Deserialize)]
struct RankHistoryQuery {
    season_id: i64,
    team_id: i64,
}

async fn handle_rank_history(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<RankHistoryQuery>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    json_result(rank_history(&mut persistence, query.season_id, query.team_id))
}

async fn handle_open_challenges(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<SeasonQuery>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    json_result(teams_with_open_challenge(&mut persistence, query.season_id))
}

/// Query parameters for the unavailable-teams view.
#[derive(Debug, Deserialize)]
struct UnavailableQuery {
    season_id: i64,
    /// Reference instant (RFC 3339). Defaults to the server clock.
    now: Option<String>,
}

async fn handle_unavailable_teams(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<UnavailableQuery>,
) -> Response {
    let now: String = query.now.unwrap_or_else(|| {
        time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
    });
    let mut persistence = state.persistence.lock().await;
    json_result(unavailable_teams(&mut persistence, query.season_id, &now))
}

/// Query parameters for a head-to-head record.
#[derive(Debug, Deserialize)]
struct HeadToHeadQuery {
    team_a: i64,
    team_b: i64,
}

async fn handle_head_to_head(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<HeadToHeadQuery>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    json_result(head_to_head(&mut persistence, query.team_a, query.team_b))
}

async fn handle_get_match(
    AxumState(state): AxumState<AppState>,
    Path(match_id): Path<i64>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    json_result(get_match(&mut persistence, match_id))
}

/// Query parameters for the club feed.
#[derive(Debug, Deserialize)]
struct FeedQuery {
    club_id: i64,
    limit: Option<i64>,
}

async fn handle_club_feed(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<FeedQuery>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    json_result(club_feed(
        &mut persistence,
        query.club_id,
        query.limit.unwrap_or(50),
    ))
}

/// Query parameters for a player's notifications.
#[derive(Debug, Deserialize)]
struct NotificationsQuery {
    actor_role: String,
    actor_player_id: Option<i64>,
    limit: Option<i64>,
}

async fn handle_notifications(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<NotificationsQuery>,
) -> Response {
    let caller: Caller = match resolve_caller(&CallerFields {
        actor_role: query.actor_role.clone(),
        actor_player_id: query.actor_player_id,
    }) {
        Ok(caller) => caller,
        Err(err) => return json_result::<()>(Err(err)),
    };
    let mut persistence = state.persistence.lock().await;
    json_result(notifications(
        &mut persistence,
        &caller,
        query.limit.unwrap_or(50),
    ))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/seasons", post(handle_create_season))
        .route("/seasons/activate", post(handle_activate_season))
        .route("/seasons/end", post(handle_end_season))
        .route("/teams/enroll", post(handle_enroll_team))
        .route("/standings/add_team", post(handle_add_team_to_standings))
        .route("/roster/import", post(handle_import_roster))
        .route("/challenges", post(handle_create_challenge))
        .route("/matches/propose_date", post(handle_propose_date))
        .route("/matches/accept_date", post(handle_accept_date_proposal))
        .route("/matches/decline_date", post(handle_decline_date_proposal))
        .route("/matches/enter_result", post(handle_enter_result))
        .route("/matches/confirm_result", post(handle_confirm_result))
        .route("/matches/dispute_result", post(handle_dispute_result))
        .route("/matches/withdraw", post(handle_withdraw))
        .route("/matches/forfeit", post(handle_forfeit))
        .route("/matches/{match_id}", get(handle_get_match))
        .route("/unavailability", post(handle_set_unavailability))
        .route("/unavailability/clear", post(handle_clear_unavailability))
        .route("/standings", get(handle_standings))
        .route("/standings/history", get(handle_rank_history))
        .route("/open_challenges", get(handle_open_challenges))
        .route("/unavailable_teams", get(handle_unavailable_teams))
        .route("/head_to_head", get(handle_head_to_head))
        .route("/feed", get(handle_club_feed))
        .route("/notifications", get(handle_notifications))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Club Ladder Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        live: Arc::new(LiveEventBroadcaster::new()),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            live: Arc::new(LiveEventBroadcaster::new()),
        }
    }

    /// Posts a JSON body and returns the status and parsed response body.
    async fn post_json(
        app: &Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status: StatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    /// Gets a URI and returns the status and parsed response body.
    async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status: StatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    /// Bootstraps an active two-player season and returns
    /// `(season_id, team_ids)`.
    async fn bootstrap_season(app: &Router, players: &[i64]) -> (i64, Vec<i64>) {
        let (status, body) = post_json(
            app,
            "/seasons",
            serde_json::json!({
                "actor_role": "admin",
                "club_id": 1,
                "name": "HTTP Season",
                "best_of": 3,
                "match_deadline_days": 14,
                "reminder_days": 3,
                "requires_confirmation": true,
                "open_enrollment": true,
                "min_team_size": 1,
                "max_team_size": 1,
                "challenge_reach": 2
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let season_id: i64 = body["season_id"].as_i64().unwrap();

        let mut team_ids: Vec<i64> = Vec::new();
        for &player_id in players {
            let (status, body) = post_json(
                app,
                "/teams/enroll",
                serde_json::json!({
                    "actor_role": "player",
                    "actor_player_id": player_id,
                    "season_id": season_id,
                    "member_player_ids": [player_id]
                }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            team_ids.push(body["team_id"].as_i64().unwrap());
        }

        let (status, _) = post_json(
            app,
            "/seasons/activate",
            serde_json::json!({ "actor_role": "admin", "season_id": season_id }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        (season_id, team_ids)
    }

    #[tokio::test]
    async fn test_create_season_as_player_is_forbidden() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = post_json(
            &app,
            "/seasons",
            serde_json::json!({
                "actor_role": "player",
                "actor_player_id": 100,
                "club_id": 1,
                "name": "Nope",
                "best_of": 3,
                "match_deadline_days": 14,
                "reminder_days": 3,
                "requires_confirmation": true,
                "open_enrollment": true,
                "min_team_size": 1,
                "max_team_size": 1,
                "challenge_reach": 2
            }),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["error"].as_str().unwrap().contains("Unauthorized"));
    }

    #[tokio::test]
    async fn test_full_ladder_flow_over_http() {
        let app: Router = build_router(create_test_app_state());
        let (season_id, teams) = bootstrap_season(&app, &[100, 101, 102]).await;

        // Rank 3 challenges rank 2.
        let (status, body) = post_json(
            &app,
            "/challenges",
            serde_json::json!({
                "actor_role": "player",
                "actor_player_id": 102,
                "season_id": season_id,
                "club_id": 1,
                "challenger_team_id": teams[2],
                "challengee_team_id": teams[1],
                "challenger_player_id": 102,
                "challengee_player_id": 101,
                "text": "ladder time"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let match_id: i64 = body["match_id"].as_i64().unwrap();

        let (status, _) = post_json(
            &app,
            "/matches/enter_result",
            serde_json::json!({
                "actor_role": "player",
                "actor_player_id": 102,
                "match_id": match_id,
                "sets": [
                    { "team1": 6, "team2": 3 },
                    { "team1": 6, "team2": 4 }
                ]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post_json(
            &app,
            "/matches/confirm_result",
            serde_json::json!({
                "actor_role": "player",
                "actor_player_id": 101,
                "match_id": match_id
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["winner_team_id"].as_i64().unwrap(), teams[2]);

        let (status, body) =
            get_json(&app, &format!("/standings?season_id={season_id}")).await;
        assert_eq!(status, StatusCode::OK);
        let order: Vec<i64> = body["standings"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["team_id"].as_i64().unwrap())
            .collect();
        assert_eq!(order, vec![teams[0], teams[2], teams[1]]);
    }

    #[tokio::test]
    async fn test_double_challenge_returns_conflict() {
        let app: Router = build_router(create_test_app_state());
        let (season_id, teams) = bootstrap_season(&app, &[100, 101, 102]).await;

        let challenge = |challenger_team: i64, challenger_player: i64| {
            serde_json::json!({
                "actor_role": "player",
                "actor_player_id": challenger_player,
                "season_id": season_id,
                "club_id": 1,
                "challenger_team_id": challenger_team,
                "challengee_team_id": teams[0],
                "challenger_player_id": challenger_player,
                "challengee_player_id": 100,
                "text": null
            })
        };

        let (status, _) = post_json(&app, "/challenges", challenge(teams[1], 101)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post_json(&app, "/challenges", challenge(teams[2], 102)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("open challenge"));
    }

    #[tokio::test]
    async fn test_invalid_scores_return_bad_request() {
        let app: Router = build_router(create_test_app_state());
        let (season_id, teams) = bootstrap_season(&app, &[100, 101]).await;

        let (status, body) = post_json(
            &app,
            "/challenges",
            serde_json::json!({
                "actor_role": "player",
                "actor_player_id": 101,
                "season_id": season_id,
                "club_id": 1,
                "challenger_team_id": teams[1],
                "challengee_team_id": teams[0],
                "challenger_player_id": 101,
                "challengee_player_id": 100,
                "text": null
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let match_id: i64 = body["match_id"].as_i64().unwrap();

        let (status, body) = post_json(
            &app,
            "/matches/enter_result",
            serde_json::json!({
                "actor_role": "player",
                "actor_player_id": 101,
                "match_id": match_id,
                "sets": [ { "team1": 6, "team2": 6 } ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("tied"));
    }

    #[tokio::test]
    async fn test_unknown_match_returns_not_found() {
        let app: Router = build_router(create_test_app_state());

        let (status, _) = get_json(&app, "/matches/999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_role_is_rejected() {
        let app: Router = build_router(create_test_app_state());

        let (status, _) = post_json(
            &app,
            "/seasons/activate",
            serde_json::json!({ "actor_role": "superuser", "season_id": 1 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
