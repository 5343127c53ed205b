//! REST API endpoint handlers for the game server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/questions` | Every authored question |
//! | `POST` | `/submit` | Append one attempt |
//! | `GET` | `/leaderboard` | Ranked full clears (`?limit=N`) |
//! | `GET` | `/health` | Liveness check |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::Uri;
use trivia_db::ScoreStore;
use trivia_types::{LeaderboardEntry, Question, SubmitRequest, SubmitResponse};
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /leaderboard` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct LeaderboardQuery {
    /// Maximum number of entries to return. All entries when absent.
    pub limit: Option<u32>,
}

// ---------------------------------------------------------------------------
// GET /questions
// ---------------------------------------------------------------------------

/// Return the full question list as authored.
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let questions = state.questions.list_questions().await?;
    tracing::debug!(count = questions.len(), "Serving questions");
    Ok(Json(questions))
}

// ---------------------------------------------------------------------------
// POST /submit
// ---------------------------------------------------------------------------

/// Append one attempt to the score table.
///
/// A missing or malformed body, a blank username, a negative or
/// non-integer time, or more than nine tiles are all rejected with 400
/// before anything is written.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidPayload(e.body_text()))?;
    request
        .validate()
        .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;

    let id = ScoreStore::new(state.db.pool())
        .submit(&request.username, request.time_ms, request.tiles_unlocked)
        .await?;

    tracing::info!(
        %id,
        username = %request.username,
        time_ms = request.time_ms,
        tiles_unlocked = request.tiles_unlocked,
        "Attempt recorded"
    );

    Ok(Json(SubmitResponse { ok: true, id }))
}

// ---------------------------------------------------------------------------
// GET /leaderboard
// ---------------------------------------------------------------------------

/// Ranked full clears, fastest first.
///
/// # Query Parameters
///
/// - `limit` -- non-negative integer cap on the number of entries.
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let entries = ScoreStore::new(state.db.pool())
        .leaderboard(params.limit)
        .await?;
    Ok(Json(entries))
}

// ---------------------------------------------------------------------------
// GET /health, fallback
// ---------------------------------------------------------------------------

/// Liveness check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// JSON 404 for unmatched routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_owned())
}
