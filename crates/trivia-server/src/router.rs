//! Axum router construction for the game API.
//!
//! Assembles all routes into a single [`Router`] with permissive CORS so
//! a browser front end served from another origin can call it.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the game server.
///
/// The router includes:
/// - `GET /questions` -- question list
/// - `POST /submit` -- append an attempt
/// - `GET /leaderboard` -- ranked full clears
/// - `GET /health` -- liveness check
///
/// Anything else gets a JSON 404.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/questions", get(handlers::list_questions))
        .route("/submit", post(handlers::submit))
        .route("/leaderboard", get(handlers::leaderboard))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
