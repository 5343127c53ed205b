//! HTTP API server for the Trivia Grid game.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`GET /questions`** -- the authored question list, read from a
//!   JSON file on every request
//! - **`POST /submit`** -- append one attempt to the score table
//! - **`GET /leaderboard`** -- ranked full clears with an optional limit
//! - **`GET /health`** -- liveness check
//!
//! # Architecture
//!
//! Handlers are stateless apart from the shared [`AppState`], which
//! carries the `SQLite` pool and the question store. The server never
//! verifies a submitted time; it stores what the client reports.

pub mod error;
pub mod handlers;
pub mod questions;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use questions::{QuestionStore, QuestionStoreError};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, serve, start_server};
pub use startup::{StartupError, spawn_server};
pub use state::AppState;
