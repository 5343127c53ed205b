//! Shared application state for the game API.
//!
//! [`AppState`] is wrapped in [`Arc`](std::sync::Arc) and injected via
//! Axum's `State` extractor. It holds the leaderboard pool and the
//! question store; neither needs a lock, since the pool serializes
//! writes and the question store is read-only.

use trivia_db::SqliteDb;

use crate::questions::QuestionStore;

/// Shared state for the Axum application.
#[derive(Clone)]
pub struct AppState {
    /// Leaderboard database.
    pub db: SqliteDb,
    /// Authored questions.
    pub questions: QuestionStore,
}

impl AppState {
    /// Create the application state.
    pub const fn new(db: SqliteDb, questions: QuestionStore) -> Self {
        Self { db, questions }
    }
}
