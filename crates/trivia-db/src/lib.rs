//! Leaderboard storage for the Trivia Grid game (`SQLite`).
//!
//! A single append-only `scores` table holds every submitted attempt.
//! The leaderboard is a filtered, ordered read of that table.
//!
//! ```text
//! POST /submit ------> ScoreStore::submit ------> INSERT INTO scores
//! GET /leaderboard --> ScoreStore::leaderboard -> SELECT ... WHERE tiles_unlocked = 9
//! ```
//!
//! # Modules
//!
//! - [`sqlite`] -- Connection pool, configuration, and migrations
//! - [`score_store`] -- Attempt inserts and leaderboard queries
//! - [`error`] -- Shared error types

pub mod error;
pub mod score_store;
pub mod sqlite;

// Re-export primary types for convenience.
pub use error::DbError;
pub use score_store::{LeaderboardRow, ScoreRow, ScoreStore, format_timestamp};
pub use sqlite::{IN_MEMORY_URL, SqliteConfig, SqliteDb};
