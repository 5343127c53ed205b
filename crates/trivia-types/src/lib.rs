//! Shared type definitions for the Trivia Grid game.
//!
//! This crate is the single source of truth for the records exchanged
//! between the game client and the API server. Types flow downstream to
//! `TypeScript` via `ts-rs` for the browser frontend.
//!
//! # Modules
//!
//! - [`ids`] -- Session and attempt identifiers
//! - [`structs`] -- Questions, attempt records, and endpoint payloads

pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::{AttemptId, SessionId};
pub use structs::{
    AttemptRecord, FULL_CLEAR_TILES, LeaderboardEntry, MAX_TIME_MS, Question, SubmitRequest,
    SubmitResponse,
};
