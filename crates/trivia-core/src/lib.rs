//! Game logic for the Trivia Grid game.
//!
//! A 3×3 grid of locked tiles, each unlocked by answering its question.
//! This crate holds everything that does not touch the network or the
//! database, so it can be driven headlessly by tests and by any client.
//!
//! # Modules
//!
//! - [`grid`] -- Board size and the [`TileIndex`] newtype
//! - [`bank`] -- Question bank validation and tile lookup
//! - [`session`] -- The per-player game state machine
//! - [`timer`] -- Pure elapsed-time and formatting helpers
//! - [`config`] -- YAML configuration for the server

pub mod bank;
pub mod config;
pub mod grid;
pub mod session;
pub mod timer;

// Re-export primary types for convenience.
pub use bank::{QuestionBank, QuestionBankError, validate_questions};
pub use config::{ConfigError, TriviaConfig};
pub use grid::{TILE_COUNT, TileIndex};
pub use session::{
    AnswerOutcome, ChoiceView, Completion, GameSession, QuestionPrompt, Rejection, SessionError,
    SessionPhase,
};
