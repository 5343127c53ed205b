//! Client side of the Trivia Grid game.
//!
//! - [`api`] -- `reqwest` client for the game server
//! - [`play`] -- [`PlaySession`]: the session state machine plus
//!   fire-and-forget score submission
//! - [`render`] -- plain-text views used by the `trivia-play` binary
//! - [`config`] -- environment-based configuration

pub mod api;
pub mod config;
pub mod error;
pub mod play;
pub mod render;

// Re-export primary types for convenience.
pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use play::{PlaySession, spawn_submission};
