//! Error types for the game client.

use trivia_core::QuestionBankError;

/// Errors that can occur talking to the game server.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The served questions cannot fill the grid.
    #[error("question bank error: {0}")]
    Questions(#[from] QuestionBankError),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
}
