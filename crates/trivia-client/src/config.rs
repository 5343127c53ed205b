//! Client configuration, loaded from environment variables.

use std::time::Duration;

use crate::error::ClientError;

/// Environment variable holding the server base URL.
pub const SERVER_URL_ENV: &str = "TRIVIA_SERVER_URL";

/// Environment variable holding the per-request timeout in milliseconds.
pub const REQUEST_TIMEOUT_ENV: &str = "TRIVIA_REQUEST_TIMEOUT_MS";

/// Server used when [`SERVER_URL_ENV`] is unset.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Entries shown by the leaderboard view.
pub const LEADERBOARD_LIMIT: u32 = 10;

/// Complete client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the game server, without a trailing slash.
    pub server_url: String,
    /// Timeout applied to every request.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `server_url` with default timeouts.
    pub fn new(server_url: &str) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `TRIVIA_SERVER_URL` -- server base URL (default `http://127.0.0.1:3000`)
    /// - `TRIVIA_REQUEST_TIMEOUT_MS` -- request timeout (default 5000)
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the timeout is not an integer.
    pub fn from_env() -> Result<Self, ClientError> {
        let server_url =
            std::env::var(SERVER_URL_ENV).unwrap_or_else(|_| DEFAULT_SERVER_URL.to_owned());
        let timeout = std::env::var(REQUEST_TIMEOUT_ENV).ok();
        Self::from_values(&server_url, timeout.as_deref())
    }

    fn from_values(server_url: &str, timeout_ms: Option<&str>) -> Result<Self, ClientError> {
        let mut config = Self::new(server_url);
        if let Some(raw) = timeout_ms {
            let ms: u64 = raw.trim().parse().map_err(|e| {
                ClientError::Config(format!("invalid {REQUEST_TIMEOUT_ENV}: {e}"))
            })?;
            config.request_timeout = Duration::from_millis(ms);
        }
        Ok(config)
    }
}
