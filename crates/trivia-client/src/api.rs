//! HTTP client for the game API.
//!
//! Thin wrapper over [`reqwest::Client`]: one method per endpoint, non-2xx
//! statuses turned into [`ClientError::Status`] with the body text kept for
//! the log line.

use serde::de::DeserializeOwned;
use trivia_types::{LeaderboardEntry, Question, SubmitRequest, SubmitResponse};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Client for the game server. Cheap to clone; clones share one
/// connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("HTTP client build failed: {e}")))?;
        Ok(Self {
            client,
            base_url: config.server_url.clone(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every question.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn questions(&self) -> Result<Vec<Question>, ClientError> {
        let response = self
            .client
            .get(format!("{}/questions", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::Http(format!("GET /questions: {e}")))?;
        decode(response).await
    }

    /// Submit one attempt.
    ///
    /// # Errors
    ///
    /// Same as [`Self::questions`].
    pub async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse, ClientError> {
        let response = self
            .client
            .post(format!("{}/submit", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Http(format!("POST /submit: {e}")))?;
        decode(response).await
    }

    /// Fetch the leaderboard, optionally capped at `limit` entries.
    ///
    /// # Errors
    ///
    /// Same as [`Self::questions`].
    pub async fn leaderboard(&self, limit: Option<u32>) -> Result<Vec<LeaderboardEntry>, ClientError> {
        let mut request = self.client.get(format!("{}/leaderboard", self.base_url));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Http(format!("GET /leaderboard: {e}")))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}
