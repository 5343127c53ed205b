//! Background server startup helper.
//!
//! Provides [`spawn_server`] which launches the game API on a background
//! Tokio task. The listener is bound before the task starts, so bind
//! failures surface to the caller and the returned address is the one
//! actually in use (useful with port `0`).
//!
//! # Usage
//!
//! ```rust,ignore
//! use trivia_server::startup::spawn_server;
//! use trivia_server::{AppState, ServerConfig};
//! use std::sync::Arc;
//!
//! let (addr, handle) = spawn_server(&ServerConfig::default(), state).await?;
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the game server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the game HTTP server on a background Tokio task.
///
/// The server runs until the Tokio runtime is shut down, the task is
/// aborted, or `Ctrl-C` is received.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the server cannot bind to the
/// requested address.
pub async fn spawn_server(
    config: &ServerConfig,
    state: Arc<AppState>,
) -> Result<(SocketAddr, JoinHandle<()>), StartupError> {
    let listener = config.bind().await?;
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("no local address: {e}")))?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::serve(listener, state).await {
            tracing::error!(error = %e, "Trivia server exited with error");
        }
    });

    tracing::info!(%addr, "Trivia server spawned on background task");

    Ok((addr, handle))
}
