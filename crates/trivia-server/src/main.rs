//! Game server binary for Trivia Grid.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `trivia-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Open the `SQLite` leaderboard and apply migrations
//! 4. Check the question file (a bad file is logged, not fatal)
//! 5. Serve the API until `Ctrl-C`

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trivia_core::TriviaConfig;
use trivia_core::config::{CONFIG_FILE, LogFormat, LoggingConfig};
use trivia_db::{SqliteConfig, SqliteDb};
use trivia_server::{AppState, QuestionStore, ServerConfig, start_server};

/// Application entry point for the game server.
///
/// # Errors
///
/// Returns an error if configuration, the database, or the listener
/// cannot be set up.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let config = TriviaConfig::load_or_default(Path::new(CONFIG_FILE))
        .with_context(|| format!("loading {CONFIG_FILE}"))?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        host = config.server.host,
        port = config.server.port,
        database_url = config.storage.database_url,
        questions = %config.questions.path.display(),
        "trivia-server starting"
    );

    // 3. Open the leaderboard database.
    let db_config = SqliteConfig::new(&config.storage.database_url)
        .with_max_connections(config.storage.max_connections);
    let db = SqliteDb::connect(&db_config)
        .await
        .context("opening leaderboard database")?;
    db.run_migrations()
        .await
        .context("applying leaderboard migrations")?;
    info!("Leaderboard database ready");

    // 4. Check the question file.
    let questions = QuestionStore::new(&config.questions.path);
    let path = questions.path().display();
    match questions.list_questions().await {
        Ok(list) => info!(%path, count = list.len(), "Question file loaded"),
        Err(e) => tracing::warn!(%path, error = %e, "Question file unusable; /questions will fail"),
    }

    // 5. Serve.
    let state = Arc::new(AppState::new(db.clone(), questions));
    let result = start_server(&ServerConfig::from(&config.server), state).await;
    db.close().await;
    result.context("running HTTP server")?;

    info!("trivia-server exited cleanly");
    Ok(())
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
