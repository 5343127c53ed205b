//! `SQLite` connection pool and configuration.
//!
//! The leaderboard lives in a single `SQLite` file next to the server.
//! Uses [`sqlx`] with runtime query construction (not compile-time checked)
//! so no live database is needed at build time. All queries are
//! parameterized.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::DbError;

/// URL of a private in-memory database.
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Default maximum number of connections in the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default connection timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Configuration for the `SQLite` connection pool.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// `SQLite` connection URL.
    ///
    /// Format: `sqlite://path/to/file.sqlite?mode=rwc` or `sqlite::memory:`
    pub url: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl SqliteConfig {
    /// Create a new configuration from a database URL.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Configuration for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_URL)
    }

    /// Set the maximum number of connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Whether the URL points at an in-memory database.
    ///
    /// Every connection to `:memory:` opens its own empty database, so
    /// in-memory pools are pinned to one connection that is never recycled.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Connection pool handle to the leaderboard database.
#[derive(Clone)]
pub struct SqliteDb {
    pool: SqlitePool,
}

impl SqliteDb {
    /// Connect to `SQLite` using the provided configuration, creating the
    /// database file if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the connection fails.
    /// Returns [`DbError::Config`] if the URL cannot be parsed.
    pub async fn connect(config: &SqliteConfig) -> Result<Self, DbError> {
        let mut connect_options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DbError::Config(format!("Invalid database URL: {e}")))?
            .create_if_missing(true);

        let in_memory = config.is_in_memory();
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options
            .acquire_timeout(config.connect_timeout)
            .connect_with(connect_options)
            .await?;

        tracing::info!(
            in_memory,
            max_connections = config.max_connections,
            "Connected to SQLite"
        );

        Ok(Self { pool })
    }

    /// Open a fresh in-memory database with migrations applied.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the connection or a migration fails.
    pub async fn in_memory() -> Result<Self, DbError> {
        let db = Self::connect(&SqliteConfig::in_memory()).await?;
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run all pending migrations from the `migrations/` directory.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Migration`] if any migration fails.
    pub async fn run_migrations(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Return a reference to the underlying [`SqlitePool`].
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all connections in the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("SQLite pool closed");
    }
}
