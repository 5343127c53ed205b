//! Score store operations: append attempts, read the ranked leaderboard.
//!
//! The `scores` table is append-only. A player may hold any number of
//! rows; nothing here updates or deletes. Only full clears
//! (`tiles_unlocked = 9`) ever reach the leaderboard.
//!
//! Timestamps are written as RFC 3339 strings with millisecond precision
//! and a `Z` suffix, so text ordering in `SQLite` equals time ordering.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use trivia_types::{AttemptId, AttemptRecord, FULL_CLEAR_TILES, LeaderboardEntry};

use crate::error::DbError;

/// Operations on the `scores` table.
pub struct ScoreStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ScoreStore<'a> {
    /// Create a new score store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Append one attempt stamped with the current server time.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::OutOfRange`] if `time_ms` exceeds the column
    /// range, or [`DbError::Sqlite`] if the insert fails.
    pub async fn submit(
        &self,
        username: &str,
        time_ms: u64,
        tiles_unlocked: u8,
    ) -> Result<AttemptId, DbError> {
        self.submit_at(username, time_ms, tiles_unlocked, Utc::now())
            .await
    }

    /// Append one attempt with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn submit_at(
        &self,
        username: &str,
        time_ms: u64,
        tiles_unlocked: u8,
        created_at: DateTime<Utc>,
    ) -> Result<AttemptId, DbError> {
        let time_ms_i64 = i64::try_from(time_ms).map_err(|e| DbError::OutOfRange {
            field: "time_ms",
            value: format!("{time_ms} ({e})"),
        })?;

        let result = sqlx::query(
            r"INSERT INTO scores (username, time_ms, tiles_unlocked, created_at)
              VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(username)
        .bind(time_ms_i64)
        .bind(i64::from(tiles_unlocked))
        .bind(format_timestamp(created_at))
        .execute(self.pool)
        .await?;

        let id = AttemptId(result.last_insert_rowid());
        tracing::debug!(%id, time_ms, tiles_unlocked, "Inserted attempt");
        Ok(id)
    }

    /// Ranked full clears: fastest first, earlier submission wins ties.
    ///
    /// Rows with equal time and timestamp fall back to insertion order.
    /// Returns every qualifying row when `limit` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails, or
    /// [`DbError::OutOfRange`] if a stored row holds a negative value.
    pub async fn leaderboard(&self, limit: Option<u32>) -> Result<Vec<LeaderboardEntry>, DbError> {
        // SQLite treats a negative LIMIT as "no limit".
        let limit_i64 = limit.map_or(-1, i64::from);
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r"SELECT username, time_ms, tiles_unlocked, created_at
              FROM scores
              WHERE tiles_unlocked = ?1
              ORDER BY time_ms ASC, created_at ASC, id ASC
              LIMIT ?2",
        )
        .bind(i64::from(FULL_CLEAR_TILES))
        .bind(limit_i64)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(LeaderboardEntry::try_from).collect()
    }

    /// Fetch a single attempt by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn get(&self, id: AttemptId) -> Result<Option<AttemptRecord>, DbError> {
        let row = sqlx::query_as::<_, ScoreRow>(
            r"SELECT id, username, time_ms, tiles_unlocked, created_at
              FROM scores
              WHERE id = ?1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        row.map(AttemptRecord::try_from).transpose()
    }

    /// Total number of stored attempts, full clears or not.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn count(&self) -> Result<u64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scores")
            .fetch_one(self.pool)
            .await?;
        non_negative("count", count)
    }
}

/// A full row from the `scores` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScoreRow {
    /// Autoincrement id.
    pub id: i64,
    /// Player name.
    pub username: String,
    /// Elapsed milliseconds.
    pub time_ms: i64,
    /// Tiles unlocked.
    pub tiles_unlocked: i64,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
}

/// The leaderboard projection of the `scores` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaderboardRow {
    /// Player name.
    pub username: String,
    /// Elapsed milliseconds.
    pub time_ms: i64,
    /// Tiles unlocked.
    pub tiles_unlocked: i64,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ScoreRow> for AttemptRecord {
    type Error = DbError;

    fn try_from(row: ScoreRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AttemptId(row.id),
            username: row.username,
            time_ms: non_negative("time_ms", row.time_ms)?,
            tiles_unlocked: tiles("tiles_unlocked", row.tiles_unlocked)?,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<LeaderboardRow> for LeaderboardEntry {
    type Error = DbError;

    fn try_from(row: LeaderboardRow) -> Result<Self, Self::Error> {
        Ok(Self {
            username: row.username,
            time_ms: non_negative("time_ms", row.time_ms)?,
            tiles_unlocked: tiles("tiles_unlocked", row.tiles_unlocked)?,
            created_at: row.created_at,
        })
    }
}

/// Render a timestamp the way it is stored (`2026-01-02T03:04:05.678Z`).
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, DbError> {
    u64::try_from(value).map_err(|e| DbError::OutOfRange {
        field,
        value: format!("{value} ({e})"),
    })
}

fn tiles(field: &'static str, value: i64) -> Result<u8, DbError> {
    u8::try_from(value).map_err(|e| DbError::OutOfRange {
        field,
        value: format!("{value} ({e})"),
    })
}
