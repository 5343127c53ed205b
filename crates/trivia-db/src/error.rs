//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] errors with additional context about which operation failed.

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `SQLite` operation failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    /// A migration failed.
    #[error("SQLite migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A value does not fit the column type.
    #[error("value out of range for {field}: {value}")]
    OutOfRange {
        /// Column being written or read.
        field: &'static str,
        /// The offending value, rendered for the message.
        value: String,
    },

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
