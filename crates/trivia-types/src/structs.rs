//! Core data and wire structs for the Trivia Grid game.
//!
//! These are the records exchanged between the game client and the API:
//! questions (read-only, authored ahead of time), attempt records (the
//! append-only leaderboard table), and the request/response payloads of
//! the submit and leaderboard endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::{Validate, ValidationError};

use crate::ids::AttemptId;

/// Number of tiles that must be unlocked for a full clear.
pub const FULL_CLEAR_TILES: u8 = 9;

/// Largest `time_ms` the leaderboard column can hold (`i64::MAX`).
pub const MAX_TIME_MS: u64 = 9_223_372_036_854_775_807;

/// A multiple-choice question bound to one grid tile.
///
/// The question file is authored by hand, so the JSON shape uses the
/// camelCase field names of that file (`correctIndex`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Question {
    /// Unique id, equal to the index of the tile this question unlocks.
    pub id: u32,
    /// Display text of the question.
    pub title: String,
    /// Ordered answer choices (at least two).
    pub choices: Vec<String>,
    /// Index into `choices` of the correct answer.
    #[ts(type = "number")]
    pub correct_index: usize,
}

impl Question {
    /// Whether `choice` is the correct answer for this question.
    pub const fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }

    /// Number of answer choices.
    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }
}

/// One persisted attempt in the `scores` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AttemptRecord {
    /// Server-assigned id.
    pub id: AttemptId,
    /// Player name as submitted.
    pub username: String,
    /// Elapsed milliseconds for the attempt.
    #[ts(type = "number")]
    pub time_ms: u64,
    /// Tiles unlocked when the attempt was recorded (9 = full clear).
    pub tiles_unlocked: u8,
    /// Server-side insert timestamp.
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /submit`.
///
/// Type mismatches (a string `time_ms`, a negative or fractional number)
/// are rejected while deserializing; the remaining rules are checked by
/// [`Validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SubmitRequest {
    /// Player name. Must contain at least one non-whitespace character.
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    /// Elapsed milliseconds for the attempt, at most [`MAX_TIME_MS`].
    #[validate(custom(function = "validate_time_ms"))]
    #[ts(type = "number")]
    pub time_ms: u64,
    /// Tiles unlocked (0 to 9).
    #[validate(range(max = 9))]
    pub tiles_unlocked: u8,
}

impl SubmitRequest {
    /// Build the payload for a full clear.
    pub fn full_clear(username: impl Into<String>, time_ms: u64) -> Self {
        Self {
            username: username.into(),
            time_ms,
            tiles_unlocked: FULL_CLEAR_TILES,
        }
    }
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        let mut err = ValidationError::new("blank_username");
        err.message = Some("username must not be empty".into());
        return Err(err);
    }
    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
fn validate_time_ms(time_ms: u64) -> Result<(), ValidationError> {
    if time_ms > MAX_TIME_MS {
        let mut err = ValidationError::new("time_ms_out_of_range");
        err.message = Some("time_ms is too large".into());
        return Err(err);
    }
    Ok(())
}

/// Response of a successful `POST /submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SubmitResponse {
    /// Always `true` on success.
    pub ok: bool,
    /// Id of the newly inserted record.
    pub id: AttemptId,
}

/// One row of the ranked leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeaderboardEntry {
    /// Player name.
    pub username: String,
    /// Elapsed milliseconds for the full clear.
    #[ts(type = "number")]
    pub time_ms: u64,
    /// Always 9 on the leaderboard.
    pub tiles_unlocked: u8,
    /// When the attempt was recorded; earlier wins ties.
    pub created_at: DateTime<Utc>,
}

impl From<AttemptRecord> for LeaderboardEntry {
    fn from(record: AttemptRecord) -> Self {
        Self {
            username: record.username,
            time_ms: record.time_ms,
            tiles_unlocked: record.tiles_unlocked,
            created_at: record.created_at,
        }
    }
}
