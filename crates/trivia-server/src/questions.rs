//! Question store backed by the JSON question file.
//!
//! The file is read on every request, so edits show up without a restart
//! and a missing file only fails the requests that need it. The content
//! is checked against the question invariants before being served.

use std::path::{Path, PathBuf};

use trivia_core::{QuestionBankError, validate_questions};
use trivia_types::Question;

/// Errors reading or validating the question file.
#[derive(Debug, thiserror::Error)]
pub enum QuestionStoreError {
    /// The file could not be read.
    #[error("failed to read question file {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not a JSON array of questions.
    #[error("failed to parse question file {path}: {source}")]
    Parse {
        /// Path that was read.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A question violates the record invariants.
    #[error("invalid question file: {0}")]
    Invalid(#[from] QuestionBankError),
}

/// Read-only access to the authored question list.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    /// Create a store reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every question, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionStoreError`] if the file is missing, unparsable,
    /// or holds an invalid question.
    pub async fn list_questions(&self) -> Result<Vec<Question>, QuestionStoreError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| QuestionStoreError::Read {
                path: self.path.clone(),
                source,
            })?;
        let questions: Vec<Question> =
            serde_json::from_slice(&raw).map_err(|source| QuestionStoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        validate_questions(&questions)?;
        Ok(questions)
    }
}
