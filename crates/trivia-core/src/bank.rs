//! Question bank validation and tile lookup.
//!
//! The question file is authored by hand and handed to clients as-is, so
//! every consumer re-checks the record invariants before trusting it:
//! at least two choices, `correctIndex` inside `choices`, and unique ids.
//! A bank used to drive a game must also cover every tile on the board.

use std::collections::BTreeSet;

use trivia_types::Question;

use crate::grid::{TILE_COUNT, TileIndex};

/// Minimum number of choices a question must offer.
pub const MIN_CHOICES: usize = 2;

/// Errors describing why a set of questions is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionBankError {
    /// A question offers fewer than [`MIN_CHOICES`] choices.
    #[error("question {id} has {count} choices, at least 2 required")]
    TooFewChoices {
        /// Offending question id.
        id: u32,
        /// Number of choices found.
        count: usize,
    },

    /// A question's `correctIndex` does not point into its choices.
    #[error("question {id} has correctIndex {index} but only {count} choices")]
    CorrectIndexOutOfRange {
        /// Offending question id.
        id: u32,
        /// The out-of-range index.
        index: usize,
        /// Number of choices found.
        count: usize,
    },

    /// Two questions share an id.
    #[error("duplicate question id {id}")]
    DuplicateId {
        /// The repeated id.
        id: u32,
    },

    /// No question is bound to a tile.
    #[error("no question for tile {tile}")]
    MissingTile {
        /// The uncovered tile.
        tile: usize,
    },
}

/// Check the per-record invariants of a question list.
///
/// # Errors
///
/// Returns the first violation found, in file order.
pub fn validate_questions(questions: &[Question]) -> Result<(), QuestionBankError> {
    let mut seen = BTreeSet::new();
    for q in questions {
        let count = q.choice_count();
        if count < MIN_CHOICES {
            return Err(QuestionBankError::TooFewChoices { id: q.id, count });
        }
        if q.correct_index >= count {
            return Err(QuestionBankError::CorrectIndexOutOfRange {
                id: q.id,
                index: q.correct_index,
                count,
            });
        }
        if !seen.insert(q.id) {
            return Err(QuestionBankError::DuplicateId { id: q.id });
        }
    }
    Ok(())
}

/// A validated, immutable list of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Validate and wrap a question list, keeping file order.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionBankError`] if any record invariant is violated.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        validate_questions(&questions)?;
        Ok(Self { questions })
    }

    /// Validate a question list and require one question per tile.
    ///
    /// Extra questions whose id is off the board are kept but never asked.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionBankError::MissingTile`] for the first uncovered
    /// tile, or any record-level violation.
    pub fn for_grid(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        let bank = Self::new(questions)?;
        if let Some(tile) = TileIndex::all().find(|t| bank.question_for_tile(*t).is_none()) {
            return Err(QuestionBankError::MissingTile { tile: tile.get() });
        }
        tracing::debug!(
            questions = bank.len(),
            tiles = TILE_COUNT,
            "Question bank covers the grid"
        );
        Ok(bank)
    }

    /// The question bound to `tile`, matched by id.
    pub fn question_for_tile(&self, tile: TileIndex) -> Option<&Question> {
        self.questions
            .iter()
            .find(|q| usize::try_from(q.id).is_ok_and(|id| id == tile.get()))
    }

    /// All questions in file order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the bank holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn question(id: u32, correct_index: usize) -> Question {
        Question {
            id,
            title: format!("Question {id}"),
            choices: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
            correct_index,
        }
    }

    fn full_set() -> Vec<Question> {
        (0..9).map(|id| question(id, 1)).collect()
    }

    #[test]
    fn full_set_covers_grid() {
        let bank = QuestionBank::for_grid(full_set()).unwrap();
        assert_eq!(bank.len(), 9);
        let tile = TileIndex::new(4).unwrap();
        assert_eq!(bank.question_for_tile(tile).map(|q| q.id), Some(4));
    }

    #[test]
    fn lookup_matches_by_id_not_position() {
        let mut qs = full_set();
        qs.reverse();
        let bank = QuestionBank::for_grid(qs).unwrap();
        let tile = TileIndex::new(0).unwrap();
        assert_eq!(bank.question_for_tile(tile).map(|q| q.id), Some(0));
        assert_eq!(bank.questions().first().map(|q| q.id), Some(8));
    }

    #[test]
    fn rejects_single_choice() {
        let mut qs = full_set();
        qs[2].choices = vec!["only".to_owned()];
        qs[2].correct_index = 0;
        assert_eq!(
            QuestionBank::new(qs),
            Err(QuestionBankError::TooFewChoices { id: 2, count: 1 })
        );
    }

    #[test]
    fn rejects_correct_index_out_of_range() {
        let mut qs = full_set();
        qs[3].correct_index = 3;
        assert_eq!(
            QuestionBank::new(qs),
            Err(QuestionBankError::CorrectIndexOutOfRange {
                id: 3,
                index: 3,
                count: 3
            })
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut qs = full_set();
        qs.push(question(5, 0));
        assert_eq!(
            QuestionBank::new(qs),
            Err(QuestionBankError::DuplicateId { id: 5 })
        );
    }

    #[test]
    fn grid_requires_every_tile() {
        let qs: Vec<Question> = full_set().into_iter().filter(|q| q.id != 7).collect();
        assert!(QuestionBank::new(qs.clone()).is_ok());
        assert_eq!(
            QuestionBank::for_grid(qs),
            Err(QuestionBankError::MissingTile { tile: 7 })
        );
    }
}
