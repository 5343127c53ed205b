//! Game session state machine.
//!
//! A [`GameSession`] tracks one player's run through the grid:
//!
//! ```text
//! NotStarted --start--> Running --9th tile unlocked--> Completed
//!                          ^  |
//!                          +--+ answer (correct or incorrect)
//! ```
//!
//! Every session is an explicit value, so any number of sessions can run
//! side by side (tabs, terminal clients, tests) without sharing state.
//!
//! # Question instances
//!
//! Opening a tile with [`GameSession::open_tile`] starts a fresh question
//! instance: all choices are selectable again. A wrong answer disables
//! that choice for the rest of the instance only. If every choice of an
//! instance gets disabled, the tile stays locked until it is reopened.
//!
//! # Time
//!
//! The session never reads a clock. `start` and `answer` take the current
//! [`Instant`], and [`GameSession::elapsed`] is a pure function of the
//! captured start and the `now` it is given.

use std::sync::Arc;
use std::time::{Duration, Instant};

use trivia_types::{FULL_CLEAR_TILES, SessionId, SubmitRequest};

use crate::bank::QuestionBank;
use crate::grid::{TILE_COUNT, TileIndex};
use crate::timer::{duration_to_millis, elapsed_between};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the player to press start.
    NotStarted,
    /// Timer running, tiles being answered.
    Running,
    /// All tiles unlocked; elapsed time is frozen.
    Completed,
}

/// Why a player action was refused.
///
/// Rejections are normal game feedback, not failures. The messages are
/// written to be shown to the player as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The session has not been started yet.
    #[error("Press Start Game first.")]
    NotStarted,
    /// The session is already complete.
    #[error("All tiles are unlocked. Start a new game to play again.")]
    SessionCompleted,
    /// The tile was already unlocked.
    #[error("That tile is already unlocked.")]
    AlreadyUnlocked,
    /// The choice was already answered wrongly in this question instance.
    #[error("That choice was already tried.")]
    ChoiceDisabled,
    /// The question bank has no question for the tile.
    #[error("Question not found.")]
    QuestionMissing,
}

/// Caller bugs: indices outside the board or the question's choices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Tile index is not on the board.
    #[error("tile index {index} is off the board (0..9)")]
    TileOutOfRange {
        /// The offending index.
        index: usize,
    },

    /// Choice index is not one of the question's choices.
    #[error("choice {choice} is out of range for tile {tile} ({count} choices)")]
    ChoiceOutOfRange {
        /// Tile being answered.
        tile: usize,
        /// The offending choice index.
        choice: usize,
        /// Number of choices the question offers.
        count: usize,
    },
}

/// The final result of a full clear, reported exactly once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Session that completed.
    pub session: SessionId,
    /// Frozen elapsed time from start to the ninth unlock.
    pub elapsed: Duration,
}

impl Completion {
    /// Elapsed time in whole milliseconds.
    pub fn time_ms(&self) -> u64 {
        duration_to_millis(self.elapsed)
    }

    /// The leaderboard payload for this completion.
    pub fn submission(&self, username: &str) -> SubmitRequest {
        SubmitRequest::full_clear(username, self.time_ms())
    }
}

/// Result of [`GameSession::answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The choice was correct and the tile is now unlocked.
    Correct {
        /// The unlocked tile.
        tile: TileIndex,
        /// Tiles unlocked so far, including this one.
        tiles_unlocked: u8,
        /// Present only on the answer that unlocked the last tile.
        completion: Option<Completion>,
    },
    /// The choice was wrong and is now disabled for this question instance.
    Incorrect {
        /// The tile being answered.
        tile: TileIndex,
        /// The disabled choice.
        choice: usize,
        /// Choices still selectable in this instance.
        remaining: usize,
    },
    /// The action was refused; state is unchanged.
    Rejected(Rejection),
}

impl AnswerOutcome {
    /// Whether the answer was applied to the session.
    pub const fn accepted(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    /// Whether the answer was the correct choice.
    pub const fn correct(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }

    /// The completion carried by this outcome, if it finished the run.
    pub const fn completion(&self) -> Option<Completion> {
        match self {
            Self::Correct { completion, .. } => *completion,
            Self::Incorrect { .. } | Self::Rejected(_) => None,
        }
    }
}

/// One selectable answer in a [`QuestionPrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    /// Index to pass back to [`GameSession::answer`].
    pub index: usize,
    /// Display text.
    pub text: String,
    /// Whether this choice was already answered wrongly.
    pub disabled: bool,
}

/// What the presentation layer shows when a tile is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPrompt {
    /// Tile being answered.
    pub tile: TileIndex,
    /// Question text.
    pub title: String,
    /// Choices in question order.
    pub choices: Vec<ChoiceView>,
}

/// One player's run through the grid.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    bank: Arc<QuestionBank>,
    phase: SessionPhase,
    unlocked: [bool; TILE_COUNT],
    tiles_unlocked: u8,
    /// Wrongly answered choices of the current question instance, per tile.
    disabled: [Vec<bool>; TILE_COUNT],
    started_at: Option<Instant>,
    final_elapsed: Option<Duration>,
}

impl GameSession {
    /// Create a session over a question bank. The session starts in
    /// [`SessionPhase::NotStarted`].
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            id: SessionId::new(),
            bank,
            phase: SessionPhase::NotStarted,
            unlocked: [false; TILE_COUNT],
            tiles_unlocked: 0,
            disabled: std::array::from_fn(|_| Vec::new()),
            started_at: None,
            final_elapsed: None,
        }
    }

    /// Resolve a raw tile index.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::TileOutOfRange`] for indices off the board.
    pub fn tile(index: usize) -> Result<TileIndex, SessionError> {
        TileIndex::new(index).ok_or(SessionError::TileOutOfRange { index })
    }

    /// Session identifier (for log correlation).
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The question bank this session draws from.
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Unlock flags for every tile in board order.
    pub const fn unlocked(&self) -> &[bool; TILE_COUNT] {
        &self.unlocked
    }

    /// Whether `tile` is unlocked.
    pub fn is_unlocked(&self, tile: TileIndex) -> bool {
        self.unlocked.get(tile.get()).copied().unwrap_or(false)
    }

    /// Number of unlocked tiles. Always equals the `true` count in
    /// [`Self::unlocked`].
    pub const fn tiles_unlocked(&self) -> u8 {
        self.tiles_unlocked
    }

    /// The completion of this run, once every tile is unlocked.
    pub fn completion(&self) -> Option<Completion> {
        self.final_elapsed.map(|elapsed| Completion {
            session: self.id,
            elapsed,
        })
    }

    /// Start (or restart) the run at `now`.
    ///
    /// Clears all unlocks, disabled choices, and any previous completion.
    pub fn start(&mut self, now: Instant) {
        self.phase = SessionPhase::Running;
        self.unlocked = [false; TILE_COUNT];
        self.tiles_unlocked = 0;
        for choices in &mut self.disabled {
            choices.clear();
        }
        self.started_at = Some(now);
        self.final_elapsed = None;
        tracing::info!(session = %self.id, "Game session started");
    }

    /// Time elapsed since start, as of `now`.
    ///
    /// Zero before start; frozen at the final time after completion.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.phase, self.started_at, self.final_elapsed) {
            (SessionPhase::Completed, _, Some(frozen)) => frozen,
            (_, Some(start), _) => elapsed_between(start, now),
            _ => Duration::ZERO,
        }
    }

    /// Open the question for `tile`, starting a new question instance.
    ///
    /// All of the question's choices become selectable again.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if the session is not running, the tile
    /// is already unlocked, or no question is bound to it.
    pub fn open_tile(&mut self, tile: TileIndex) -> Result<QuestionPrompt, Rejection> {
        self.check_answerable(tile)?;
        let question = self
            .bank
            .question_for_tile(tile)
            .ok_or(Rejection::QuestionMissing)?;
        let count = question.choice_count();
        let title = question.title.clone();
        let texts = question.choices.clone();

        if let Some(slot) = self.disabled.get_mut(tile.get()) {
            *slot = vec![false; count];
        }

        Ok(QuestionPrompt {
            tile,
            title,
            choices: texts
                .into_iter()
                .enumerate()
                .map(|(index, text)| ChoiceView {
                    index,
                    text,
                    disabled: false,
                })
                .collect(),
        })
    }

    /// Re-render the current question instance of `tile`, keeping its
    /// disabled choices.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::open_tile`].
    pub fn prompt(&self, tile: TileIndex) -> Result<QuestionPrompt, Rejection> {
        self.check_answerable(tile)?;
        let question = self
            .bank
            .question_for_tile(tile)
            .ok_or(Rejection::QuestionMissing)?;
        let disabled = self.disabled.get(tile.get());

        Ok(QuestionPrompt {
            tile,
            title: question.title.clone(),
            choices: question
                .choices
                .iter()
                .enumerate()
                .map(|(index, text)| ChoiceView {
                    index,
                    text: text.clone(),
                    disabled: disabled
                        .and_then(|d| d.get(index))
                        .copied()
                        .unwrap_or(false),
                })
                .collect(),
        })
    }

    /// Number of choices of `tile`'s current instance not yet disabled.
    pub fn remaining_choices(&self, tile: TileIndex) -> usize {
        let count = self
            .bank
            .question_for_tile(tile)
            .map_or(0, trivia_types::Question::choice_count);
        let disabled = self
            .disabled
            .get(tile.get())
            .map_or(0, |d| d.iter().filter(|off| **off).count());
        count.saturating_sub(disabled)
    }

    /// Answer `tile` with `choice` at `now`.
    ///
    /// Answering a tile that was never opened implicitly opens it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ChoiceOutOfRange`] if `choice` is not one of
    /// the question's choices. Refused actions are reported as
    /// [`AnswerOutcome::Rejected`], not as errors.
    pub fn answer(
        &mut self,
        tile: TileIndex,
        choice: usize,
        now: Instant,
    ) -> Result<AnswerOutcome, SessionError> {
        if let Err(rejection) = self.check_answerable(tile) {
            return Ok(AnswerOutcome::Rejected(rejection));
        }
        let Some(question) = self.bank.question_for_tile(tile) else {
            return Ok(AnswerOutcome::Rejected(Rejection::QuestionMissing));
        };
        let count = question.choice_count();
        if choice >= count {
            return Err(SessionError::ChoiceOutOfRange {
                tile: tile.get(),
                choice,
                count,
            });
        }
        let correct = question.is_correct(choice);

        let Some(disabled) = self.disabled.get_mut(tile.get()) else {
            return Err(SessionError::TileOutOfRange { index: tile.get() });
        };
        if disabled.len() != count {
            *disabled = vec![false; count];
        }
        if disabled.get(choice).copied().unwrap_or(false) {
            return Ok(AnswerOutcome::Rejected(Rejection::ChoiceDisabled));
        }

        if !correct {
            if let Some(slot) = disabled.get_mut(choice) {
                *slot = true;
            }
            let remaining = disabled.iter().filter(|off| !**off).count();
            tracing::debug!(session = %self.id, %tile, choice, remaining, "Incorrect answer");
            return Ok(AnswerOutcome::Incorrect {
                tile,
                choice,
                remaining,
            });
        }

        disabled.clear();
        if let Some(slot) = self.unlocked.get_mut(tile.get()) {
            *slot = true;
        }
        self.tiles_unlocked = self.tiles_unlocked.saturating_add(1);

        let completion = if self.tiles_unlocked >= FULL_CLEAR_TILES {
            Some(self.complete(now))
        } else {
            None
        };

        tracing::debug!(
            session = %self.id,
            %tile,
            tiles_unlocked = self.tiles_unlocked,
            "Tile unlocked"
        );

        Ok(AnswerOutcome::Correct {
            tile,
            tiles_unlocked: self.tiles_unlocked,
            completion,
        })
    }

    /// Running → Completed. Only reachable from the answer that unlocks
    /// the last tile, because a completed session rejects all answers.
    fn complete(&mut self, now: Instant) -> Completion {
        let elapsed = self
            .started_at
            .map_or(Duration::ZERO, |start| elapsed_between(start, now));
        self.phase = SessionPhase::Completed;
        self.final_elapsed = Some(elapsed);
        let completion = Completion {
            session: self.id,
            elapsed,
        };
        tracing::info!(
            session = %self.id,
            time_ms = completion.time_ms(),
            "Game session completed"
        );
        completion
    }

    fn check_answerable(&self, tile: TileIndex) -> Result<(), Rejection> {
        match self.phase {
            SessionPhase::NotStarted => Err(Rejection::NotStarted),
            SessionPhase::Completed => Err(Rejection::SessionCompleted),
            SessionPhase::Running if self.is_unlocked(tile) => Err(Rejection::AlreadyUnlocked),
            SessionPhase::Running => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use trivia_types::Question;

    use super::*;

    /// Nine questions; the correct answer of tile `i` is choice `i % 3`.
    fn bank() -> Arc<QuestionBank> {
        let questions = (0..9u32)
            .map(|id| Question {
                id,
                title: format!("Question {id}"),
                choices: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
                correct_index: usize::try_from(id % 3).unwrap(),
            })
            .collect();
        Arc::new(QuestionBank::for_grid(questions).unwrap())
    }

    fn tile(i: usize) -> TileIndex {
        TileIndex::new(i).unwrap()
    }

    fn correct_choice(i: usize) -> usize {
        i % 3
    }

    fn wrong_choice(i: usize) -> usize {
        (i + 1) % 3
    }

    fn assert_counter_consistent(session: &GameSession) {
        let count = session.unlocked().iter().filter(|u| **u).count();
        assert_eq!(usize::from(session.tiles_unlocked()), count);
    }

    #[test]
    fn new_session_is_not_started() {
        let session = GameSession::new(bank());
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert_eq!(session.tiles_unlocked(), 0);
        assert_eq!(session.elapsed(Instant::now()), Duration::ZERO);
        assert!(session.completion().is_none());
    }

    #[test]
    fn answering_before_start_is_rejected() {
        let mut session = GameSession::new(bank());
        let outcome = session.answer(tile(0), 0, Instant::now()).unwrap();
        assert_eq!(outcome, AnswerOutcome::Rejected(Rejection::NotStarted));
        assert!(!outcome.accepted());
        assert_eq!(session.open_tile(tile(0)), Err(Rejection::NotStarted));
        assert_eq!(session.tiles_unlocked(), 0);
    }

    #[test]
    fn correct_answer_unlocks_exactly_one_tile() {
        let mut session = GameSession::new(bank());
        let t0 = Instant::now();
        session.start(t0);

        let outcome = session.answer(tile(4), correct_choice(4), t0).unwrap();
        assert!(outcome.accepted());
        assert!(outcome.correct());
        assert!(session.is_unlocked(tile(4)));
        assert_eq!(session.tiles_unlocked(), 1);
        assert_counter_consistent(&session);
    }

    #[test]
    fn reanswering_unlocked_tile_has_no_effect() {
        let mut session = GameSession::new(bank());
        let t0 = Instant::now();
        session.start(t0);
        session.answer(tile(2), correct_choice(2), t0).unwrap();

        let again = session.answer(tile(2), correct_choice(2), t0).unwrap();
        assert_eq!(again, AnswerOutcome::Rejected(Rejection::AlreadyUnlocked));
        assert_eq!(session.tiles_unlocked(), 1);
        assert_eq!(session.open_tile(tile(2)), Err(Rejection::AlreadyUnlocked));
        assert_counter_consistent(&session);
    }

    #[test]
    fn incorrect_answer_disables_choice_only() {
        let mut session = GameSession::new(bank());
        let t0 = Instant::now();
        session.start(t0);
        session.open_tile(tile(0)).unwrap();

        let outcome = session.answer(tile(0), wrong_choice(0), t0).unwrap();
        assert_eq!(
            outcome,
            AnswerOutcome::Incorrect {
                tile: tile(0),
                choice: wrong_choice(0),
                remaining: 2
            }
        );
        assert!(outcome.accepted());
        assert!(!outcome.correct());
        assert!(!session.is_unlocked(tile(0)));
        assert_eq!(session.remaining_choices(tile(0)), 2);

        let prompt = session.prompt(tile(0)).unwrap();
        assert!(prompt.choices[wrong_choice(0)].disabled);
        assert!(!prompt.choices[correct_choice(0)].disabled);

        let repeat = session.answer(tile(0), wrong_choice(0), t0).unwrap();
        assert_eq!(repeat, AnswerOutcome::Rejected(Rejection::ChoiceDisabled));
        assert_counter_consistent(&session);
    }

    #[test]
    fn exhausted_choices_recover_on_reopen() {
        let questions = (0..9u32)
            .map(|id| Question {
                id,
                title: format!("Question {id}"),
                choices: vec!["x".to_owned(), "y".to_owned()],
                correct_index: 1,
            })
            .collect();
        let mut session =
            GameSession::new(Arc::new(QuestionBank::for_grid(questions).unwrap()));
        let t0 = Instant::now();
        session.start(t0);
        session.open_tile(tile(1)).unwrap();
        session.answer(tile(1), 0, t0).unwrap();
        assert_eq!(session.remaining_choices(tile(1)), 1);

        let prompt = session.open_tile(tile(1)).unwrap();
        assert!(prompt.choices.iter().all(|c| !c.disabled));
        assert_eq!(session.remaining_choices(tile(1)), 2);
    }

    #[test]
    fn choice_out_of_range_is_an_error() {
        let mut session = GameSession::new(bank());
        let t0 = Instant::now();
        session.start(t0);
        let err = session.answer(tile(0), 3, t0).unwrap_err();
        assert_eq!(
            err,
            SessionError::ChoiceOutOfRange {
                tile: 0,
                choice: 3,
                count: 3
            }
        );
        assert_eq!(
            GameSession::tile(9),
            Err(SessionError::TileOutOfRange { index: 9 })
        );
    }

    #[test]
    fn full_run_completes_exactly_once() {
        let mut session = GameSession::new(bank());
        let t0 = Instant::now();
        session.start(t0);

        // Tile 0: wrong first, then right.
        session.open_tile(tile(0)).unwrap();
        let wrong = session.answer(tile(0), wrong_choice(0), t0).unwrap();
        assert!(!wrong.correct());
        assert!(!session.is_unlocked(tile(0)));
        let right = session.answer(tile(0), correct_choice(0), t0).unwrap();
        assert!(right.correct());
        assert_eq!(session.tiles_unlocked(), 1);

        let mut completions = Vec::new();
        for i in 1..9 {
            let now = t0 + Duration::from_millis(u64::try_from(i).unwrap() * 1_000);
            session.open_tile(tile(i)).unwrap();
            let outcome = session.answer(tile(i), correct_choice(i), now).unwrap();
            assert_counter_consistent(&session);
            if i < 8 {
                assert!(outcome.completion().is_none());
                assert_eq!(session.phase(), SessionPhase::Running);
            }
            completions.extend(outcome.completion());
        }

        assert_eq!(completions.len(), 1);
        let completion = completions[0];
        assert_eq!(completion.elapsed, Duration::from_secs(8));
        assert_eq!(completion.time_ms(), 8_000);
        assert_eq!(session.phase(), SessionPhase::Completed);
        assert_eq!(session.tiles_unlocked(), 9);
        assert_eq!(session.completion(), Some(completion));

        let submission = completion.submission("alice");
        assert_eq!(submission.time_ms, 8_000);
        assert_eq!(submission.tiles_unlocked, 9);

        // Nothing can fire completion again.
        let after = session.answer(tile(0), correct_choice(0), t0).unwrap();
        assert_eq!(after, AnswerOutcome::Rejected(Rejection::SessionCompleted));
        assert_eq!(
            session.elapsed(t0 + Duration::from_secs(60)),
            Duration::from_secs(8)
        );
    }

    #[test]
    fn restart_resets_everything() {
        let mut session = GameSession::new(bank());
        let t0 = Instant::now();
        session.start(t0);
        session.answer(tile(3), correct_choice(3), t0).unwrap();
        session.answer(tile(5), wrong_choice(5), t0).unwrap();

        let t1 = t0 + Duration::from_secs(5);
        session.start(t1);
        assert_eq!(session.tiles_unlocked(), 0);
        assert!(session.unlocked().iter().all(|u| !*u));
        assert_eq!(session.remaining_choices(tile(5)), 3);
        assert_eq!(
            session.elapsed(t1 + Duration::from_millis(250)),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn sessions_are_independent() {
        let shared = bank();
        let mut a = GameSession::new(Arc::clone(&shared));
        let mut b = GameSession::new(shared);
        let t0 = Instant::now();
        a.start(t0);
        b.start(t0);
        a.answer(tile(0), correct_choice(0), t0).unwrap();

        assert_eq!(a.tiles_unlocked(), 1);
        assert_eq!(b.tiles_unlocked(), 0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn missing_question_is_reported() {
        let questions = (0..8u32)
            .map(|id| Question {
                id,
                title: String::new(),
                choices: vec!["a".to_owned(), "b".to_owned()],
                correct_index: 0,
            })
            .collect();
        let mut session = GameSession::new(Arc::new(QuestionBank::new(questions).unwrap()));
        let t0 = Instant::now();
        session.start(t0);
        assert_eq!(session.open_tile(tile(8)), Err(Rejection::QuestionMissing));
        assert_eq!(
            session.answer(tile(8), 0, t0).unwrap(),
            AnswerOutcome::Rejected(Rejection::QuestionMissing)
        );
    }
}
