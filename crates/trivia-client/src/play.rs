//! A player's game: the session state machine plus score submission.
//!
//! [`PlaySession`] forwards every action to [`GameSession`]. When an answer
//! completes the grid and the player gave a name, the score is posted on a
//! detached Tokio task. A failed post is logged at `warn` and otherwise
//! ignored; the completed session is never touched by it. Outside a
//! runtime the submission is skipped with a `warn` log.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use trivia_core::{
    AnswerOutcome, Completion, GameSession, QuestionBank, QuestionPrompt, Rejection,
    SessionError, TileIndex,
};
use trivia_types::SubmitRequest;

use crate::api::ApiClient;

/// One player's session against a server.
pub struct PlaySession {
    session: GameSession,
    username: Option<String>,
    api: ApiClient,
    pending: Option<JoinHandle<()>>,
}

impl PlaySession {
    /// Create a session. A blank `username` plays anonymously: nothing is
    /// submitted on completion.
    pub fn new(bank: Arc<QuestionBank>, username: &str, api: ApiClient) -> Self {
        let trimmed = username.trim();
        Self {
            session: GameSession::new(bank),
            username: (!trimmed.is_empty()).then(|| trimmed.to_owned()),
            api,
            pending: None,
        }
    }

    /// The underlying state machine.
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    /// Name scores are submitted under, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Start or restart the game.
    pub fn start(&mut self, now: Instant) {
        self.session.start(now);
    }

    /// Elapsed time at `now`; frozen once complete.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.session.elapsed(now)
    }

    /// Open a tile's question.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] when the tile cannot be played.
    pub fn open_tile(&mut self, tile: TileIndex) -> Result<QuestionPrompt, Rejection> {
        self.session.open_tile(tile)
    }

    /// Current view of an open question.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] when the tile cannot be played.
    pub fn prompt(&self, tile: TileIndex) -> Result<QuestionPrompt, Rejection> {
        self.session.prompt(tile)
    }

    /// Answer a tile. A completing answer spawns the score submission on
    /// the current Tokio runtime, or skips it when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] for an out-of-range choice.
    pub fn answer(
        &mut self,
        tile: TileIndex,
        choice: usize,
        now: Instant,
    ) -> Result<AnswerOutcome, SessionError> {
        let outcome = self.session.answer(tile, choice, now)?;
        if let Some(completion) = outcome.completion() {
            self.on_complete(completion);
        }
        Ok(outcome)
    }

    /// Take the handle of the most recent submission task, if one was
    /// spawned and not yet taken.
    pub const fn take_submission(&mut self) -> Option<JoinHandle<()>> {
        self.pending.take()
    }

    fn on_complete(&mut self, completion: Completion) {
        let Some(username) = self.username.as_deref() else {
            tracing::info!(
                session = %completion.session,
                time_ms = completion.time_ms(),
                "Anonymous run complete, not submitted"
            );
            return;
        };
        let request = completion.submission(username);
        self.pending = spawn_submission(self.api.clone(), request);
    }
}

/// Post `request` on a detached task. Failures are logged, never retried.
///
/// Returns `None` without posting when called outside a Tokio runtime.
pub fn spawn_submission(api: ApiClient, request: SubmitRequest) -> Option<JoinHandle<()>> {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        tracing::warn!(
            username = %request.username,
            time_ms = request.time_ms,
            "No Tokio runtime, score not submitted"
        );
        return None;
    };
    Some(runtime.spawn(async move {
        match api.submit(&request).await {
            Ok(response) => tracing::info!(
                id = %response.id,
                username = %request.username,
                time_ms = request.time_ms,
                "Score submitted"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                username = %request.username,
                time_ms = request.time_ms,
                "Score submission failed"
            ),
        }
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use trivia_core::SessionPhase;
    use trivia_types::Question;

    use super::*;
    use crate::config::ClientConfig;

    fn bank() -> Arc<QuestionBank> {
        let questions = (0..9)
            .map(|id| Question {
                id,
                title: format!("Question {id}"),
                choices: vec![String::from("yes"), String::from("no")],
                correct_index: 0,
            })
            .collect();
        Arc::new(QuestionBank::for_grid(questions).unwrap())
    }

    #[test]
    fn completing_outside_a_runtime_skips_submission() {
        let api = ApiClient::new(&ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let mut play = PlaySession::new(bank(), "dave", api);
        let t0 = Instant::now();
        play.start(t0);

        let mut last = None;
        for tile in TileIndex::all() {
            play.open_tile(tile).unwrap();
            last = Some(play.answer(tile, 0, t0 + Duration::from_secs(1)).unwrap());
        }

        assert!(last.unwrap().completion().is_some());
        assert_eq!(play.session().phase(), SessionPhase::Completed);
        assert!(play.take_submission().is_none());
    }
}
