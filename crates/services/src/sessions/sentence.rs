use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use lingua_core::model::{
    PracticeRecord, PracticeTarget, SentenceQuestion, SessionConfig, SessionEndReport,
    SessionKind, SessionScore, SkillLevel,
};
use lingua_core::{Clock, ValidationError};

use super::progress::{AnswerFeedback, SessionProgress, SessionResults};
use super::ticker::ElapsedTicker;
use super::tracking::SessionTracker;
use crate::api::PracticeApi;
use crate::error::SessionError;

/// Sentences per translation session.
pub const SENTENCE_QUESTION_COUNT: usize = 5;

/// Difficulty requested for generated sentences.
pub const SENTENCE_DIFFICULTY: SkillLevel = SkillLevel::Beginner;

/// Shown when a sentence could not be generated.
pub const SENTENCE_FETCH_FAILED: &str = "Failed to generate sentence. Please try again.";

/// Enter submits; Shift+Enter does not.
#[must_use]
pub fn is_submit_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePrompt {
    pub sentence: String,
    pub number: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceState {
    /// Waiting for the server to generate question `number`.
    Fetching {
        number: usize,
        total: usize,
    },
    /// Left only through [`SentenceEvent::Retry`].
    FetchFailed {
        message: String,
    },
    Question(SentencePrompt),
    Feedback(AnswerFeedback),
    Results(SessionResults),
}

impl SentenceState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SentenceState::Fetching { .. } => "fetching",
            SentenceState::FetchFailed { .. } => "failed to fetch",
            SentenceState::Question(_) => "asking",
            SentenceState::Feedback(_) => "showing feedback",
            SentenceState::Results(_) => "finished",
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SentenceState::FetchFailed { .. } | SentenceState::Results(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceEvent {
    Submit(String),
    Next,
    /// Restarts after a failed fetch.
    Retry,
    PracticeAgain,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Free-text translation quiz; one generated sentence per round, scored by the server.
pub struct SentenceSession {
    api: Arc<dyn PracticeApi>,
    config: SessionConfig,
    clock: Clock,
    total_questions: usize,
    difficulty: SkillLevel,
    current: Option<SentenceQuestion>,
    current_index: usize,
    score: SessionScore,
    started_at: DateTime<Utc>,
    ticker: ElapsedTicker,
    tracker: SessionTracker,
    state: SentenceState,
}

impl SentenceSession {
    #[must_use]
    pub fn new(api: Arc<dyn PracticeApi>, config: SessionConfig) -> Self {
        let clock = Clock::default_clock();
        Self {
            tracker: SessionTracker::new(Arc::clone(&api)),
            api,
            config,
            clock,
            total_questions: SENTENCE_QUESTION_COUNT,
            difficulty: SENTENCE_DIFFICULTY,
            current: None,
            current_index: 0,
            score: SessionScore::new(),
            started_at: clock.now(),
            ticker: ElapsedTicker::new(),
            state: SentenceState::Fetching {
                number: 1,
                total: SENTENCE_QUESTION_COUNT,
            },
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self.started_at = clock.now();
        self
    }

    /// # Errors
    ///
    /// Returns `ValidationError::ZeroQuestions` for an empty session.
    pub fn with_total_questions(mut self, total: usize) -> Result<Self, ValidationError> {
        if total == 0 {
            return Err(ValidationError::ZeroQuestions);
        }
        self.total_questions = total;
        self.state = SentenceState::Fetching { number: 1, total };
        Ok(self)
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: SkillLevel) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn state(&self) -> &SentenceState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn score(&self) -> SessionScore {
        self.score
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            number: (self.current_index + 1).min(self.total_questions),
            total: self.total_questions,
            score: self.score.score(),
            answered: self.score.total_answered(),
        }
    }

    #[must_use]
    pub fn elapsed_updates(&self) -> watch::Receiver<u64> {
        self.ticker.subscribe()
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.ticker.seconds()
    }

    pub async fn flush_tracking(&mut self) {
        self.tracker.flush().await;
    }

    /// Resets the session and fetches the first sentence.
    pub async fn start(&mut self) {
        self.current_index = 0;
        self.score = SessionScore::new();
        self.current = None;
        self.started_at = self.clock.now();
        self.ticker.start();
        self.fetch_current().await;
    }

    /// Submits a translation for the sentence on screen.
    ///
    /// Scoring failures count as incorrect answers and are only logged.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Validation` for a blank answer, without contacting
    /// the server or changing state, and `SessionError::InvalidTransition`
    /// when no sentence is on screen.
    pub async fn submit(&mut self, answer: &str) -> Result<AnswerFeedback, SessionError> {
        if !matches!(self.state, SentenceState::Question(_)) {
            return Err(self.invalid("submit a translation"));
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ValidationError::EmptyAnswer.into());
        }
        let Some(question) = self.current.clone() else {
            return Err(self.invalid("submit a translation"));
        };

        let is_correct = match self
            .api
            .score_translation(answer, &question.translation)
            .await
        {
            Ok(is_correct) => is_correct,
            Err(err) => {
                log::warn!(
                    "scoring failed for session {}, counting as incorrect: {err}",
                    self.config.session_id
                );
                false
            }
        };
        self.score.record(is_correct);

        let feedback = AnswerFeedback {
            is_correct,
            user_answer: answer.to_string(),
            correct_answer: question.translation,
        };
        self.tracker.record(PracticeRecord {
            session_id: self.config.session_id,
            target: PracticeTarget::Sentence(question.sentence_id),
            user_answer: feedback.user_answer.clone(),
            correct_answer: feedback.correct_answer.clone(),
            is_correct,
            response_time_ms: self.clock.millis_since(self.started_at),
        });

        self.state = SentenceState::Feedback(feedback.clone());
        Ok(feedback)
    }

    /// Fetches the next sentence, or shows the results after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless feedback is showing.
    pub async fn next(&mut self) -> Result<(), SessionError> {
        if !matches!(self.state, SentenceState::Feedback(_)) {
            return Err(self.invalid("advance"));
        }
        self.current_index += 1;
        if self.current_index == self.total_questions {
            self.finish();
        } else {
            self.fetch_current().await;
        }
        Ok(())
    }

    /// Restarts the session after a failed fetch.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the fetch failed.
    pub async fn retry(&mut self) -> Result<(), SessionError> {
        if !matches!(self.state, SentenceState::FetchFailed { .. }) {
            return Err(self.invalid("retry"));
        }
        self.start().await;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` before the results are shown.
    pub async fn practice_again(&mut self) -> Result<(), SessionError> {
        if !matches!(self.state, SentenceState::Results(_)) {
            return Err(self.invalid("practice again"));
        }
        self.start().await;
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates the error of the operation the event maps to.
    pub async fn handle(&mut self, event: SentenceEvent) -> Result<(), SessionError> {
        match event {
            SentenceEvent::Submit(answer) => self.submit(&answer).await.map(|_| ()),
            SentenceEvent::Next => self.next().await,
            SentenceEvent::Retry => self.retry().await,
            SentenceEvent::PracticeAgain => self.practice_again().await,
        }
    }

    async fn fetch_current(&mut self) {
        let number = self.current_index + 1;
        let total = self.total_questions;
        self.state = SentenceState::Fetching { number, total };

        match self
            .api
            .generate_sentence(self.config.language_id, self.difficulty)
            .await
        {
            Ok(question) => {
                self.state = SentenceState::Question(SentencePrompt {
                    sentence: question.sentence.clone(),
                    number,
                    total,
                });
                self.current = Some(question);
            }
            Err(err) => {
                log::error!(
                    "failed to generate sentence {number} for session {}: {err}",
                    self.config.session_id
                );
                self.ticker.stop();
                self.current = None;
                self.state = SentenceState::FetchFailed {
                    message: SENTENCE_FETCH_FAILED.to_string(),
                };
            }
        }
    }

    fn finish(&mut self) {
        self.ticker.stop();
        let elapsed = self.clock.secs_since(self.started_at);
        let total_questions = u32::try_from(self.total_questions).unwrap_or(u32::MAX);
        self.tracker.end_session(SessionEndReport::new(
            SessionKind::Sentences,
            self.config.session_id,
            self.score,
            total_questions,
        ));
        log::debug!(
            "session {} finished with {}/{}",
            self.config.session_id,
            self.score.score(),
            self.score.total_answered()
        );
        self.current = None;
        self.state = SentenceState::Results(SessionResults::new(self.score, elapsed));
    }

    fn invalid(&self, event: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            event,
            state: self.state.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Endpoint, InMemoryPracticeApi};
    use lingua_core::model::{LanguageId, SessionId};
    use lingua_core::time::fixed_clock;

    const FRENCH: LanguageId = LanguageId::new(2);

    fn api() -> InMemoryPracticeApi {
        let api = InMemoryPracticeApi::new();
        api.queue_sentence(FRENCH, "Le chat dort.", "The cat sleeps.");
        api.queue_sentence(FRENCH, "Il pleut.", "It is raining.");
        api
    }

    fn session(api: &InMemoryPracticeApi) -> SentenceSession {
        SentenceSession::new(
            Arc::new(api.clone()),
            SessionConfig::new(SessionId::new(11), FRENCH, "French"),
        )
        .with_clock(fixed_clock())
    }

    #[test]
    fn only_plain_enter_submits() {
        assert!(is_submit_key("Enter", false));
        assert!(!is_submit_key("Enter", true));
        assert!(!is_submit_key("a", false));
    }

    #[test]
    fn zero_questions_is_rejected() {
        let api = api();
        assert!(matches!(
            session(&api).with_total_questions(0),
            Err(ValidationError::ZeroQuestions)
        ));
    }

    #[tokio::test]
    async fn blank_submission_is_local() {
        let api = api();
        let mut session = session(&api);
        session.start().await;
        let before = session.state().clone();

        let err = session.submit("   ").await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::EmptyAnswer)
        ));
        assert_eq!(session.state(), &before);
        assert_eq!(api.calls(Endpoint::ScoreTranslation), 0);
        assert_eq!(session.score().total_answered(), 0);
    }

    #[tokio::test]
    async fn feedback_always_shows_translation() {
        let api = api();
        let mut session = session(&api);
        session.start().await;

        let feedback = session.submit("the cat sleeps.").await.unwrap();
        assert!(feedback.is_correct);
        assert_eq!(feedback.correct_answer, "The cat sleeps.");
    }

    #[tokio::test]
    async fn scoring_failure_counts_as_incorrect() {
        let api = api();
        api.reject(Endpoint::ScoreTranslation, "model offline");
        let mut session = session(&api);
        session.start().await;

        let feedback = session.submit("The cat sleeps.").await.unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(session.score().total_answered(), 1);
        assert_eq!(session.score().score(), 0);
    }

    #[tokio::test]
    async fn fetch_failure_waits_for_retry() {
        let api = api();
        api.fail(Endpoint::GenerateSentence);
        let mut session = session(&api);
        session.start().await;
        assert_eq!(
            session.state(),
            &SentenceState::FetchFailed {
                message: SENTENCE_FETCH_FAILED.to_string()
            }
        );
        assert!(session.state().is_terminal());
        assert_eq!(api.calls(Endpoint::GenerateSentence), 1);

        api.recover(Endpoint::GenerateSentence);
        session.handle(SentenceEvent::Retry).await.unwrap();
        assert!(matches!(session.state(), SentenceState::Question(_)));
        assert_eq!(api.calls(Endpoint::GenerateSentence), 2);
    }

    #[tokio::test]
    async fn five_rounds_then_results() {
        let api = api();
        let mut session = session(&api);
        session.start().await;

        for round in 1..=SENTENCE_QUESTION_COUNT {
            assert_eq!(session.progress().number, round);
            let answer = if round % 2 == 1 { "the cat sleeps." } else { "nope" };
            session
                .handle(SentenceEvent::Submit(answer.to_string()))
                .await
                .unwrap();
            session.handle(SentenceEvent::Next).await.unwrap();
        }

        let SentenceState::Results(results) = session.state().clone() else {
            panic!("expected results, got {:?}", session.state());
        };
        assert_eq!(results.total_answered, 5);
        assert_eq!(results.score, 3);
        assert_eq!(results.accuracy, 60);
        assert_eq!(api.calls(Endpoint::GenerateSentence), 5);

        session.flush_tracking().await;
        let reports = api.end_reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].sentences_practiced, 5);
        assert_eq!(reports[0].words_practiced, 0);
        assert_eq!(reports[0].total_questions, 5);
        assert!(
            api.records()
                .iter()
                .all(|record| matches!(record.target, PracticeTarget::Sentence(Some(_))))
        );
    }
}
