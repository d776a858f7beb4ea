use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::watch;

use lingua_core::Clock;
use lingua_core::model::{
    PracticeRecord, PracticeTarget, SessionConfig, SessionEndReport, SessionKind, SessionScore,
    VocabularyQuestion,
};
use lingua_core::options::{AnswerOption, build_answer_options, shuffle};

use super::progress::{AnswerFeedback, SessionProgress, SessionResults};
use super::ticker::ElapsedTicker;
use super::tracking::SessionTracker;
use crate::api::PracticeApi;
use crate::error::SessionError;

/// Questions requested per vocabulary session.
pub const VOCABULARY_QUESTION_COUNT: usize = 10;

/// Shown when the question batch could not be loaded.
pub const VOCABULARY_LOAD_FAILED: &str = "Failed to load vocabulary questions";

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// The word on screen and its four answer options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyPrompt {
    pub word: String,
    pub options: Vec<AnswerOption>,
    /// 1-based position in the session.
    pub number: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularyState {
    Loading,
    /// The server had no vocabulary for this language.
    Unavailable,
    LoadFailed {
        message: String,
    },
    Question(VocabularyPrompt),
    Feedback(AnswerFeedback),
    Results(SessionResults),
}

impl VocabularyState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            VocabularyState::Loading => "loading",
            VocabularyState::Unavailable => "unavailable",
            VocabularyState::LoadFailed { .. } => "failed to load",
            VocabularyState::Question(_) => "asking",
            VocabularyState::Feedback(_) => "showing feedback",
            VocabularyState::Results(_) => "finished",
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            VocabularyState::Unavailable
                | VocabularyState::LoadFailed { .. }
                | VocabularyState::Results(_)
        )
    }
}

/// User input accepted by a vocabulary session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyEvent {
    /// Index into the options of the current prompt.
    Select(usize),
    Next,
    PracticeAgain,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Multiple-choice quiz over a batch of vocabulary loaded up front.
///
/// `Loading -> Question -> Feedback -> Question -> ... -> Results`, or one of the
/// terminal load states when the batch is empty or could not be fetched.
pub struct VocabularySession {
    api: Arc<dyn PracticeApi>,
    config: SessionConfig,
    clock: Clock,
    rng: StdRng,
    question_limit: usize,
    questions: Vec<VocabularyQuestion>,
    current_index: usize,
    score: SessionScore,
    started_at: DateTime<Utc>,
    ticker: ElapsedTicker,
    tracker: SessionTracker,
    state: VocabularyState,
}

impl VocabularySession {
    #[must_use]
    pub fn new(api: Arc<dyn PracticeApi>, config: SessionConfig) -> Self {
        let clock = Clock::default_clock();
        Self {
            tracker: SessionTracker::new(Arc::clone(&api)),
            api,
            config,
            clock,
            rng: StdRng::from_os_rng(),
            question_limit: VOCABULARY_QUESTION_COUNT,
            questions: Vec::new(),
            current_index: 0,
            score: SessionScore::new(),
            started_at: clock.now(),
            ticker: ElapsedTicker::new(),
            state: VocabularyState::Loading,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self.started_at = clock.now();
        self
    }

    #[must_use]
    pub fn with_question_limit(mut self, limit: usize) -> Self {
        self.question_limit = limit;
        self
    }

    /// Makes shuffles deterministic.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn state(&self) -> &VocabularyState {
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

    /// 0-based index of the current question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Size of the loaded batch.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.total_questions();
        SessionProgress {
            number: (self.current_index + 1).min(total),
            total,
            score: self.score.score(),
            answered: self.score.total_answered(),
        }
    }

    /// Whole seconds since the batch loaded, updated once per second.
    #[must_use]
    pub fn elapsed_updates(&self) -> watch::Receiver<u64> {
        self.ticker.subscribe()
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.ticker.seconds()
    }

    /// Waits for outstanding practice records and end reports.
    pub async fn flush_tracking(&mut self) {
        self.tracker.flush().await;
    }

    /// Loads a fresh batch and asks the first question.
    ///
    /// Load problems are reported through the state, never as errors.
    pub async fn start(&mut self) {
        self.ticker.stop();
        self.state = VocabularyState::Loading;
        self.questions.clear();
        self.current_index = 0;
        self.score = SessionScore::new();

        let language_id = self.config.language_id;
        match self
            .api
            .practice_vocabulary(language_id, self.question_limit)
            .await
        {
            Ok(batch) if batch.is_empty() => {
                log::info!("no vocabulary available for language {language_id}");
                self.state = VocabularyState::Unavailable;
            }
            Ok(mut batch) => {
                batch.truncate(self.question_limit);
                shuffle(&mut batch, &mut self.rng);
                self.questions = batch;
                self.started_at = self.clock.now();
                self.ticker.start();
                log::debug!(
                    "session {} loaded {} questions",
                    self.config.session_id,
                    self.questions.len()
                );
                self.ask_current();
            }
            Err(err) => {
                log::error!("failed to load vocabulary for language {language_id}: {err}");
                self.state = VocabularyState::LoadFailed {
                    message: VOCABULARY_LOAD_FAILED.to_string(),
                };
            }
        }
    }

    /// Answers the current question with the option at `index`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the question state and
    /// `SessionError::UnknownOption` for an index that is not on screen.
    pub fn select(&mut self, index: usize) -> Result<AnswerFeedback, SessionError> {
        let VocabularyState::Question(prompt) = &self.state else {
            return Err(self.invalid("select an answer"));
        };
        let chosen = prompt
            .options
            .get(index)
            .cloned()
            .ok_or(SessionError::UnknownOption { index })?;
        let Some(question) = self.questions.get(self.current_index) else {
            return Err(self.invalid("select an answer"));
        };

        let correct = AnswerOption::for_question(question);
        let is_correct = chosen == correct;
        self.score.record(is_correct);

        let feedback = AnswerFeedback {
            is_correct,
            user_answer: chosen.label().to_string(),
            correct_answer: correct.label().to_string(),
        };
        self.tracker.record(PracticeRecord {
            session_id: self.config.session_id,
            target: PracticeTarget::Vocabulary(question.id),
            user_answer: feedback.user_answer.clone(),
            correct_answer: feedback.correct_answer.clone(),
            is_correct,
            response_time_ms: self.clock.millis_since(self.started_at),
        });

        self.state = VocabularyState::Feedback(feedback.clone());
        Ok(feedback)
    }

    /// Answers by option label instead of position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownAnswer` if no option carries `label`.
    pub fn select_answer(&mut self, label: &str) -> Result<AnswerFeedback, SessionError> {
        let VocabularyState::Question(prompt) = &self.state else {
            return Err(self.invalid("select an answer"));
        };
        let index = prompt
            .options
            .iter()
            .position(|option| option.label() == label)
            .ok_or_else(|| SessionError::UnknownAnswer(label.to_string()))?;
        self.select(index)
    }

    /// Moves past the feedback to the next question or to the results.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless feedback is showing.
    pub fn next(&mut self) -> Result<(), SessionError> {
        if !matches!(self.state, VocabularyState::Feedback(_)) {
            return Err(self.invalid("advance"));
        }
        self.current_index += 1;
        if self.current_index == self.questions.len() {
            self.finish();
        } else {
            self.ask_current();
        }
        Ok(())
    }

    /// Restarts with the same configuration.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` before the results are shown.
    pub async fn practice_again(&mut self) -> Result<(), SessionError> {
        if !matches!(self.state, VocabularyState::Results(_)) {
            return Err(self.invalid("practice again"));
        }
        self.start().await;
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates the error of the operation the event maps to.
    pub async fn handle(&mut self, event: VocabularyEvent) -> Result<(), SessionError> {
        match event {
            VocabularyEvent::Select(index) => self.select(index).map(|_| ()),
            VocabularyEvent::Next => self.next(),
            VocabularyEvent::PracticeAgain => self.practice_again().await,
        }
    }

    fn ask_current(&mut self) {
        let Some(question) = self.questions.get(self.current_index) else {
            self.finish();
            return;
        };
        let options = build_answer_options(question, &self.questions, &mut self.rng);
        self.state = VocabularyState::Question(VocabularyPrompt {
            word: question.word.clone(),
            options,
            number: self.current_index + 1,
            total: self.questions.len(),
        });
    }

    fn finish(&mut self) {
        self.ticker.stop();
        let elapsed = self.clock.secs_since(self.started_at);
        let total_questions = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        self.tracker.end_session(SessionEndReport::new(
            SessionKind::Vocabulary,
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
        self.state = VocabularyState::Results(SessionResults::new(self.score, elapsed));
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

    const SPANISH: LanguageId = LanguageId::new(1);

    fn api_with_words(count: u64) -> InMemoryPracticeApi {
        let api = InMemoryPracticeApi::new();
        for n in 1..=count {
            api.add_word(SPANISH, &format!("palabra{n}"), Some(format!("word{n}").as_str()));
        }
        api
    }

    fn session(api: &InMemoryPracticeApi) -> VocabularySession {
        VocabularySession::new(
            Arc::new(api.clone()),
            SessionConfig::new(SessionId::new(3), SPANISH, "Spanish"),
        )
        .with_clock(fixed_clock())
        .with_seed(7)
    }

    fn correct_label(session: &VocabularySession) -> String {
        let VocabularyState::Question(prompt) = session.state() else {
            panic!("expected a question, got {:?}", session.state());
        };
        let word = prompt.word.trim_start_matches("palabra");
        format!("word{word}")
    }

    #[tokio::test]
    async fn empty_batch_is_unavailable() {
        let api = InMemoryPracticeApi::new();
        let mut session = session(&api);
        session.start().await;
        assert_eq!(session.state(), &VocabularyState::Unavailable);
        assert!(session.state().is_terminal());
    }

    #[tokio::test]
    async fn load_failure_carries_message() {
        let api = api_with_words(3);
        api.fail(Endpoint::PracticeVocabulary);
        let mut session = session(&api);
        session.start().await;
        assert_eq!(
            session.state(),
            &VocabularyState::LoadFailed {
                message: VOCABULARY_LOAD_FAILED.to_string()
            }
        );
    }

    #[tokio::test]
    async fn total_questions_is_batch_size_up_to_limit() {
        let api = api_with_words(14);
        let mut session = session(&api);
        session.start().await;
        assert_eq!(session.total_questions(), VOCABULARY_QUESTION_COUNT);

        let api = api_with_words(4);
        let mut session = self::session(&api);
        session.start().await;
        assert_eq!(session.total_questions(), 4);
        assert_eq!(session.progress().question_label(), "1 / 4");
    }

    #[tokio::test]
    async fn every_prompt_has_four_distinct_options_with_the_answer() {
        let api = api_with_words(10);
        let mut session = session(&api);
        session.start().await;
        while let VocabularyState::Question(prompt) = session.state().clone() {
            assert_eq!(prompt.options.len(), 4);
            let answer = correct_label(&session);
            assert!(prompt.options.iter().any(|option| option.label() == answer));
            session.select_answer(&answer).unwrap();
            session.next().unwrap();
        }
        assert!(matches!(session.state(), VocabularyState::Results(_)));
    }

    #[tokio::test]
    async fn wrong_answer_reveals_correct_translation() {
        let api = api_with_words(4);
        let mut session = session(&api);
        session.start().await;

        let answer = correct_label(&session);
        let VocabularyState::Question(prompt) = session.state() else {
            panic!("expected a question");
        };
        let wrong = prompt
            .options
            .iter()
            .position(|option| option.label() != answer)
            .unwrap();
        let feedback = session.select(wrong).unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.correct_answer, answer);
        assert_eq!(session.score().score(), 0);
        assert_eq!(session.score().total_answered(), 1);
    }

    #[tokio::test]
    async fn missing_translation_option_is_correct_for_untranslated_word() {
        let api = InMemoryPracticeApi::new();
        api.add_word(SPANISH, "sobremesa", None);
        let mut session = session(&api);
        session.start().await;

        let feedback = session
            .select_answer(lingua_core::options::MISSING_TRANSLATION_LABEL)
            .unwrap();
        assert!(feedback.is_correct);
    }

    #[tokio::test]
    async fn events_out_of_order_are_rejected() {
        let api = api_with_words(2);
        let mut session = session(&api);
        session.start().await;

        assert!(matches!(
            session.next(),
            Err(SessionError::InvalidTransition { event: "advance", .. })
        ));
        assert!(matches!(
            session.select(4),
            Err(SessionError::UnknownOption { index: 4 })
        ));
        session.select(0).unwrap();
        assert!(matches!(
            session.select(0),
            Err(SessionError::InvalidTransition { .. })
        ));
        assert!(session.practice_again().await.is_err());
    }

    #[tokio::test]
    async fn results_report_and_restart() {
        let api = api_with_words(3);
        let mut session = session(&api);
        session.start().await;

        for _ in 0..3 {
            session.handle(VocabularyEvent::Select(0)).await.unwrap();
            session.handle(VocabularyEvent::Next).await.unwrap();
        }
        let VocabularyState::Results(results) = session.state().clone() else {
            panic!("expected results");
        };
        assert_eq!(results.total_answered, 3);
        assert_eq!(results.elapsed_label(), "00:00");
        assert_eq!(session.current_index(), session.total_questions());

        session.flush_tracking().await;
        let reports = api.end_reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].words_practiced, 3);
        assert_eq!(reports[0].sentences_practiced, 0);
        assert_eq!(reports[0].correct_answers, results.score);
        assert_eq!(reports[0].total_questions, 3);
        assert_eq!(api.records().len(), 3);

        session
            .handle(VocabularyEvent::PracticeAgain)
            .await
            .unwrap();
        assert!(matches!(session.state(), VocabularyState::Question(_)));
        assert_eq!(session.score(), SessionScore::new());
        assert_eq!(api.calls(Endpoint::PracticeVocabulary), 2);
    }
}
