use std::fmt;

use crate::model::{LanguageId, SentenceId, SessionId, VocabularyId};

/// Which practice flow a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    Vocabulary,
    Sentences,
}

impl SessionKind {
    /// Value sent as `session_type` when starting a session.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Vocabulary => "vocabulary",
            SessionKind::Sentences => "sentences",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values a practice flow needs before it can start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub session_id: SessionId,
    pub language_id: LanguageId,
    pub language_name: String,
}

impl SessionConfig {
    #[must_use]
    pub fn new(
        session_id: SessionId,
        language_id: LanguageId,
        language_name: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            language_id,
            language_name: language_name.into(),
        }
    }
}

/// Running tally of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionScore {
    score: u32,
    total_answered: u32,
}

impl SessionScore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, is_correct: bool) {
        self.total_answered = self.total_answered.saturating_add(1);
        if is_correct {
            self.score = self.score.saturating_add(1);
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_answered(&self) -> u32 {
        self.total_answered
    }

    /// Percentage of correct answers, rounded half up; 0 before any answer.
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        if self.total_answered == 0 {
            return 0;
        }
        let score = u64::from(self.score);
        let total = u64::from(self.total_answered);
        let rounded = (200 * score + total) / (2 * total);
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }
}

/// What a practice record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeTarget {
    Vocabulary(VocabularyId),
    Sentence(Option<SentenceId>),
}

/// One answered question, reported to the tracking endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeRecord {
    pub session_id: SessionId,
    pub target: PracticeTarget,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    /// Milliseconds since the session started.
    pub response_time_ms: u64,
}

/// Final tallies sent when a session reaches its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEndReport {
    pub session_id: SessionId,
    pub words_practiced: u32,
    pub sentences_practiced: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
}

impl SessionEndReport {
    /// Attributes the answered count to words or sentences depending on the flow.
    #[must_use]
    pub fn new(
        kind: SessionKind,
        session_id: SessionId,
        score: SessionScore,
        total_questions: u32,
    ) -> Self {
        let (words_practiced, sentences_practiced) = match kind {
            SessionKind::Vocabulary => (score.total_answered(), 0),
            SessionKind::Sentences => (0, score.total_answered()),
        };
        Self {
            session_id,
            words_practiced,
            sentences_practiced,
            correct_answers: score.score(),
            total_questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(correct: u32, wrong: u32) -> SessionScore {
        let mut score = SessionScore::new();
        for _ in 0..correct {
            score.record(true);
        }
        for _ in 0..wrong {
            score.record(false);
        }
        score
    }

    #[test]
    fn accuracy_is_zero_without_answers() {
        assert_eq!(SessionScore::new().accuracy(), 0);
    }

    #[test]
    fn accuracy_rounds_to_nearest_percent() {
        assert_eq!(score_of(3, 1).accuracy(), 75);
        assert_eq!(score_of(1, 2).accuracy(), 33);
        assert_eq!(score_of(2, 1).accuracy(), 67);
        assert_eq!(score_of(1, 7).accuracy(), 13);
        assert_eq!(score_of(5, 0).accuracy(), 100);
    }

    #[test]
    fn end_report_attributes_answers_by_kind() {
        let score = score_of(4, 6);
        let words = SessionEndReport::new(SessionKind::Vocabulary, SessionId::new(9), score, 10);
        assert_eq!(words.words_practiced, 10);
        assert_eq!(words.sentences_practiced, 0);
        assert_eq!(words.correct_answers, 4);

        let sentences =
            SessionEndReport::new(SessionKind::Sentences, SessionId::new(9), score, 10);
        assert_eq!(sentences.words_practiced, 0);
        assert_eq!(sentences.sentences_practiced, 10);
    }

    #[test]
    fn session_kind_wire_names() {
        assert_eq!(SessionKind::Vocabulary.as_str(), "vocabulary");
        assert_eq!(SessionKind::Sentences.to_string(), "sentences");
    }
}
