mod progress;
mod sentence;
mod ticker;
mod tracking;
mod vocabulary;

// Public API of the practice-session subsystem.
pub use crate::error::SessionError;
pub use progress::{AnswerFeedback, SessionProgress, SessionResults};
pub use sentence::{
    SENTENCE_DIFFICULTY, SENTENCE_FETCH_FAILED, SENTENCE_QUESTION_COUNT, SentenceEvent,
    SentencePrompt, SentenceSession, SentenceState, is_submit_key,
};
pub use ticker::ElapsedTicker;
pub use tracking::SessionTracker;
pub use vocabulary::{
    VOCABULARY_LOAD_FAILED, VOCABULARY_QUESTION_COUNT, VocabularyEvent, VocabularyPrompt,
    VocabularySession, VocabularyState,
};
