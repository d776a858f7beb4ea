mod ids;
mod language;
mod sentence;
mod session;
mod vocabulary;

pub use ids::{LanguageId, ParseIdError, SentenceId, SessionId, VocabularyId};
pub use language::{Language, SkillLevel, UserLanguage};
pub use sentence::SentenceQuestion;
pub use session::{
    PracticeRecord, PracticeTarget, SessionConfig, SessionEndReport, SessionKind, SessionScore,
};
pub use vocabulary::{
    BulkVocabulary, NewVocabulary, VocabularyFilter, VocabularyItem, VocabularyQuestion,
};
