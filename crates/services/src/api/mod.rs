//! Client-side contract of the practice server.

mod endpoint;
mod http;
mod memory;
mod wire;

use async_trait::async_trait;

use lingua_core::model::{
    BulkVocabulary, Language, LanguageId, NewVocabulary, PracticeRecord, SentenceQuestion,
    SessionEndReport, SessionId, SessionKind, SkillLevel, UserLanguage, VocabularyId,
    VocabularyItem, VocabularyQuestion,
};

use crate::error::ApiError;

pub use endpoint::Endpoint;
pub use http::HttpPracticeApi;
pub use memory::{DEFAULT_LEGACY_SENTENCE, InMemoryPracticeApi};

/// Every server endpoint the client consumes.
///
/// Implementations map `{success: false, error}` payloads to `ApiError::Rejected`.
#[async_trait]
pub trait PracticeApi: Send + Sync {
    /// The full language catalog.
    async fn languages(&self) -> Result<Vec<Language>, ApiError>;

    /// Languages the current user is learning.
    async fn user_languages(&self) -> Result<Vec<UserLanguage>, ApiError>;

    /// Adds a language to the user's profile, or updates its proficiency.
    async fn add_language(
        &self,
        language_id: LanguageId,
        proficiency: Option<SkillLevel>,
    ) -> Result<(), ApiError>;

    async fn remove_language(&self, language_id: LanguageId) -> Result<(), ApiError>;

    /// All vocabulary records of the user.
    async fn vocabulary(&self) -> Result<Vec<VocabularyItem>, ApiError>;

    async fn delete_vocabulary(&self, id: VocabularyId) -> Result<(), ApiError>;

    async fn add_vocabulary(&self, entry: &NewVocabulary) -> Result<(), ApiError>;

    /// Returns how many words the server added.
    async fn bulk_add_vocabulary(&self, bulk: &BulkVocabulary) -> Result<u32, ApiError>;

    async fn start_session(
        &self,
        language_id: LanguageId,
        kind: SessionKind,
    ) -> Result<SessionId, ApiError>;

    /// A batch of at most `limit` questions for a multiple-choice session.
    async fn practice_vocabulary(
        &self,
        language_id: LanguageId,
        limit: usize,
    ) -> Result<Vec<VocabularyQuestion>, ApiError>;

    async fn generate_sentence(
        &self,
        language_id: LanguageId,
        difficulty: SkillLevel,
    ) -> Result<SentenceQuestion, ApiError>;

    /// Server-side judgement of a free-text translation.
    async fn score_translation(
        &self,
        user_translation: &str,
        correct_translation: &str,
    ) -> Result<bool, ApiError>;

    async fn record_practice(&self, record: &PracticeRecord) -> Result<(), ApiError>;

    async fn end_session(&self, report: &SessionEndReport) -> Result<(), ApiError>;

    /// Sentence for the single-sentence practice widget.
    async fn legacy_sentence(&self) -> Result<String, ApiError>;

    async fn legacy_check_translation(
        &self,
        translation: &str,
        correct_sentence: &str,
    ) -> Result<bool, ApiError>;
}
