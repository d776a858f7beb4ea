use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use lingua_core::model::{
    BulkVocabulary, Language, LanguageId, NewVocabulary, PracticeRecord, SentenceId,
    SentenceQuestion, SessionEndReport, SessionId, SessionKind, SkillLevel, UserLanguage,
    VocabularyId, VocabularyItem, VocabularyQuestion,
};

use super::PracticeApi;
use super::endpoint::Endpoint;
use crate::error::ApiError;

/// Sentence served by the single-sentence widget when nothing else is queued.
pub const DEFAULT_LEGACY_SENTENCE: &str = "This is a generated sentence from the API.";

#[derive(Default)]
struct State {
    languages: Vec<Language>,
    user_languages: Vec<UserLanguage>,
    vocabulary: Vec<VocabularyItem>,
    sentences: HashMap<LanguageId, VecDeque<SentenceQuestion>>,
    legacy_sentences: VecDeque<String>,
    sessions: Vec<(SessionId, LanguageId, SessionKind)>,
    records: Vec<PracticeRecord>,
    end_reports: Vec<SessionEndReport>,
    failures: HashMap<Endpoint, Option<String>>,
    calls: HashMap<Endpoint, usize>,
    next_vocabulary_id: u64,
    next_session_id: u64,
    next_sentence_id: u64,
}

/// Simple in-memory server for tests, demos and offline use.
///
/// Scoring follows the server: trimmed, case-insensitive equality.
#[derive(Clone, Default)]
pub struct InMemoryPracticeApi {
    state: Arc<Mutex<State>>,
}

impl InMemoryPracticeApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A small catalog with a learner of Spanish and French.
    #[must_use]
    pub fn with_demo_data() -> Self {
        let api = Self::new();
        let spanish = LanguageId::new(1);
        let french = LanguageId::new(2);
        api.add_catalog_language(spanish, "Spanish", "🇪🇸");
        api.add_catalog_language(french, "French", "🇫🇷");
        api.add_catalog_language(LanguageId::new(3), "German", "🇩🇪");
        api.add_user_language(spanish, Some(SkillLevel::Beginner));
        api.add_user_language(french, Some(SkillLevel::Intermediate));

        for (word, translation) in [
            ("hola", "hello"),
            ("gracias", "thank you"),
            ("perro", "dog"),
            ("gato", "cat"),
            ("casa", "house"),
            ("agua", "water"),
        ] {
            api.add_word(spanish, word, Some(translation));
        }
        api.add_word(spanish, "sobremesa", None);
        for (word, translation) in [("bonjour", "hello"), ("pomme", "apple"), ("livre", "book")] {
            api.add_word(french, word, Some(translation));
        }

        for (sentence, translation) in [
            ("El gato duerme.", "The cat sleeps."),
            ("Tengo un perro.", "I have a dog."),
            ("La casa es grande.", "The house is big."),
            ("Bebo agua.", "I drink water."),
            ("Gracias por todo.", "Thanks for everything."),
        ] {
            api.queue_sentence(spanish, sentence, translation);
        }
        for (sentence, translation) in [
            ("Je lis un livre.", "I read a book."),
            ("Bonjour à tous.", "Hello everyone."),
        ] {
            api.queue_sentence(french, sentence, translation);
        }
        api
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, ApiError> {
        self.state
            .lock()
            .map_err(|e| ApiError::Unreachable(e.to_string()))
    }

    /// Counts the call and applies any configured failure.
    fn enter(&self, endpoint: Endpoint) -> Result<MutexGuard<'_, State>, ApiError> {
        let mut state = self.lock()?;
        *state.calls.entry(endpoint).or_default() += 1;
        match state.failures.get(&endpoint) {
            None => Ok(state),
            Some(Some(message)) => Err(ApiError::Rejected(Some(message.clone()))),
            Some(None) => Err(ApiError::Unreachable(format!("{endpoint} is unavailable"))),
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    pub fn add_catalog_language(&self, id: LanguageId, name: &str, flag_emoji: &str) {
        self.with_state(|state| {
            state.languages.push(Language {
                id,
                name: name.to_string(),
                flag_emoji: flag_emoji.to_string(),
            });
        });
    }

    pub fn add_user_language(&self, language_id: LanguageId, level: Option<SkillLevel>) {
        self.with_state(|state| upsert_user_language(state, language_id, level));
    }

    /// Adds a vocabulary record and returns its id.
    pub fn add_word(
        &self,
        language_id: LanguageId,
        word: &str,
        translation: Option<&str>,
    ) -> VocabularyId {
        self.with_state(|state| {
            insert_word(
                state,
                language_id,
                word,
                translation.map(str::to_string),
                SkillLevel::Beginner,
            )
        })
    }

    /// Queues a sentence for `generate_sentence`. Sentences are served in order, then cycle.
    pub fn queue_sentence(&self, language_id: LanguageId, sentence: &str, translation: &str) {
        self.with_state(|state| {
            state.next_sentence_id += 1;
            let question = SentenceQuestion {
                sentence: sentence.to_string(),
                translation: translation.to_string(),
                sentence_id: Some(SentenceId::new(state.next_sentence_id)),
            };
            state
                .sentences
                .entry(language_id)
                .or_default()
                .push_back(question);
        });
    }

    pub fn queue_legacy_sentence(&self, sentence: &str) {
        self.with_state(|state| state.legacy_sentences.push_back(sentence.to_string()));
    }

    /// Makes `endpoint` fail as if the server could not be reached.
    pub fn fail(&self, endpoint: Endpoint) {
        self.with_state(|state| {
            state.failures.insert(endpoint, None);
        });
    }

    /// Makes `endpoint` answer `{success: false, error: message}`.
    pub fn reject(&self, endpoint: Endpoint, message: &str) {
        self.with_state(|state| {
            state.failures.insert(endpoint, Some(message.to_string()));
        });
    }

    pub fn recover(&self, endpoint: Endpoint) {
        self.with_state(|state| {
            state.failures.remove(&endpoint);
        });
    }

    #[must_use]
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.with_state(|state| state.calls.get(&endpoint).copied().unwrap_or(0))
    }

    #[must_use]
    pub fn records(&self) -> Vec<PracticeRecord> {
        self.with_state(|state| state.records.clone())
    }

    #[must_use]
    pub fn end_reports(&self) -> Vec<SessionEndReport> {
        self.with_state(|state| state.end_reports.clone())
    }

    #[must_use]
    pub fn started_sessions(&self) -> Vec<(SessionId, LanguageId, SessionKind)> {
        self.with_state(|state| state.sessions.clone())
    }
}

fn upsert_user_language(state: &mut State, language_id: LanguageId, level: Option<SkillLevel>) {
    match state
        .user_languages
        .iter_mut()
        .find(|entry| entry.language_id == language_id)
    {
        Some(entry) => entry.proficiency_level = level,
        None => state.user_languages.push(UserLanguage {
            language_id,
            proficiency_level: level,
        }),
    }
}

fn insert_word(
    state: &mut State,
    language_id: LanguageId,
    word: &str,
    translation: Option<String>,
    level: SkillLevel,
) -> VocabularyId {
    state.next_vocabulary_id += 1;
    let id = VocabularyId::new(state.next_vocabulary_id);
    state.vocabulary.push(VocabularyItem {
        id,
        language_id,
        word: word.to_string(),
        translation,
        difficulty_level: level.as_str().to_string(),
        mastery_level: 0,
        review_count: 0,
    });
    id
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[async_trait]
impl PracticeApi for InMemoryPracticeApi {
    async fn languages(&self) -> Result<Vec<Language>, ApiError> {
        let state = self.enter(Endpoint::Languages)?;
        Ok(state.languages.clone())
    }

    async fn user_languages(&self) -> Result<Vec<UserLanguage>, ApiError> {
        let state = self.enter(Endpoint::UserLanguages)?;
        Ok(state.user_languages.clone())
    }

    async fn add_language(
        &self,
        language_id: LanguageId,
        proficiency: Option<SkillLevel>,
    ) -> Result<(), ApiError> {
        let mut state = self.enter(Endpoint::AddLanguage)?;
        if !state.languages.iter().any(|language| language.id == language_id) {
            return Err(ApiError::Rejected(Some("Unknown language".to_string())));
        }
        upsert_user_language(&mut state, language_id, proficiency);
        Ok(())
    }

    async fn remove_language(&self, language_id: LanguageId) -> Result<(), ApiError> {
        let mut state = self.enter(Endpoint::RemoveLanguage)?;
        let before = state.user_languages.len();
        state
            .user_languages
            .retain(|entry| entry.language_id != language_id);
        if state.user_languages.len() == before {
            return Err(ApiError::Rejected(None));
        }
        Ok(())
    }

    async fn vocabulary(&self) -> Result<Vec<VocabularyItem>, ApiError> {
        let state = self.enter(Endpoint::Vocabulary)?;
        Ok(state.vocabulary.clone())
    }

    async fn delete_vocabulary(&self, id: VocabularyId) -> Result<(), ApiError> {
        let mut state = self.enter(Endpoint::DeleteVocabulary)?;
        let before = state.vocabulary.len();
        state.vocabulary.retain(|item| item.id != id);
        if state.vocabulary.len() == before {
            return Err(ApiError::Rejected(None));
        }
        Ok(())
    }

    async fn add_vocabulary(&self, entry: &NewVocabulary) -> Result<(), ApiError> {
        let mut state = self.enter(Endpoint::AddVocabulary)?;
        insert_word(
            &mut state,
            entry.language_id(),
            entry.word(),
            entry.translation().map(str::to_string),
            SkillLevel::Beginner,
        );
        Ok(())
    }

    async fn bulk_add_vocabulary(&self, bulk: &BulkVocabulary) -> Result<u32, ApiError> {
        let mut state = self.enter(Endpoint::BulkAddVocabulary)?;
        let mut added = 0;
        for word in bulk
            .words()
            .split(['\n', ','])
            .map(str::trim)
            .filter(|word| !word.is_empty())
        {
            insert_word(
                &mut state,
                bulk.language_id(),
                word,
                None,
                bulk.difficulty_level(),
            );
            added += 1;
        }
        Ok(added)
    }

    async fn start_session(
        &self,
        language_id: LanguageId,
        kind: SessionKind,
    ) -> Result<SessionId, ApiError> {
        let mut state = self.enter(Endpoint::StartSession)?;
        state.next_session_id += 1;
        let session_id = SessionId::new(state.next_session_id);
        state.sessions.push((session_id, language_id, kind));
        Ok(session_id)
    }

    async fn practice_vocabulary(
        &self,
        language_id: LanguageId,
        limit: usize,
    ) -> Result<Vec<VocabularyQuestion>, ApiError> {
        let state = self.enter(Endpoint::PracticeVocabulary)?;
        Ok(state
            .vocabulary
            .iter()
            .filter(|item| item.language_id == language_id)
            .take(limit)
            .map(|item| VocabularyQuestion {
                id: item.id,
                word: item.word.clone(),
                translation: item.translation.clone(),
                difficulty_level: Some(item.difficulty_level.clone()),
            })
            .collect())
    }

    async fn generate_sentence(
        &self,
        language_id: LanguageId,
        _difficulty: SkillLevel,
    ) -> Result<SentenceQuestion, ApiError> {
        let mut state = self.enter(Endpoint::GenerateSentence)?;
        let queue = state
            .sentences
            .get_mut(&language_id)
            .ok_or_else(|| ApiError::Rejected(Some("No sentences available".to_string())))?;
        let question = queue
            .pop_front()
            .ok_or_else(|| ApiError::Rejected(Some("No sentences available".to_string())))?;
        queue.push_back(question.clone());
        Ok(question)
    }

    async fn score_translation(
        &self,
        user_translation: &str,
        correct_translation: &str,
    ) -> Result<bool, ApiError> {
        let _state = self.enter(Endpoint::ScoreTranslation)?;
        Ok(normalize(user_translation) == normalize(correct_translation))
    }

    async fn record_practice(&self, record: &PracticeRecord) -> Result<(), ApiError> {
        let mut state = self.enter(Endpoint::RecordPractice)?;
        state.records.push(record.clone());
        Ok(())
    }

    async fn end_session(&self, report: &SessionEndReport) -> Result<(), ApiError> {
        let mut state = self.enter(Endpoint::EndSession)?;
        state.end_reports.push(*report);
        Ok(())
    }

    async fn legacy_sentence(&self) -> Result<String, ApiError> {
        let mut state = self.enter(Endpoint::LegacySentence)?;
        Ok(state
            .legacy_sentences
            .pop_front()
            .unwrap_or_else(|| DEFAULT_LEGACY_SENTENCE.to_string()))
    }

    async fn legacy_check_translation(
        &self,
        translation: &str,
        correct_sentence: &str,
    ) -> Result<bool, ApiError> {
        let _state = self.enter(Endpoint::LegacyCheckTranslation)?;
        Ok(normalize(translation) == normalize(correct_sentence))
    }
}
