use std::sync::Arc;

use lingua_core::ValidationError;
use lingua_core::model::{
    BulkVocabulary, Language, LanguageId, NewVocabulary, SessionConfig, SessionKind, SkillLevel,
    UserLanguage, VocabularyFilter, VocabularyId, VocabularyItem,
};

use crate::api::PracticeApi;
use crate::error::{Action, ActionError, ApiError};

/// Placeholder for the language selector when the user studies nothing yet.
pub const NO_LANGUAGES_LABEL: &str = "No languages added yet";

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Every language the server knows, plus the ones the user studies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
    user_languages: Vec<UserLanguage>,
}

impl LanguageCatalog {
    #[must_use]
    pub fn new(languages: Vec<Language>, user_languages: Vec<UserLanguage>) -> Self {
        Self {
            languages,
            user_languages,
        }
    }

    #[must_use]
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    #[must_use]
    pub fn user_languages(&self) -> &[UserLanguage] {
        &self.user_languages
    }

    #[must_use]
    pub fn language(&self, id: LanguageId) -> Option<&Language> {
        self.languages.iter().find(|language| language.id == id)
    }

    #[must_use]
    pub fn name_of(&self, id: LanguageId) -> Option<&str> {
        self.language(id).map(|language| language.name.as_str())
    }

    /// `"{flag} {name}"` for display.
    #[must_use]
    pub fn label_of(&self, id: LanguageId) -> Option<String> {
        self.language(id).map(Language::label)
    }

    #[must_use]
    pub fn is_learning(&self, id: LanguageId) -> bool {
        self.user_languages
            .iter()
            .any(|entry| entry.language_id == id)
    }

    /// Selector entries for the user's languages. Ids missing from the catalog are skipped.
    #[must_use]
    pub fn user_language_options(&self) -> Vec<(LanguageId, String)> {
        self.user_languages
            .iter()
            .filter_map(|entry| {
                self.label_of(entry.language_id)
                    .map(|label| (entry.language_id, label))
            })
            .collect()
    }

    /// Catalog languages the user has not added yet.
    #[must_use]
    pub fn available_to_add(&self) -> Vec<&Language> {
        self.languages
            .iter()
            .filter(|language| !self.is_learning(language.id))
            .collect()
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Profile and dashboard actions on top of the practice API.
///
/// Inputs are validated before any request is made.
#[derive(Clone)]
pub struct ProfileService {
    api: Arc<dyn PracticeApi>,
}

impl ProfileService {
    #[must_use]
    pub fn new(api: Arc<dyn PracticeApi>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if either list cannot be loaded.
    pub async fn load_catalog(&self) -> Result<LanguageCatalog, ApiError> {
        let languages = self.api.languages().await.inspect_err(|err| {
            log::error!("failed to load languages: {err}");
        })?;
        let user_languages = self.api.user_languages().await.inspect_err(|err| {
            log::error!("failed to load user languages: {err}");
        })?;
        Ok(LanguageCatalog::new(languages, user_languages))
    }

    /// Adds a language; a blank `proficiency` leaves the level unset.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::Invalid` for an unknown level, otherwise the mapped API failure.
    pub async fn add_language(
        &self,
        language_id: LanguageId,
        proficiency: &str,
    ) -> Result<(), ActionError> {
        let level = parse_optional_level(proficiency)?;
        self.api
            .add_language(language_id, level)
            .await
            .map_err(|err| action_failed(Action::AddLanguage, err))
    }

    /// # Errors
    ///
    /// Returns `ActionError::Invalid` for an unknown level, otherwise the mapped API failure.
    pub async fn update_proficiency(
        &self,
        language_id: LanguageId,
        level: &str,
    ) -> Result<(), ActionError> {
        let level: SkillLevel = level.parse()?;
        self.api
            .add_language(language_id, Some(level))
            .await
            .map_err(|err| action_failed(Action::UpdateProficiency, err))
    }

    /// # Errors
    ///
    /// Returns the mapped API failure.
    pub async fn remove_language(&self, language_id: LanguageId) -> Result<(), ActionError> {
        self.api
            .remove_language(language_id)
            .await
            .map_err(|err| action_failed(Action::RemoveLanguage, err))
    }

    /// All vocabulary matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the list cannot be loaded.
    pub async fn vocabulary(
        &self,
        filter: &VocabularyFilter,
    ) -> Result<Vec<VocabularyItem>, ApiError> {
        let items = self.api.vocabulary().await.inspect_err(|err| {
            log::error!("failed to load vocabulary: {err}");
        })?;
        Ok(items.into_iter().filter(|item| filter.matches(item)).collect())
    }

    /// # Errors
    ///
    /// Returns `ActionError::Invalid` without a language or word, otherwise the mapped API failure.
    pub async fn add_vocabulary(
        &self,
        language_id: Option<LanguageId>,
        word: &str,
        translation: &str,
    ) -> Result<(), ActionError> {
        let language_id = language_id.ok_or(ValidationError::NoLanguageSelected)?;
        let entry = NewVocabulary::new(
            language_id,
            word.trim(),
            Some(translation.trim().to_string()),
        )?;
        self.api
            .add_vocabulary(&entry)
            .await
            .map_err(|err| action_failed(Action::AddVocabulary, err))
    }

    /// Adds one word per line or comma and returns how many the server stored.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::Invalid` without a language, words or a valid level,
    /// otherwise the mapped API failure.
    pub async fn bulk_add(
        &self,
        language_id: Option<LanguageId>,
        words: &str,
        level: &str,
    ) -> Result<u32, ActionError> {
        let language_id = language_id.ok_or(ValidationError::NoLanguageSelected)?;
        let level = parse_optional_level(level)?.unwrap_or_default();
        let bulk = BulkVocabulary::new(language_id, words, level)?;
        let added = self
            .api
            .bulk_add_vocabulary(&bulk)
            .await
            .map_err(|err| action_failed(Action::BulkAddVocabulary, err))?;
        log::info!("added {added} words to language {language_id}");
        Ok(added)
    }

    /// # Errors
    ///
    /// Returns the mapped API failure.
    pub async fn delete_vocabulary(&self, id: VocabularyId) -> Result<(), ActionError> {
        self.api
            .delete_vocabulary(id)
            .await
            .map_err(|err| action_failed(Action::DeleteVocabulary, err))
    }

    /// Opens a server session and returns the configuration for the practice flow.
    ///
    /// # Errors
    ///
    /// Returns the mapped API failure.
    pub async fn start_practice(
        &self,
        language_id: LanguageId,
        language_name: &str,
        kind: SessionKind,
    ) -> Result<SessionConfig, ActionError> {
        let session_id = self
            .api
            .start_session(language_id, kind)
            .await
            .map_err(|err| action_failed(Action::StartSession, err))?;
        log::debug!("started {kind} session {session_id} for {language_name}");
        Ok(SessionConfig::new(session_id, language_id, language_name))
    }
}

fn parse_optional_level(raw: &str) -> Result<Option<SkillLevel>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some)
}

fn action_failed(action: Action, err: ApiError) -> ActionError {
    log::warn!("{action:?} failed: {err}");
    ActionError::from_api(action, err)
}
