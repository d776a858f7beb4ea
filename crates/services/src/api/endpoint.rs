use std::fmt;

use reqwest::Method;

/// Server endpoints, one per `PracticeApi` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Languages,
    UserLanguages,
    AddLanguage,
    RemoveLanguage,
    Vocabulary,
    DeleteVocabulary,
    AddVocabulary,
    BulkAddVocabulary,
    StartSession,
    PracticeVocabulary,
    GenerateSentence,
    ScoreTranslation,
    RecordPractice,
    EndSession,
    LegacySentence,
    LegacyCheckTranslation,
}

impl Endpoint {
    /// Path relative to the API base url. `DeleteVocabulary` takes the id as a suffix.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Languages => "api/languages",
            Endpoint::UserLanguages => "api/user-languages",
            Endpoint::AddLanguage => "api/add-language",
            Endpoint::RemoveLanguage => "api/remove-language",
            Endpoint::Vocabulary | Endpoint::DeleteVocabulary => "api/vocabulary",
            Endpoint::AddVocabulary => "api/add-vocabulary",
            Endpoint::BulkAddVocabulary => "api/bulk-add-vocabulary",
            Endpoint::StartSession => "api/practice/start-session",
            Endpoint::PracticeVocabulary => "api/practice/vocabulary",
            Endpoint::GenerateSentence => "api/practice/generate-sentence",
            Endpoint::ScoreTranslation => "api/practice/score-translation",
            Endpoint::RecordPractice => "api/practice/record",
            Endpoint::EndSession => "api/practice/end-session",
            Endpoint::LegacySentence => "generate_sentence",
            Endpoint::LegacyCheckTranslation => "check_translation",
        }
    }

    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Endpoint::Languages
            | Endpoint::UserLanguages
            | Endpoint::Vocabulary
            | Endpoint::PracticeVocabulary
            | Endpoint::LegacySentence => Method::GET,
            Endpoint::RemoveLanguage | Endpoint::DeleteVocabulary => Method::DELETE,
            Endpoint::AddLanguage
            | Endpoint::AddVocabulary
            | Endpoint::BulkAddVocabulary
            | Endpoint::StartSession
            | Endpoint::GenerateSentence
            | Endpoint::ScoreTranslation
            | Endpoint::RecordPractice
            | Endpoint::EndSession
            | Endpoint::LegacyCheckTranslation => Method::POST,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}", self.method(), self.path())
    }
}
