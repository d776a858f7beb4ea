#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod profile;
pub mod quick_practice;
pub mod sessions;

pub use lingua_core::Clock;
pub use sessions as session;

pub use api::{Endpoint, HttpPracticeApi, InMemoryPracticeApi, PracticeApi};
pub use config::ClientConfig;
pub use error::{Action, ActionError, ApiError, ConfigError, SessionError};
pub use profile::{LanguageCatalog, NO_LANGUAGES_LABEL, ProfileService};
pub use quick_practice::QuickPractice;

pub use sessions::{
    AnswerFeedback, ElapsedTicker, SentenceEvent, SentenceSession, SentenceState, SessionProgress,
    SessionResults, SessionTracker, VocabularyEvent, VocabularySession, VocabularyState,
};
