use thiserror::Error;

/// Validation failures raised before any request leaves the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("invalid level: {0} (expected beginner, intermediate or advanced)")]
    InvalidLevel(String),

    #[error("please select a language")]
    NoLanguageSelected,

    #[error("word must not be empty")]
    EmptyWord,

    #[error("word list must not be empty")]
    EmptyWordList,

    #[error("answer must not be empty")]
    EmptyAnswer,

    #[error("a session needs at least one question")]
    ZeroQuestions,
}
