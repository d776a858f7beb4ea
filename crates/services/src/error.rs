//! Shared error types for the services crate.

use thiserror::Error;

use lingua_core::ValidationError;

/// Errors raised while talking to the practice server.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("server rejected the request: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
    #[error("server unreachable: {0}")]
    Unreachable(String),
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Server-supplied reason, if the server sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected(message) => message.as_deref(),
            _ => None,
        }
    }
}

/// Errors emitted by the practice-session state machines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {event} while the session is {state}")]
    InvalidTransition {
        event: &'static str,
        state: &'static str,
    },
    #[error("answer option {index} is not on screen")]
    UnknownOption { index: usize },
    #[error("\"{0}\" is not one of the offered answers")]
    UnknownAnswer(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A user-triggered profile or dashboard action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddLanguage,
    UpdateProficiency,
    RemoveLanguage,
    AddVocabulary,
    BulkAddVocabulary,
    DeleteVocabulary,
    StartSession,
}

impl Action {
    /// Message shown when the server declines without a reason.
    #[must_use]
    pub fn rejected_message(self) -> &'static str {
        match self {
            Action::AddLanguage => "Failed to add language",
            Action::UpdateProficiency => "Failed to update proficiency level",
            Action::RemoveLanguage => "Failed to remove language",
            Action::AddVocabulary | Action::BulkAddVocabulary => "Failed to add vocabulary",
            Action::DeleteVocabulary => "Failed to delete vocabulary",
            Action::StartSession => "Failed to start practice session",
        }
    }

    /// Message shown when the request itself failed.
    #[must_use]
    pub fn failed_message(self) -> &'static str {
        match self {
            Action::AddLanguage => "An error occurred while adding the language",
            Action::UpdateProficiency => "An error occurred while updating proficiency level",
            Action::RemoveLanguage => "An error occurred while removing the language",
            Action::AddVocabulary | Action::BulkAddVocabulary => {
                "An error occurred while adding vocabulary"
            }
            Action::DeleteVocabulary => "An error occurred while deleting vocabulary",
            Action::StartSession => "An error occurred while starting practice",
        }
    }
}

/// Failure of a per-action request, carrying the message to show the user.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ActionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{message}")]
    Rejected { action: Action, message: String },
    #[error("{}", .action.failed_message())]
    Failed {
        action: Action,
        #[source]
        source: ApiError,
    },
}

impl ActionError {
    pub(crate) fn from_api(action: Action, err: ApiError) -> Self {
        match err {
            ApiError::Rejected(message) => ActionError::Rejected {
                action,
                message: message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| action.rejected_message().to_string()),
            },
            ApiError::HttpStatus(status) if status.is_client_error() => ActionError::Rejected {
                action,
                message: action.rejected_message().to_string(),
            },
            other => ActionError::Failed {
                action,
                source: other,
            },
        }
    }

    /// Text for the blocking message dialog.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ActionError::Invalid(err) => err.to_string(),
            ActionError::Rejected { message, .. } => message.clone(),
            ActionError::Failed { action, .. } => action.failed_message().to_string(),
        }
    }
}

/// Errors raised while assembling the client configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid api url {raw:?}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("api url must use http or https, got {0:?}")]
    UnsupportedScheme(String),
    #[error("invalid timeout {0:?}: expected whole seconds greater than zero")]
    InvalidTimeout(String),
}
