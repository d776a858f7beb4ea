mod components;
mod dashboard;
mod profile;
mod quick_practice;
mod sentence_practice;
mod state;
mod vocabulary_practice;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use profile::ProfileView;
pub use quick_practice::QuickPracticeView;
pub use sentence_practice::SentencePracticeView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use vocabulary_practice::VocabularyPracticeView;
