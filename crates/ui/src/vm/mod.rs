mod dashboard_vm;
mod practice_vm;
mod profile_vm;
mod results_vm;
mod time_fmt;

pub use dashboard_vm::{DashboardVm, LanguageCardVm, map_dashboard};
pub use practice_vm::{
    SentenceFeedbackVm, VocabularyFeedbackVm, map_sentence_feedback, map_vocabulary_feedback,
};
pub use profile_vm::{
    LanguageOptionVm, UserLanguageRowVm, VocabularyRowVm, language_options, map_user_languages,
    map_vocabulary_rows, parse_language_selection, proficiency_label,
};
pub use results_vm::{ResultsVm, map_results};
pub use time_fmt::format_timer;
