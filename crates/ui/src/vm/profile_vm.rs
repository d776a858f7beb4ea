use lingua_core::model::{LanguageId, SkillLevel, VocabularyItem};
use services::LanguageCatalog;

/// Highest mastery level the server reports.
const MAX_MASTERY: u8 = 5;

#[must_use]
pub fn proficiency_label(level: Option<SkillLevel>) -> &'static str {
    match level {
        Some(SkillLevel::Beginner) => "Beginner",
        Some(SkillLevel::Intermediate) => "Intermediate",
        Some(SkillLevel::Advanced) => "Advanced",
        None => "Not set",
    }
}

/// A `<select>` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageOptionVm {
    pub value: String,
    pub label: String,
}

/// Selector entries for the user's languages.
#[must_use]
pub fn language_options(catalog: &LanguageCatalog) -> Vec<LanguageOptionVm> {
    catalog
        .user_language_options()
        .into_iter()
        .map(|(id, label)| LanguageOptionVm {
            value: id.to_string(),
            label,
        })
        .collect()
}

/// `None` for the placeholder entry or anything that is not an id.
#[must_use]
pub fn parse_language_selection(raw: &str) -> Option<LanguageId> {
    raw.parse().ok()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserLanguageRowVm {
    pub id: LanguageId,
    pub label: String,
    /// Lowercase level for the proficiency `<select>`; empty when unset.
    pub level_value: &'static str,
    pub level_label: &'static str,
}

#[must_use]
pub fn map_user_languages(catalog: &LanguageCatalog) -> Vec<UserLanguageRowVm> {
    catalog
        .user_languages()
        .iter()
        .filter_map(|entry| {
            Some(UserLanguageRowVm {
                id: entry.language_id,
                label: catalog.label_of(entry.language_id)?,
                level_value: entry.proficiency_level.map_or("", SkillLevel::as_str),
                level_label: proficiency_label(entry.proficiency_level),
            })
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabularyRowVm {
    pub id: u64,
    pub word: String,
    pub translation: String,
    pub has_translation: bool,
    pub language_label: String,
    pub difficulty: String,
    pub mastery_label: String,
    pub review_label: String,
}

#[must_use]
pub fn map_vocabulary_rows(
    items: &[&VocabularyItem],
    catalog: &LanguageCatalog,
) -> Vec<VocabularyRowVm> {
    items
        .iter()
        .map(|item| VocabularyRowVm {
            id: item.id.value(),
            word: item.word.clone(),
            translation: item
                .translation
                .clone()
                .unwrap_or_else(|| "No translation".to_string()),
            has_translation: item.translation.is_some(),
            language_label: catalog
                .label_of(item.language_id)
                .unwrap_or_else(|| "Unknown language".to_string()),
            difficulty: item.difficulty_level.clone(),
            mastery_label: format!("{}/{MAX_MASTERY}", item.mastery_level.min(MAX_MASTERY)),
            review_label: match item.review_count {
                1 => "1 review".to_string(),
                count => format!("{count} reviews"),
            },
        })
        .collect()
}
