use crate::error::ValidationError;
use crate::model::{LanguageId, SkillLevel, VocabularyId};

/// A vocabulary entry as listed on the profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyItem {
    pub id: VocabularyId,
    pub language_id: LanguageId,
    pub word: String,
    pub translation: Option<String>,
    /// Server-defined classification; only displayed and filtered on.
    pub difficulty_level: String,
    /// 0..=5
    pub mastery_level: u8,
    pub review_count: u32,
}

/// A vocabulary item served for a multiple-choice round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyQuestion {
    pub id: VocabularyId,
    pub word: String,
    pub translation: Option<String>,
    pub difficulty_level: Option<String>,
}

impl VocabularyQuestion {
    #[must_use]
    pub fn new(id: VocabularyId, word: impl Into<String>, translation: Option<String>) -> Self {
        Self {
            id,
            word: word.into(),
            translation: translation.filter(|value| !value.is_empty()),
            difficulty_level: None,
        }
    }
}

/// Client-side filter for the vocabulary list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyFilter {
    pub language_id: Option<LanguageId>,
    pub difficulty_level: Option<String>,
}

impl VocabularyFilter {
    #[must_use]
    pub fn matches(&self, item: &VocabularyItem) -> bool {
        let language_ok = self
            .language_id
            .is_none_or(|language_id| item.language_id == language_id);
        let difficulty_ok = self
            .difficulty_level
            .as_deref()
            .is_none_or(|difficulty| item.difficulty_level == difficulty);
        language_ok && difficulty_ok
    }

    /// Returns the matching items, preserving order.
    #[must_use]
    pub fn apply<'a>(&self, items: &'a [VocabularyItem]) -> Vec<&'a VocabularyItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// A single word to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVocabulary {
    language_id: LanguageId,
    word: String,
    translation: Option<String>,
}

impl NewVocabulary {
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyWord` when `word` is blank.
    pub fn new(
        language_id: LanguageId,
        word: impl Into<String>,
        translation: Option<String>,
    ) -> Result<Self, ValidationError> {
        let word = word.into();
        if word.trim().is_empty() {
            return Err(ValidationError::EmptyWord);
        }
        Ok(Self {
            language_id,
            word,
            translation: translation.filter(|value| !value.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn language_id(&self) -> LanguageId {
        self.language_id
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }
}

/// A free-form word list to add in one request; the server splits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkVocabulary {
    language_id: LanguageId,
    words: String,
    difficulty_level: SkillLevel,
}

impl BulkVocabulary {
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyWordList` when `words` is blank.
    pub fn new(
        language_id: LanguageId,
        words: impl Into<String>,
        difficulty_level: SkillLevel,
    ) -> Result<Self, ValidationError> {
        let words = words.into();
        if words.trim().is_empty() {
            return Err(ValidationError::EmptyWordList);
        }
        Ok(Self {
            language_id,
            words,
            difficulty_level,
        })
    }

    #[must_use]
    pub fn language_id(&self) -> LanguageId {
        self.language_id
    }

    #[must_use]
    pub fn words(&self) -> &str {
        &self.words
    }

    #[must_use]
    pub fn difficulty_level(&self) -> SkillLevel {
        self.difficulty_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, language: u64, difficulty: &str) -> VocabularyItem {
        VocabularyItem {
            id: VocabularyId::new(id),
            language_id: LanguageId::new(language),
            word: format!("word{id}"),
            translation: None,
            difficulty_level: difficulty.to_string(),
            mastery_level: 0,
            review_count: 0,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let items = vec![item(1, 1, "beginner"), item(2, 2, "advanced")];
        assert_eq!(VocabularyFilter::default().apply(&items).len(), 2);
    }

    #[test]
    fn filter_combines_language_and_difficulty() {
        let items = vec![
            item(1, 1, "beginner"),
            item(2, 1, "advanced"),
            item(3, 2, "beginner"),
        ];
        let filter = VocabularyFilter {
            language_id: Some(LanguageId::new(1)),
            difficulty_level: Some("beginner".to_string()),
        };
        let matched = filter.apply(&items);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, VocabularyId::new(1));
    }

    #[test]
    fn new_vocabulary_rejects_blank_word() {
        let err = NewVocabulary::new(LanguageId::new(1), "  ", None).unwrap_err();
        assert_eq!(err, ValidationError::EmptyWord);
    }

    #[test]
    fn new_vocabulary_drops_blank_translation() {
        let entry =
            NewVocabulary::new(LanguageId::new(1), "hola", Some("   ".to_string())).unwrap();
        assert_eq!(entry.translation(), None);
    }

    #[test]
    fn bulk_vocabulary_rejects_blank_list() {
        let err = BulkVocabulary::new(LanguageId::new(1), "\n", SkillLevel::Beginner).unwrap_err();
        assert_eq!(err, ValidationError::EmptyWordList);
    }

    #[test]
    fn question_treats_empty_translation_as_missing() {
        let question = VocabularyQuestion::new(VocabularyId::new(1), "perro", Some(String::new()));
        assert_eq!(question.translation, None);
    }
}
