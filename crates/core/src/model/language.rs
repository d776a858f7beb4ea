use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::model::LanguageId;

//
// ─── SKILL LEVEL ───────────────────────────────────────────────────────────────
//

/// Three-step level used for a learner's proficiency and for requested difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = ValidationError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidLevel(s.to_string()))
    }
}

//
// ─── LANGUAGES ─────────────────────────────────────────────────────────────────
//

/// A language offered by the server catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub id: LanguageId,
    pub name: String,
    pub flag_emoji: String,
}

impl Language {
    /// Label used in selectors, e.g. `🇪🇸 Spanish`.
    #[must_use]
    pub fn label(&self) -> String {
        if self.flag_emoji.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.flag_emoji, self.name)
        }
    }
}

/// A language the current user is learning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLanguage {
    pub language_id: LanguageId,
    pub proficiency_level: Option<SkillLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!("Advanced".parse::<SkillLevel>(), Ok(SkillLevel::Advanced));
        assert_eq!(" beginner ".parse::<SkillLevel>(), Ok(SkillLevel::Beginner));
        assert_eq!(
            "expert".parse::<SkillLevel>(),
            Err(ValidationError::InvalidLevel("expert".to_string()))
        );
    }

    #[test]
    fn label_includes_flag_when_present() {
        let mut language = Language {
            id: LanguageId::new(1),
            name: "Spanish".to_string(),
            flag_emoji: "🇪🇸".to_string(),
        };
        assert_eq!(language.label(), "🇪🇸 Spanish");
        language.flag_emoji.clear();
        assert_eq!(language.label(), "Spanish");
    }
}
