//! Multiple-choice answer options for vocabulary rounds.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::VocabularyQuestion;

/// Number of options shown for every vocabulary question.
pub const OPTION_COUNT: usize = 4;

/// Maximum number of distractors drawn from other loaded questions.
pub const MAX_DISTRACTORS: usize = OPTION_COUNT - 1;

/// Label shown for an item that has no translation.
pub const MISSING_TRANSLATION_LABEL: &str = "No translation available";

/// Fillers used, in order, when the pool has too few distinct translations.
pub const FILLER_OPTIONS: [&str; 3] = ["I don't know", "Skip this question", "Need help"];

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOption {
    Translation(String),
    /// The item has no translation. Still selectable, and correct for such items.
    Missing,
    Filler(String),
}

impl AnswerOption {
    /// The correct option for `question`.
    #[must_use]
    pub fn for_question(question: &VocabularyQuestion) -> Self {
        match question.translation.as_deref() {
            Some(text) if !text.is_empty() => Self::Translation(text.to_string()),
            _ => Self::Missing,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            AnswerOption::Translation(text) | AnswerOption::Filler(text) => text,
            AnswerOption::Missing => MISSING_TRANSLATION_LABEL,
        }
    }
}

/// Shuffles `items` in place with a uniform Fisher-Yates permutation.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Builds the options for `current`: the correct answer, up to three distractors
/// from the rest of `pool`, then fillers until there are [`OPTION_COUNT`].
///
/// Options are unique by label and returned in random order.
pub fn build_answer_options<R: Rng + ?Sized>(
    current: &VocabularyQuestion,
    pool: &[VocabularyQuestion],
    rng: &mut R,
) -> Vec<AnswerOption> {
    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(AnswerOption::for_question(current));

    let mut others: Vec<&VocabularyQuestion> =
        pool.iter().filter(|question| question.id != current.id).collect();
    others.shuffle(rng);

    for other in others.into_iter().take(MAX_DISTRACTORS) {
        push_unique(&mut options, AnswerOption::for_question(other));
    }

    let mut fillers = FILLER_OPTIONS.iter().map(|label| (*label).to_string());
    let mut numbered = OPTION_COUNT + 1;
    while options.len() < OPTION_COUNT {
        let label = fillers.next().unwrap_or_else(|| {
            let label = format!("Option {numbered}");
            numbered += 1;
            label
        });
        push_unique(&mut options, AnswerOption::Filler(label));
    }

    options.shuffle(rng);
    options
}

fn push_unique(options: &mut Vec<AnswerOption>, candidate: AnswerOption) {
    if options.iter().all(|existing| existing.label() != candidate.label()) {
        options.push(candidate);
    }
}
