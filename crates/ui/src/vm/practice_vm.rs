use services::AnswerFeedback;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabularyFeedbackVm {
    pub is_correct: bool,
    pub title: &'static str,
    /// Only shown after a wrong answer.
    pub correction: Option<String>,
}

#[must_use]
pub fn map_vocabulary_feedback(feedback: &AnswerFeedback) -> VocabularyFeedbackVm {
    VocabularyFeedbackVm {
        is_correct: feedback.is_correct,
        title: if feedback.is_correct {
            "Correct!"
        } else {
            "Incorrect"
        },
        correction: (!feedback.is_correct)
            .then(|| format!("The correct answer was: \"{}\"", feedback.correct_answer)),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentenceFeedbackVm {
    pub is_correct: bool,
    pub title: &'static str,
    pub your_translation: String,
    pub correct_translation: String,
}

#[must_use]
pub fn map_sentence_feedback(feedback: &AnswerFeedback) -> SentenceFeedbackVm {
    SentenceFeedbackVm {
        is_correct: feedback.is_correct,
        title: if feedback.is_correct {
            "Excellent Translation!"
        } else {
            "Keep Practicing"
        },
        your_translation: feedback.user_answer.clone(),
        correct_translation: feedback.correct_answer.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(is_correct: bool) -> AnswerFeedback {
        AnswerFeedback {
            is_correct,
            user_answer: "gato".to_string(),
            correct_answer: "cat".to_string(),
        }
    }

    #[test]
    fn vocabulary_correction_only_when_wrong() {
        assert_eq!(map_vocabulary_feedback(&feedback(true)).correction, None);
        assert_eq!(
            map_vocabulary_feedback(&feedback(false)).correction.as_deref(),
            Some("The correct answer was: \"cat\"")
        );
    }

    #[test]
    fn sentence_feedback_titles() {
        assert_eq!(map_sentence_feedback(&feedback(true)).title, "Excellent Translation!");
        let wrong = map_sentence_feedback(&feedback(false));
        assert_eq!(wrong.title, "Keep Practicing");
        assert_eq!(wrong.correct_translation, "cat");
    }
}
