use lingua_core::format_elapsed;
use lingua_core::model::SessionScore;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based number of the question on screen, capped at `total`.
    pub number: usize,
    pub total: usize,
    pub score: u32,
    pub answered: u32,
}

impl SessionProgress {
    #[must_use]
    pub fn question_label(&self) -> String {
        format!("{} / {}", self.number, self.total)
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{} / {}", self.score, self.answered)
    }
}

/// Outcome of one answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub user_answer: String,
    pub correct_answer: String,
}

/// Final tallies shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResults {
    pub score: u32,
    pub total_answered: u32,
    /// Whole percent, 0 when nothing was answered.
    pub accuracy: u32,
    pub elapsed_secs: u64,
}

impl SessionResults {
    #[must_use]
    pub fn new(score: SessionScore, elapsed_secs: u64) -> Self {
        Self {
            score: score.score(),
            total_answered: score.total_answered(),
            accuracy: score.accuracy(),
            elapsed_secs,
        }
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{}/{}", self.score, self.total_answered)
    }

    #[must_use]
    pub fn accuracy_label(&self) -> String {
        format!("{}%", self.accuracy)
    }

    #[must_use]
    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_labels() {
        let mut score = SessionScore::new();
        for correct in [true, true, false, true] {
            score.record(correct);
        }
        let results = SessionResults::new(score, 125);
        assert_eq!(results.score_label(), "3/4");
        assert_eq!(results.accuracy_label(), "75%");
        assert_eq!(results.elapsed_label(), "02:05");
    }

    #[test]
    fn progress_labels() {
        let progress = SessionProgress {
            number: 3,
            total: 10,
            score: 1,
            answered: 2,
        };
        assert_eq!(progress.question_label(), "3 / 10");
        assert_eq!(progress.score_label(), "1 / 2");
    }
}
