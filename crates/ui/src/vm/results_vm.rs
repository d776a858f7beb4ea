use services::SessionResults;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_label: String,
    pub accuracy_label: String,
    pub time_label: String,
    pub message: &'static str,
}

#[must_use]
pub fn map_results(results: &SessionResults) -> ResultsVm {
    let message = match results.accuracy {
        90.. => "Outstanding work!",
        70..=89 => "Great job, keep it up!",
        50..=69 => "Good effort. Practice makes perfect.",
        _ => "Keep practicing, you'll get there.",
    };
    ResultsVm {
        score_label: results.score_label(),
        accuracy_label: results.accuracy_label(),
        time_label: results.elapsed_label(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_labels_and_message() {
        let vm = map_results(&SessionResults {
            score: 3,
            total_answered: 4,
            accuracy: 75,
            elapsed_secs: 65,
        });
        assert_eq!(vm.score_label, "3/4");
        assert_eq!(vm.accuracy_label, "75%");
        assert_eq!(vm.time_label, "01:05");
        assert_eq!(vm.message, "Great job, keep it up!");
    }
}
