use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use lingua_core::model::{PracticeRecord, SessionEndReport};

use crate::api::PracticeApi;

/// Sends practice telemetry in the background.
///
/// Calls never block the session and their failures are only logged.
/// Join handles are kept so callers can `flush` before shutdown or in tests.
pub struct SessionTracker {
    api: Arc<dyn PracticeApi>,
    pending: Vec<JoinHandle<()>>,
}

impl SessionTracker {
    #[must_use]
    pub fn new(api: Arc<dyn PracticeApi>) -> Self {
        Self {
            api,
            pending: Vec::new(),
        }
    }

    pub fn record(&mut self, record: PracticeRecord) {
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            if let Err(err) = api.record_practice(&record).await {
                log::warn!(
                    "failed to record practice for session {}: {err}",
                    record.session_id
                );
            }
        });
    }

    pub fn end_session(&mut self, report: SessionEndReport) {
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            if let Err(err) = api.end_session(&report).await {
                log::warn!("failed to end session {}: {err}", report.session_id);
            }
        });
    }

    /// Number of calls that have not completed yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|task| !task.is_finished()).count()
    }

    /// Waits for every call issued so far.
    pub async fn flush(&mut self) {
        for task in self.pending.drain(..) {
            if let Err(err) = task.await {
                log::warn!("tracking task did not complete: {err}");
            }
        }
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.pending.retain(|task| !task.is_finished());
        match Handle::try_current() {
            Ok(handle) => self.pending.push(handle.spawn(task)),
            Err(err) => log::warn!("dropping tracking call outside a runtime: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Endpoint, InMemoryPracticeApi};
    use lingua_core::model::{PracticeTarget, SessionId, VocabularyId};

    fn record(answer: &str) -> PracticeRecord {
        PracticeRecord {
            session_id: SessionId::new(4),
            target: PracticeTarget::Vocabulary(VocabularyId::new(9)),
            user_answer: answer.to_string(),
            correct_answer: "dog".to_string(),
            is_correct: answer == "dog",
            response_time_ms: 1200,
        }
    }

    #[tokio::test]
    async fn flush_waits_for_every_call() {
        let api = InMemoryPracticeApi::new();
        let mut tracker = SessionTracker::new(Arc::new(api.clone()));
        tracker.record(record("dog"));
        tracker.record(record("cat"));
        tracker.flush().await;

        let answers: Vec<_> = api.records().into_iter().map(|r| r.user_answer).collect();
        assert_eq!(answers, ["dog", "cat"]);
        assert_eq!(tracker.pending(), 0);
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        let api = InMemoryPracticeApi::new();
        api.fail(Endpoint::RecordPractice);
        let mut tracker = SessionTracker::new(Arc::new(api.clone()));
        tracker.record(record("dog"));
        tracker.flush().await;

        assert!(api.records().is_empty());
        assert_eq!(api.calls(Endpoint::RecordPractice), 1);
    }
}
