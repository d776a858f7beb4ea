use std::sync::Arc;

use crate::api::PracticeApi;

/// The single-sentence practice widget: fetch a sentence, check one translation.
///
/// Failures are logged and leave whatever is on screen untouched.
pub struct QuickPractice {
    api: Arc<dyn PracticeApi>,
    sentence: Option<String>,
    result: Option<bool>,
}

impl QuickPractice {
    #[must_use]
    pub fn new(api: Arc<dyn PracticeApi>) -> Self {
        Self {
            api,
            sentence: None,
            result: None,
        }
    }

    #[must_use]
    pub fn sentence(&self) -> Option<&str> {
        self.sentence.as_deref()
    }

    #[must_use]
    pub fn result(&self) -> Option<bool> {
        self.result
    }

    /// `Correct!` or `Incorrect!` once a translation has been checked.
    #[must_use]
    pub fn result_label(&self) -> Option<&'static str> {
        self.result
            .map(|correct| if correct { "Correct!" } else { "Incorrect!" })
    }

    /// Replaces the sentence and clears the previous result.
    ///
    /// Returns whether a new sentence arrived.
    pub async fn new_sentence(&mut self) -> bool {
        match self.api.legacy_sentence().await {
            Ok(sentence) => {
                self.sentence = Some(sentence);
                self.result = None;
                true
            }
            Err(err) => {
                log::error!("failed to fetch sentence: {err}");
                false
            }
        }
    }

    /// Checks `translation` against the sentence on screen.
    ///
    /// Does nothing until a sentence has been fetched.
    pub async fn check(&mut self, translation: &str) -> Option<bool> {
        let sentence = self.sentence.as_deref()?;
        match self.api.legacy_check_translation(translation, sentence).await {
            Ok(correct) => {
                self.result = Some(correct);
            }
            Err(err) => log::error!("failed to check translation: {err}"),
        }
        self.result
    }
}
