use crate::model::SentenceId;

/// One generated sentence to translate, replaced every round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceQuestion {
    pub sentence: String,
    pub translation: String,
    pub sentence_id: Option<SentenceId>,
}
