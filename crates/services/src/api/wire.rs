//! JSON shapes exchanged with the server.

use serde::{Deserialize, Serialize};

use lingua_core::model::{
    BulkVocabulary, Language, LanguageId, NewVocabulary, PracticeRecord, PracticeTarget,
    SentenceId, SentenceQuestion, SessionEndReport, SessionId, SkillLevel, UserLanguage,
    VocabularyId, VocabularyItem, VocabularyQuestion,
};

use crate::error::ApiError;

//
// ─── RESPONSES ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct LanguageDto {
    pub id: LanguageId,
    pub name: String,
    #[serde(default)]
    pub flag_emoji: Option<String>,
}

impl From<LanguageDto> for Language {
    fn from(dto: LanguageDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            flag_emoji: dto.flag_emoji.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserLanguageDto {
    pub language_id: LanguageId,
    #[serde(default)]
    pub proficiency_level: Option<String>,
}

impl From<UserLanguageDto> for UserLanguage {
    fn from(dto: UserLanguageDto) -> Self {
        Self {
            language_id: dto.language_id,
            proficiency_level: dto
                .proficiency_level
                .and_then(|raw| raw.parse::<SkillLevel>().ok()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VocabularyDto {
    pub id: VocabularyId,
    pub language_id: LanguageId,
    pub word: String,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub mastery_level: Option<u8>,
    #[serde(default)]
    pub review_count: Option<u32>,
}

impl From<VocabularyDto> for VocabularyItem {
    fn from(dto: VocabularyDto) -> Self {
        Self {
            id: dto.id,
            language_id: dto.language_id,
            word: dto.word,
            translation: dto.translation.filter(|value| !value.is_empty()),
            difficulty_level: dto.difficulty_level.unwrap_or_default(),
            mastery_level: dto.mastery_level.unwrap_or(0).min(5),
            review_count: dto.review_count.unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PracticeVocabularyDto {
    pub id: VocabularyId,
    pub word: String,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
}

impl From<PracticeVocabularyDto> for VocabularyQuestion {
    fn from(dto: PracticeVocabularyDto) -> Self {
        let mut question = VocabularyQuestion::new(dto.id, dto.word, dto.translation);
        question.difficulty_level = dto.difficulty_level;
        question
    }
}

/// The `{success, error?}` envelope shared by most write endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    pub(crate) fn into_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(self.error))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkAddResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub added_count: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BulkAddResponse {
    pub(crate) fn into_result(self) -> Result<u32, ApiError> {
        if self.success {
            Ok(self.added_count.unwrap_or(0))
        } else {
            Err(ApiError::Rejected(self.error))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartSessionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StartSessionResponse {
    pub(crate) fn into_result(self) -> Result<SessionId, ApiError> {
        match (self.success, self.session_id) {
            (true, Some(session_id)) => Ok(session_id),
            (true, None) => Err(ApiError::Rejected(Some("missing session id".to_string()))),
            (false, _) => Err(ApiError::Rejected(self.error)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateSentenceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub sentence: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub sentence_id: Option<SentenceId>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateSentenceResponse {
    pub(crate) fn into_result(self) -> Result<SentenceQuestion, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(self.error));
        }
        match (self.sentence, self.translation) {
            (Some(sentence), Some(translation)) => Ok(SentenceQuestion {
                sentence,
                translation,
                sentence_id: self.sentence_id,
            }),
            _ => Err(ApiError::Rejected(Some(
                "sentence payload is incomplete".to_string(),
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ScoreResponse {
    pub(crate) fn into_result(self) -> Result<bool, ApiError> {
        if self.success {
            Ok(self.is_correct)
        } else {
            Err(ApiError::Rejected(self.error))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacySentenceResponse {
    pub sentence: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyCheckResponse {
    #[serde(default)]
    pub correct: bool,
}

//
// ─── REQUESTS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub(crate) struct AddLanguageRequest {
    pub language_id: LanguageId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proficiency_level: Option<SkillLevel>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LanguageRequest {
    pub language_id: LanguageId,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddVocabularyRequest<'a> {
    pub language_id: LanguageId,
    pub word: &'a str,
    pub translation: Option<&'a str>,
}

impl<'a> From<&'a NewVocabulary> for AddVocabularyRequest<'a> {
    fn from(entry: &'a NewVocabulary) -> Self {
        Self {
            language_id: entry.language_id(),
            word: entry.word(),
            translation: entry.translation(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkAddRequest<'a> {
    pub language_id: LanguageId,
    pub words: &'a str,
    pub difficulty_level: SkillLevel,
}

impl<'a> From<&'a BulkVocabulary> for BulkAddRequest<'a> {
    fn from(bulk: &'a BulkVocabulary) -> Self {
        Self {
            language_id: bulk.language_id(),
            words: bulk.words(),
            difficulty_level: bulk.difficulty_level(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StartSessionRequest {
    pub language_id: LanguageId,
    pub session_type: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateSentenceRequest {
    pub language_id: LanguageId,
    pub difficulty_level: SkillLevel,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreRequest<'a> {
    pub user_translation: &'a str,
    pub correct_translation: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecordRequest<'a> {
    pub session_id: SessionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_id: Option<VocabularyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence_id: Option<SentenceId>,
    pub user_answer: &'a str,
    pub correct_answer: &'a str,
    pub is_correct: bool,
    pub response_time_ms: u64,
}

impl<'a> From<&'a PracticeRecord> for RecordRequest<'a> {
    fn from(record: &'a PracticeRecord) -> Self {
        let (vocabulary_id, sentence_id) = match record.target {
            PracticeTarget::Vocabulary(id) => (Some(id), None),
            PracticeTarget::Sentence(id) => (None, id),
        };
        Self {
            session_id: record.session_id,
            vocabulary_id,
            sentence_id,
            user_answer: &record.user_answer,
            correct_answer: &record.correct_answer,
            is_correct: record.is_correct,
            response_time_ms: record.response_time_ms,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EndSessionRequest {
    pub session_id: SessionId,
    pub words_practiced: u32,
    pub sentences_practiced: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
}

impl From<&SessionEndReport> for EndSessionRequest {
    fn from(report: &SessionEndReport) -> Self {
        Self {
            session_id: report.session_id,
            words_practiced: report.words_practiced,
            sentences_practiced: report.sentences_practiced,
            correct_answers: report.correct_answers,
            total_questions: report.total_questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LegacyCheckRequest<'a> {
    pub translation: &'a str,
    pub correct_sentence: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vocabulary_record_tolerates_missing_fields() {
        let dto: VocabularyDto = serde_json::from_value(json!({
            "id": 4,
            "language_id": 2,
            "word": "gato",
            "translation": "",
            "mastery_level": 9
        }))
        .unwrap();
        let item = VocabularyItem::from(dto);
        assert_eq!(item.translation, None);
        assert_eq!(item.mastery_level, 5);
        assert_eq!(item.review_count, 0);
        assert_eq!(item.difficulty_level, "");
    }

    #[test]
    fn unknown_proficiency_is_dropped() {
        let dto: UserLanguageDto = serde_json::from_value(json!({
            "language_id": 1,
            "proficiency_level": "native"
        }))
        .unwrap();
        assert_eq!(UserLanguage::from(dto).proficiency_level, None);
    }

    #[test]
    fn failed_sentence_payload_carries_server_error() {
        let response: GenerateSentenceResponse = serde_json::from_value(json!({
            "success": false,
            "error": "quota exceeded"
        }))
        .unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.server_message(), Some("quota exceeded"));
    }

    #[test]
    fn score_payload_without_success_is_rejected() {
        let response: ScoreResponse =
            serde_json::from_value(json!({ "is_correct": true })).unwrap();
        assert!(matches!(response.into_result(), Err(ApiError::Rejected(None))));
    }

    #[test]
    fn record_request_names_the_target() {
        let record = PracticeRecord {
            session_id: SessionId::new(3),
            target: PracticeTarget::Vocabulary(VocabularyId::new(8)),
            user_answer: "dog".to_string(),
            correct_answer: "dog".to_string(),
            is_correct: true,
            response_time_ms: 1_250,
        };
        let value = serde_json::to_value(RecordRequest::from(&record)).unwrap();
        assert_eq!(
            value,
            json!({
                "session_id": 3,
                "vocabulary_id": 8,
                "user_answer": "dog",
                "correct_answer": "dog",
                "is_correct": true,
                "response_time_ms": 1250
            })
        );
    }

    #[test]
    fn add_language_omits_missing_proficiency() {
        let value = serde_json::to_value(AddLanguageRequest {
            language_id: LanguageId::new(5),
            proficiency_level: None,
        })
        .unwrap();
        assert_eq!(value, json!({ "language_id": 5 }));

        let value = serde_json::to_value(AddLanguageRequest {
            language_id: LanguageId::new(5),
            proficiency_level: Some(SkillLevel::Intermediate),
        })
        .unwrap();
        assert_eq!(
            value,
            json!({ "language_id": 5, "proficiency_level": "intermediate" })
        );
    }
}
