use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use lingua_core::model::{
    BulkVocabulary, Language, LanguageId, NewVocabulary, PracticeRecord, SentenceQuestion,
    SessionEndReport, SessionId, SessionKind, SkillLevel, UserLanguage, VocabularyId,
    VocabularyItem, VocabularyQuestion,
};

use super::endpoint::Endpoint;
use super::wire::{
    AddLanguageRequest, AddVocabularyRequest, BulkAddRequest, BulkAddResponse, EndSessionRequest,
    GenerateSentenceRequest, GenerateSentenceResponse, LanguageDto, LanguageRequest,
    LegacyCheckRequest, LegacyCheckResponse, LegacySentenceResponse, PracticeVocabularyDto,
    RecordRequest, ScoreRequest, ScoreResponse, StartSessionRequest, StartSessionResponse,
    StatusResponse, UserLanguageDto, VocabularyDto,
};
use super::PracticeApi;
use crate::config::ClientConfig;
use crate::error::ApiError;

/// `PracticeApi` over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpPracticeApi {
    client: Client,
    base_url: Url,
}

impl HttpPracticeApi {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url().clone(),
        })
    }

    pub(crate) fn url(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        Ok(self.base_url.join(endpoint.path())?)
    }

    fn item_url(&self, endpoint: Endpoint, id: impl std::fmt::Display) -> Result<Url, ApiError> {
        Ok(self.base_url.join(&format!("{}/{id}", endpoint.path()))?)
    }

    fn request(&self, endpoint: Endpoint) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.request(endpoint.method(), self.url(endpoint)?))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let response = self.request(endpoint)?.send().await?;
        read_json(response).await
    }

    async fn send<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(endpoint)?.json(body).send().await?;
        read_json(response).await
    }

    /// For tracking endpoints whose response body is not part of the contract.
    async fn send_ignoring_body<B>(&self, endpoint: Endpoint, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let response = self.request(endpoint)?.json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::HttpStatus(status))
        }
    }
}

/// Decodes a success body, or turns an error body into the most specific `ApiError`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let reason = response
            .json::<StatusResponse>()
            .await
            .ok()
            .and_then(|body| body.error);
        return Err(match reason {
            Some(message) => ApiError::Rejected(Some(message)),
            None => ApiError::HttpStatus(status),
        });
    }
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl PracticeApi for HttpPracticeApi {
    async fn languages(&self) -> Result<Vec<Language>, ApiError> {
        let rows: Vec<LanguageDto> = self.get(Endpoint::Languages).await?;
        Ok(rows.into_iter().map(Language::from).collect())
    }

    async fn user_languages(&self) -> Result<Vec<UserLanguage>, ApiError> {
        let rows: Vec<UserLanguageDto> = self.get(Endpoint::UserLanguages).await?;
        Ok(rows.into_iter().map(UserLanguage::from).collect())
    }

    async fn add_language(
        &self,
        language_id: LanguageId,
        proficiency: Option<SkillLevel>,
    ) -> Result<(), ApiError> {
        let body = AddLanguageRequest {
            language_id,
            proficiency_level: proficiency,
        };
        let status: StatusResponse = self.send(Endpoint::AddLanguage, &body).await?;
        status.into_result()
    }

    async fn remove_language(&self, language_id: LanguageId) -> Result<(), ApiError> {
        let status: StatusResponse = self
            .send(Endpoint::RemoveLanguage, &LanguageRequest { language_id })
            .await?;
        status.into_result()
    }

    async fn vocabulary(&self) -> Result<Vec<VocabularyItem>, ApiError> {
        let rows: Vec<VocabularyDto> = self.get(Endpoint::Vocabulary).await?;
        Ok(rows.into_iter().map(VocabularyItem::from).collect())
    }

    async fn delete_vocabulary(&self, id: VocabularyId) -> Result<(), ApiError> {
        let url = self.item_url(Endpoint::DeleteVocabulary, id)?;
        let response = self
            .client
            .request(Endpoint::DeleteVocabulary.method(), url)
            .send()
            .await?;
        let status: StatusResponse = read_json(response).await?;
        status.into_result()
    }

    async fn add_vocabulary(&self, entry: &NewVocabulary) -> Result<(), ApiError> {
        let status: StatusResponse = self
            .send(Endpoint::AddVocabulary, &AddVocabularyRequest::from(entry))
            .await?;
        status.into_result()
    }

    async fn bulk_add_vocabulary(&self, bulk: &BulkVocabulary) -> Result<u32, ApiError> {
        let response: BulkAddResponse = self
            .send(Endpoint::BulkAddVocabulary, &BulkAddRequest::from(bulk))
            .await?;
        response.into_result()
    }

    async fn start_session(
        &self,
        language_id: LanguageId,
        kind: SessionKind,
    ) -> Result<SessionId, ApiError> {
        let body = StartSessionRequest {
            language_id,
            session_type: kind.as_str(),
        };
        let response: StartSessionResponse = self.send(Endpoint::StartSession, &body).await?;
        response.into_result()
    }

    async fn practice_vocabulary(
        &self,
        language_id: LanguageId,
        limit: usize,
    ) -> Result<Vec<VocabularyQuestion>, ApiError> {
        let limit = u64::try_from(limit).unwrap_or(u64::MAX);
        let response = self
            .request(Endpoint::PracticeVocabulary)?
            .query(&[("language_id", language_id.value()), ("limit", limit)])
            .send()
            .await?;
        let rows: Vec<PracticeVocabularyDto> = read_json(response).await?;
        Ok(rows.into_iter().map(VocabularyQuestion::from).collect())
    }

    async fn generate_sentence(
        &self,
        language_id: LanguageId,
        difficulty: SkillLevel,
    ) -> Result<SentenceQuestion, ApiError> {
        let body = GenerateSentenceRequest {
            language_id,
            difficulty_level: difficulty,
        };
        let response: GenerateSentenceResponse =
            self.send(Endpoint::GenerateSentence, &body).await?;
        response.into_result()
    }

    async fn score_translation(
        &self,
        user_translation: &str,
        correct_translation: &str,
    ) -> Result<bool, ApiError> {
        let body = ScoreRequest {
            user_translation,
            correct_translation,
        };
        let response: ScoreResponse = self.send(Endpoint::ScoreTranslation, &body).await?;
        response.into_result()
    }

    async fn record_practice(&self, record: &PracticeRecord) -> Result<(), ApiError> {
        self.send_ignoring_body(Endpoint::RecordPractice, &RecordRequest::from(record))
            .await
    }

    async fn end_session(&self, report: &SessionEndReport) -> Result<(), ApiError> {
        self.send_ignoring_body(Endpoint::EndSession, &EndSessionRequest::from(report))
            .await
    }

    async fn legacy_sentence(&self) -> Result<String, ApiError> {
        let response: LegacySentenceResponse = self.get(Endpoint::LegacySentence).await?;
        Ok(response.sentence)
    }

    async fn legacy_check_translation(
        &self,
        translation: &str,
        correct_sentence: &str,
    ) -> Result<bool, ApiError> {
        let body = LegacyCheckRequest {
            translation,
            correct_sentence,
        };
        let response: LegacyCheckResponse =
            self.send(Endpoint::LegacyCheckTranslation, &body).await?;
        Ok(response.correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpPracticeApi {
        HttpPracticeApi::new(&ClientConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn endpoints_nest_under_base_path() {
        let api = api("https://lingua.example.com/app");
        assert_eq!(
            api.url(Endpoint::GenerateSentence).unwrap().as_str(),
            "https://lingua.example.com/app/api/practice/generate-sentence"
        );
        assert_eq!(
            api.url(Endpoint::LegacyCheckTranslation).unwrap().as_str(),
            "https://lingua.example.com/app/check_translation"
        );
    }

    #[test]
    fn delete_vocabulary_url_appends_id() {
        let api = api("http://localhost:5000");
        let url = api
            .item_url(Endpoint::DeleteVocabulary, VocabularyId::new(12))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/vocabulary/12");
    }
}
