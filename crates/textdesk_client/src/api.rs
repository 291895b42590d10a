use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{
    ApiError, ExtractedText, FailureKind, QaOutcome, QaRequest, SummarizeRequest, SummaryOutcome,
    UrlRequest,
};

/// Connection settings for the remote text-processing service.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The four remote operations of the text-processing service.
#[async_trait::async_trait]
pub trait TaskApi: Send + Sync {
    /// Uploads a local file to the extraction endpoint and returns the
    /// extracted text.
    async fn extract_file(&self, path: &Path) -> Result<String, ApiError>;
    /// Asks the service to scrape a remote URL and returns the extracted text.
    async fn extract_url(&self, url: &str) -> Result<String, ApiError>;
    async fn summarize(&self, request: SummarizeRequest) -> Result<SummaryOutcome, ApiError>;
    async fn answer(&self, request: QaRequest) -> Result<QaOutcome, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTaskApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestTaskApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_response(response).await
    }
}

#[async_trait::async_trait]
impl TaskApi for ReqwestTaskApi {
    async fn extract_file(&self, path: &Path) -> Result<String, ApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ApiError::new(FailureKind::Io, err.to_string()))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("/api/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let extracted: ExtractedText = decode_response(response).await?;
        Ok(extracted.text)
    }

    async fn extract_url(&self, url: &str) -> Result<String, ApiError> {
        let extracted: ExtractedText = self
            .post_json(
                "/api/url",
                &UrlRequest {
                    url: url.to_string(),
                },
            )
            .await?;
        Ok(extracted.text)
    }

    async fn summarize(&self, request: SummarizeRequest) -> Result<SummaryOutcome, ApiError> {
        self.post_json("/api/summarize", &request).await
    }

    async fn answer(&self, request: QaRequest) -> Result<QaOutcome, ApiError> {
        let outcome: QaOutcome = self.post_json("/api/qa", &request).await?;
        validate_answers(&request.questions, &outcome)?;
        Ok(outcome)
    }
}

async fn decode_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| ApiError::new(FailureKind::MalformedResponse, err.to_string()))
}

/// Checks the service does not guarantee: each result must echo its submitted
/// question in order, and confidences must stay within `[0, 1]`.
fn validate_answers(questions: &[String], outcome: &QaOutcome) -> Result<(), ApiError> {
    if outcome.results.len() != questions.len() {
        return Err(ApiError::new(
            FailureKind::AnswerMismatch,
            format!(
                "{} answers for {} questions",
                outcome.results.len(),
                questions.len()
            ),
        ));
    }
    for (answer, question) in outcome.results.iter().zip(questions) {
        if &answer.question != question {
            return Err(ApiError::new(
                FailureKind::AnswerMismatch,
                format!("answer echoes {:?}, expected {:?}", answer.question, question),
            ));
        }
        if !answer.confidence.is_finite() || !(0.0..=1.0).contains(&answer.confidence) {
            return Err(ApiError::new(
                FailureKind::MalformedResponse,
                format!("confidence {} out of range", answer.confidence),
            ));
        }
    }
    Ok(())
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::validate_answers;
    use crate::types::{FailureKind, QaAnswer, QaOutcome};

    fn outcome(rows: &[(&str, f64)]) -> QaOutcome {
        QaOutcome {
            results: rows
                .iter()
                .map(|(question, confidence)| QaAnswer {
                    question: question.to_string(),
                    answer: "a".to_string(),
                    confidence: *confidence,
                })
                .collect(),
        }
    }

    #[test]
    fn matching_echo_passes() {
        let questions = vec!["Q1".to_string(), "Q2".to_string()];
        assert!(validate_answers(&questions, &outcome(&[("Q1", 0.4), ("Q2", 1.0)])).is_ok());
    }

    #[test]
    fn reordered_echo_is_a_mismatch() {
        let questions = vec!["Q1".to_string(), "Q2".to_string()];
        let err = validate_answers(&questions, &outcome(&[("Q2", 0.4), ("Q1", 0.5)])).unwrap_err();
        assert_eq!(err.kind, FailureKind::AnswerMismatch);
    }

    #[test]
    fn missing_answer_is_a_mismatch() {
        let questions = vec!["Q1".to_string(), "Q2".to_string()];
        let err = validate_answers(&questions, &outcome(&[("Q1", 0.4)])).unwrap_err();
        assert_eq!(err.kind, FailureKind::AnswerMismatch);
    }

    #[test]
    fn out_of_range_confidence_is_malformed() {
        let questions = vec!["Q1".to_string()];
        let err = validate_answers(&questions, &outcome(&[("Q1", 1.7)])).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
        let err = validate_answers(&questions, &outcome(&[("Q1", f64::NAN)])).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }
}
