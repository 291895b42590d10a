use std::time::Duration;

use pretty_assertions::assert_eq;
use textdesk_client::{
    ApiSettings, FailureKind, QaRequest, ReqwestTaskApi, SummarizeRequest, TaskApi,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestTaskApi {
    ReqwestTaskApi::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn summarize_posts_fixed_bounds_and_parses_lengths() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize"))
        .and(body_json(serde_json::json!({
            "text": "body to summarize",
            "max_length": 300,
            "min_length": 50,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "summary": "short version",
            "keywords": ["body", "summary"],
            "originalLength": 17,
            "summaryLength": 13,
        })))
        .mount(&server)
        .await;

    let outcome = api_for(&server)
        .summarize(SummarizeRequest::new("body to summarize"))
        .await
        .expect("summarize ok");
    assert_eq!(outcome.summary, "short version");
    assert_eq!(outcome.keywords, vec!["body", "summary"]);
    assert_eq!(outcome.original_length, 17);
    assert_eq!(outcome.summary_length, 13);
}

#[tokio::test]
async fn summarize_maps_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .summarize(SummarizeRequest::new("body"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn malformed_summary_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "summary": "only" })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server)
        .summarize(SummarizeRequest::new("body"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({
                    "summary": "s",
                    "keywords": [],
                    "originalLength": 1,
                    "summaryLength": 1,
                })),
        )
        .mount(&server)
        .await;

    let api = ReqwestTaskApi::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    })
    .expect("client");

    let err = api.summarize(SummarizeRequest::new("body")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn url_extraction_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/url"))
        .and(body_json(serde_json::json!({
            "url": "https://example.com/doc"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": "scraped" })),
        )
        .mount(&server)
        .await;

    let text = api_for(&server)
        .extract_url("https://example.com/doc")
        .await
        .expect("extract ok");
    assert_eq!(text, "scraped");
}

#[tokio::test]
async fn url_extraction_maps_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/url"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .extract_url("https://example.com/doc")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(422));
}

struct MultipartFileField;

impl Match for MultipartFileField {
    fn matches(&self, request: &Request) -> bool {
        let is_multipart = request
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("multipart/form-data"))
            .unwrap_or(false);
        is_multipart && contains(&request.body, b"name=\"file\"")
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[tokio::test]
async fn upload_posts_the_file_as_multipart_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(MultipartFileField)
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": "extracted" })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("note.txt");
    std::fs::write(&file_path, "file body").expect("write fixture");

    let text = api_for(&server)
        .extract_file(&file_path)
        .await
        .expect("upload ok");
    assert_eq!(text, "extracted");
}

#[tokio::test]
async fn upload_of_unreadable_file_is_a_local_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let api = ReqwestTaskApi::new(ApiSettings::default()).expect("client");

    let err = api
        .extract_file(&dir.path().join("does-not-exist.txt"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Io);
}

#[tokio::test]
async fn qa_round_trip_preserves_question_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/qa"))
        .and(body_json(serde_json::json!({
            "text": "The quick brown fox jumps over the lazy dog.",
            "questions": ["What animal?", "What color?"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "question": "What animal?", "answer": "a fox", "confidence": 0.873 },
                { "question": "What color?", "answer": "brown", "confidence": 0.412 },
            ]
        })))
        .mount(&server)
        .await;

    let outcome = api_for(&server)
        .answer(QaRequest {
            text: "The quick brown fox jumps over the lazy dog.".to_string(),
            questions: vec!["What animal?".to_string(), "What color?".to_string()],
        })
        .await
        .expect("qa ok");
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].question, "What animal?");
    assert_eq!(outcome.results[0].answer, "a fox");
    assert_eq!(outcome.results[1].confidence, 0.412);
}

#[tokio::test]
async fn qa_rejects_answers_that_do_not_echo_the_questions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/qa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "question": "Something else?", "answer": "a", "confidence": 0.5 },
            ]
        })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .answer(QaRequest {
            text: "context".to_string(),
            questions: vec!["What animal?".to_string()],
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::AnswerMismatch);
}
