use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;

/// Fixed client-side bounds for the summarize endpoint; not user-configurable.
pub const SUMMARY_MAX_LENGTH: u32 = 300;
pub const SUMMARY_MIN_LENGTH: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus(u16),
    Timeout,
    Network,
    Io,
    MalformedResponse,
    AnswerMismatch,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Io => write!(f, "file error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::AnswerMismatch => write!(f, "answers do not match questions"),
        }
    }
}

/// Body of `POST /api/summarize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarizeRequest {
    pub text: String,
    pub max_length: u32,
    pub min_length: u32,
}

impl SummarizeRequest {
    /// Builds a request with the fixed client-side length bounds.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_length: SUMMARY_MAX_LENGTH,
            min_length: SUMMARY_MIN_LENGTH,
        }
    }
}

/// Response of `POST /api/summarize`. The service speaks camelCase for the
/// length fields; unknown extra fields are tolerated, missing ones are not.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummaryOutcome {
    pub summary: String,
    pub keywords: Vec<String>,
    #[serde(rename = "originalLength")]
    pub original_length: u64,
    #[serde(rename = "summaryLength")]
    pub summary_length: u64,
}

/// Body of `POST /api/qa`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QaRequest {
    pub text: String,
    pub questions: Vec<String>,
}

/// Response of `POST /api/qa`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QaOutcome {
    pub results: Vec<QaAnswer>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QaAnswer {
    pub question: String,
    pub answer: String,
    pub confidence: f64,
}

/// Response of both extraction endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtractedText {
    pub text: String,
}

/// Body of `POST /api/url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlRequest {
    pub url: String,
}
