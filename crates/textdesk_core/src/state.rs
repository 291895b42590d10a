use std::fmt;

use crate::update::parse_questions;
use crate::view_model::{build_view, AppViewModel};

pub type RequestId = u64;

/// Which task panel a message, effect or completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelKind {
    #[default]
    Summarizer,
    QuestionAnswering,
}

const SUMMARIZER_SOURCES: [SourceKind; 2] = [SourceKind::Upload, SourceKind::Url];
const QA_SOURCES: [SourceKind; 3] = [SourceKind::Upload, SourceKind::Url, SourceKind::Paste];

impl PanelKind {
    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Summarizer => "Summarizer",
            PanelKind::QuestionAnswering => "Question Answering",
        }
    }

    /// Direct paste is only offered on the question-answering panel.
    pub fn supports_paste(self) -> bool {
        matches!(self, PanelKind::QuestionAnswering)
    }

    pub fn source_choices(self) -> &'static [SourceKind] {
        match self {
            PanelKind::Summarizer => &SUMMARIZER_SOURCES,
            PanelKind::QuestionAnswering => &QA_SOURCES,
        }
    }

    fn default_source(self) -> SourceKind {
        match self {
            PanelKind::Summarizer => SourceKind::Upload,
            PanelKind::QuestionAnswering => SourceKind::Paste,
        }
    }
}

/// Where the panel's resolved text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Upload,
    Url,
    Paste,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Upload => "Upload File",
            SourceKind::Url => "Web URL",
            SourceKind::Paste => "Paste Text",
        }
    }
}

/// File extensions accepted by the upload source.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "txt", "docx", "md"];

pub fn is_supported_upload(path: &str) -> bool {
    std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// The operation an in-flight request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    ExtractFile,
    ExtractUrl,
    Task,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: RequestId,
    pub op: PendingOp,
}

/// Panel lifecycle phase.
///
/// `Failed` plays the role of post-failure idle: submission is allowed again
/// and the previous result is retained, but the error is carried for the
/// rendering layer instead of being swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading(PendingRequest),
    Settled,
    Failed(RequestError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    UnsupportedFile,
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
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::UnsupportedFile => write!(f, "unsupported file type"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Io => write!(f, "file error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::AnswerMismatch => write!(f, "answers do not match questions"),
        }
    }
}

/// The last successful response of a panel, kept until the next success.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskResult {
    Summary(SummaryResult),
    Answers(Vec<AnswerRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary: String,
    pub keywords: Vec<String>,
    pub original_length: u64,
    pub summary_length: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRow {
    pub question: String,
    pub answer: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    kind: PanelKind,
    source: SourceKind,
    url_input: String,
    file_input: String,
    questions_input: String,
    resolved_text: String,
    phase: Phase,
    result: Option<TaskResult>,
}

impl PanelState {
    fn new(kind: PanelKind) -> Self {
        Self {
            kind,
            source: kind.default_source(),
            url_input: String::new(),
            file_input: String::new(),
            questions_input: String::new(),
            resolved_text: String::new(),
            phase: Phase::Idle,
            result: None,
        }
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn file_input(&self) -> &str {
        &self.file_input
    }

    pub fn questions_input(&self) -> &str {
        &self.questions_input
    }

    pub fn resolved_text(&self) -> &str {
        &self.resolved_text
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn result(&self) -> Option<&TaskResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading(_))
    }

    pub fn offers_source(&self, source: SourceKind) -> bool {
        self.kind.source_choices().contains(&source)
    }

    /// True while a Load URL action would be accepted.
    pub fn can_load_url(&self) -> bool {
        !self.is_loading() && !self.url_input.trim().is_empty()
    }

    /// Submit preconditions: not loading, resolved text present and, on the
    /// question-answering panel, at least one non-blank question line.
    pub fn can_submit(&self) -> bool {
        if self.is_loading() || self.resolved_text.is_empty() {
            return false;
        }
        match self.kind {
            PanelKind::Summarizer => true,
            PanelKind::QuestionAnswering => !parse_questions(&self.questions_input).is_empty(),
        }
    }

    pub(crate) fn select_source(&mut self, source: SourceKind) {
        self.source = source;
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        self.url_input = text;
    }

    pub(crate) fn set_file_input(&mut self, text: String) {
        self.file_input = text;
    }

    pub(crate) fn set_questions_input(&mut self, text: String) {
        self.questions_input = text;
    }

    /// Paste edits become the resolved text immediately; no network involved.
    pub(crate) fn set_paste_text(&mut self, text: String) {
        self.resolved_text = text;
    }

    pub(crate) fn begin(&mut self, op: PendingOp, id: RequestId) {
        self.phase = Phase::Loading(PendingRequest { id, op });
    }

    pub(crate) fn fail(&mut self, error: RequestError) {
        self.phase = Phase::Failed(error);
    }

    /// Result phase once no request is in flight: `Settled` while a result
    /// is held, plain `Idle` otherwise.
    fn rest_phase(&self) -> Phase {
        if self.result.is_some() {
            Phase::Settled
        } else {
            Phase::Idle
        }
    }

    /// Applies an extraction completion. Returns false when the completion
    /// is stale (no matching in-flight acquisition) and was discarded.
    pub(crate) fn apply_extraction(
        &mut self,
        id: RequestId,
        result: Result<String, RequestError>,
    ) -> bool {
        match self.phase {
            Phase::Loading(pending)
                if pending.id == id
                    && matches!(pending.op, PendingOp::ExtractFile | PendingOp::ExtractUrl) => {}
            _ => return false,
        }
        match result {
            Ok(text) => {
                self.resolved_text = text;
                self.phase = self.rest_phase();
            }
            // Failed acquisition keeps the previous resolved text.
            Err(error) => self.phase = Phase::Failed(error),
        }
        true
    }

    /// Applies a task completion. Returns false when the completion is stale.
    pub(crate) fn apply_task(
        &mut self,
        id: RequestId,
        result: Result<TaskResult, RequestError>,
    ) -> bool {
        match self.phase {
            Phase::Loading(pending) if pending.id == id && pending.op == PendingOp::Task => {}
            _ => return false,
        }
        match result {
            Ok(outcome) => {
                self.result = Some(outcome);
                self.phase = Phase::Settled;
            }
            // The previous result stays visible through a failure.
            Err(error) => self.phase = Phase::Failed(error),
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    active: PanelKind,
    summarizer: PanelState,
    question_answering: PanelState,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active: PanelKind::Summarizer,
            summarizer: PanelState::new(PanelKind::Summarizer),
            question_answering: PanelState::new(PanelKind::QuestionAnswering),
            next_request_id: 1,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        build_view(self)
    }

    pub fn active(&self) -> PanelKind {
        self.active
    }

    pub fn panel(&self, kind: PanelKind) -> &PanelState {
        match kind {
            PanelKind::Summarizer => &self.summarizer,
            PanelKind::QuestionAnswering => &self.question_answering,
        }
    }

    pub(crate) fn panel_mut(&mut self, kind: PanelKind) -> &mut PanelState {
        match kind {
            PanelKind::Summarizer => &mut self.summarizer,
            PanelKind::QuestionAnswering => &mut self.question_answering,
        }
    }

    pub(crate) fn select_tab(&mut self, kind: PanelKind) {
        self.active = kind;
    }

    /// Request ids are allocated app-wide so a stale completion can never
    /// alias a newer request on the same panel.
    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a redraw is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }
}
