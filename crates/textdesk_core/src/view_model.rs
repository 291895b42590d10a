use crate::state::{AppState, PanelKind, PanelState, Phase, SourceKind, TaskResult};

/// Advisory upload hint shown next to the file input. The limit is not
/// enforced client-side.
pub const UPLOAD_HINT: &str = "Limit 200MB per file • PDF, TXT, DOCX, MD";

/// Maximum bytes of resolved text shown in the preview box.
pub const MAX_PREVIEW_CONTENT: usize = 2_048;

const TRUNCATED_MARKER: &str = "\n.[truncated]";

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub active: PanelKind,
    pub summarizer: PanelView,
    pub question_answering: PanelView,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn active_panel(&self) -> &PanelView {
        match self.active {
            PanelKind::Summarizer => &self.summarizer,
            PanelKind::QuestionAnswering => &self.question_answering,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub kind: PanelKind,
    pub title: &'static str,
    pub source: SourceKind,
    pub source_choices: &'static [SourceKind],
    pub url_input: String,
    pub file_input: String,
    pub questions_input: String,
    /// Full resolved text; `preview` is the truncated display form.
    pub resolved_text: String,
    pub preview: Option<String>,
    pub busy: bool,
    pub load_url_enabled: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub result: Option<ResultView>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Summary(SummaryView),
    Answers(Vec<AnswerView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub summary: String,
    pub keywords: Vec<String>,
    pub original_length_label: String,
    pub summary_length_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerView {
    pub question: String,
    pub answer: String,
    pub confidence_label: String,
}

pub(crate) fn build_view(state: &AppState) -> AppViewModel {
    AppViewModel {
        active: state.active(),
        summarizer: build_panel(state.panel(PanelKind::Summarizer)),
        question_answering: build_panel(state.panel(PanelKind::QuestionAnswering)),
        dirty: state.is_dirty(),
    }
}

fn build_panel(panel: &PanelState) -> PanelView {
    let kind = panel.kind();
    PanelView {
        kind,
        title: kind.title(),
        source: panel.source(),
        source_choices: kind.source_choices(),
        url_input: panel.url_input().to_string(),
        file_input: panel.file_input().to_string(),
        questions_input: panel.questions_input().to_string(),
        resolved_text: panel.resolved_text().to_string(),
        preview: if panel.resolved_text().is_empty() {
            None
        } else {
            Some(preview_excerpt(panel.resolved_text()))
        },
        busy: panel.is_loading(),
        load_url_enabled: panel.can_load_url(),
        submit_enabled: panel.can_submit(),
        submit_label: match kind {
            PanelKind::Summarizer => "Summarize",
            PanelKind::QuestionAnswering => "Get Answers",
        },
        error: match panel.phase() {
            Phase::Failed(error) => Some(format!("{}: {}", error.kind, error.message)),
            _ => None,
        },
        result: panel.result().map(build_result),
    }
}

fn build_result(result: &TaskResult) -> ResultView {
    match result {
        TaskResult::Summary(summary) => ResultView::Summary(SummaryView {
            summary: summary.summary.clone(),
            keywords: summary.keywords.clone(),
            original_length_label: format!("{} characters", summary.original_length),
            summary_length_label: format!("{} characters", summary.summary_length),
        }),
        TaskResult::Answers(rows) => ResultView::Answers(
            rows.iter()
                .map(|row| AnswerView {
                    question: row.question.clone(),
                    answer: row.answer.clone(),
                    confidence_label: format_confidence(row.confidence),
                })
                .collect(),
        ),
    }
}

/// Formats a confidence in `[0, 1]` as a one-decimal percentage, e.g. `87.3%`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Truncates resolved text for preview on a char boundary.
pub fn preview_excerpt(text: &str) -> String {
    if text.len() <= MAX_PREVIEW_CONTENT {
        return text.to_string();
    }
    let mut end = MAX_PREVIEW_CONTENT;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    let truncated = &text[..end];
    format!("{truncated}{TRUNCATED_MARKER}")
}

#[cfg(test)]
mod tests {
    use super::{format_confidence, preview_excerpt, MAX_PREVIEW_CONTENT};

    #[test]
    fn confidence_has_one_decimal() {
        assert_eq!(format_confidence(0.873), "87.3%");
        assert_eq!(format_confidence(0.0), "0.0%");
        assert_eq!(format_confidence(1.0), "100.0%");
    }

    #[test]
    fn short_preview_kept_as_is() {
        assert_eq!(preview_excerpt("short preview"), "short preview");
    }

    #[test]
    fn long_preview_appends_marker() {
        let content: String = "a".repeat(MAX_PREVIEW_CONTENT + 128);
        let preview = preview_excerpt(&content);
        assert!(preview.ends_with("\n.[truncated]"));
        assert_eq!(
            preview.len(),
            MAX_PREVIEW_CONTENT + "\n.[truncated]".len()
        );
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut content = "é".repeat(MAX_PREVIEW_CONTENT / 2);
        content.push_str("tail");
        let preview = preview_excerpt(&content);
        assert!(preview.ends_with("\n.[truncated]"));
    }
}
