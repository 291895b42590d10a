use crate::state::{AppState, FailureKind, PanelKind, PendingOp, RequestError, SourceKind};
use crate::{Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TabSelected(panel) => {
            if state.active() != panel {
                state.select_tab(panel);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SourceSelected { panel, source } => {
            // Switching sources keeps previously resolved text until a new
            // acquisition succeeds.
            if state.panel(panel).offers_source(source) && state.panel(panel).source() != source {
                state.panel_mut(panel).select_source(source);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UrlEdited { panel, text } => {
            state.panel_mut(panel).set_url_input(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::FileEdited { panel, text } => {
            state.panel_mut(panel).set_file_input(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::TextPasted { panel, text } => {
            if panel.supports_paste() && state.panel(panel).source() == SourceKind::Paste {
                state.panel_mut(panel).set_paste_text(text);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::QuestionsEdited { panel, text } => {
            if panel == PanelKind::QuestionAnswering {
                state.panel_mut(panel).set_questions_input(text);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LoadUrlRequested { panel } => {
            if !state.panel(panel).can_load_url() {
                return (state, Vec::new());
            }
            let raw = state.panel(panel).url_input().trim().to_string();
            match url::Url::parse(&raw) {
                Ok(parsed) => {
                    let request_id = state.allocate_request_id();
                    state.panel_mut(panel).begin(PendingOp::ExtractUrl, request_id);
                    state.mark_dirty();
                    vec![Effect::ExtractUrl {
                        panel,
                        request_id,
                        url: String::from(parsed),
                    }]
                }
                Err(err) => {
                    state
                        .panel_mut(panel)
                        .fail(RequestError::new(FailureKind::InvalidUrl, err.to_string()));
                    state.mark_dirty();
                    Vec::new()
                }
            }
        }
        Msg::UploadRequested { panel } => {
            if state.panel(panel).is_loading() {
                return (state, Vec::new());
            }
            let path = state.panel(panel).file_input().trim().to_string();
            if path.is_empty() {
                return (state, Vec::new());
            }
            if !crate::state::is_supported_upload(&path) {
                state.panel_mut(panel).fail(RequestError::new(
                    FailureKind::UnsupportedFile,
                    format!("{path} is not a pdf, txt, docx or md file"),
                ));
                state.mark_dirty();
                return (state, Vec::new());
            }
            let request_id = state.allocate_request_id();
            state.panel_mut(panel).begin(PendingOp::ExtractFile, request_id);
            state.mark_dirty();
            vec![Effect::ExtractFile {
                panel,
                request_id,
                path,
            }]
        }
        Msg::SubmitClicked { panel } => {
            if !state.panel(panel).can_submit() {
                return (state, Vec::new());
            }
            let text = state.panel(panel).resolved_text().to_string();
            let request_id = state.allocate_request_id();
            let effect = match panel {
                PanelKind::Summarizer => Effect::Summarize {
                    panel,
                    request_id,
                    text,
                },
                PanelKind::QuestionAnswering => Effect::AnswerQuestions {
                    panel,
                    request_id,
                    text,
                    questions: parse_questions(state.panel(panel).questions_input()),
                },
            };
            state.panel_mut(panel).begin(PendingOp::Task, request_id);
            state.mark_dirty();
            vec![effect]
        }
        Msg::ExtractionDone {
            panel,
            request_id,
            result,
        } => {
            if state.panel_mut(panel).apply_extraction(request_id, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TaskDone {
            panel,
            request_id,
            result,
        } => {
            if state.panel_mut(panel).apply_task(request_id, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Splits the raw questions buffer into the submitted question list: lines
/// are trimmed, blank lines dropped, order preserved.
pub fn parse_questions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
