use crate::state::{PanelKind, RequestId};

/// IO requested by the pure update function, executed by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the file at `path` to the extraction endpoint as multipart.
    ExtractFile {
        panel: PanelKind,
        request_id: RequestId,
        path: String,
    },
    /// Send the URL to the extraction-by-url endpoint.
    ExtractUrl {
        panel: PanelKind,
        request_id: RequestId,
        url: String,
    },
    /// Send the resolved text to the summarize endpoint.
    Summarize {
        panel: PanelKind,
        request_id: RequestId,
        text: String,
    },
    /// Send the resolved text and question list to the qa endpoint.
    AnswerQuestions {
        panel: PanelKind,
        request_id: RequestId,
        text: String,
        questions: Vec<String>,
    },
}
