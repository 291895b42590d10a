use crate::state::{PanelKind, RequestError, RequestId, SourceKind, TaskResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User switched the visible task panel.
    TabSelected(PanelKind),
    /// User picked an input source for a panel.
    SourceSelected { panel: PanelKind, source: SourceKind },
    /// URL input text changed.
    UrlEdited { panel: PanelKind, text: String },
    /// File path input text changed.
    FileEdited { panel: PanelKind, text: String },
    /// Paste buffer changed; becomes the resolved text directly (QA only).
    TextPasted { panel: PanelKind, text: String },
    /// Questions buffer changed (QA only).
    QuestionsEdited { panel: PanelKind, text: String },
    /// User asked to load the typed URL through the extraction endpoint.
    LoadUrlRequested { panel: PanelKind },
    /// User confirmed the typed file path for upload extraction.
    UploadRequested { panel: PanelKind },
    /// User pressed the panel's submit control.
    SubmitClicked { panel: PanelKind },
    /// Extraction finished for an in-flight acquisition.
    ExtractionDone {
        panel: PanelKind,
        request_id: RequestId,
        result: Result<String, RequestError>,
    },
    /// Task request finished.
    TaskDone {
        panel: PanelKind,
        request_id: RequestId,
        result: Result<TaskResult, RequestError>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
