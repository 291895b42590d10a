//! Textdesk core: pure panel state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    is_supported_upload, AnswerRow, AppState, FailureKind, PanelKind, PanelState, PendingOp,
    PendingRequest, Phase, RequestError, RequestId, SourceKind, SummaryResult, TaskResult,
    SUPPORTED_EXTENSIONS,
};
pub use update::{parse_questions, update};
pub use view_model::{
    format_confidence, preview_excerpt, AnswerView, AppViewModel, PanelView, ResultView,
    SummaryView, MAX_PREVIEW_CONTENT, UPLOAD_HINT,
};
