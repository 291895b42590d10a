//! Textdesk client: typed wire contract and sync/async bridge to the remote
//! text-processing service.
mod api;
mod bridge;
mod types;

pub use api::{ApiSettings, ReqwestTaskApi, TaskApi};
pub use bridge::{ClientCommand, ClientEvent, ClientHandle};
pub use types::{
    ApiError, ExtractedText, FailureKind, QaAnswer, QaOutcome, QaRequest, RequestId,
    SummarizeRequest, SummaryOutcome, UrlRequest, SUMMARY_MAX_LENGTH, SUMMARY_MIN_LENGTH,
};
