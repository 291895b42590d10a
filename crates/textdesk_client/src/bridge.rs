use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use desk_logging::desk_warn;

use crate::api::{ApiSettings, ReqwestTaskApi, TaskApi};
use crate::types::{ApiError, QaOutcome, QaRequest, RequestId, SummarizeRequest, SummaryOutcome};

/// One remote operation, tagged with the request id that is echoed on the
/// completion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    ExtractFile {
        request_id: RequestId,
        path: PathBuf,
    },
    ExtractUrl {
        request_id: RequestId,
        url: String,
    },
    Summarize {
        request_id: RequestId,
        text: String,
    },
    AnswerQuestions {
        request_id: RequestId,
        text: String,
        questions: Vec<String>,
    },
}

/// Exactly one event per submitted command.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    ExtractionCompleted {
        request_id: RequestId,
        result: Result<String, ApiError>,
    },
    SummaryCompleted {
        request_id: RequestId,
        result: Result<SummaryOutcome, ApiError>,
    },
    AnswersCompleted {
        request_id: RequestId,
        result: Result<QaOutcome, ApiError>,
    },
}

/// Synchronous handle over the async client: commands in, events out.
///
/// A dedicated thread owns the tokio runtime; commands run as independent
/// tasks so a slow extraction never blocks a task request.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl ClientHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let api = Arc::new(ReqwestTaskApi::new(settings)?);
        Ok(Self::with_api(api))
    }

    /// Bridges over any `TaskApi`; lets tests substitute the network.
    pub fn with_api(api: Arc<dyn TaskApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn submit(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn TaskApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::ExtractFile { request_id, path } => {
            let result = api.extract_file(&path).await;
            if let Err(err) = &result {
                desk_warn!("extract_file request {} failed: {}", request_id, err);
            }
            let _ = event_tx.send(ClientEvent::ExtractionCompleted { request_id, result });
        }
        ClientCommand::ExtractUrl { request_id, url } => {
            let result = api.extract_url(&url).await;
            if let Err(err) = &result {
                desk_warn!("extract_url request {} failed: {}", request_id, err);
            }
            let _ = event_tx.send(ClientEvent::ExtractionCompleted { request_id, result });
        }
        ClientCommand::Summarize { request_id, text } => {
            let result = api.summarize(SummarizeRequest::new(text)).await;
            if let Err(err) = &result {
                desk_warn!("summarize request {} failed: {}", request_id, err);
            }
            let _ = event_tx.send(ClientEvent::SummaryCompleted { request_id, result });
        }
        ClientCommand::AnswerQuestions {
            request_id,
            text,
            questions,
        } => {
            let result = api.answer(QaRequest { text, questions }).await;
            if let Err(err) = &result {
                desk_warn!("qa request {} failed: {}", request_id, err);
            }
            let _ = event_tx.send(ClientEvent::AnswersCompleted { request_id, result });
        }
    }
}
