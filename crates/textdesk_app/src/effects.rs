use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use desk_logging::{desk_info, desk_warn};
use textdesk_client::{
    ApiError, ApiSettings, ClientCommand, ClientEvent, ClientHandle, QaOutcome, SummaryOutcome,
};
use textdesk_core::{
    AnswerRow, Effect, FailureKind, Msg, PanelKind, RequestError, RequestId, SummaryResult,
    TaskResult,
};

type RouteTable = Arc<Mutex<HashMap<RequestId, PanelKind>>>;

/// Translates core effects into client commands and client events back into
/// core messages, remembering which panel issued each request id.
pub struct EffectRunner {
    client: ClientHandle,
    routes: RouteTable,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, settings: ApiSettings) -> Result<Self, ApiError> {
        let client = ClientHandle::new(settings)?;
        let runner = Self {
            client,
            routes: Arc::new(Mutex::new(HashMap::new())),
        };
        runner.spawn_event_pump(msg_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ExtractFile {
                    panel,
                    request_id,
                    path,
                } => {
                    desk_info!("ExtractFile request_id={} path={}", request_id, path);
                    self.route(request_id, panel);
                    self.client.submit(ClientCommand::ExtractFile {
                        request_id,
                        path: PathBuf::from(path),
                    });
                }
                Effect::ExtractUrl {
                    panel,
                    request_id,
                    url,
                } => {
                    desk_info!("ExtractUrl request_id={} url={}", request_id, url);
                    self.route(request_id, panel);
                    self.client
                        .submit(ClientCommand::ExtractUrl { request_id, url });
                }
                Effect::Summarize {
                    panel,
                    request_id,
                    text,
                } => {
                    desk_info!("Summarize request_id={} text_len={}", request_id, text.len());
                    self.route(request_id, panel);
                    self.client
                        .submit(ClientCommand::Summarize { request_id, text });
                }
                Effect::AnswerQuestions {
                    panel,
                    request_id,
                    text,
                    questions,
                } => {
                    desk_info!(
                        "AnswerQuestions request_id={} questions={}",
                        request_id,
                        questions.len()
                    );
                    self.route(request_id, panel);
                    self.client.submit(ClientCommand::AnswerQuestions {
                        request_id,
                        text,
                        questions,
                    });
                }
            }
        }
    }

    fn route(&self, request_id: RequestId, panel: PanelKind) {
        self.routes
            .lock()
            .expect("routes lock")
            .insert(request_id, panel);
    }

    fn spawn_event_pump(&self, msg_tx: mpsc::Sender<Msg>) {
        let client = self.client.clone();
        let routes = self.routes.clone();
        thread::spawn(move || loop {
            if let Some(event) = client.try_recv() {
                if let Some(msg) = translate_event(&routes, event) {
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn take_route(routes: &RouteTable, request_id: RequestId) -> Option<PanelKind> {
    let panel = routes.lock().ok()?.remove(&request_id);
    if panel.is_none() {
        desk_warn!("completion for unknown request_id={}", request_id);
    }
    panel
}

fn translate_event(routes: &RouteTable, event: ClientEvent) -> Option<Msg> {
    match event {
        ClientEvent::ExtractionCompleted { request_id, result } => {
            let panel = take_route(routes, request_id)?;
            Some(Msg::ExtractionDone {
                panel,
                request_id,
                result: result.map_err(map_error),
            })
        }
        ClientEvent::SummaryCompleted { request_id, result } => {
            let panel = take_route(routes, request_id)?;
            Some(Msg::TaskDone {
                panel,
                request_id,
                result: result.map(map_summary).map_err(map_error),
            })
        }
        ClientEvent::AnswersCompleted { request_id, result } => {
            let panel = take_route(routes, request_id)?;
            Some(Msg::TaskDone {
                panel,
                request_id,
                result: result.map(map_answers).map_err(map_error),
            })
        }
    }
}

fn map_summary(outcome: SummaryOutcome) -> TaskResult {
    TaskResult::Summary(SummaryResult {
        summary: outcome.summary,
        keywords: outcome.keywords,
        original_length: outcome.original_length,
        summary_length: outcome.summary_length,
    })
}

fn map_answers(outcome: QaOutcome) -> TaskResult {
    TaskResult::Answers(
        outcome
            .results
            .into_iter()
            .map(|row| AnswerRow {
                question: row.question,
                answer: row.answer,
                confidence: row.confidence,
            })
            .collect(),
    )
}

fn map_error(error: ApiError) -> RequestError {
    desk_warn!("request failed: {}", error);
    RequestError::new(map_failure(error.kind), error.message)
}

fn map_failure(kind: textdesk_client::FailureKind) -> FailureKind {
    match kind {
        textdesk_client::FailureKind::HttpStatus(code) => FailureKind::HttpStatus(code),
        textdesk_client::FailureKind::Timeout => FailureKind::Timeout,
        textdesk_client::FailureKind::Network => FailureKind::Network,
        textdesk_client::FailureKind::Io => FailureKind::Io,
        textdesk_client::FailureKind::MalformedResponse => FailureKind::MalformedResponse,
        textdesk_client::FailureKind::AnswerMismatch => FailureKind::AnswerMismatch,
    }
}
