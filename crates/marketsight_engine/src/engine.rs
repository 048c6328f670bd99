use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error};
use tokio_util::sync::CancellationToken;

use crate::poll::run_poll_timer;
use crate::{ApiError, EngineEvent, FailureKind, JobsApi, PollSeq};

enum EngineCommand {
    StartPolling { interval: Duration },
    StopPolling,
    Request(Request),
}

enum Request {
    FetchJobs { seq: PollSeq },
    Upload { path: PathBuf, file_name: String },
}

/// Sends work to the engine thread. Dropping every handle shuts the engine down.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving end for everything the engine reports.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn JobsApi>) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_engine(api, cmd_rx, event_tx));

        (Self { cmd_tx }, EngineEvents { event_rx })
    }

    /// Starts (or restarts) the poll timer. The first tick is immediate.
    pub fn start_polling(&self, interval: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling { interval });
    }

    /// Stops the poll timer. Requests already in flight still report back.
    pub fn stop_polling(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StopPolling);
    }

    pub fn fetch_jobs(&self, seq: PollSeq) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Request(Request::FetchJobs { seq }));
    }

    pub fn upload(&self, path: impl Into<PathBuf>, file_name: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Request(Request::Upload {
            path: path.into(),
            file_name: file_name.into(),
        }));
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until an event arrives; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run_engine(
    api: Arc<dyn JobsApi>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            engine_error!("Failed to start engine runtime: {}", err);
            return;
        }
    };

    let mut poller: Option<CancellationToken> = None;
    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::StartPolling { interval } => {
                if let Some(previous) = poller.take() {
                    previous.cancel();
                }
                let token = CancellationToken::new();
                engine_debug!("Poll timer started, interval={:?}", interval);
                runtime.spawn(run_poll_timer(interval, token.clone(), event_tx.clone()));
                poller = Some(token);
            }
            EngineCommand::StopPolling => {
                if let Some(token) = poller.take() {
                    engine_debug!("Poll timer stopped");
                    token.cancel();
                }
            }
            EngineCommand::Request(request) => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_request(api.as_ref(), request, event_tx).await;
                });
            }
        }
    }

    if let Some(token) = poller.take() {
        token.cancel();
    }
}

async fn handle_request(api: &dyn JobsApi, request: Request, event_tx: mpsc::Sender<EngineEvent>) {
    let event = match request {
        Request::FetchJobs { seq } => EngineEvent::JobsFetched {
            seq,
            result: api.list_jobs().await,
        },
        Request::Upload { path, file_name } => {
            let result = match tokio::fs::read(&path).await {
                Ok(contents) => api.upload_csv(&file_name, contents).await,
                Err(err) => Err(ApiError::new(
                    FailureKind::Io,
                    format!("{}: {}", path.display(), err),
                )),
            };
            EngineEvent::UploadCompleted { file_name, result }
        }
    };
    let _ = event_tx.send(event);
}
