use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wikiloop_logging::{wl_error, wl_warn};

use crate::client::{ClientSettings, JourneyClient, ReqwestJourneyClient};
use crate::{EngineEvent, FailureKind, JourneyError, JourneyRequest, RequestId};

enum EngineCommand {
    Request {
        request_id: RequestId,
        request: JourneyRequest,
    },
    Probe,
}

/// Runs journey requests on a background tokio runtime.
///
/// Every submitted request produces exactly one `JourneyCompleted` event.
/// The handle is the only owner of the event receiver; use `into_parts` to
/// hand the receiver to a dedicated thread.
pub struct EngineHandle {
    control: EngineControl,
    event_rx: mpsc::Receiver<EngineEvent>,
}

/// Sending half of an engine: submits commands and cancels work.
#[derive(Clone)]
pub struct EngineControl {
    cmd_tx: mpsc::Sender<EngineCommand>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, JourneyError> {
        let client = ReqwestJourneyClient::new(settings)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn JourneyClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let worker_shutdown = shutdown.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    wl_error!("Failed to start journey runtime: {}", err);
                    fail_all(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                let token = worker_shutdown.child_token();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, token, event_tx).await;
                });
            }
        });

        Self {
            control: EngineControl { cmd_tx, shutdown },
            event_rx,
        }
    }

    pub fn control(&self) -> &EngineControl {
        &self.control
    }

    pub fn into_parts(self) -> (EngineControl, mpsc::Receiver<EngineEvent>) {
        (self.control, self.event_rx)
    }

    pub fn request_journey(&self, request_id: RequestId, request: JourneyRequest) {
        self.control.request_journey(request_id, request);
    }

    pub fn probe(&self) {
        self.control.probe();
    }

    pub fn shutdown(&self) {
        self.control.shutdown();
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event, or `None` once the engine has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl EngineControl {
    pub fn request_journey(&self, request_id: RequestId, request: JourneyRequest) {
        if self
            .cmd_tx
            .send(EngineCommand::Request {
                request_id,
                request,
            })
            .is_err()
        {
            wl_warn!("Journey engine is gone; request {} dropped", request_id);
        }
    }

    pub fn probe(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Probe);
    }

    /// Cancels everything still in flight. Used when the process exits.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

async fn handle_command(
    client: &dyn JourneyClient,
    command: EngineCommand,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Request {
            request_id,
            request,
        } => {
            let result = tokio::select! {
                result = client.request_journey(&request) => result,
                _ = token.cancelled() => Err(JourneyError::new(
                    FailureKind::Cancelled,
                    "journey request cancelled",
                )),
            };
            let _ = event_tx.send(EngineEvent::JourneyCompleted { request_id, result });
        }
        EngineCommand::Probe => {
            let result = client.probe().await;
            let _ = event_tx.send(EngineEvent::ProbeCompleted { result });
        }
    }
}

// Without a runtime every command is answered with a failure.
fn fail_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    message: &str,
) {
    while let Ok(command) = cmd_rx.recv() {
        let error = JourneyError::new(FailureKind::Network, message);
        let event = match command {
            EngineCommand::Request { request_id, .. } => EngineEvent::JourneyCompleted {
                request_id,
                result: Err(error),
            },
            EngineCommand::Probe => EngineEvent::ProbeCompleted { result: Err(error) },
        };
        let _ = event_tx.send(event);
    }
}
