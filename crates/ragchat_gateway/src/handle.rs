use std::sync::{mpsc, Arc};
use std::thread;

use ragchat_logging::{rag_debug, rag_error};

use crate::gateway::{Gateway, GatewaySettings, ReqwestGateway};
use crate::{GatewayError, GatewayEvent, RequestId};

/// Receives the one event each gateway call produces.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: GatewayEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<GatewayEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<GatewayEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: GatewayEvent) {
        // The receiver may already be gone when the client shuts down mid-flight.
        let _ = self.tx.send(event);
    }
}

enum GatewayCommand {
    AskQuestion { request_id: RequestId, text: String },
    IndexUrl { request_id: RequestId, url: String },
    Probe,
}

/// Handle to a worker thread that owns a tokio runtime and runs gateway calls.
///
/// Dropping the handle stops the worker; calls still in flight are abandoned
/// and their events are never emitted.
pub struct GatewayHandle {
    cmd_tx: mpsc::Sender<GatewayCommand>,
}

impl GatewayHandle {
    pub fn new(gateway: Arc<dyn Gateway>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    rag_error!("Failed to start gateway runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let gateway = gateway.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(gateway.as_ref(), command, sink.as_ref()).await;
                });
            }
            rag_debug!("Gateway worker stopping");
        });

        Self { cmd_tx }
    }

    /// Convenience constructor backed by [`ReqwestGateway`].
    pub fn spawn_reqwest(
        settings: GatewaySettings,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, GatewayError> {
        let gateway = ReqwestGateway::new(settings)?;
        Ok(Self::new(Arc::new(gateway), sink))
    }

    pub fn ask_question(&self, request_id: RequestId, text: impl Into<String>) {
        let _ = self.cmd_tx.send(GatewayCommand::AskQuestion {
            request_id,
            text: text.into(),
        });
    }

    pub fn index_url(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(GatewayCommand::IndexUrl {
            request_id,
            url: url.into(),
        });
    }

    pub fn probe(&self) {
        let _ = self.cmd_tx.send(GatewayCommand::Probe);
    }
}

async fn handle_command(gateway: &dyn Gateway, command: GatewayCommand, sink: &dyn EventSink) {
    let event = match command {
        GatewayCommand::AskQuestion { request_id, text } => GatewayEvent::QuestionAnswered {
            request_id,
            result: gateway.submit_question(&text).await,
        },
        GatewayCommand::IndexUrl { request_id, url } => GatewayEvent::IndexingFinished {
            request_id,
            result: gateway.submit_indexing_request(&url).await,
        },
        GatewayCommand::Probe => GatewayEvent::StatusProbed {
            result: gateway.server_status().await,
        },
    };
    sink.emit(event);
}
