use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use ragchat_core::{ChatAnswer, Effect, IndexingAck, Msg, RequestFailure, SourceDoc};
use ragchat_gateway::{
    ChatReply, EventSink, GatewayError, GatewayEvent, GatewayHandle, GatewaySettings,
    MessageReply, RequestId,
};
use ragchat_logging::{preview, rag_debug, rag_info, rag_warn, PREVIEW_CHARS};

use super::app::AppEvent;

/// Executes core effects: gateway calls and the two delayed signals.
pub struct EffectRunner {
    gateway: GatewayHandle,
    events: mpsc::Sender<AppEvent>,
    status_timer: Arc<AtomicU64>,
}

impl EffectRunner {
    pub fn new(
        settings: GatewaySettings,
        events: mpsc::Sender<AppEvent>,
    ) -> Result<Self, GatewayError> {
        let sink = Arc::new(MsgSink {
            events: events.clone(),
        });
        let gateway = GatewayHandle::spawn_reqwest(settings, sink)?;
        Ok(Self {
            gateway,
            events,
            status_timer: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Asks the backend for its status; the answer is only logged.
    pub fn probe(&self) {
        self.gateway.probe();
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::AskQuestion { exchange_id, text } => {
                    rag_info!(
                        "AskQuestion exchange_id={} len={} text={}",
                        exchange_id,
                        text.len(),
                        preview(&text, PREVIEW_CHARS)
                    );
                    self.gateway.ask_question(exchange_id, text);
                }
                Effect::IndexUrl { job_id, url } => {
                    rag_info!("IndexUrl job_id={} url={}", job_id, url);
                    self.gateway.index_url(job_id, url);
                }
                Effect::CancelStatusClear => {
                    self.status_timer.fetch_add(1, Ordering::SeqCst);
                }
                Effect::ScheduleStatusClear { job_id, delay } => {
                    let generation = self.status_timer.fetch_add(1, Ordering::SeqCst) + 1;
                    let timer = self.status_timer.clone();
                    let events = self.events.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        if timer.load(Ordering::SeqCst) == generation {
                            let _ = events.send(AppEvent::Core(Msg::StatusClearElapsed { job_id }));
                        } else {
                            rag_debug!("Status clear for job {} superseded", job_id);
                        }
                    });
                }
                Effect::IndexingCompleted {
                    job_id,
                    navigate_after,
                } => {
                    rag_info!("Indexing job {} completed", job_id);
                    send_after(
                        &self.events,
                        navigate_after,
                        Msg::IndexingCompletionDelivered { job_id },
                    );
                }
            }
        }
    }
}

fn send_after(events: &mpsc::Sender<AppEvent>, delay: Duration, msg: Msg) {
    let events = events.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = events.send(AppEvent::Core(msg));
    });
}

/// Turns gateway events into core messages on the app channel.
struct MsgSink {
    events: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: GatewayEvent) {
        let msg = match event {
            GatewayEvent::QuestionAnswered { request_id, result } => {
                question_resolved(request_id, result)
            }
            GatewayEvent::IndexingFinished { request_id, result } => {
                indexing_resolved(request_id, result)
            }
            GatewayEvent::StatusProbed { result } => {
                match result {
                    Ok(reply) => rag_info!("Backend status: {}", reply.message),
                    Err(err) => rag_warn!("Backend status probe failed: {}", err),
                }
                return;
            }
        };
        let _ = self.events.send(AppEvent::Core(msg));
    }
}

fn question_resolved(request_id: RequestId, result: Result<ChatReply, GatewayError>) -> Msg {
    let result = match result {
        Ok(reply) => {
            rag_info!(
                "Answer for exchange {} with {} documents",
                request_id,
                reply.docs.len()
            );
            Ok(ChatAnswer {
                question: reply.question,
                answer: reply.answer,
                docs: reply
                    .docs
                    .into_iter()
                    .map(|doc| SourceDoc {
                        source_url: doc.metadata.source_url,
                    })
                    .collect(),
            })
        }
        Err(err) => {
            rag_warn!("Question {} failed: {}", request_id, err);
            Err(RequestFailure::new(err.to_string()))
        }
    };
    Msg::QuestionResolved {
        exchange_id: request_id,
        result,
    }
}

fn indexing_resolved(request_id: RequestId, result: Result<MessageReply, GatewayError>) -> Msg {
    let result = match result {
        Ok(reply) => Ok(IndexingAck {
            message: reply.message,
        }),
        Err(err) => {
            rag_warn!("Indexing job {} failed: {}", request_id, err);
            Err(RequestFailure::new(err.to_string()))
        }
    };
    Msg::IndexingResolved {
        job_id: request_id,
        result,
    }
}

#[cfg(test)]
mod tests {
    use ragchat_gateway::{DocMetadata, RetrievedDoc};

    use super::*;

    fn doc(source_url: Option<&str>) -> RetrievedDoc {
        RetrievedDoc {
            page_content: "text".to_string(),
            metadata: DocMetadata {
                source_url: source_url.map(str::to_string),
            },
        }
    }

    #[test]
    fn chat_reply_maps_to_answer_with_sources() {
        let reply = ChatReply {
            question: "q".to_string(),
            answer: "a".to_string(),
            docs: vec![doc(Some("http://a")), doc(None)],
        };

        let msg = question_resolved(3, Ok(reply));

        assert_eq!(
            msg,
            Msg::QuestionResolved {
                exchange_id: 3,
                result: Ok(ChatAnswer {
                    question: "q".to_string(),
                    answer: "a".to_string(),
                    docs: vec![SourceDoc::new("http://a"), SourceDoc::default()],
                }),
            }
        );
    }

    #[test]
    fn gateway_error_keeps_detail_for_logs() {
        let reply: Result<MessageReply, GatewayError> = Err(GatewayError {
            kind: ragchat_gateway::FailureKind::HttpStatus(500),
            message: "boom".to_string(),
        });

        let msg = indexing_resolved(7, reply);

        assert_eq!(
            msg,
            Msg::IndexingResolved {
                job_id: 7,
                result: Err(RequestFailure::new("http status 500: boom")),
            }
        );
    }

    #[test]
    fn status_probe_sends_nothing() {
        let (tx, rx) = mpsc::channel();
        let sink = MsgSink { events: tx };

        sink.emit(GatewayEvent::StatusProbed {
            result: Ok(MessageReply {
                message: "Server is running".to_string(),
            }),
        });

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn indexing_ack_is_forwarded_on_channel() {
        let (tx, rx) = mpsc::channel();
        let sink = MsgSink { events: tx };

        sink.emit(GatewayEvent::IndexingFinished {
            request_id: 1,
            result: Ok(MessageReply {
                message: "ok".to_string(),
            }),
        });

        match rx.try_recv() {
            Ok(AppEvent::Core(Msg::IndexingResolved { job_id, result })) => {
                assert_eq!(job_id, 1);
                assert_eq!(
                    result,
                    Ok(IndexingAck {
                        message: "ok".to_string()
                    })
                );
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn newer_schedule_supersedes_pending_status_clear() {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(GatewaySettings::default(), tx).unwrap();

        runner.enqueue(vec![Effect::ScheduleStatusClear {
            job_id: 1,
            delay: Duration::from_millis(50),
        }]);
        runner.enqueue(vec![Effect::ScheduleStatusClear {
            job_id: 2,
            delay: Duration::from_millis(10),
        }]);

        match rx.recv_timeout(Duration::from_secs(2)) {
            Ok(AppEvent::Core(Msg::StatusClearElapsed { job_id })) => assert_eq!(job_id, 2),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn cancel_drops_scheduled_status_clear() {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(GatewaySettings::default(), tx).unwrap();

        runner.enqueue(vec![
            Effect::ScheduleStatusClear {
                job_id: 1,
                delay: Duration::from_millis(20),
            },
            Effect::CancelStatusClear,
        ]);

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn completion_is_delivered_after_delay() {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(GatewaySettings::default(), tx).unwrap();

        runner.enqueue(vec![Effect::IndexingCompleted {
            job_id: 4,
            navigate_after: Duration::from_millis(10),
        }]);

        match rx.recv_timeout(Duration::from_secs(2)) {
            Ok(AppEvent::Core(Msg::IndexingCompletionDelivered { job_id })) => {
                assert_eq!(job_id, 4)
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
