use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub type RequestId = u64;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub docs: Vec<RetrievedDoc>,
}

/// One retrieved document as serialized by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RetrievedDoc {
    #[serde(default)]
    pub page_content: String,
    #[serde(default)]
    pub metadata: DocMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DocMetadata {
    #[serde(default)]
    pub source_url: Option<String>,
}

/// `{ "message": ... }` body used by `/indexing`, `/` and error responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageReply {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    QuestionAnswered {
        request_id: RequestId,
        result: Result<ChatReply, GatewayError>,
    },
    IndexingFinished {
        request_id: RequestId,
        result: Result<MessageReply, GatewayError>,
    },
    StatusProbed {
        result: Result<MessageReply, GatewayError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct GatewayError {
    pub kind: FailureKind,
    pub message: String,
}

impl GatewayError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "undecodable response"),
        }
    }
}
