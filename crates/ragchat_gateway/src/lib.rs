//! Backend gateway: HTTP calls to the chat service and the worker that runs them.
mod gateway;
mod handle;
mod types;

pub use gateway::{Gateway, GatewaySettings, ReqwestGateway};
pub use handle::{ChannelEventSink, EventSink, GatewayHandle};
pub use types::{
    ChatReply, DocMetadata, FailureKind, GatewayError, GatewayEvent, MessageReply, RequestId,
    RetrievedDoc,
};
