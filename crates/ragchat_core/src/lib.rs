//! Chat client core: pure state machine and view-model helpers.
mod conversation;
mod effect;
mod indexing;
mod lifecycle;
mod msg;
mod reply;
mod state;
mod update;
mod view_model;

pub use conversation::{unique_sources, Answer, ConversationState, Exchange, SUGGESTED_QUESTIONS};
pub use effect::Effect;
pub use indexing::{IndexingJob, IndexingState, IndexingStatus};
pub use lifecycle::{
    settle, ExchangeId, IdSequence, JobId, Outcome, RequestSlot, Settled, INDEXING_FAILURE_TEXT,
    INDEXING_IN_PROGRESS_TEXT, INDEXING_SUCCESS_PREFIX, QUESTION_FAILURE_TEXT,
};
pub use msg::Msg;
pub use reply::{ChatAnswer, IndexingAck, RequestFailure, SourceDoc};
pub use state::{AppState, CoreTiming, Screen};
pub use update::update;
pub use view_model::{AppViewModel, ConversationView, ExchangeView, IndexingView};
