use std::time::Duration;

use crate::{ExchangeId, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send `text` to the chat endpoint; answer with `Msg::QuestionResolved`.
    AskQuestion { exchange_id: ExchangeId, text: String },
    /// Send `url` to the indexing endpoint; answer with `Msg::IndexingResolved`.
    IndexUrl { job_id: JobId, url: String },
    /// Drop any outstanding status-clear timer.
    CancelStatusClear,
    /// After `delay`, send `Msg::StatusClearElapsed { job_id }`.
    ScheduleStatusClear { job_id: JobId, delay: Duration },
    /// Completion signal for a successful indexing job. After `navigate_after`,
    /// send `Msg::IndexingCompletionDelivered { job_id }`.
    IndexingCompleted {
        job_id: JobId,
        navigate_after: Duration,
    },
}
