#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the question input box.
    QuestionInputChanged(String),
    /// User submitted a question.
    SubmitQuestion(String),
    /// User picked one of the suggested questions.
    SuggestionPicked(usize),
    /// User confirmed clearing the conversation.
    ClearConversation,
    /// Gateway answer (or failure) for an exchange.
    QuestionResolved {
        exchange_id: crate::ExchangeId,
        result: Result<crate::ChatAnswer, crate::RequestFailure>,
    },
    /// User edited the URL input box.
    UrlInputChanged(String),
    /// User submitted a URL for indexing.
    SubmitIndexingUrl(String),
    /// Gateway acknowledgement (or failure) for an indexing job.
    IndexingResolved {
        job_id: crate::JobId,
        result: Result<crate::IndexingAck, crate::RequestFailure>,
    },
    /// Display window for a job's status message ran out.
    StatusClearElapsed { job_id: crate::JobId },
    /// Completion signal for a successful job reached the navigation layer.
    IndexingCompletionDelivered { job_id: crate::JobId },
    /// User showed or hid the indexing panel on the chat screen.
    ToggleIndexingPanel,
    /// User switched screens.
    Navigate(crate::Screen),
}
