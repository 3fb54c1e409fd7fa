use crate::lifecycle::{settle, IdSequence, Outcome, RequestSlot, QUESTION_FAILURE_TEXT};
use crate::{ChatAnswer, Effect, ExchangeId, RequestFailure, SourceDoc};

/// Canned prompts offered while the conversation is empty.
pub const SUGGESTED_QUESTIONS: [&str; 2] = [
    "What information do you have?",
    "How does this chatbot work?",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Pending,
    Resolved { text: String, outcome: Outcome },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    id: ExchangeId,
    question: String,
    answer: Answer,
    sources: Vec<String>,
}

impl Exchange {
    fn pending(id: ExchangeId, question: String) -> Self {
        Self {
            id,
            question,
            answer: Answer::Pending,
            sources: Vec::new(),
        }
    }

    pub fn id(&self) -> ExchangeId {
        self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn is_pending(&self) -> bool {
        self.answer == Answer::Pending
    }
}

/// Conversation controller state: the exchanges, the single question slot and
/// the question input buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationState {
    exchanges: Vec<Exchange>,
    slot: RequestSlot<ExchangeId>,
    ids: IdSequence,
    input: String,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Appends a pending exchange and returns the request to issue.
    ///
    /// Blank text and submissions while a question is pending are ignored.
    /// The question is stored exactly as typed.
    pub fn submit_question(&mut self, text: String) -> Option<Effect> {
        if text.trim().is_empty() || self.slot.is_pending() {
            return None;
        }
        let exchange_id = self.ids.next_id();
        self.slot.begin(exchange_id);
        self.exchanges
            .push(Exchange::pending(exchange_id, text.clone()));
        self.input.clear();
        Some(Effect::AskQuestion { exchange_id, text })
    }

    /// Applies the one terminal transition for `exchange_id`.
    ///
    /// Returns `false` when the exchange is no longer the pending one, in which
    /// case nothing changes.
    pub fn resolve_question(
        &mut self,
        exchange_id: ExchangeId,
        result: Result<ChatAnswer, RequestFailure>,
    ) -> bool {
        if !self.slot.complete(exchange_id) {
            return false;
        }
        let Some(exchange) = self
            .exchanges
            .iter_mut()
            .rev()
            .find(|exchange| exchange.id == exchange_id)
        else {
            return false;
        };

        let settled = settle(result, |reply| reply.answer.clone(), QUESTION_FAILURE_TEXT);
        exchange.sources = settled
            .value
            .map(|reply| unique_sources(&reply.docs))
            .unwrap_or_default();
        exchange.answer = Answer::Resolved {
            text: settled.text,
            outcome: settled.outcome,
        };
        true
    }

    /// Empties the conversation, pending exchange included. A response still
    /// in flight is dropped when it arrives.
    pub fn clear_conversation(&mut self) {
        self.exchanges.clear();
        self.slot.release();
    }

    pub fn set_input(&mut self, text: String) -> bool {
        if self.input == text {
            return false;
        }
        self.input = text;
        true
    }

    /// Copies a suggested question into the input buffer without sending it.
    pub fn pick_suggestion(&mut self, index: usize) -> bool {
        match SUGGESTED_QUESTIONS.get(index) {
            Some(question) => self.set_input((*question).to_string()),
            None => false,
        }
    }
}

/// Source URLs of `docs` in first-seen order, without duplicates or empty values.
pub fn unique_sources(docs: &[SourceDoc]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for url in docs.iter().filter_map(|doc| doc.source_url.as_deref()) {
        if url.is_empty() || sources.iter().any(|seen| seen == url) {
            continue;
        }
        sources.push(url.to_string());
    }
    sources
}
