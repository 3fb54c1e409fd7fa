use crate::{ExchangeId, IndexingStatus, Screen};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: Screen,
    pub conversation: ConversationView,
    pub indexing: IndexingView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationView {
    pub exchanges: Vec<ExchangeView>,
    pub pending: bool,
    pub input: String,
    pub can_send: bool,
    /// Only populated while the conversation is empty.
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeView {
    pub id: ExchangeId,
    pub question: String,
    /// `None` while the answer is pending.
    pub answer: Option<String>,
    pub failed: bool,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexingView {
    pub status: IndexingStatus,
    pub status_message: Option<String>,
    pub target_url: Option<String>,
    pub input: String,
    pub can_submit: bool,
    pub panel_open: bool,
}
