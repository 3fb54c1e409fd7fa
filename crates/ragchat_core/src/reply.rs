/// Answer payload as the core needs it; the app maps gateway replies into it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatAnswer {
    pub question: String,
    pub answer: String,
    pub docs: Vec<SourceDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceDoc {
    pub source_url: Option<String>,
}

impl SourceDoc {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: Some(source_url.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexingAck {
    pub message: String,
}

/// A failed gateway call. `detail` is for diagnostics and never rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub detail: String,
}

impl RequestFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
