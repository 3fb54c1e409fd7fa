use std::time::Duration;

use crate::view_model::{AppViewModel, ConversationView, ExchangeView, IndexingView};
use crate::{Answer, ConversationState, IndexingState, Outcome, SUGGESTED_QUESTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Index,
    Chat,
}

/// Delays the core hands to the effect runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreTiming {
    /// How long a terminal indexing status stays visible.
    pub status_display: Duration,
    /// Pause between indexing success and moving to the chat screen.
    pub navigate_delay: Duration,
}

impl Default for CoreTiming {
    fn default() -> Self {
        Self {
            status_display: Duration::from_secs(5),
            navigate_delay: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    conversation: ConversationState,
    indexing: IndexingState,
    screen: Screen,
    indexing_panel_open: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_timing(CoreTiming::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timing(timing: CoreTiming) -> Self {
        Self {
            conversation: ConversationState::new(),
            indexing: IndexingState::new(timing),
            screen: Screen::default(),
            indexing_panel_open: false,
            dirty: false,
        }
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    pub fn indexing(&self) -> &IndexingState {
        &self.indexing
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn view(&self) -> AppViewModel {
        let conversation = &self.conversation;
        let exchanges: Vec<ExchangeView> = conversation
            .exchanges()
            .iter()
            .map(|exchange| {
                let (answer, failed) = match exchange.answer() {
                    Answer::Pending => (None, false),
                    Answer::Resolved { text, outcome } => {
                        (Some(text.clone()), *outcome == Outcome::Failed)
                    }
                };
                ExchangeView {
                    id: exchange.id(),
                    question: exchange.question().to_string(),
                    answer,
                    failed,
                    sources: exchange.sources().to_vec(),
                }
            })
            .collect();
        let suggestions = if exchanges.is_empty() {
            SUGGESTED_QUESTIONS.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };

        let indexing = &self.indexing;
        let job = indexing.job();

        AppViewModel {
            screen: self.screen,
            conversation: ConversationView {
                pending: conversation.is_pending(),
                can_send: !conversation.is_pending() && !conversation.input().trim().is_empty(),
                input: conversation.input().to_string(),
                exchanges,
                suggestions,
            },
            indexing: IndexingView {
                status: indexing.status(),
                status_message: job.and_then(|job| job.status_message().map(str::to_string)),
                target_url: job.map(|job| job.target_url().to_string()),
                input: indexing.input().to_string(),
                can_submit: !indexing.is_running() && !indexing.input().trim().is_empty(),
                panel_open: self.indexing_panel_open,
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn conversation_mut(&mut self) -> &mut ConversationState {
        &mut self.conversation
    }

    pub(crate) fn indexing_mut(&mut self) -> &mut IndexingState {
        &mut self.indexing
    }

    pub(crate) fn navigate(&mut self, screen: Screen) -> bool {
        if self.screen == screen {
            return false;
        }
        self.screen = screen;
        true
    }

    pub(crate) fn toggle_indexing_panel(&mut self) {
        self.indexing_panel_open = !self.indexing_panel_open;
    }

    pub(crate) fn close_indexing_panel(&mut self) -> bool {
        std::mem::replace(&mut self.indexing_panel_open, false)
    }
}
