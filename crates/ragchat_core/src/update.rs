use crate::{AppState, Effect, Msg, Screen};

/// Pure update function: applies a message to state and returns any effects.
///
/// Rejected intents (blank input, a request already in flight, stale
/// responses) return no effects and leave the state untouched, dirty flag
/// included.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QuestionInputChanged(text) => {
            if state.conversation_mut().set_input(text) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitQuestion(text) => match state.conversation_mut().submit_question(text) {
            Some(effect) => {
                state.mark_dirty();
                vec![effect]
            }
            None => Vec::new(),
        },
        Msg::SuggestionPicked(index) => {
            if state.conversation_mut().pick_suggestion(index) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ClearConversation => {
            state.conversation_mut().clear_conversation();
            state.mark_dirty();
            Vec::new()
        }
        Msg::QuestionResolved {
            exchange_id,
            result,
        } => {
            if state
                .conversation_mut()
                .resolve_question(exchange_id, result)
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UrlInputChanged(text) => {
            if state.indexing_mut().set_input(text) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitIndexingUrl(url) => {
            let effects = state.indexing_mut().submit_indexing_url(&url);
            if !effects.is_empty() {
                state.mark_dirty();
            }
            effects
        }
        Msg::IndexingResolved { job_id, result } => {
            match state.indexing_mut().resolve_indexing(job_id, result) {
                Some(effects) => {
                    state.mark_dirty();
                    effects
                }
                None => Vec::new(),
            }
        }
        Msg::StatusClearElapsed { job_id } => {
            if state.indexing_mut().status_clear_elapsed(job_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::IndexingCompletionDelivered { job_id } => {
            let is_current = state.indexing().job().map(|job| job.id()) == Some(job_id);
            if is_current {
                let navigated = state.navigate(Screen::Chat);
                let closed = state.close_indexing_panel();
                if navigated || closed {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::ToggleIndexingPanel => {
            state.toggle_indexing_panel();
            state.mark_dirty();
            Vec::new()
        }
        Msg::Navigate(screen) => {
            if state.navigate(screen) {
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}
