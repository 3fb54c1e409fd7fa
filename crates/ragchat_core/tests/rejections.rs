use ragchat_core::{update, AppState, Msg};

#[test]
fn blank_submissions_leave_state_untouched() {
    let state = AppState::new();

    let (next, effects) = update(state.clone(), Msg::SubmitQuestion("   ".to_string()));
    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (next, effects) = update(state.clone(), Msg::SubmitIndexingUrl(String::new()));
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn unknown_suggestion_does_not_dirty_state() {
    let (mut next, effects) = update(AppState::new(), Msg::SuggestionPicked(99));

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next.conversation().input(), "");
}

#[test]
fn unchanged_input_does_not_dirty_state() {
    let (mut state, _) = update(AppState::new(), Msg::UrlInputChanged("http://a".to_string()));
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::UrlInputChanged("http://a".to_string()));
    assert!(!state.consume_dirty());
}
