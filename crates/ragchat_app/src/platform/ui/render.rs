use std::fmt::Write;

use ragchat_core::{AppViewModel, ConversationView, ExchangeView, IndexingView, Screen};

const RULE: &str = "────────────────────────────────────────";
const THINKING: &str = "Thinking...";
const FAILED_MARKER: &str = "[failed]";

/// Renders the whole screen as text. The caller prints it after every dirty update.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    match view.screen {
        Screen::Index => render_index_screen(&mut out, &view.indexing),
        Screen::Chat => render_chat_screen(&mut out, view),
    }
    out
}

pub fn help_text() -> &'static str {
    "Commands:\n\
     \x20 <text>          index screen: index this URL; chat screen: ask this question\n\
     \x20 /index [url]    index a URL (no argument retries the last one)\n\
     \x20 /suggest <n>    ask suggested question n\n\
     \x20 /panel          show or hide the indexing panel\n\
     \x20 /chat, /home    switch screens\n\
     \x20 /clear          clear the conversation\n\
     \x20 /help           show this help\n\
     \x20 /quit           exit"
}

fn render_index_screen(out: &mut String, indexing: &IndexingView) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Index a website");
    let _ = writeln!(out, "{RULE}");
    render_indexing_form(out, indexing);
    let _ = writeln!(out, "Type a URL to index it, or /chat to skip ahead.");
}

fn render_chat_screen(out: &mut String, view: &AppViewModel) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Chat");
    let _ = writeln!(out, "{RULE}");

    if view.indexing.panel_open {
        let _ = writeln!(out, "[Indexing]");
        render_indexing_form(out, &view.indexing);
        let _ = writeln!(out, "{RULE}");
    }

    render_conversation(out, &view.conversation);
}

fn render_indexing_form(out: &mut String, indexing: &IndexingView) {
    if !indexing.input.is_empty() {
        let _ = writeln!(out, "URL: {}", indexing.input);
    }
    if let Some(message) = &indexing.status_message {
        match &indexing.target_url {
            Some(url) => {
                let _ = writeln!(out, "{message} ({url})");
            }
            None => {
                let _ = writeln!(out, "{message}");
            }
        }
    }
}

fn render_conversation(out: &mut String, conversation: &ConversationView) {
    if conversation.exchanges.is_empty() {
        let _ = writeln!(out, "Ask anything about the indexed website.");
        for (index, suggestion) in conversation.suggestions.iter().enumerate() {
            let _ = writeln!(out, "  /suggest {}  {}", index + 1, suggestion);
        }
        return;
    }

    for exchange in &conversation.exchanges {
        render_exchange(out, exchange);
    }
    if conversation.pending && !conversation.input.is_empty() {
        let _ = writeln!(out, "(waiting for the current answer; not sent: {})", conversation.input);
    }
}

fn render_exchange(out: &mut String, exchange: &ExchangeView) {
    let _ = writeln!(out, "You: {}", exchange.question);
    match &exchange.answer {
        None => {
            let _ = writeln!(out, "Bot: {THINKING}");
        }
        Some(answer) if exchange.failed => {
            let _ = writeln!(out, "Bot {FAILED_MARKER}: {answer}");
        }
        Some(answer) => {
            let _ = writeln!(out, "Bot: {answer}");
        }
    }
    if !exchange.sources.is_empty() {
        let _ = writeln!(out, "  Sources:");
        for (index, url) in exchange.sources.iter().enumerate() {
            let _ = writeln!(out, "    {}. {}", index + 1, url);
        }
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use ragchat_core::{IndexingStatus, QUESTION_FAILURE_TEXT};

    use super::*;

    fn exchange(id: u64, answer: Option<&str>, sources: &[&str]) -> ExchangeView {
        ExchangeView {
            id,
            question: format!("question {id}"),
            answer: answer.map(str::to_string),
            failed: false,
            sources: sources.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn index_screen_shows_status_with_target() {
        let view = AppViewModel {
            indexing: IndexingView {
                status: IndexingStatus::Running,
                status_message: Some("⏳ Indexing in progress...".to_string()),
                target_url: Some("http://site".to_string()),
                ..IndexingView::default()
            },
            ..AppViewModel::default()
        };

        let text = render(&view);
        assert!(text.contains("Index a website"));
        assert!(text.contains("⏳ Indexing in progress... (http://site)"));
    }

    #[test]
    fn empty_chat_lists_suggestions() {
        let view = AppViewModel {
            screen: Screen::Chat,
            conversation: ConversationView {
                suggestions: vec!["What information do you have?".to_string()],
                ..ConversationView::default()
            },
            ..AppViewModel::default()
        };

        let text = render(&view);
        assert!(text.contains("/suggest 1  What information do you have?"));
    }

    #[test]
    fn pending_exchange_shows_thinking_and_sources_are_numbered() {
        let mut failed = exchange(2, Some(QUESTION_FAILURE_TEXT), &[]);
        failed.failed = true;
        let view = AppViewModel {
            screen: Screen::Chat,
            conversation: ConversationView {
                exchanges: vec![
                    exchange(1, Some("an answer"), &["http://a", "http://b"]),
                    failed,
                    exchange(3, None, &[]),
                ],
                pending: true,
                ..ConversationView::default()
            },
            ..AppViewModel::default()
        };

        let text = render(&view);
        assert!(text.contains("You: question 1\nBot: an answer\n  Sources:\n    1. http://a\n    2. http://b\n"));
        assert!(text.contains(&format!("Bot [failed]: {QUESTION_FAILURE_TEXT}")));
        assert_eq!(text.matches("[failed]").count(), 1);
        assert!(text.contains("You: question 3\nBot: Thinking..."));
        assert!(!text.contains("Ask anything"));
    }

    #[test]
    fn panel_renders_only_when_open() {
        let mut view = AppViewModel {
            screen: Screen::Chat,
            ..AppViewModel::default()
        };
        assert!(!render(&view).contains("[Indexing]"));

        view.indexing.panel_open = true;
        assert!(render(&view).contains("[Indexing]"));
    }
}
