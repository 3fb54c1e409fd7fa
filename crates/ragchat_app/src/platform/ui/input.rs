//! Maps typed lines to core messages.
//!
//! Plain text means a URL on the index screen and a question on the chat
//! screen. Lines starting with `/` are commands.

use ragchat_core::{AppViewModel, Msg, Screen, SUGGESTED_QUESTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// The next line answers the "clear conversation?" prompt.
    ConfirmClear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Dispatch(Vec<Msg>),
    ConfirmClear,
    ClearCancelled,
    Help,
    Quit,
    Unknown(String),
    Nothing,
}

pub fn parse_line(line: &str, view: &AppViewModel, mode: InputMode) -> Intent {
    let text = line.trim_end_matches(['\r', '\n']);

    if mode == InputMode::ConfirmClear {
        return match text.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Intent::Dispatch(vec![Msg::ClearConversation]),
            _ => Intent::ClearCancelled,
        };
    }

    if text.trim().is_empty() {
        return Intent::Nothing;
    }

    match text.trim_start().strip_prefix('/') {
        Some(command) => parse_command(command, view),
        None => match view.screen {
            Screen::Index => submit_url(text.trim()),
            Screen::Chat => Intent::Dispatch(vec![
                Msg::QuestionInputChanged(text.to_string()),
                Msg::SubmitQuestion(text.to_string()),
            ]),
        },
    }
}

fn parse_command(command: &str, view: &AppViewModel) -> Intent {
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "index" if arg.is_empty() => {
            Intent::Dispatch(vec![Msg::SubmitIndexingUrl(view.indexing.input.clone())])
        }
        "index" => submit_url(arg),
        "suggest" => match arg.parse::<usize>() {
            Ok(n) if (1..=SUGGESTED_QUESTIONS.len()).contains(&n) => {
                let question = SUGGESTED_QUESTIONS[n - 1].to_string();
                Intent::Dispatch(vec![
                    Msg::Navigate(Screen::Chat),
                    Msg::SuggestionPicked(n - 1),
                    Msg::SubmitQuestion(question),
                ])
            }
            _ => Intent::Unknown(format!("/suggest {arg}")),
        },
        "panel" => Intent::Dispatch(vec![Msg::ToggleIndexingPanel]),
        "chat" => Intent::Dispatch(vec![Msg::Navigate(Screen::Chat)]),
        "home" => Intent::Dispatch(vec![Msg::Navigate(Screen::Index)]),
        "clear" => Intent::ConfirmClear,
        "help" => Intent::Help,
        "quit" | "exit" => Intent::Quit,
        _ => Intent::Unknown(format!("/{command}")),
    }
}

fn submit_url(url: &str) -> Intent {
    Intent::Dispatch(vec![
        Msg::UrlInputChanged(url.to_string()),
        Msg::SubmitIndexingUrl(url.to_string()),
    ])
}
