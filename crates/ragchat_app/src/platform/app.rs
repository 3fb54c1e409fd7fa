use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::{bail, Context};
use clap::Parser;
use ragchat_core::{update, AppState, Msg};
use ragchat_gateway::{ChannelEventSink, GatewayEvent, GatewayHandle, GatewaySettings};
use ragchat_logging::{rag_debug, rag_info};

use super::cli::Cli;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{parse_line, InputMode, Intent};
use super::ui::render::{help_text, render};

const PROMPT: &str = "> ";

/// Everything the main loop reacts to, in arrival order.
#[derive(Debug)]
pub(crate) enum AppEvent {
    Core(Msg),
    Line(String),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli).context("loading configuration")?;
    logging::initialize(config.log_destination, cli.verbose);
    rag_info!("ragchat starting, backend {}", config.backend_url);

    if cli.check {
        return check_backend(config.gateway_settings());
    }

    let (events_tx, events_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.gateway_settings(), events_tx.clone())
        .context("creating backend client")?;
    runner.probe();
    spawn_stdin_reader(events_tx);

    let mut app = App::new(AppState::with_timing(config.core_timing()), runner);
    app.render_now();

    while let Ok(event) = events_rx.recv() {
        match event {
            AppEvent::Core(msg) => app.dispatch(vec![msg]),
            AppEvent::Line(line) => {
                if app.handle_line(&line).is_break() {
                    break;
                }
            }
            AppEvent::InputClosed => break,
        }
    }

    rag_info!("ragchat exiting");
    Ok(())
}

/// One status probe, printed to stdout. Fails when the backend does not answer.
fn check_backend(settings: GatewaySettings) -> anyhow::Result<()> {
    let wait = settings.connect_timeout + settings.request_timeout;
    let base_url = settings.base_url.clone();
    let (tx, rx) = mpsc::channel();
    let gateway = GatewayHandle::spawn_reqwest(settings, Arc::new(ChannelEventSink::new(tx)))
        .context("creating backend client")?;
    gateway.probe();

    match rx.recv_timeout(wait) {
        Ok(GatewayEvent::StatusProbed { result: Ok(reply) }) => {
            println!("{base_url}: {}", reply.message);
            Ok(())
        }
        Ok(GatewayEvent::StatusProbed { result: Err(err) }) => {
            bail!("backend {base_url} is not reachable: {err}")
        }
        Ok(other) => bail!("unexpected gateway event: {other:?}"),
        Err(_) => bail!("backend {base_url} did not answer within {wait:?}"),
    }
}

fn spawn_stdin_reader(events: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if events.send(AppEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    rag_debug!("stdin read failed: {}", err);
                    break;
                }
            }
        }
        let _ = events.send(AppEvent::InputClosed);
    });
}

struct App {
    state: AppState,
    runner: EffectRunner,
    mode: InputMode,
}

impl App {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self {
            state,
            runner,
            mode: InputMode::Normal,
        }
    }

    fn dispatch(&mut self, msgs: Vec<Msg>) {
        let mut dirty = false;
        for msg in msgs {
            let late = late_arrival(&msg);
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            let changed = state.consume_dirty();
            if let (Some(label), false) = (late, changed) {
                rag_debug!("Ignored stale {}", label);
            }
            dirty |= changed;
            self.state = state;
            self.runner.enqueue(effects);
        }
        if dirty {
            self.render_now();
        }
    }

    fn handle_line(&mut self, line: &str) -> ControlFlow<()> {
        let view = self.state.view();
        let mode = std::mem::take(&mut self.mode);

        match parse_line(line, &view, mode) {
            Intent::Dispatch(msgs) => {
                let before = self.state.view();
                self.dispatch(msgs);
                if self.state.view() == before {
                    self.notice("Nothing to do right now.");
                }
            }
            Intent::ConfirmClear => {
                self.mode = InputMode::ConfirmClear;
                self.print("Clear the conversation? [y/N] ");
            }
            Intent::ClearCancelled => self.notice("Conversation kept."),
            Intent::Help => self.notice(help_text()),
            Intent::Quit => return ControlFlow::Break(()),
            Intent::Unknown(command) => {
                self.notice(&format!("Unknown command {command}; /help lists commands."))
            }
            Intent::Nothing => self.print(PROMPT),
        }
        ControlFlow::Continue(())
    }

    fn render_now(&self) {
        let screen = render(&self.state.view());
        self.print(&format!("\n{screen}{PROMPT}"));
    }

    fn notice(&self, text: &str) {
        self.print(&format!("{text}\n{PROMPT}"));
    }

    fn print(&self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

/// Messages that arrive asynchronously and may refer to a superseded request.
fn late_arrival(msg: &Msg) -> Option<String> {
    match msg {
        Msg::QuestionResolved { exchange_id, .. } => {
            Some(format!("answer for exchange {exchange_id}"))
        }
        Msg::IndexingResolved { job_id, .. } => Some(format!("result for indexing job {job_id}")),
        Msg::StatusClearElapsed { job_id } => Some(format!("status clear for job {job_id}")),
        Msg::IndexingCompletionDelivered { job_id } => {
            Some(format!("completion for job {job_id}"))
        }
        _ => None,
    }
}
