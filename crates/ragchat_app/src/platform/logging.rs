//! Logger setup for the chat client.
//!
//! Stdout carries the rendered screen, so terminal logging goes to stderr and
//! the default destination is `./ragchat.log`. Only lines from the client's own
//! crates are kept; HTTP stack chatter never reaches either sink.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./ragchat.log";
const CLIENT_TARGET_PREFIX: &str = "ragchat";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogDestination {
    /// `./ragchat.log` in the working directory.
    #[default]
    File,
    /// Stderr.
    Terminal,
    Both,
}

impl LogDestination {
    fn writes_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }

    fn writes_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }
}

pub fn initialize(destination: LogDestination, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let sinks = build_sinks(destination, level, Path::new(LOG_FILE));
    if sinks.is_empty() {
        return;
    }
    if let Err(err) = CombinedLogger::init(sinks) {
        eprintln!("Warning: logger already initialized: {err}");
    }
}

fn build_sinks(
    destination: LogDestination,
    level: LevelFilter,
    log_path: &Path,
) -> Vec<Box<dyn SharedLogger>> {
    let config = client_config();
    let mut sinks: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.writes_terminal() {
        sinks.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.writes_file() {
        match File::create(log_path) {
            Ok(file) => sinks.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("Warning: cannot write log file {}: {err}", log_path.display()),
        }
    }
    sinks
}

fn client_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str(CLIENT_TARGET_PREFIX)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_pick_their_sinks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.log");

        assert_eq!(build_sinks(LogDestination::Terminal, LevelFilter::Info, &path).len(), 1);
        assert!(!path.exists());

        assert_eq!(build_sinks(LogDestination::File, LevelFilter::Info, &path).len(), 1);
        assert!(path.exists());

        assert_eq!(build_sinks(LogDestination::Both, LevelFilter::Debug, &path).len(), 2);
    }

    #[test]
    fn unwritable_log_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("client.log");

        assert!(build_sinks(LogDestination::File, LevelFilter::Info, &path).is_empty());
        assert_eq!(build_sinks(LogDestination::Both, LevelFilter::Info, &path).len(), 1);
    }

    #[test]
    fn destination_parses_from_ron() {
        let destination: LogDestination = ron::from_str("Both").unwrap();
        assert!(destination.writes_file());
        assert!(destination.writes_terminal());
        assert!(!LogDestination::Terminal.writes_file());
    }
}
