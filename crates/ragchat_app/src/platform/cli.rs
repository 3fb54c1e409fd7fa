use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

/// Terminal client for a retrieval-augmented chat backend.
///
/// Index a website, then ask questions answered from its content.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ragchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a RON configuration file (defaults to ./ragchat.ron when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base URL; overrides the config file and RAGCHAT_BACKEND_URL
    #[arg(short, long)]
    pub backend_url: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Probe the backend once and exit
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "ragchat",
            "--backend-url",
            "http://api.example:9000",
            "--log",
            "both",
            "-v",
        ]);
        assert_eq!(cli.backend_url.as_deref(), Some("http://api.example:9000"));
        assert_eq!(cli.log, Some(LogDestination::Both));
        assert!(cli.verbose);
        assert!(!cli.check);
        assert!(cli.config.is_none());
    }

    #[test]
    fn defaults_leave_everything_to_config() {
        let cli = Cli::parse_from(["ragchat"]);
        assert!(cli.backend_url.is_none());
        assert!(cli.log.is_none());
    }
}
