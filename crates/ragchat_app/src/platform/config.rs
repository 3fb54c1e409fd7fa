//! Client configuration.
//!
//! Sources, lowest precedence first: built-in defaults, a RON file,
//! the `RAGCHAT_BACKEND_URL` environment variable, command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ragchat_core::CoreTiming;
use ragchat_gateway::GatewaySettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::Cli;
use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "ragchat.ron";
pub const BACKEND_URL_ENV: &str = "RAGCHAT_BACKEND_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub status_clear_secs: u64,
    pub navigate_delay_ms: u64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let gateway = GatewaySettings::default();
        let timing = CoreTiming::default();
        Self {
            backend_url: gateway.base_url,
            connect_timeout_secs: gateway.connect_timeout.as_secs(),
            request_timeout_secs: gateway.request_timeout.as_secs(),
            status_clear_secs: timing.status_display.as_secs(),
            navigate_delay_ms: timing.navigate_delay.as_millis() as u64,
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Resolves the effective configuration for this run.
    ///
    /// An explicit `--config` path must exist; the default path is optional.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(std::env::var(BACKEND_URL_ENV).ok(), cli);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    fn apply_overrides(&mut self, env_backend_url: Option<String>, cli: &Cli) {
        if let Some(url) = env_backend_url.filter(|url| !url.trim().is_empty()) {
            self.backend_url = url;
        }
        if let Some(url) = &cli.backend_url {
            self.backend_url = url.clone();
        }
        if let Some(destination) = cli.log {
            self.log_destination = destination;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_url.trim().is_empty() {
            return Err(ConfigError::Invalid("backend_url is empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.backend_url.trim().to_string(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn core_timing(&self) -> CoreTiming {
        CoreTiming {
            status_display: Duration::from_secs(self.status_clear_secs),
            navigate_delay: Duration::from_millis(self.navigate_delay_ms),
        }
    }
}
