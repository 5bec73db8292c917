//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `roomlight.toml` in the working directory (or the path in
//! `ROOMLIGHT_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use roomlight_domain::room::RoomName;

const DEFAULT_PATH: &str = "roomlight.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry and poll-cycle settings.
    pub controller: ControllerConfig,
    /// Event bus settings.
    pub events: EventsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Interactive console settings.
    pub repl: ReplConfig,
}

/// Controller configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Interval between idle poll cycles, in milliseconds.
    pub poll_interval_ms: u64,
    /// Rooms registered at start-up.
    pub rooms: Vec<String>,
}

/// In-process event bus configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast channel capacity.
    pub capacity: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Console configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    pub prompt: String,
    /// Print the command list on start-up.
    pub show_help: bool,
}

impl Config {
    /// Load configuration from `roomlight.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("ROOMLIGHT_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ROOMLIGHT_POLL_INTERVAL_MS") {
            if let Ok(ms) = val.parse() {
                self.controller.poll_interval_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("ROOMLIGHT_EVENT_CAPACITY") {
            if let Ok(capacity) = val.parse() {
                self.events.capacity = capacity;
            }
        }
        if let Ok(val) = std::env::var("ROOMLIGHT_PROMPT") {
            self.repl.prompt = val;
        }
        if let Ok(val) = std::env::var("ROOMLIGHT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.controller.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_ms must be non-zero".to_string(),
            ));
        }
        if self.events.capacity == 0 {
            return Err(ConfigError::Validation(
                "event capacity must be non-zero".to_string(),
            ));
        }
        self.rooms()?;
        self.log_filter()?;
        Ok(())
    }

    /// Logging filter built from `logging.filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when a directive does not parse.
    pub fn log_filter(&self) -> Result<EnvFilter, ConfigError> {
        let filter = &self.logging.filter;
        EnvFilter::try_new(filter)
            .map_err(|err| ConfigError::Validation(format!("log filter '{filter}': {err}")))
    }

    /// Interval between idle poll cycles.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.controller.poll_interval_ms)
    }

    /// Start-up rooms as validated names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an invalid or repeated name.
    pub fn rooms(&self) -> Result<Vec<RoomName>, ConfigError> {
        let mut seen = BTreeSet::new();
        self.controller
            .rooms
            .iter()
            .map(|name| {
                let room = RoomName::new(name.as_str())
                    .map_err(|err| ConfigError::Validation(format!("room '{name}': {err}")))?;
                if !seen.insert(room.clone()) {
                    return Err(ConfigError::Validation(format!(
                        "room '{name}' is listed twice"
                    )));
                }
                Ok(room)
            })
            .collect()
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            rooms: Vec::new(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "roomlight=info".to_string(),
        }
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            show_help: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
