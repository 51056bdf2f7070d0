//! Application configuration: TOML file, CLI overrides and validation.

use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use scribble_core::{AnimationSettings, ConfettiSettings, Settings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Runtime configuration for the game.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed for tile colors and confetti; random when absent.
    seed: Option<u64>,

    /// Where the log is written.
    log_file: PathBuf,

    /// Frame pacing.
    animation: AnimationSettings,

    /// Confetti count and ranges.
    confetti: ConfettiSettings,
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("scribble.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_file: default_log_file(),
            animation: AnimationSettings::default(),
            confetti: ConfettiSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(seed = ?config.seed, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides on top of the file values.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, seed: Option<u64>, log_file: Option<PathBuf>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(log_file) = log_file {
            self.log_file = log_file;
        }
        self
    }

    /// Engine settings.
    pub fn settings(&self) -> Settings {
        Settings {
            animation: self.animation,
            confetti: self.confetti,
        }
    }

    /// Checks the engine settings for out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings()
            .validate()
            .map_err(|e| ConfigError::new(e.to_string()))
    }

    /// Random source: seeded when configured, otherwise from the OS.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
