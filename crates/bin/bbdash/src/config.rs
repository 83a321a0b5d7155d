//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `bbdash.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target device settings.
    pub device: DeviceSettings,
    /// Polling settings.
    pub poll: PollSettings,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Which device to talk to.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    /// Base URL of the device's HTTP server.
    pub url: String,
}

/// Status polling cadence.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    /// Milliseconds between status polls.
    pub interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `bbdash.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("bbdash.toml")?;
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
        if let Ok(val) = std::env::var("BBDASH_DEVICE_URL") {
            self.device.url = val;
        }
        if let Ok(val) = std::env::var("BBDASH_POLL_INTERVAL_MS") {
            if let Ok(interval) = val.parse() {
                self.poll.interval_ms = interval;
            }
        }
        if let Ok(val) = std::env::var("BBDASH_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.device.url.is_empty() {
            return Err(ConfigError::Validation(
                "device url must not be empty".to_string(),
            ));
        }
        if self.poll.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL of the device's HTTP server.
    #[must_use]
    pub fn device_url(&self) -> &str {
        &self.device.url
    }

    /// Polling cadence as a [`Duration`].
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll.interval_ms)
    }
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            // The firmware's captive-portal AP address.
            url: "http://192.168.4.1".to_string(),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self { interval_ms: 2000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "bbdash=info".to_string(),
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
