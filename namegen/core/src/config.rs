//! Configuration
//!
//! The widget runs on compiled-in defaults. An optional TOML file at
//! `$XDG_CONFIG_HOME/namegen/namegen.toml` and environment variables can
//! override them.
//!
//! # Configuration Priority
//!
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! presets = [
//!     "bundled:elegant-penguin",
//!     "/srv/presets/custom.json",
//!     "https://example.com/presets/visionary-palm-tree.json",
//! ]
//! fetch_timeout_ms = 5000
//! frame_interval_ms = 16
//! ```
//!
//! # Environment Variables
//!
//! - `NAMEGEN_PRESETS`: comma-separated preset locators
//! - `NAMEGEN_FETCH_TIMEOUT_MS`: per-fetch timeout
//! - `NAMEGEN_FRAME_INTERVAL_MS`: frame interval

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::{Locator, DEFAULT_FETCH_TIMEOUT};

/// Presets compiled into the binary
pub const DEFAULT_PRESET_LOCATORS: &[&str] = &[
    "bundled:elegant-penguin",
    "bundled:visionary-palm-tree",
    "bundled:midnight-lighthouse",
];

/// Default frame interval (~60 Hz)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// Structures
// =============================================================================

/// Shape of the TOML configuration file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamegenToml {
    /// Preset locators, in display order
    pub presets: Option<Vec<String>>,

    /// Per-fetch timeout in milliseconds
    pub fetch_timeout_ms: Option<u64>,

    /// Frame interval in milliseconds
    pub frame_interval_ms: Option<u64>,
}

/// Resolved widget configuration
#[derive(Clone, Debug)]
pub struct WidgetConfig {
    /// Preset locators, in display order
    pub presets: Vec<String>,

    /// Per-fetch timeout
    pub fetch_timeout: Duration,

    /// Time between rendered frames
    pub frame_interval: Duration,

    /// File the configuration was read from, if any
    pub config_file_path: Option<PathBuf>,

    source: ConfigSource,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            presets: DEFAULT_PRESET_LOCATORS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl WidgetConfig {
    /// Highest-priority source that contributed a value
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Parsed preset locators
    #[must_use]
    pub fn locators(&self) -> Vec<Locator> {
        self.presets.iter().map(|s| Locator::parse(s)).collect()
    }

    /// Check the resolved values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an empty preset list or
    /// a zero duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.presets.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one preset locator is required".to_string(),
            ));
        }
        if let Some(index) = self.presets.iter().position(|p| p.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "preset locator {index} is blank"
            )));
        }
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "fetch_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.frame_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "frame_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Default location of the configuration file
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("namegen").join("namegen.toml"))
}

/// Load configuration from the default path and the environment
///
/// # Errors
///
/// See [`load_config_from_path`].
pub fn load_config() -> Result<WidgetConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from `path` (if it exists) and the environment
///
/// A missing file is not an error.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed, or the
/// resulting values are invalid.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<WidgetConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<WidgetConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = WidgetConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: NamegenToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env)?;
    config.validate()?;

    Ok(config)
}

fn apply_toml_config(config: &mut WidgetConfig, toml: &NamegenToml) {
    if let Some(ref presets) = toml.presets {
        config.presets = clean_locators(presets.iter().map(String::as_str));
    }
    if let Some(ms) = toml.fetch_timeout_ms {
        config.fetch_timeout = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.frame_interval_ms {
        config.frame_interval = Duration::from_millis(ms);
    }
}

fn apply_env_config<F>(config: &mut WidgetConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = env("NAMEGEN_PRESETS") {
        config.presets = clean_locators(raw.split(','));
        config.source = ConfigSource::Env;
    }
    if let Some(raw) = env("NAMEGEN_FETCH_TIMEOUT_MS") {
        config.fetch_timeout =
            Duration::from_millis(parse_millis("NAMEGEN_FETCH_TIMEOUT_MS", &raw)?);
        config.source = ConfigSource::Env;
    }
    if let Some(raw) = env("NAMEGEN_FRAME_INTERVAL_MS") {
        config.frame_interval =
            Duration::from_millis(parse_millis("NAMEGEN_FRAME_INTERVAL_MS", &raw)?);
        config.source = ConfigSource::Env;
    }
    Ok(())
}

/// Trim locators and drop blank entries
fn clean_locators<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    raw.into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_millis(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("{key} must be a number, got '{raw}'")))
}
