//! Application configuration loading from config.toml
//!
//! Everything here has a default, so a missing section (or a missing file,
//! via [`load_or_default`]) still yields a usable configuration. Secrets are
//! never part of the file: the API token is read from the environment right
//! before use.

use crate::{
    core::format::{Formatter, Locale},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable holding the backend bearer token.
pub const API_TOKEN_VAR: &str = "CONSOLE_API_TOKEN";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Backend location
    pub api: ApiConfig,
    /// Locale and timezone for formatting
    pub display: DisplayConfig,
    /// Where mock records come from
    pub storage: StorageConfig,
}

/// `[api]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the console backend, without the `/api` suffix
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

/// `[display]` section
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Locale tag, e.g. "en-US"
    pub locale: Locale,
    /// Minutes east of UTC used for timestamps
    pub utc_offset_minutes: i32,
}

/// `[storage]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Fixture file with mock records
    pub fixtures: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            fixtures: PathBuf::from("fixtures.toml"),
        }
    }
}

impl AppConfig {
    /// Builds the formatting service described by `[display]`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the UTC offset is out of range.
    pub fn formatter(&self) -> Result<Formatter> {
        Formatter::new(self.display.locale, self.display.utc_offset_minutes)
    }
}

/// Loads the configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads `path` when it exists, defaults otherwise. A file that exists but
/// does not parse is still an error.
///
/// # Errors
/// Returns an error if an existing file cannot be read or parsed.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        warn!("{} not found, using default configuration", path.display());
        Ok(AppConfig::default())
    }
}

/// Reads the API bearer token from [`API_TOKEN_VAR`].
///
/// # Errors
/// Returns [`Error::EnvVar`] when the variable is unset.
pub fn api_token() -> Result<String> {
    std::env::var(API_TOKEN_VAR).map_err(Error::EnvVar)
}
