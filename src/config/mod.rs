//! Loading of link configuration documents.
//!
//! A link document is a JSON object whose `apis` section maps API names to
//! [`WrapperConfig`] entries:
//!
//! ```json
//! {
//!   "apis": {
//!     "github": {
//!       "base_url": "https://api.github.com/",
//!       "user": "octocat",
//!       "password": "token",
//!       "headers": { "Accept": "application/vnd.github+json" }
//!     }
//!   }
//! }
//! ```
//!
//! Other top-level sections are ignored. The document lives at
//! `$LNK_DIR/link.config`, or `~/.link/link.config` when `LNK_DIR` is unset.

pub mod schema;

pub use schema::{default_headers, WrapperConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration directory.
pub const LINK_DIR_ENV: &str = "LNK_DIR";

/// Configuration file name inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "link.config";

/// Default configuration directory name under the home directory.
const DEFAULT_LINK_DIR: &str = ".link";

/// Errors that can occur while loading a link document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No configuration file at the resolved path.
    NotFound(PathBuf),

    /// Neither `LNK_DIR` nor a home directory is available.
    NoConfigDir,

    /// IO error occurred while reading the file.
    Io(String),

    /// The document is not valid JSON or does not match the schema.
    Parse(String),

    /// An API entry failed validation.
    InvalidApi { api: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Link configuration not found at {}", path.display())
            }
            ConfigError::NoConfigDir => write!(
                f,
                "Cannot locate configuration directory: set {} or a home directory",
                LINK_DIR_ENV
            ),
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse link configuration: {}", msg),
            ConfigError::InvalidApi { api, reason } => {
                write!(f, "Invalid configuration for api '{}': {}", api, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// The parsed `apis` section of a link document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    #[serde(default)]
    pub apis: BTreeMap<String, WrapperConfig>,
}

impl LinkConfig {
    /// Validates every API entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (api, config) in &self.apis {
            config.validate().map_err(|reason| ConfigError::InvalidApi {
                api: api.clone(),
                reason,
            })?;
        }
        Ok(())
    }
}

/// Parses and validates a link document from a JSON value.
///
/// # Example
///
/// ```
/// use apilink::config::load_config;
/// use serde_json::json;
///
/// let config = load_config(json!({
///     "apis": { "local": { "base_url": "http://localhost:8080/" } }
/// }))
/// .unwrap();
/// assert_eq!(config.apis["local"].timeout_secs, 30);
/// ```
pub fn load_config(document: Value) -> Result<LinkConfig, ConfigError> {
    if !document.is_object() {
        return Err(ConfigError::Parse("root must be a JSON object".to_string()));
    }

    let config: LinkConfig = serde_json::from_value(document)?;
    config.validate()?;

    if config.apis.is_empty() {
        tracing::warn!("link configuration has no apis section entries");
    }
    Ok(config)
}

/// Reads, parses and validates a link document from disk.
pub fn load_config_file(path: &Path) -> Result<LinkConfig, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loading link configuration");
    load_config(document)
}

/// Directory holding the link configuration.
///
/// `$LNK_DIR` when set and non-empty, otherwise `~/.link`.
pub fn config_dir() -> Option<PathBuf> {
    match std::env::var_os(LINK_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::home_dir().map(|home| home.join(DEFAULT_LINK_DIR)),
    }
}

/// Full path of the default link configuration file.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}
