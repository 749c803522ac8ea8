//! Registry of named API wrappers.
//!
//! [`ApiLink`] reads the `apis` section of a link document and hands out a
//! fresh [`RequestWrapper`] per lookup. Wrappers are independent: headers
//! added to one are not seen by the next one created for the same name.

use crate::config::{self, ConfigError, LinkConfig, WrapperConfig};
use crate::executor::RequestError;
use crate::wrapper::RequestWrapper;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Errors from registry lookups.
#[derive(Debug)]
pub enum LinkError {
    /// No API with this name is configured.
    UnknownApi(String),

    /// The link document could not be loaded.
    Config(ConfigError),

    /// The HTTP client for the wrapper could not be built.
    Client(RequestError),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::UnknownApi(name) => write!(f, "No api named '{}' is configured", name),
            LinkError::Config(err) => write!(f, "{}", err),
            LinkError::Client(err) => write!(f, "Failed to create HTTP client: {}", err),
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::UnknownApi(_) => None,
            LinkError::Config(err) => Some(err),
            LinkError::Client(err) => Some(err),
        }
    }
}

impl From<ConfigError> for LinkError {
    fn from(err: ConfigError) -> Self {
        LinkError::Config(err)
    }
}

impl From<RequestError> for LinkError {
    fn from(err: RequestError) -> Self {
        LinkError::Client(err)
    }
}

/// Named access to configured APIs.
///
/// # Example
///
/// ```no_run
/// use apilink::ApiLink;
///
/// let link = ApiLink::load()?;
/// let github = link.wrapper("github")?;
/// let repos = github.get("user/repos", true)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiLink {
    config: LinkConfig,
}

impl ApiLink {
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }

    /// Builds the registry from an in-memory link document.
    pub fn from_value(document: Value) -> Result<Self, LinkError> {
        Ok(Self::new(config::load_config(document)?))
    }

    /// Builds the registry from a link document on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LinkError> {
        Ok(Self::new(config::load_config_file(path.as_ref())?))
    }

    /// Builds the registry from the default location
    /// (`$LNK_DIR/link.config` or `~/.link/link.config`).
    pub fn load() -> Result<Self, LinkError> {
        let path = config::default_config_path()?;
        Self::from_path(path)
    }

    /// Configured API names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.config.apis.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.config.apis.contains_key(name)
    }

    /// Configuration entry for an API.
    pub fn config(&self, name: &str) -> Result<&WrapperConfig, LinkError> {
        self.config
            .apis
            .get(name)
            .ok_or_else(|| LinkError::UnknownApi(name.to_string()))
    }

    /// Creates a new wrapper for the named API.
    pub fn wrapper(&self, name: &str) -> Result<RequestWrapper, LinkError> {
        let entry = self.config(name)?;
        tracing::debug!(api = name, base_url = %entry.base_url, "creating api wrapper");
        Ok(RequestWrapper::from_config(entry)?.with_name(name))
    }

    /// Alias for [`wrapper`](Self::wrapper).
    pub fn get(&self, name: &str) -> Result<RequestWrapper, LinkError> {
        self.wrapper(name)
    }
}
