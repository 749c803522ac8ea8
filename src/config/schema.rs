//! Configuration schema for a single wrapped API.
//!
//! Each entry under the `apis` section of a link document deserializes into a
//! [`WrapperConfig`]. Missing optional settings fall back to defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `User-Agent` sent unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("apilink/", env!("CARGO_PKG_VERSION"));

/// Headers every new wrapper starts with, in send order.
pub fn default_headers() -> Vec<(String, String)> {
    vec![
        ("Accept".to_string(), "*/*".to_string()),
        (
            "Accept-Encoding".to_string(),
            "gzip, deflate, identity".to_string(),
        ),
        ("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string()),
    ]
}

/// Settings for one named API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperConfig {
    /// URL every request path is appended to.
    ///
    /// Must be an absolute `http` or `https` URL.
    pub base_url: String,

    /// Username for HTTP Basic authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Password for HTTP Basic authentication.
    ///
    /// Credentials are only used when both `user` and `password` are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Extra headers layered over the defaults for this API only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Request timeout in seconds. Must be greater than 0.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl WrapperConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user: None,
            password: None,
            headers: BTreeMap::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Builder-style credential setter.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Builder-style header setter.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive message.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("base_url '{}' is not a valid URL: {}", self.base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "base_url scheme must be http or https, got '{}'",
                parsed.scheme()
            ));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if let Some(name) = self.headers.keys().find(|k| k.trim().is_empty()) {
            return Err(format!("header name '{}' is empty", name));
        }

        Ok(())
    }
}
