//! HTTP request execution configuration.

use crate::config::schema::DEFAULT_TIMEOUT_SECS;
use std::time::Duration;

/// Configuration for the HTTP client behind a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Request timeout in seconds.
    ///
    /// Maximum time to wait for a complete response (connection, headers
    /// and body). Defaults to 30 seconds.
    pub timeout_secs: u64,
}

impl ExecutionConfig {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    /// Returns the timeout as a `Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_config_default() {
        assert_eq!(ExecutionConfig::default().timeout_secs, 30);
    }

    #[test]
    fn test_timeout_duration() {
        let config = ExecutionConfig::new(45);
        assert_eq!(config.timeout_duration(), Duration::from_secs(45));
    }
}
