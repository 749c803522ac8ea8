//! HTTP request execution error types.

use std::fmt;

/// Errors that can occur while dispatching a wrapped request.
#[derive(Debug)]
pub enum RequestError {
    /// The verb name does not map to a supported HTTP method.
    ///
    /// Raised before anything is sent.
    UnsupportedMethod(String),

    /// The underlying HTTP client failed.
    ///
    /// The client's error is carried unmodified, including connection,
    /// timeout, TLS and request-building failures.
    Transport(reqwest::Error),
}

impl RequestError {
    /// Whether the failure was a client-side timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Transport(err) if err.is_timeout())
    }

    /// The underlying client error, if this is a transport failure.
    pub fn transport_error(&self) -> Option<&reqwest::Error> {
        match self {
            RequestError::Transport(err) => Some(err),
            RequestError::UnsupportedMethod(_) => None,
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::UnsupportedMethod(method) => {
                write!(f, "Unsupported HTTP method: {}", method)
            }
            RequestError::Transport(err) => write!(f, "HTTP transport error: {}", err),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Transport(err) => Some(err),
            RequestError::UnsupportedMethod(_) => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        RequestError::Transport(err)
    }
}
