//! HTTP request execution.
//!
//! The request wrapper never talks to a client directly; it hands a prepared
//! [`HttpRequest`] to a [`Transport`]. [`ReqwestTransport`] is the real one.

pub mod config;
pub mod error;
pub mod native;

pub use config::ExecutionConfig;
pub use error::RequestError;
pub use native::ReqwestTransport;

use crate::models::request::HttpRequest;
use crate::models::response::HttpResponse;

/// Sends one prepared request and returns the raw response.
///
/// Implementations must not retry, and must surface client failures as
/// [`RequestError::Transport`].
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        (**self).send(request)
    }
}
