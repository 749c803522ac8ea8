//! Data models for HTTP requests and responses.
//!
//! These are the plain values exchanged between the wrappers and a
//! [`Transport`](crate::executor::Transport).

pub mod request;
pub mod response;

pub use request::{HttpMethod, HttpRequest};
pub use response::HttpResponse;
