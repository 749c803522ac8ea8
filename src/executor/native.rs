//! Blocking transport backed by reqwest.

use crate::executor::config::ExecutionConfig;
use crate::executor::error::RequestError;
use crate::executor::Transport;
use crate::models::request::{HttpMethod, HttpRequest};
use crate::models::response::HttpResponse;
use std::time::Instant;

/// Sends requests with a `reqwest::blocking::Client`.
///
/// Redirects, decompression and connection reuse are whatever reqwest does
/// by default; nothing is retried.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Builds a client with the configured timeout.
    pub fn new(config: &ExecutionConfig) -> Result<Self, RequestError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout_duration())
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send()?;

        let status = response.status();
        let mut captured = HttpResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
        );
        for (name, value) in response.headers() {
            // Non-UTF-8 header values are dropped
            if let Ok(value) = value.to_str() {
                captured.add_header(name.as_str(), value);
            }
        }

        captured.body = response.bytes()?.to_vec();
        captured.elapsed = start.elapsed();

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status = captured.status_code,
            bytes = captured.body.len(),
            elapsed = ?captured.elapsed,
            "request completed"
        );

        Ok(captured)
    }
}
