//! Response wrapper with memoized JSON and XML decoding.

use crate::models::response::HttpResponse;
use crate::xml::{self, XmlElement, XmlError};
use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Errors raised when a body cannot be decoded.
///
/// Both variants carry the body text so callers can see what the server
/// actually sent.
#[derive(Debug)]
pub enum ParseError {
    InvalidJson {
        content: String,
        source: serde_json::Error,
    },
    InvalidXml {
        content: String,
        source: XmlError,
    },
}

impl ParseError {
    /// The body text that failed to parse.
    pub fn content(&self) -> &str {
        match self {
            ParseError::InvalidJson { content, .. } | ParseError::InvalidXml { content, .. } => {
                content
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidJson { content, source } => {
                write!(f, "Response is not valid json ({}): {}", source, content)
            }
            ParseError::InvalidXml { content, source } => {
                write!(f, "Response is not valid xml ({}): {}", source, content)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::InvalidJson { source, .. } => Some(source),
            ParseError::InvalidXml { source, .. } => Some(source),
        }
    }
}

/// A raw response plus lazily parsed views of its body.
///
/// Each representation is parsed on first successful access and kept for the
/// lifetime of the wrapper. A failed parse caches nothing, so a later call
/// reports the same error again.
pub struct ResponseWrapper {
    name: Option<String>,
    response: HttpResponse,
    json: OnceCell<Value>,
    xml: OnceCell<XmlElement>,
}

impl ResponseWrapper {
    pub fn new(response: HttpResponse) -> Self {
        Self {
            name: None,
            response,
            json: OnceCell::new(),
            xml: OnceCell::new(),
        }
    }

    /// Tags the response with the name of the API that produced it.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Body parsed as JSON, parsing on first call.
    pub fn json(&self) -> Result<&Value, ParseError> {
        self.json.get_or_try_init(|| parse_json(&self.response))
    }

    /// Runs `edit` on the parsed JSON, parsing first if needed, and keeps the
    /// edited value cached.
    ///
    /// Edits are reflected by [`serialize_parsed`](Self::serialize_parsed).
    pub fn edit_json<R>(&mut self, edit: impl FnOnce(&mut Value) -> R) -> Result<R, ParseError> {
        let response = &self.response;
        edit_cached(&mut self.json, || parse_json(response), edit)
    }

    /// Body parsed as an XML element tree, parsing on first call.
    pub fn xml(&self) -> Result<&XmlElement, ParseError> {
        self.xml.get_or_try_init(|| parse_xml(&self.response))
    }

    /// Runs `edit` on the parsed XML tree, parsing first if needed.
    pub fn edit_xml<R>(
        &mut self,
        edit: impl FnOnce(&mut XmlElement) -> R,
    ) -> Result<R, ParseError> {
        let response = &self.response;
        edit_cached(&mut self.xml, || parse_xml(response), edit)
    }

    /// Whether [`json`](Self::json) has been parsed and cached.
    pub fn has_json(&self) -> bool {
        self.json.get().is_some()
    }

    /// Whether [`xml`](Self::xml) has been parsed and cached.
    pub fn has_xml(&self) -> bool {
        self.xml.get().is_some()
    }

    /// Serializes whichever representation has been parsed, checking JSON
    /// first. Returns `None` if neither was.
    pub fn serialize_parsed(&self) -> Option<String> {
        if let Some(value) = self.json.get() {
            return Some(value.to_string());
        }
        self.xml.get().map(XmlElement::to_xml_string)
    }

    pub fn response(&self) -> &HttpResponse {
        &self.response
    }

    pub fn into_inner(self) -> HttpResponse {
        self.response
    }

    pub fn status_code(&self) -> u16 {
        self.response.status_code
    }

    pub fn is_success(&self) -> bool {
        self.response.is_success()
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.response.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.response.header(name)
    }

    /// Raw body bytes.
    pub fn content(&self) -> &[u8] {
        &self.response.body
    }

    /// Body as text, lossily decoded.
    pub fn text(&self) -> String {
        self.response.text()
    }
}

impl fmt::Debug for ResponseWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseWrapper")
            .field("name", &self.name)
            .field("status_code", &self.response.status_code)
            .field("body_len", &self.response.body.len())
            .field("json_parsed", &self.has_json())
            .field("xml_parsed", &self.has_xml())
            .finish()
    }
}

impl From<HttpResponse> for ResponseWrapper {
    fn from(response: HttpResponse) -> Self {
        Self::new(response)
    }
}

fn parse_json(response: &HttpResponse) -> Result<Value, ParseError> {
    let value = serde_json::from_slice(&response.body).map_err(|source| {
        ParseError::InvalidJson {
            content: response.text(),
            source,
        }
    })?;
    tracing::debug!(bytes = response.body.len(), "parsed response body as json");
    Ok(value)
}

fn parse_xml(response: &HttpResponse) -> Result<XmlElement, ParseError> {
    let text = std::str::from_utf8(&response.body).map_err(|e| ParseError::InvalidXml {
        content: response.text(),
        source: XmlError::Syntax {
            offset: e.valid_up_to(),
            message: "invalid UTF-8".to_string(),
        },
    })?;
    let tree = xml::parse(text).map_err(|source| ParseError::InvalidXml {
        content: text.to_string(),
        source,
    })?;
    tracing::debug!(bytes = response.body.len(), root = %tree.name, "parsed response body as xml");
    Ok(tree)
}

/// Takes the cached value out (parsing if the cache is empty), applies `edit`
/// and stores the result back. A failed parse leaves the cache empty.
fn edit_cached<T, R>(
    cell: &mut OnceCell<T>,
    parse: impl FnOnce() -> Result<T, ParseError>,
    edit: impl FnOnce(&mut T) -> R,
) -> Result<R, ParseError> {
    let mut value = match cell.take() {
        Some(value) => value,
        None => parse()?,
    };
    let out = edit(&mut value);
    *cell = OnceCell::with_value(value);
    Ok(out)
}
