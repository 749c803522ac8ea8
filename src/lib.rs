//! Named HTTP API wrappers.
//!
//! apilink is a thin layer over a blocking HTTP client. It gives every
//! configured API a [`RequestWrapper`] with a base URL, a standard header set
//! and optional HTTP Basic credentials, and wraps each reply in a
//! [`ResponseWrapper`] that parses the body as JSON or XML on demand.
//!
//! # Architecture
//!
//! - **config**: link document schema and loading (`$LNK_DIR/link.config`)
//! - **link**: [`ApiLink`], the registry handing out wrappers by name
//! - **wrapper**: request/response wrappers and URL parameter rendering
//! - **executor**: the [`Transport`](executor::Transport) seam and its reqwest implementation
//! - **auth**: Basic credentials
//! - **models**: prepared requests and raw responses
//! - **xml**: the element tree used for parsed XML bodies
//!
//! # Usage
//!
//! ```no_run
//! use apilink::ApiLink;
//! use serde_json::json;
//!
//! let link = ApiLink::from_value(json!({
//!     "apis": {
//!         "inventory": {
//!             "base_url": "https://inventory.example.com/api/",
//!             "user": "reporter",
//!             "password": "secret"
//!         }
//!     }
//! }))?;
//!
//! let mut api = link.wrapper("inventory")?;
//! api.add_to_headers("Accept", "application/json");
//!
//! let response = api.get(vec![("sku", "A-100")], true)?;
//! let stock = &response.json()?["stock"];
//! println!("in stock: {}", stock);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Nothing here retries, pools beyond what the client does by default, or
//! streams: each call is one blocking request whose failure is returned
//! unchanged.

pub mod auth;
pub mod config;
pub mod executor;
pub mod link;
pub mod models;
pub mod wrapper;
pub mod xml;

pub use auth::BasicAuth;
pub use config::{ConfigError, LinkConfig, WrapperConfig};
pub use executor::{ReqwestTransport, RequestError, Transport};
pub use link::{ApiLink, LinkError};
pub use models::{HttpMethod, HttpRequest, HttpResponse};
pub use wrapper::{ParseError, RequestWrapper, ResponseWrapper, UrlParams};
pub use xml::{XmlElement, XmlError, XmlNode};
