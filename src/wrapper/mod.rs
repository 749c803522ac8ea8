//! Request and response wrappers.

pub mod params;
pub mod request;
pub mod response;

pub use params::UrlParams;
pub use request::RequestWrapper;
pub use response::{ParseError, ResponseWrapper};
