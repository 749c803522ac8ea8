//! Request wrapper bound to one base URL.

use crate::auth::BasicAuth;
use crate::config::schema::{default_headers, WrapperConfig};
use crate::executor::{ExecutionConfig, ReqwestTransport, RequestError, Transport};
use crate::models::request::{upsert_header, HttpMethod, HttpRequest};
use crate::wrapper::params::UrlParams;
use crate::wrapper::response::ResponseWrapper;
use once_cell::unsync::OnceCell;

/// Issues requests against a base URL with a fixed header set and optional
/// Basic credentials.
///
/// Headers belong to the instance: [`add_to_headers`](Self::add_to_headers)
/// on one wrapper never affects another. Credentials are resolved into a
/// [`BasicAuth`] on first use and reused afterwards.
///
/// # Example
///
/// ```no_run
/// use apilink::RequestWrapper;
///
/// let api = RequestWrapper::new("https://api.example.com/")?
///     .with_credentials("alice", "secret");
///
/// let response = api.get("users/1", true)?;
/// println!("{}", response.json()?["name"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RequestWrapper<T = ReqwestTransport> {
    name: Option<String>,
    base_url: String,
    user: Option<String>,
    password: Option<String>,
    headers: Vec<(String, String)>,
    auth: OnceCell<Option<BasicAuth>>,
    transport: T,
}

impl RequestWrapper<ReqwestTransport> {
    /// Wrapper over a reqwest client with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RequestError> {
        let transport = ReqwestTransport::new(&ExecutionConfig::default())?;
        Ok(Self::with_transport(base_url, transport))
    }

    /// Wrapper built from a configuration entry, using its timeout.
    pub fn from_config(config: &WrapperConfig) -> Result<Self, RequestError> {
        let transport = ReqwestTransport::new(&ExecutionConfig::new(config.timeout_secs))?;
        Ok(Self::from_config_with_transport(config, transport))
    }
}

impl<T: Transport> RequestWrapper<T> {
    /// Wrapper sending through a caller-supplied transport.
    pub fn with_transport(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            name: None,
            base_url: base_url.into(),
            user: None,
            password: None,
            headers: default_headers(),
            auth: OnceCell::new(),
            transport,
        }
    }

    /// Applies a configuration entry on top of a caller-supplied transport.
    pub fn from_config_with_transport(config: &WrapperConfig, transport: T) -> Self {
        let mut wrapper = Self::with_transport(config.base_url.clone(), transport);
        wrapper.user = config.user.clone();
        wrapper.password = config.password.clone();
        for (name, value) in &config.headers {
            wrapper.add_to_headers(name.clone(), value.clone());
        }
        wrapper
    }

    /// Builder-style name setter. The name tags responses and log lines.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder-style credential setter.
    ///
    /// Clears any previously resolved credentials.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self.auth = OnceCell::new();
        self
    }

    /// Installs explicit credentials instead of resolving them from
    /// user/password.
    pub fn with_auth(mut self, auth: BasicAuth) -> Self {
        self.auth = OnceCell::with_value(Some(auth));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every request, in send order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Adds or replaces a header on this wrapper. Names match ignoring case.
    pub fn add_to_headers(&mut self, key: impl Into<String>, value: impl Into<String>) {
        upsert_header(&mut self.headers, key.into(), value.into());
    }

    /// Credentials for this wrapper, resolved on first call.
    ///
    /// `None` unless both user and password are set and non-empty, or
    /// credentials were installed with [`with_auth`](Self::with_auth).
    pub fn auth(&self) -> Option<&BasicAuth> {
        self.auth
            .get_or_init(|| BasicAuth::from_parts(self.user.as_deref(), self.password.as_deref()))
            .as_ref()
    }

    /// Builds the request that [`request`](Self::request) would send.
    pub fn prepare(
        &self,
        method: &str,
        params: impl Into<UrlParams>,
        data: &str,
        use_auth: bool,
    ) -> Result<HttpRequest, RequestError> {
        let method = HttpMethod::parse(method)
            .ok_or_else(|| RequestError::UnsupportedMethod(method.to_string()))?;

        let url = format!("{}{}", self.base_url, params.into().render());
        let mut request = HttpRequest::new(method, url);
        request.headers = self.headers.clone();

        if use_auth {
            if let Some(auth) = self.auth() {
                request.set_header("Authorization", auth.header_value());
            }
        }

        if !data.is_empty() {
            request.set_body(data);
        }

        Ok(request)
    }

    /// Sends a request and wraps the response.
    ///
    /// `method` is a verb name such as `"get"` or `"PUT"`. The URL is the
    /// base URL followed by the rendered `params`. A non-empty `data` is sent
    /// as the body. Transport failures are returned as-is; nothing is retried.
    pub fn request(
        &self,
        method: &str,
        params: impl Into<UrlParams>,
        data: &str,
        use_auth: bool,
    ) -> Result<ResponseWrapper, RequestError> {
        let request = self.prepare(method, params, data, use_auth)?;

        tracing::debug!(
            api = self.name.as_deref().unwrap_or("-"),
            method = %request.method,
            url = %request.url,
            auth = request.header("Authorization").is_some(),
            "dispatching request"
        );

        let response = ResponseWrapper::new(self.transport.send(&request)?);
        Ok(match &self.name {
            Some(name) => response.with_name(name.clone()),
            None => response,
        })
    }

    /// Makes a GET call.
    pub fn get(
        &self,
        params: impl Into<UrlParams>,
        use_auth: bool,
    ) -> Result<ResponseWrapper, RequestError> {
        self.request("get", params, "", use_auth)
    }

    /// Makes a PUT call.
    pub fn put(
        &self,
        params: impl Into<UrlParams>,
        data: &str,
        use_auth: bool,
    ) -> Result<ResponseWrapper, RequestError> {
        self.request("put", params, data, use_auth)
    }

    /// Makes a POST call.
    pub fn post(
        &self,
        params: impl Into<UrlParams>,
        data: &str,
        use_auth: bool,
    ) -> Result<ResponseWrapper, RequestError> {
        self.request("post", params, data, use_auth)
    }
}

impl<T> std::fmt::Debug for RequestWrapper<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestWrapper")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("user", &self.user)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
