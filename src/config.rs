//! client and generator configuration
//!
//! build a [`ClientConfig`] with the endpoint url and optional overrides, then
//! pass it to [`crate::Client::new`]. build a [`GeneratorConfig`] to control
//! where generated code lives and how it refers to this crate.

use crate::error::{Error, Result};
use crate::naming;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

type BuilderHook =
    Arc<dyn Fn(reqwest::blocking::ClientBuilder) -> reqwest::blocking::ClientBuilder + Send + Sync>;

/// configuration for the http transport
#[derive(Clone)]
pub struct ClientConfig {
    /// original endpoint input
    pub(crate) raw_endpoint: String,

    /// graphql endpoint (e.g., "<https://api.example.com/graphql>")
    pub(crate) endpoint: Url,

    /// whether the provided endpoint parsed successfully
    pub(crate) endpoint_valid: bool,

    /// bearer token sent as `Authorization`
    pub(crate) token: Option<String>,

    /// request timeout duration
    pub(crate) timeout: Duration,

    /// user agent string
    pub(crate) user_agent: String,

    /// whether to verify ssl certificates
    pub(crate) verify_ssl: bool,

    /// additional headers to send with every request
    pub(crate) extra_headers: HeaderMap,

    /// prebuilt http client (takes precedence over http_client_builder)
    pub(crate) http_client: Option<reqwest::blocking::Client>,

    /// callback to customize the http client builder before building
    pub(crate) http_client_builder: Option<BuilderHook>,
}

impl ClientConfig {
    /// create a new client configuration
    ///
    /// # example
    ///
    /// ```
    /// use synthql::ClientConfig;
    ///
    /// let config = ClientConfig::new("https://api.example.com/graphql").with_token("secret");
    /// ```
    pub fn new(endpoint: impl AsRef<str>) -> Self {
        let raw = endpoint.as_ref();
        let trimmed = raw.trim();

        let parsed = Url::parse(trimmed).or_else(|_| Url::parse(&format!("https://{trimmed}")));
        let (endpoint, endpoint_valid) = match parsed {
            Ok(url) => (url, true),
            Err(_) => (invalid_placeholder(), false),
        };

        Self {
            raw_endpoint: raw.to_string(),
            endpoint,
            endpoint_valid,
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("synthql/{} (Rust)", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
            extra_headers: HeaderMap::new(),
            http_client: None,
            http_client_builder: None,
        }
    }

    /// send `Authorization: Bearer <token>` with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// set the request timeout
    ///
    /// default: 30 seconds
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// set a custom user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// disable ssl certificate verification (not recommended for production)
    ///
    /// default: enabled
    pub fn with_ssl_verification(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// add a header to every request
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.insert(name, value);
        self
    }

    /// add a set of headers to every request
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.extra_headers.extend(headers);
        self
    }

    /// access extra headers configured on this client
    pub fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    /// the configured endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// inject a prebuilt http client.
    ///
    /// when set, the client is used as-is: token, headers, tls, timeouts and
    /// user agent configured here are ignored.
    pub fn with_http_client(mut self, http_client: reqwest::blocking::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// customize the http client builder before the client is created.
    ///
    /// the callback receives a builder with auth, extra headers, user agent,
    /// timeout and ssl settings already applied. ignored if
    /// `with_http_client` is also set.
    pub fn with_http_client_builder<F>(mut self, f: F) -> Self
    where
        F: Fn(reqwest::blocking::ClientBuilder) -> reqwest::blocking::ClientBuilder
            + Send
            + Sync
            + 'static,
    {
        self.http_client_builder = Some(Arc::new(f));
        self
    }

    /// validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.endpoint_valid {
            return Err(Error::Config(format!(
                "invalid endpoint: {}",
                self.raw_endpoint
            )));
        }

        if self.endpoint.scheme() != "http" && self.endpoint.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. must be http or https",
                self.endpoint.scheme()
            )));
        }

        if matches!(&self.token, Some(token) if token.is_empty()) {
            return Err(Error::Config("api token cannot be empty".to_string()));
        }

        Ok(())
    }
}

fn invalid_placeholder() -> Url {
    Url::parse("https://invalid.invalid").unwrap_or_else(|_| unreachable!("static url parses"))
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("verify_ssl", &self.verify_ssl)
            .field("extra_headers", &self.extra_headers.len())
            .field("http_client", &self.http_client.is_some())
            .field("http_client_builder", &self.http_client_builder.is_some())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// configuration for code generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// module path the generated code is rooted at
    pub(crate) namespace: String,
    /// path generated code uses to reach this crate
    pub(crate) runtime_path: String,
    /// emit a `Cargo.toml` for a standalone crate with this name
    pub(crate) crate_name: Option<String>,
    /// dependency spec for this crate in the emitted `Cargo.toml`
    pub(crate) runtime_dependency: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorConfig {
    /// defaults: generated code rooted at `crate`, runtime reached as `synthql`
    pub fn new() -> Self {
        Self {
            namespace: "crate".to_string(),
            runtime_path: "synthql".to_string(),
            crate_name: None,
            runtime_dependency: None,
        }
    }

    /// root the generated types at another module path (e.g. `crate::api`)
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// path used by generated code to reach the runtime (e.g. `::synthql`)
    pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// emit a standalone crate manifest
    pub fn with_crate_name(mut self, name: impl Into<String>) -> Self {
        self.crate_name = Some(name.into());
        self
    }

    /// dependency line value for this crate, e.g. `{ path = "../synthql" }`
    pub fn with_runtime_dependency(mut self, spec: impl Into<String>) -> Self {
        self.runtime_dependency = Some(spec.into());
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn runtime_path(&self) -> &str {
        &self.runtime_path
    }

    pub fn crate_name(&self) -> Option<&str> {
        self.crate_name.as_deref()
    }

    pub fn runtime_dependency(&self) -> Option<&str> {
        self.runtime_dependency.as_deref()
    }

    /// validate module paths and the crate name
    pub fn validate(&self) -> Result<()> {
        if !naming::is_module_path(&self.namespace) {
            return Err(Error::Config(format!(
                "invalid namespace: {}",
                self.namespace
            )));
        }
        if !naming::is_module_path(&self.runtime_path) {
            return Err(Error::Config(format!(
                "invalid runtime path: {}",
                self.runtime_path
            )));
        }
        if let Some(name) = &self.crate_name {
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
            if !valid {
                return Err(Error::Config(format!("invalid crate name: {name}")));
            }
            if self.namespace != "crate" {
                return Err(Error::Config(format!(
                    "a standalone crate must be rooted at `crate`, not {}",
                    self.namespace
                )));
            }
        }
        Ok(())
    }
}
