//! error types
//!
//! structured errors for transport, introspection, code synthesis, and the
//! runtime used by generated clients.

use crate::graphql::GraphQlError;
use std::fmt;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for the transport, the generator, and generated clients
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http status {status}: {body}")]
    Status {
        /// http status code
        status: u16,
        /// raw response body
        body: String,
    },

    #[error("invalid request, got {} error(s), first error message is: {message}", .errors.len())]
    Request {
        /// every error returned by the server
        errors: Vec<GraphQlError>,
        /// message of the first error
        message: String,
    },

    #[error(
        "the field `{field}` has not been selected in the query, add it to the selection to read it"
    )]
    FieldNotSelected { field: String },

    #[error("invalid value `{value}` for {enum_name}, allowed values are: {}", .allowed.join(", "))]
    InvalidEnumValue {
        enum_name: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error(
        "type wrapper chain of depth {depth} exceeds the supported depth{}",
        type_suffix(.type_name)
    )]
    UnsupportedTypeDepth {
        depth: usize,
        type_name: Option<String>,
    },

    #[error("schema error: {0}")]
    Schema(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("selection error: {0}")]
    Selection(String),
}

fn type_suffix(type_name: &Option<String>) -> String {
    match type_name {
        Some(name) => format!(" (at `{name}`)"),
        None => String::new(),
    }
}

impl Error {
    /// build a request error from a non-empty graphql error list
    pub fn request(errors: Vec<GraphQlError>) -> Self {
        let message = errors
            .first()
            .map(|err| err.message.clone())
            .unwrap_or_else(|| "graphql error".to_string());
        Error::Request { errors, message }
    }

    /// true if the error looks like an auth failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Status { status: 401 | 403, .. })
            || matches!(self, Error::Http(err) if err.status() == Some(reqwest::StatusCode::UNAUTHORIZED))
    }

    /// graphql errors carried by a request error
    pub fn graphql_errors(&self) -> &[GraphQlError] {
        match self {
            Error::Request { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
