//! http transport
//!
//! a blocking graphql-over-http client. it is the default [`Transport`] for
//! both the generator and generated clients.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::graphql::GraphQlResponse;
use crate::transport::Transport;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// graphql http client
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http: reqwest::blocking::Client,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = match &config.http_client {
            Some(http) => http.clone(),
            None => {
                let mut headers = HeaderMap::new();
                if let Some(token) = &config.token {
                    headers.insert(
                        AUTHORIZATION,
                        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
                            Error::Config(format!("invalid api token header value: {err}"))
                        })?,
                    );
                }
                headers.extend(config.extra_headers.clone());

                let mut builder = reqwest::blocking::Client::builder()
                    .default_headers(headers)
                    .user_agent(config.user_agent.clone())
                    .timeout(config.timeout)
                    .danger_accept_invalid_certs(!config.verify_ssl);
                if let Some(hook) = &config.http_client_builder {
                    builder = hook(builder);
                }
                builder.build()?
            }
        };

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// access the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// execute a raw graphql operation
    ///
    /// graphql errors stay in the returned response.
    pub fn execute_raw(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<GraphQlResponse<Value>> {
        self.execute_with(query, variables, |url, body| self.send(url, body))
    }

    /// execute a graphql operation and deserialize its data
    pub fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<GraphQlResponse<T>> {
        self.execute_with(query, variables, |url, body| self.send(url, body))
    }

    fn send(&self, url: Url, body: Value) -> Result<(StatusCode, String)> {
        let response = self.http.post(url).json(&body).send()?;
        let status = response.status();
        let text = response.text()?;
        Ok((status, text))
    }

    pub(crate) fn execute_with<T, F>(
        &self,
        query: &str,
        variables: Option<Value>,
        send: F,
    ) -> Result<GraphQlResponse<T>>
    where
        T: DeserializeOwned,
        F: FnOnce(Url, Value) -> Result<(StatusCode, String)>,
    {
        let body = serde_json::json!({
            "query": query,
            "variables": variables.unwrap_or_else(|| serde_json::json!({})),
        });

        debug!(endpoint = %self.config.endpoint, "sending graphql request");
        let (status, text) = send(self.config.endpoint.clone(), body)?;
        parse_graphql_response(status, text)
    }
}

impl Transport for Client {
    fn query(&self, operation: &str, variables: &Value) -> Result<GraphQlResponse<Value>> {
        self.execute_raw(operation, Some(variables.clone()))
    }
}

/// a body carrying graphql errors is a response whatever the status; any
/// other non-2xx status is an error
fn parse_graphql_response<T: DeserializeOwned>(
    status: StatusCode,
    text: String,
) -> Result<GraphQlResponse<T>> {
    if !status.is_success() {
        return match serde_json::from_str::<GraphQlResponse<T>>(&text) {
            Ok(parsed) if parsed.has_errors() => {
                warn!(
                    status = status.as_u16(),
                    "graphql errors with http error status"
                );
                Ok(parsed)
            }
            _ => Err(Error::Status {
                status: status.as_u16(),
                body: text,
            }),
        };
    }

    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn test_client(config: ClientConfig) -> Client {
        config.validate().unwrap();
        let http = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .expect("test http client");
        Client {
            config: Arc::new(config),
            http,
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn test_execute_raw_posts_to_endpoint() {
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let response = client
            .execute_with::<Value, _>(
                "query { ok }",
                Some(serde_json::json!({"id": "1"})),
                |url, body| {
                    assert_eq!(url.path(), "/graphql");
                    assert_eq!(body["query"], "query { ok }");
                    assert_eq!(body["variables"]["id"], "1");
                    Ok((StatusCode::OK, "{\"data\": {\"ok\": true}}".to_string()))
                },
            )
            .unwrap();

        assert_eq!(response.data.unwrap()["ok"], true);
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn test_execute_defaults_variables() {
        let client = test_client(ClientConfig::new("http://localhost:1234/graphql"));
        client
            .execute_with::<Value, _>("query { ok }", None, |_url, body| {
                assert_eq!(body["variables"], serde_json::json!({}));
                Ok((StatusCode::OK, "{\"data\": {}}".to_string()))
            })
            .unwrap();
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn test_graphql_errors_are_returned_in_response() {
        let client = test_client(ClientConfig::new("http://localhost:1234/graphql"));
        let response = client
            .execute_with::<Value, _>("query { ok }", None, |_url, _body| {
                Ok((
                    StatusCode::OK,
                    "{\"data\": null, \"errors\": [{\"message\": \"boom\"}]}".to_string(),
                ))
            })
            .unwrap();

        assert!(response.has_errors());
        assert_eq!(response.errors[0].message, "boom");
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn test_execute_typed_success() {
        #[derive(Debug, Deserialize)]
        struct Data {
            value: i64,
        }
        let client = test_client(ClientConfig::new("http://localhost:1234/graphql"));
        let response = client
            .execute_with::<Data, _>("query { value }", None, |_url, _body| {
                Ok((StatusCode::OK, "{\"data\": {\"value\": 7}}".to_string()))
            })
            .unwrap();

        assert_eq!(response.data.unwrap().value, 7);
    }

    #[test]
    fn test_invalid_token_header() {
        let config = ClientConfig::new("http://localhost:1234").with_token("bad\ntoken");
        let err = Client::new(config).err().expect("expected error");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_parse_graphql_response_success() {
        #[derive(Debug, Deserialize)]
        struct Data {
            value: i64,
        }

        let text = "{\"data\": {\"value\": 9}}".to_string();
        let parsed = parse_graphql_response::<Data>(StatusCode::OK, text).unwrap();
        assert_eq!(parsed.data.unwrap().value, 9);
    }

    #[test]
    fn test_parse_graphql_response_errors_with_bad_status() {
        let text = "{\"data\": null, \"errors\": [{\"message\": \"boom\"}]}".to_string();
        let parsed =
            parse_graphql_response::<Value>(StatusCode::BAD_REQUEST, text).unwrap();
        assert!(parsed.has_errors());
    }

    #[test]
    fn test_parse_graphql_response_http_error() {
        let text = "{\"data\": null}".to_string();
        let err = parse_graphql_response::<Value>(StatusCode::BAD_GATEWAY, text).unwrap_err();
        assert!(matches!(err, Error::Status { status: 502, .. }));

        let err =
            parse_graphql_response::<Value>(StatusCode::UNAUTHORIZED, "nope".to_string())
                .unwrap_err();
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_parse_graphql_response_invalid_json() {
        let err = parse_graphql_response::<Value>(StatusCode::OK, "<html>".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
