//! base api client
//!
//! generated `ApiClient` types wrap a [`BaseApiClient`] and call
//! [`BaseApiClient::request`] once per method call.

use super::selection::Selection;
use super::value::{kind_of, Lower};
use crate::error::{Error, Result};
use crate::graphql::GraphQlResponse;
use crate::transport::Transport;
use serde_json::{Map, Value};
use tracing::debug;

/// one round trip per request, no batching or caching
#[derive(Debug, Clone)]
pub struct BaseApiClient<T> {
    transport: T,
}

impl<T: Transport> BaseApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// run an operation and return its `data` map
    pub fn query(
        &self,
        operation: &str,
        variables: Map<String, Value>,
    ) -> Result<Map<String, Value>> {
        let variables = Value::Object(variables);
        debug!(%operation, "graphql request");
        let response = self.transport.query(operation, &variables)?;
        expect_data(response)
    }

    /// run an operation and unwrap the top-level `root` field
    pub fn request(
        &self,
        operation: &str,
        variables: Map<String, Value>,
        root: &str,
    ) -> Result<Value> {
        let data = self.query(operation, variables)?;
        take_root(data, root)
    }
}

/// the usual `paging { total page pages limit }` block of paginated lists
pub fn paging() -> Selection {
    Selection::new().nested(
        "paging",
        Selection::new().fields(["total", "page", "pages", "limit"]),
    )
}

/// `data` of a response, or the request error it carries
pub fn expect_data(response: GraphQlResponse<Value>) -> Result<Map<String, Value>> {
    if response.has_errors() {
        return Err(Error::request(response.errors));
    }
    match response.data {
        Some(Value::Object(data)) => Ok(data),
        None | Some(Value::Null) => Err(Error::Decode(
            "response carried neither data nor errors".to_string(),
        )),
        Some(other) => Err(Error::Decode(format!(
            "expected `data` to be an object, got {}",
            kind_of(&other)
        ))),
    }
}

/// the value of the top-level field named `root`; `null` is kept
pub fn take_root(mut data: Map<String, Value>, root: &str) -> Result<Value> {
    data.remove(root)
        .ok_or_else(|| Error::Decode(format!("response has no `{root}` field")))
}

/// bind a lowered argument as a variable; absent values are left out
pub fn set_variable(variables: &mut Map<String, Value>, name: &str, value: &impl Lower) {
    match value.lower() {
        Value::Null => {}
        lowered => {
            variables.insert(name.to_string(), lowered);
        }
    }
}

/// full operation text, e.g. `query user($id: ID!) { user(id: $id) { id } }`
pub fn operation_text(header: &str, field_call: &str, fields: &Selection) -> String {
    if fields.is_empty() {
        format!("{header} {{ {field_call} }}")
    } else {
        format!("{header} {{ {field_call} {} }}", fields.block())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::GraphQlError;
    use crate::testing::respond;
    use serde_json::json;
    use std::cell::RefCell;

    #[test]
    fn test_request_unwraps_root() {
        let transport = |operation: &str, variables: &Value| {
            assert_eq!(
                operation,
                "query user($id: ID!) { user(id: $id) { id name } }"
            );
            assert_eq!(variables, &json!({"id": "7"}));
            respond(json!({"user": {"id": "7", "name": "ada"}}))
        };
        let client = BaseApiClient::new(transport);

        let mut variables = Map::new();
        set_variable(&mut variables, "id", &"7".to_string());
        set_variable(&mut variables, "role", &Option::<String>::None);
        let operation = operation_text(
            "query user($id: ID!)",
            "user(id: $id)",
            &Selection::new().fields(["id", "name"]),
        );

        let user = client.request(&operation, variables, "user").unwrap();
        assert_eq!(user["name"], "ada");
    }

    #[test]
    fn test_request_error_keeps_every_entry() {
        let transport = |_: &str, _: &Value| -> Result<GraphQlResponse<Value>> {
            Ok(GraphQlResponse {
                data: None,
                errors: vec![GraphQlError::new("x"), GraphQlError::new("y")],
            })
        };
        let err = BaseApiClient::new(transport)
            .request("query { a }", Map::new(), "a")
            .unwrap_err();
        assert_eq!(err.graphql_errors().len(), 2);
        assert!(matches!(
            err,
            Error::Request { message, .. } if message == "x"
        ));
    }

    #[test]
    fn test_null_root_is_kept() {
        let client = BaseApiClient::new(|_: &str, _: &Value| respond(json!({"user": null})));
        assert_eq!(
            client
                .request("query { user { id } }", Map::new(), "user")
                .unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_missing_root() {
        let client = BaseApiClient::new(|_: &str, _: &Value| respond(json!({})));
        let err = client
            .request("query { user { id } }", Map::new(), "user")
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_one_round_trip_per_request() {
        let calls = RefCell::new(0);
        let transport = |_: &str, _: &Value| {
            *calls.borrow_mut() += 1;
            respond(json!({"version": "1.0"}))
        };
        let client = BaseApiClient::new(&transport);
        client
            .request("query { version }", Map::new(), "version")
            .unwrap();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_operation_text_without_selection() {
        assert_eq!(
            operation_text("query version", "version", &Selection::new()),
            "query version { version }"
        );
    }

    #[test]
    fn test_paging_block() {
        assert_eq!(paging().render(), "paging{total page pages limit}");
    }
}
