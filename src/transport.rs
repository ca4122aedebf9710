//! transport boundary
//!
//! the generator and generated clients only ever talk to a graphql service
//! through [`Transport`]. connection details (tls, auth, retries) belong to
//! the implementation.

use crate::error::Result;
use crate::graphql::GraphQlResponse;
use serde_json::Value;

/// blocking graphql transport
pub trait Transport {
    /// send one operation with its variables and return the raw response.
    ///
    /// graphql-level errors are returned inside the response, not as `Err`.
    fn query(&self, operation: &str, variables: &Value) -> Result<GraphQlResponse<Value>>;
}

impl<F> Transport for F
where
    F: Fn(&str, &Value) -> Result<GraphQlResponse<Value>>,
{
    fn query(&self, operation: &str, variables: &Value) -> Result<GraphQlResponse<Value>> {
        self(operation, variables)
    }
}
