//! generated graphql client, do not edit

pub mod api_client;
pub mod object;

pub use api_client::ApiClient;
