//! typed graphql clients from live schema introspection
//!
//! this crate introspects a graphql service through a [`Transport`] and
//! synthesizes a typed client for it: one request method per root query and
//! mutation field, a struct per object type, an enum per union, interface,
//! and enum type, and a struct per input type. generated code depends on
//! the [`runtime`] module of this crate only.
//!
//! ## quick start
//!
//! ```no_run
//! use synthql::{Client, ClientConfig, GeneratorConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::new("https://api.example.com/graphql").with_token("token"))?;
//! let sources = synthql::run(&client, &GeneratorConfig::new().with_crate_name("example-client"))?;
//! sources.write_to("example-client")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## using a generated client
//!
//! every request method takes a [`runtime::Selection`] naming the response
//! fields to fetch. fields left out of the selection read back as
//! [`Error::FieldNotSelected`].
//!
//! ```ignore
//! use example_client::ApiClient;
//! use synthql::runtime::Selection;
//!
//! let api = ApiClient::new(client);
//! let user = api.user(&Selection::new().fields(["id", "name"]), "1".to_string())?;
//! println!("{:?}", user.map(|user| user.name().map(str::to_string)));
//! ```

pub mod classmap;
mod client;
mod config;
pub mod convert;
pub mod emit;
mod error;
mod graphql;
pub mod introspection;
pub mod naming;
pub mod resolve;
pub mod runtime;
pub mod synth;
mod transport;

pub use client::Client;
pub use config::{ClientConfig, GeneratorConfig};
pub use emit::{Emitter, RustEmitter, SourceTree};
pub use error::{Error, Result};
pub use graphql::{GraphQlError, GraphQlLocation, GraphQlResponse};
pub use introspection::{Introspector, Schema};
pub use synth::{generate, generate_sources, run, Artifact, ArtifactPath, Definition};
pub use transport::Transport;
