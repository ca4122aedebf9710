//! generate a typed graphql client from a live service or a saved schema
//!
//! the output is either a standalone crate (`--crate-name`) or a module tree
//! to drop into an existing crate (`--namespace crate::api`).

use clap::Parser;
use reqwest::header::{HeaderName, HeaderValue};
use std::fs;
use std::path::PathBuf;
use synthql::{Client, ClientConfig, GeneratorConfig, Introspector, Schema};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// introspect a graphql service and write a typed rust client for it
#[derive(Parser, Debug)]
#[command(name = "synthql-codegen", version)]
struct Args {
    /// graphql endpoint to introspect
    #[arg(long, required_unless_present = "schema", conflicts_with = "schema")]
    url: Option<String>,

    /// bearer token sent with every introspection request
    #[arg(long)]
    token: Option<String>,

    /// extra request header as NAME:VALUE, may be repeated
    #[arg(long = "header", value_name = "NAME:VALUE")]
    headers: Vec<String>,

    /// schema snapshot written by --dump-schema, used instead of --url
    #[arg(long)]
    schema: Option<PathBuf>,

    /// also write the introspected schema snapshot to this file
    #[arg(long)]
    dump_schema: Option<PathBuf>,

    /// output directory
    #[arg(long)]
    out: PathBuf,

    /// module path the generated code is rooted at
    #[arg(long, default_value = "crate")]
    namespace: String,

    /// emit a Cargo.toml for a standalone crate with this name
    #[arg(long)]
    crate_name: Option<String>,

    /// path generated code uses to reach the runtime
    #[arg(long, default_value = "synthql")]
    runtime_path: String,

    /// dependency spec for the runtime in the emitted Cargo.toml
    #[arg(long)]
    runtime_dependency: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let schema = match load_schema(&args) {
        Ok(schema) => schema,
        Err(err) => {
            eprintln!("failed to load schema: {err}");
            std::process::exit(1);
        }
    };

    if let Some(path) = &args.dump_schema {
        if let Err(err) = dump_schema(&schema, path) {
            eprintln!("failed to write schema snapshot: {err}");
            std::process::exit(1);
        }
    }

    if let Err(err) = generate(&args, &schema) {
        eprintln!("codegen failed: {err}");
        std::process::exit(1);
    }
}

fn generator_config(args: &Args) -> GeneratorConfig {
    let mut config = GeneratorConfig::new()
        .with_namespace(args.namespace.clone())
        .with_runtime_path(args.runtime_path.clone());
    if let Some(name) = &args.crate_name {
        config = config.with_crate_name(name.clone());
    }
    if let Some(spec) = &args.runtime_dependency {
        config = config.with_runtime_dependency(spec.clone());
    }
    config
}

fn client_config(args: &Args, url: &str) -> Result<ClientConfig, String> {
    let mut config = ClientConfig::new(url);
    if let Some(token) = &args.token {
        config = config.with_token(token.clone());
    }
    for header in &args.headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| format!("header `{header}` is not NAME:VALUE"))?;
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|err| format!("invalid header name `{name}`: {err}"))?;
        let value = HeaderValue::from_str(value.trim())
            .map_err(|err| format!("invalid value for header `{name}`: {err}"))?;
        config = config.with_header(name, value);
    }
    Ok(config)
}

fn load_schema(args: &Args) -> Result<Schema, String> {
    if let Some(path) = &args.schema {
        let text = fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
        return serde_json::from_str(&text)
            .map_err(|err| format!("failed to parse {}: {err}", path.display()));
    }

    let url = args
        .url
        .as_deref()
        .ok_or_else(|| "--url is required when --schema not provided".to_string())?;
    let client = Client::new(client_config(args, url)?).map_err(|err| err.to_string())?;
    info!(url, "introspecting");
    Introspector::new(&client)
        .schema()
        .map_err(|err| err.to_string())
}

fn dump_schema(schema: &Schema, path: &PathBuf) -> Result<(), String> {
    let text = serde_json::to_string_pretty(schema).map_err(|err| err.to_string())?;
    fs::write(path, text).map_err(|err| format!("{}: {err}", path.display()))?;
    info!(path = %path.display(), "schema snapshot written");
    Ok(())
}

fn generate(args: &Args, schema: &Schema) -> Result<(), String> {
    let config = generator_config(args);
    let sources = synthql::generate_sources(&config, schema).map_err(|err| err.to_string())?;
    sources.write_to(&args.out).map_err(|err| err.to_string())?;
    info!(files = sources.len(), out = %args.out.display(), "client generated");
    Ok(())
}
