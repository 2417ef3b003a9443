// Content Graph - GraphQL Server
// Run with: cargo run --bin server

//! # Content Graph Server Binary
//!
//! Starts the HTTP server over a freshly seeded in-memory store.
//!
//! ```text
//! main()
//!   ↓ loads
//! .env → content-graph.toml → SERVER_* env → CLI flags
//!   ↓ builds
//! GraphQLServerBuilder
//!   ↓ serves
//! GraphQL Schema over InMemoryStorage
//! ```
//!
//! Once running:
//! - Visit http://localhost:3000 for the GraphiQL interface
//! - POST GraphQL requests to http://localhost:3000/graphql
//!
//! `--print-schema` writes the schema SDL to stdout and exits.

use anyhow::Result;
use clap::Parser;
use content_graph::{create_schema, GraphQLServerBuilder, GraphQLServerConfig};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "content-graph-server")]
#[command(about = "Content Graph GraphQL server - users, posts and a createPost mutation")]
#[command(version)]
struct Cli {
    /// Address to bind (overrides SERVER_HOST and the settings file)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides SERVER_PORT and the settings file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the GraphQL schema (SDL) and exit
    #[arg(long)]
    print_schema: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_schema {
        print!("{}", create_schema()?.sdl());
        return Ok(());
    }

    // .env is optional; real deployments set variables directly
    let dotenv_result = dotenv();

    let config = GraphQLServerConfig::load()?;

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(rust_log.as_deref(), cli.verbose, &config.log_level);
    let active_filter = filter.to_string();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = dotenv_result {
        warn!("Could not load .env file: {}", e);
    }

    let mut builder = GraphQLServerBuilder::new().with_config(config);
    if let Some(host) = cli.host {
        builder = builder.with_host(host);
    }
    if let Some(port) = cli.port {
        builder = builder.with_port(port);
    }
    if cli.no_cors {
        builder = builder.with_cors(false);
    }
    let server = builder.build()?;

    info!("🚀 Starting Content Graph Server...");
    info!("Server: {}:{}", server.config().host, server.config().port);
    info!("Log filter: {}", active_filter);

    server.run().await
}

/// RUST_LOG wins if it parses, then --verbose, then the configured level
fn log_filter(rust_log: Option<&str>, verbose: bool, configured: &str) -> EnvFilter {
    if let Some(filter) = rust_log.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        return filter;
    }

    EnvFilter::new(if verbose { "debug" } else { configured })
}
