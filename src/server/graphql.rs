// GraphQL server implementation for Content Graph
// This serves the schema over HTTP with a seeded in-memory store

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router, Server,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::lookup_host;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::engine::graphql::{create_schema_with_storage, ContentGraphSchema};
use crate::engine::storage::{ContentStorage, InMemoryStorage};

/// Settings file looked up in the working directory; optional
pub const CONFIG_FILE: &str = "content-graph.toml";

/// GraphQL server configuration
///
/// Loaded in layers, later layers winning:
/// 1. built-in defaults
/// 2. `content-graph.toml`, if present
/// 3. `SERVER_*` environment variables (`SERVER_PORT`, `SERVER_HOST`, ...)
#[derive(Clone, Debug, Deserialize)]
pub struct GraphQLServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for GraphQLServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_enabled: true,
            log_level: "info".to_string(),
        }
    }
}

impl GraphQLServerConfig {
    /// Load settings from `content-graph.toml` and the environment
    pub fn load() -> crate::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load settings using `path` as the optional settings file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("cors_enabled", defaults.cors_enabled)?
            .set_default("log_level", defaults.log_level)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("SERVER").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Resolve `host:port` to a bind address; `host` may be a hostname
    pub async fn socket_addr(&self) -> crate::Result<SocketAddr> {
        let mut addrs = lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| listen_address_error(&self.host, e))?;

        addrs
            .next()
            .ok_or_else(|| listen_address_error(&self.host, "no addresses found"))
    }
}

fn listen_address_error(host: &str, reason: impl std::fmt::Display) -> crate::ContentGraphError {
    crate::ContentGraphError::Internal(format!("cannot resolve listen address {}: {}", host, reason))
}

/// GraphQL server
pub struct GraphQLServer {
    config: GraphQLServerConfig,
    storage: Arc<dyn ContentStorage>,
}

impl GraphQLServer {
    pub fn new(storage: Arc<dyn ContentStorage>) -> Self {
        Self {
            config: GraphQLServerConfig::default(),
            storage,
        }
    }

    pub fn with_config(mut self, config: GraphQLServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GraphQLServerConfig {
        &self.config
    }

    /// Build the Axum router for this server's store and settings
    pub fn router(&self) -> Router {
        let schema = create_schema_with_storage(self.storage.clone());
        create_router(schema, self.config.cors_enabled)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr().await?;
        let app = self.router();

        info!("🚀 GraphQL server running on http://{}", addr);
        info!("📊 GraphiQL interface: http://{}/", addr);
        info!("🔗 GraphQL endpoint: http://{}/graphql", addr);
        info!("CORS enabled: {}", self.config.cors_enabled);

        Server::bind(&addr)
            .serve(app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

/// Builder used by the server binary
pub struct GraphQLServerBuilder {
    config: GraphQLServerConfig,
    storage: Option<Arc<dyn ContentStorage>>,
}

impl GraphQLServerBuilder {
    pub fn new() -> Self {
        Self {
            config: GraphQLServerConfig::default(),
            storage: None,
        }
    }

    pub fn with_config(mut self, config: GraphQLServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn ContentStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.config.cors_enabled = enabled;
        self
    }

    /// Finish the server, seeding a fresh in-memory store if none was given
    pub fn build(self) -> crate::Result<GraphQLServer> {
        let storage = match self.storage {
            Some(storage) => storage,
            None => Arc::new(InMemoryStorage::seeded()?),
        };
        Ok(GraphQLServer::new(storage).with_config(self.config))
    }
}

impl Default for GraphQLServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes:
/// - `GET /` GraphiQL, `POST /` GraphQL
/// - `GET|POST /graphql` GraphQL
/// - `GET /health`
pub fn create_router(schema: ContentGraphSchema, cors_enabled: bool) -> Router {
    let app = Router::new()
        .route(
            "/",
            get(graphiql).post(graphql_handler).fallback(unsupported_method),
        )
        .route(
            "/graphql",
            get(graphql_handler)
                .post(graphql_handler)
                .fallback(unsupported_method),
        )
        .route("/health", get(health_check))
        .with_state(schema)
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        app.layer(cors_layer())
    } else {
        app
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// GraphQL handler
async fn graphql_handler(
    State(schema): State<ContentGraphSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

// GraphiQL interface
async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

// Preflight without CORS still succeeds; every other method is refused
async fn unsupported_method(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}

// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Content Graph GraphQL Server is running!")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
