// Content Graph Server Implementations
// HTTP transport for the GraphQL schema

//! # Content Graph Server Module
//!
//! The server layer is the request gateway: it accepts HTTP requests, applies
//! the CORS and method policy, hands the GraphQL operation to the schema and
//! serializes whatever the engines resolved.
//!
//! ## Server Architecture
//!
//! ```text
//! Client
//!        ↓ HTTP/GraphQL
//! Server Layer (this module) ← Axum router, CORS, GraphiQL, health check
//!        ↓ Function calls
//! Engine Layer ← GraphQL schema, query/mutation engines, relation resolver
//!        ↓ Function calls
//! Entity Store ← users and posts, post id assignment
//! ```

/// GraphQL HTTP server implementation
///
/// Contains:
/// - Axum-based HTTP server and router
/// - Layered configuration loading
/// - CORS and tracing middleware
/// - Builder pattern for server setup
pub mod graphql;


/// Re-export GraphQL server types
pub use graphql::{create_router, GraphQLServer, GraphQLServerBuilder, GraphQLServerConfig};
