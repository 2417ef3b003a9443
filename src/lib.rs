// Content Graph - Rust Edition
// A small users-and-posts graph served through GraphQL

//! # Content Graph Library
//!
//! This is the library crate for Content Graph, an in-memory content store
//! (users authoring posts) exposed through a typed GraphQL interface. This file
//! is the **library root** and defines the public API that binaries and tests use.
//!
//! ## Core Components
//!
//! ### Domain Models
//! - [`User`]: An author with a display name and optional avatar
//! - [`Post`]: An authored article with tags and a publication timestamp
//! - [`NewPost`]: The explicit input record for creating a post
//! - [`UserId`] / [`PostId`]: String identifiers for each entity type
//!
//! ### Engine
//! - [`ContentStorage`] / [`InMemoryStorage`]: the entity store, system of record
//!   for both collections and owner of post identifier assignment
//! - [`RelationResolver`]: follows a post's `author` relation
//! - [`QueryEngine`]: read operations (sorted post listing, lookups by id)
//! - [`MutationEngine`]: the single write operation, `create_post`
//! - [`ContentGraphSchema`]: the async-graphql schema wiring it all together
//!
//! ### Server
//! [`GraphQLServer`] serves the schema over HTTP with Axum, including CORS
//! handling and a GraphiQL explorer.
//!
//! ## Request Flow
//!
//! ```text
//! HTTP request
//!   ↓ parsed by
//! Gateway (server::graphql)
//!   ↓ executes against
//! GraphQL schema (engine::graphql)
//!   ↓ dispatches to
//! QueryEngine / MutationEngine ──→ RelationResolver (nested `author`)
//!   ↓ read / append
//! InMemoryStorage
//! ```

// Core domain models
pub mod models;

// Store, resolvers, query/mutation engines and the GraphQL schema
pub mod engine;

// HTTP server exposing the GraphQL schema
pub mod server;

// Re-export core domain types for easy access
pub use models::{NewPost, Post, PostId, User, UserId};

// Re-export engine types for convenience
pub use engine::{
    graphql::{create_schema, create_schema_with_storage, ContentGraphSchema},
    mutation::MutationEngine,
    query::QueryEngine,
    relations::RelationResolver,
    storage::{ContentStorage, InMemoryStorage},
};

// Re-export server types for convenience
pub use server::{GraphQLServer, GraphQLServerBuilder, GraphQLServerConfig};

use thiserror::Error;

/// Custom error types for Content Graph operations
///
/// Lookups by identifier never produce an error: a missing entity is an
/// absence (`Option::None`). Errors are reserved for conditions the caller
/// must be told about.
///
/// ## Rust Learning Notes:
///
/// ### The `thiserror` Crate
/// - `#[derive(Error)]` implements the `std::error::Error` trait
/// - `#[error("...")]` provides the `Display` message
/// - `{field}` in error messages interpolates struct fields
/// - `#[from]` enables automatic conversion with the `?` operator
#[derive(Error, Debug)]
pub enum ContentGraphError {
    /// A relation the schema declares mandatory points at a missing entity
    #[error("Unresolved {relation} relation on post {post_id}: no entity with id {key}")]
    UnresolvedRelation {
        relation: String, // Relation name, e.g. "author"
        post_id: String,  // Post the relation was followed from
        key: String,      // Foreign key that did not resolve
    },

    /// Malformed input, rejected before any store mutation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Settings could not be loaded or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Internal error (poisoned lock, startup I/O)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for ContentGraphError {
    fn from(err: std::io::Error) -> Self {
        ContentGraphError::Internal(err.to_string())
    }
}

/// Type alias for Results that use our custom error type
///
/// Instead of writing `std::result::Result<Post, ContentGraphError>`
/// everywhere, we can just write `Result<Post>`.
pub type Result<T> = std::result::Result<T, ContentGraphError>;
