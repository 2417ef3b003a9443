// Content Graph Engine
// The entity store and everything that resolves requests against it

//! # Content Graph Engine Module
//!
//! This module holds the core of the system: the entity store and the
//! components that resolve reads, writes and relations against it.
//!
//! ## Engine Components
//!
//! Listed leaves first, in dependency order:
//!
//! ### Storage (`storage` module)
//! - `ContentStorage` trait and the `InMemoryStorage` implementation
//! - Sole owner of the user and post collections
//! - Assigns post identifiers under a single write lock
//!
//! ### Seed data (`seed` module)
//! - The users and posts every process starts with
//!
//! ### Relation Resolver (`relations` module)
//! - Follows `Post.author_id` to a `User`
//! - Distinguishes "absent" from "mandatory but missing"
//!
//! ### Query Engine (`query` module)
//! - Posts newest first, post by id, user by id
//!
//! ### Mutation Engine (`mutation` module)
//! - `create_post`: validate, then let the store stamp and append
//!
//! ### GraphQL (`graphql` module)
//! - Schema roots, object and input types
//! - Maps engine errors to GraphQL error extensions
//!
//! ## Rust Learning Notes:
//!
//! ### Shared Ownership with `Arc<dyn Trait>`
//! Every engine holds an `Arc<dyn ContentStorage>`. `Arc` lets several
//! owners share one store across tasks; `dyn ContentStorage` lets a test or
//! a future backend swap the implementation without touching the engines.

pub mod storage;

pub mod seed;

pub mod relations;

pub mod query;

pub mod mutation;

pub mod graphql;

pub use graphql::{
    create_schema, create_schema_with_storage, ContentGraphSchema, CreatePostInput, PostGQL,
    UserGQL,
};
pub use mutation::MutationEngine;
pub use query::QueryEngine;
pub use relations::RelationResolver;
pub use storage::{ContentStorage, InMemoryStorage};
