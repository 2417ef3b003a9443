// Core domain models for Content Graph
// Plain data structures shared by the store, the engines and the schema

//! # Domain Models Module
//!
//! This module contains the two entity types held by the store, their
//! identifier newtypes, and the input records used to create posts.
//!
//! ## Rust Learning Notes:
//!
//! ### Module Organization
//! This `mod.rs` file is the **module root** for the `models` directory.
//! Each `pub mod` declaration pulls in the sibling `.rs` file as a submodule,
//! and the `pub use` statements at the bottom flatten the API so callers can
//! write `models::Post` instead of `models::post::Post`.

// Contains User and UserId - authors, seeded at startup and read-only afterwards
pub mod user;

// Contains Post, PostId and the NewPost/PostDraft input records
pub mod post;

/// Re-export user types
pub use user::{User, UserId};

/// Re-export post types
/// - Post: A stored, fully materialized post
/// - PostId: Store-assigned identifier
/// - NewPost: Caller-supplied input (tags optional)
/// - PostDraft: Validated input ready for the store to stamp and append
pub use post::{NewPost, Post, PostDraft, PostId};
