// Post domain model - authored articles with tags and a publication time

//! # Post Models
//!
//! This module defines:
//! - `Post`: a stored post, as returned by the store
//! - `PostId`: the store-assigned identifier
//! - `NewPost`: what a caller supplies to create a post
//! - `PostDraft`: a validated `NewPost`, ready for the store to stamp with an
//!   identifier and timestamp
//!
//! ## Rust Learning Notes:
//!
//! ### Making Invalid States Unrepresentable
//! `NewPost` keeps `tags` as `Option<Vec<String>>` because callers may leave
//! it out. `PostDraft` has a plain `Vec<String>`: by the time the store sees
//! a draft, the default has been applied and required fields checked. The
//! only way to get a `PostDraft` from caller input is `NewPost::into_draft`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;
use crate::{ContentGraphError, Result};

/// **Post identifier** - assigned by the store, never by callers
///
/// Rendered as the decimal form of the store's post counter, so identifiers
/// created by one store are strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub String);

impl PostId {
    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier for the `n`th post assigned by a store
    ///
    /// ```rust
    /// # use content_graph::PostId;
    /// assert_eq!(PostId::from_sequence(4).as_str(), "4");
    /// ```
    pub fn from_sequence(n: u64) -> Self {
        PostId(n.to_string())
    }

    /// The counter value this identifier was built from, if it is numeric
    pub fn sequence(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        PostId(s.to_string())
    }
}

impl From<String> for PostId {
    fn from(s: String) -> Self {
        PostId(s)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored post
///
/// Posts are append-only: once the store returns one, none of its fields
/// change for the rest of the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned identifier
    pub id: PostId,

    pub title: String,

    pub body: String,

    /// Tags in the order they were supplied
    pub tags: Vec<String>,

    /// Lookup key for the author; not checked against the user collection
    pub author_id: UserId,

    /// When the store accepted the post (UTC, RFC 3339 on the wire)
    pub published_at: DateTime<Utc>,
}

impl Post {
    /// Materialize a draft with the identifier and timestamp chosen by the store
    pub fn from_draft(id: PostId, draft: PostDraft, published_at: DateTime<Utc>) -> Self {
        Post {
            id,
            title: draft.title,
            body: draft.body,
            tags: draft.tags,
            author_id: draft.author_id,
            published_at,
        }
    }
}

/// Caller input for creating a post
///
/// Mirrors the `CreatePostInput` GraphQL input: `tags` may be omitted,
/// everything else is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    pub author_id: UserId,
}

impl NewPost {
    pub fn new<T, B, A>(title: T, body: B, author_id: A) -> Self
    where
        T: Into<String>,
        B: Into<String>,
        A: Into<UserId>,
    {
        NewPost {
            title: title.into(),
            body: body.into(),
            tags: None,
            author_id: author_id.into(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Check required fields and apply defaults
    ///
    /// Title, body and author id must be non-empty. Absent tags become an
    /// empty list. The author id is NOT checked against the user collection.
    pub fn into_draft(self) -> Result<PostDraft> {
        if self.title.is_empty() {
            return Err(ContentGraphError::InvalidInput(
                "title must not be empty".to_string(),
            ));
        }
        if self.body.is_empty() {
            return Err(ContentGraphError::InvalidInput(
                "body must not be empty".to_string(),
            ));
        }
        if self.author_id.as_str().is_empty() {
            return Err(ContentGraphError::InvalidInput(
                "authorId must not be empty".to_string(),
            ));
        }

        Ok(PostDraft {
            title: self.title,
            body: self.body,
            tags: self.tags.unwrap_or_default(),
            author_id: self.author_id,
        })
    }
}

/// Validated post input, waiting for an identifier and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub author_id: UserId,
}
