// Relation resolution - following a post's author reference

//! # Relation Resolver
//!
//! Posts hold their author as a lookup key ([`UserId`](crate::UserId)), not an
//! owned `User`. This module turns that key back into an entity.
//!
//! Two forms are offered:
//! - [`RelationResolver::resolve_author`] reports a dangling key as `None`
//! - [`RelationResolver::require_author`] is for callers that promised a
//!   non-null author (the GraphQL `Post.author: User!` field) and must turn a
//!   dangling key into an error rather than invent a placeholder user

use std::sync::Arc;
use tracing::warn;

use crate::engine::storage::ContentStorage;
use crate::models::{Post, User};
use crate::{ContentGraphError, Result};

#[derive(Clone)]
pub struct RelationResolver {
    storage: Arc<dyn ContentStorage>,
}

impl RelationResolver {
    pub fn new(storage: Arc<dyn ContentStorage>) -> Self {
        Self { storage }
    }

    /// Look up the post's author; `None` if no user has that id
    pub async fn resolve_author(&self, post: &Post) -> Result<Option<User>> {
        self.storage.get_user(&post.author_id).await
    }

    /// Look up the post's author, treating a missing user as an error
    pub async fn require_author(&self, post: &Post) -> Result<User> {
        match self.resolve_author(post).await? {
            Some(user) => Ok(user),
            None => {
                warn!(post_id = %post.id, author_id = %post.author_id, "Post author does not exist");
                Err(ContentGraphError::UnresolvedRelation {
                    relation: "author".to_string(),
                    post_id: post.id.to_string(),
                    key: post.author_id.to_string(),
                })
            }
        }
    }
}
