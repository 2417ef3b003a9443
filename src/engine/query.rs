// Query engine - the read-only operations

use std::sync::Arc;
use tracing::debug;

use crate::engine::storage::ContentStorage;
use crate::models::{Post, PostId, User, UserId};
use crate::Result;

/// Read operations over the entity store
///
/// Every method is a pure read: nothing here touches store order or state,
/// so any number of queries may run at the same time.
#[derive(Clone)]
pub struct QueryEngine {
    storage: Arc<dyn ContentStorage>,
}

impl QueryEngine {
    pub fn new(storage: Arc<dyn ContentStorage>) -> Self {
        Self { storage }
    }

    /// All posts, newest first
    ///
    /// Sorted descending by `published_at`. `sort_by` is a stable sort, so
    /// posts sharing a timestamp keep their store insertion order and repeated
    /// calls return the same sequence. The store's own order is untouched;
    /// we sort a fresh copy.
    pub async fn list_posts_sorted(&self) -> Result<Vec<Post>> {
        let mut posts = self.storage.list_posts().await?;
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        debug!(count = posts.len(), "Listed posts");
        Ok(posts)
    }

    pub async fn get_post_by_id(&self, id: &PostId) -> Result<Option<Post>> {
        let post = self.storage.get_post(id).await?;
        debug!(post_id = %id, found = post.is_some(), "Looked up post");
        Ok(post)
    }

    pub async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>> {
        let user = self.storage.get_user(id).await?;
        debug!(user_id = %id, found = user.is_some(), "Looked up user");
        Ok(user)
    }
}
