// Mutation engine - the single write operation

use std::sync::Arc;
use tracing::info;

use crate::engine::storage::ContentStorage;
use crate::models::{NewPost, Post};
use crate::Result;

/// Write operations over the entity store
///
/// There is exactly one: [`create_post`](MutationEngine::create_post).
#[derive(Clone)]
pub struct MutationEngine {
    storage: Arc<dyn ContentStorage>,
}

impl MutationEngine {
    pub fn new(storage: Arc<dyn ContentStorage>) -> Self {
        Self { storage }
    }

    /// Create a post
    ///
    /// Input is validated before the store is touched, so a rejected request
    /// never consumes an identifier. The store assigns the identifier and the
    /// publication timestamp. `author_id` is stored as given, whether or not
    /// a user with that id exists.
    pub async fn create_post(&self, input: NewPost) -> Result<Post> {
        let draft = input.into_draft()?;
        let post = self.storage.insert_post(draft).await?;

        info!(
            post_id = %post.id,
            author_id = %post.author_id,
            tags = post.tags.len(),
            "Created post"
        );
        Ok(post)
    }
}
