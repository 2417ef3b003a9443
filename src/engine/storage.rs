// Storage abstraction for the content graph
// This defines the entity store: the system of record for users and posts

//! # Storage Abstraction Layer
//!
//! This module provides the entity store that every other component reads
//! from and the mutation engine appends to.
//!
//! ## Storage Architecture
//!
//! The storage layer follows the **Repository Pattern**:
//! - **ContentStorage trait**: the interface for all store operations
//! - **InMemoryStorage**: the process-lifetime implementation, seeded at startup
//!
//! ## Identifier Assignment
//!
//! The store, not the caller, assigns post identifiers. The counter lives
//! inside the same lock as the post collection, so "take the next id" and
//! "append the post" happen as one step.
//!
//! ## Rust Learning Notes:
//!
//! This file demonstrates:
//! - Async traits with the async-trait crate
//! - Interior mutability behind a single `RwLock`
//! - Turning lock poisoning into a regular error instead of a panic

use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::engine::seed;
use crate::models::{Post, PostDraft, PostId, User, UserId};
use crate::{ContentGraphError, Result};

/// Storage trait for the content graph
///
/// Lookups return `Ok(None)` when nothing matches: absence is not an error.
///
/// ## Return Value
/// `Result<Option<User>>` means:
/// - `Ok(Some(user))`: found it
/// - `Ok(None)`: no user with that id
/// - `Err(error)`: the store itself failed
#[async_trait::async_trait]
pub trait ContentStorage: Send + Sync {
    /// List all users. No ordering contract.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Get a user by exact identifier
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// List all posts in insertion order
    ///
    /// This is store order, not the order exposed to API callers; see
    /// `QueryEngine::list_posts_sorted`.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Get a post by exact identifier
    async fn get_post(&self, id: &PostId) -> Result<Option<Post>>;

    /// Store a new post
    ///
    /// Assigns the next identifier (strictly greater than every identifier
    /// assigned before it), stamps the current instant as `published_at`,
    /// appends the post and returns the stored entity. Two concurrent calls
    /// never receive the same identifier.
    async fn insert_post(&self, draft: PostDraft) -> Result<Post>;
}

/// Everything guarded by the store's lock
#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    posts: Vec<Post>,
    next_post_id: u64,
}

/// In-memory entity store
///
/// ## Limitations
///
/// - **Not persistent**: data is lost when the process exits; the seed data
///   is rebuilt identically on the next start
/// - **Append-only**: there is no update or delete
///
/// ## Thread Safety
///
/// A single `std::sync::RwLock` covers both collections and the counter:
/// - Reads share the lock and clone out a consistent snapshot
/// - `insert_post` takes the write lock for increment-assign-append
///
/// No lock is ever held across an `.await`, so a blocking lock is fine here.
#[derive(Debug)]
pub struct InMemoryStorage {
    state: RwLock<StoreState>,
}

impl InMemoryStorage {
    /// Create an empty store. The first post gets identifier `1`.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                next_post_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Create a store holding the built-in seed users and posts
    pub fn seeded() -> Result<Self> {
        Self::from_records(seed::users(), seed::posts()?)
    }

    /// Create a store from existing records
    ///
    /// The post counter starts one past the largest numeric post identifier
    /// present, so assigned identifiers never collide with seeded ones.
    /// Fails if that identifier is already `u64::MAX`.
    pub fn from_records(users: Vec<User>, posts: Vec<Post>) -> Result<Self> {
        let next_post_id = match posts.iter().filter_map(|post| post.id.sequence()).max() {
            Some(max) => max.checked_add(1).ok_or_else(counter_exhausted)?,
            None => 1,
        };

        Ok(Self {
            state: RwLock::new(StoreState {
                users,
                posts,
                next_post_id,
            }),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| ContentGraphError::Internal("content store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| ContentGraphError::Internal("content store lock poisoned".to_string()))
    }
}

fn counter_exhausted() -> ContentGraphError {
    ContentGraphError::Internal("post identifier space exhausted".to_string())
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ContentStorage for InMemoryStorage {
    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.read()?.users.clone())
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        let state = self.read()?;

        // .cloned() is equivalent to .map(|u| u.clone())
        Ok(state.users.iter().find(|user| &user.id == id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.read()?.posts.clone())
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>> {
        let state = self.read()?;
        Ok(state.posts.iter().find(|post| &post.id == id).cloned())
    }

    async fn insert_post(&self, draft: PostDraft) -> Result<Post> {
        let mut state = self.write()?;

        // Checked before the push so a failed insert never hands out an id
        let sequence = state.next_post_id;
        state.next_post_id = sequence.checked_add(1).ok_or_else(counter_exhausted)?;

        let post = Post::from_draft(PostId::from_sequence(sequence), draft, Utc::now());
        state.posts.push(post.clone());

        debug!(post_id = %post.id, total_posts = state.posts.len(), "Stored post");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewPost;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn draft(title: &str, author: &str) -> PostDraft {
        NewPost::new(title, "body", author).into_draft().unwrap()
    }

    #[tokio::test]
    async fn test_seeded_store_contents() {
        let storage = InMemoryStorage::seeded().unwrap();

        assert_eq!(storage.list_users().await.unwrap().len(), 3);
        assert_eq!(storage.list_posts().await.unwrap().len(), 3);

        let bob = storage.get_user(&UserId::from("2")).await.unwrap().unwrap();
        assert_eq!(bob.name, "Bob Johnson");
        assert!(storage.get_user(&UserId::from("99")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_posts_keeps_insertion_order() {
        let storage = InMemoryStorage::seeded().unwrap();
        storage.insert_post(draft("fourth", "1")).await.unwrap();

        let ids: Vec<String> = storage
            .list_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.0)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_insert_assigns_next_id_and_timestamp() {
        let storage = InMemoryStorage::seeded().unwrap();
        let before = Utc::now();

        let post = storage.insert_post(draft("new", "3")).await.unwrap();

        assert_eq!(post.id.as_str(), "4");
        assert!(post.published_at >= before);
        assert_eq!(storage.get_post(&post.id).await.unwrap(), Some(post));
    }

    #[tokio::test]
    async fn test_empty_store_starts_at_one() {
        let storage = InMemoryStorage::new();

        let first = storage.insert_post(draft("a", "1")).await.unwrap();
        let second = storage.insert_post(draft("b", "1")).await.unwrap();

        assert_eq!(first.id.as_str(), "1");
        assert_eq!(second.id.as_str(), "2");
    }

    #[tokio::test]
    async fn test_from_records_skips_past_largest_id() {
        let seeded = InMemoryStorage::seeded().unwrap();
        let mut posts = seeded.list_posts().await.unwrap();
        posts[0].id = PostId::from("41");
        posts[1].id = PostId::from("legacy-slug");

        let storage = InMemoryStorage::from_records(vec![], posts).unwrap();
        let post = storage.insert_post(draft("next", "1")).await.unwrap();

        assert_eq!(post.id.as_str(), "42");
    }

    #[tokio::test]
    async fn test_from_records_rejects_exhausted_id_space() {
        let seeded = InMemoryStorage::seeded().unwrap();
        let mut posts = seeded.list_posts().await.unwrap();
        posts[0].id = PostId::from(u64::MAX.to_string());

        let err = InMemoryStorage::from_records(vec![], posts).unwrap_err();
        assert!(matches!(err, ContentGraphError::Internal(_)));
    }

    #[tokio::test]
    async fn test_insert_fails_at_last_id_without_storing() {
        let seeded = InMemoryStorage::seeded().unwrap();
        let mut posts = seeded.list_posts().await.unwrap();
        posts[0].id = PostId::from((u64::MAX - 1).to_string());
        let storage = InMemoryStorage::from_records(vec![], posts).unwrap();

        let err = storage.insert_post(draft("last", "1")).await.unwrap_err();
        assert!(matches!(err, ContentGraphError::Internal(_)));
        assert_eq!(storage.list_posts().await.unwrap().len(), 3);

        // The counter did not wrap: the next attempt fails the same way
        assert!(storage.insert_post(draft("again", "1")).await.is_err());
    }

    #[tokio::test]
    async fn test_insert_does_not_check_author() {
        let storage = InMemoryStorage::seeded().unwrap();

        let post = storage.insert_post(draft("orphan", "404")).await.unwrap();
        assert_eq!(post.author_id.as_str(), "404");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_get_distinct_ids() {
        let storage = Arc::new(InMemoryStorage::seeded().unwrap());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let storage = storage.clone();
                tokio::spawn(async move {
                    storage
                        .insert_post(draft(&format!("post {}", i), "1"))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            let post = handle.await.unwrap();
            assert!(ids.insert(post.id.sequence().unwrap()));
        }

        assert_eq!(ids.len(), 64);
        assert_eq!(ids.iter().min(), Some(&4));
        assert_eq!(ids.iter().max(), Some(&67));
    }
}
