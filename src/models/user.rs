// User domain model - the authors of posts

//! # User Model
//!
//! A `User` is created once when the store is seeded and never changes
//! afterwards. Posts refer to users through [`UserId`], a lookup key rather
//! than an ownership relation.

use serde::{Deserialize, Serialize};

/// **User identifier** - the key posts use to reference their author
///
/// A simple string wrapper, so any string can be an identifier and the type
/// system still keeps user ids apart from post ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Get the identifier as a string slice
    ///
    /// ```rust
    /// # use content_graph::UserId;
    /// let id = UserId::from("2");
    /// assert_eq!(id.as_str(), "2");
    /// ```
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        UserId(s)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An author in the content graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique, immutable identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Optional avatar image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    /// Create a user without an avatar
    pub fn new<I: Into<UserId>, N: Into<String>>(id: I, name: N) -> Self {
        User {
            id: id.into(),
            name: name.into(),
            avatar_url: None,
        }
    }

    /// Builder-style setter for the avatar URL
    pub fn with_avatar<S: Into<String>>(mut self, url: S) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}
