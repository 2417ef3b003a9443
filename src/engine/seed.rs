// Built-in seed data, loaded into the store at startup

use chrono::{DateTime, Utc};

use crate::models::{Post, PostId, User, UserId};
use crate::{ContentGraphError, Result};

/// The three seeded authors
pub fn users() -> Vec<User> {
    vec![
        User::new("1", "Alice Smith").with_avatar("https://i.pravatar.cc/150?img=1"),
        User::new("2", "Bob Johnson").with_avatar("https://i.pravatar.cc/150?img=2"),
        User::new("3", "Carol Williams").with_avatar("https://i.pravatar.cc/150?img=3"),
    ]
}

/// The three seeded posts, in insertion order (oldest first)
pub fn posts() -> Result<Vec<Post>> {
    Ok(vec![
        Post {
            id: PostId::from("1"),
            title: "Getting Started with GraphQL".to_string(),
            author_id: UserId::from("1"),
            body: "GraphQL is a query language for APIs and a runtime for fulfilling those \
                   queries with your existing data. GraphQL provides a complete and \
                   understandable description of the data in your API."
                .to_string(),
            tags: tags(&["graphql", "api", "tutorial"]),
            published_at: timestamp("2024-01-15T10:00:00Z")?,
        },
        Post {
            id: PostId::from("2"),
            title: "React Best Practices".to_string(),
            author_id: UserId::from("2"),
            body: "Learn the best practices for building React applications. This includes \
                   component composition, state management, and performance optimization \
                   techniques."
                .to_string(),
            tags: tags(&["react", "javascript", "frontend"]),
            published_at: timestamp("2024-02-20T14:30:00Z")?,
        },
        Post {
            id: PostId::from("3"),
            title: "Building Scalable APIs".to_string(),
            author_id: UserId::from("3"),
            body: "Designing and building scalable APIs requires careful consideration of \
                   architecture, caching strategies, and database optimization."
                .to_string(),
            tags: tags(&["api", "backend", "scalability"]),
            published_at: timestamp("2024-03-10T09:15:00Z")?,
        },
    ])
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

fn timestamp(rfc3339: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ContentGraphError::Internal(format!("bad seed timestamp {}: {}", rfc3339, e)))
}
