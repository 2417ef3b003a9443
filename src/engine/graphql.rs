// GraphQL API for the Content Graph engine
// This is the schema contract shared by the HTTP gateway and the engines

use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, InputObject, Object, Schema, SimpleObject, ID,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::engine::mutation::MutationEngine;
use crate::engine::query::QueryEngine;
use crate::engine::relations::RelationResolver;
use crate::engine::storage::{ContentStorage, InMemoryStorage};
use crate::models::{NewPost, Post, PostId, User, UserId};
use crate::ContentGraphError;

// GraphQL types - these are the API representations of our domain models

#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "User")]
pub struct UserGQL {
    pub id: ID,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// GraphQL view of a stored post
///
/// Scalar fields read straight from the wrapped `Post`. `author` is a relation
/// and only touches the store when a request actually selects it.
#[derive(Debug, Clone)]
pub struct PostGQL(pub Post);

#[Object(name = "Post")]
impl PostGQL {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn title(&self) -> String {
        self.0.title.clone()
    }

    /// The post's author. Declared non-null: a post whose author id matches
    /// no user fails here instead of returning a placeholder.
    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<UserGQL> {
        let resolver = ctx.data::<RelationResolver>()?;
        resolver
            .require_author(&self.0)
            .await
            .map(|user| UserGQL::from(&user))
            .map_err(|e| e.extend())
    }

    async fn body(&self) -> String {
        self.0.body.clone()
    }

    async fn tags(&self) -> Vec<String> {
        self.0.tags.clone()
    }

    async fn published_at(&self) -> DateTime<Utc> {
        self.0.published_at
    }
}

// Input types for mutations
#[derive(InputObject, Debug)]
pub struct CreatePostInput {
    pub title: String,
    pub body: String,
    pub tags: Option<Vec<String>>,
    pub author_id: ID,
}

// Conversion functions between domain models and GraphQL types
impl From<&User> for UserGQL {
    fn from(user: &User) -> Self {
        UserGQL {
            id: ID(user.id.to_string()),
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

impl From<Post> for PostGQL {
    fn from(post: Post) -> Self {
        PostGQL(post)
    }
}

impl From<CreatePostInput> for NewPost {
    fn from(input: CreatePostInput) -> Self {
        NewPost {
            title: input.title,
            body: input.body,
            tags: input.tags,
            author_id: UserId::from(input.author_id.0),
        }
    }
}

/// Error codes surfaced under `extensions.code` in GraphQL responses
impl ErrorExtensions for ContentGraphError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| match self {
            ContentGraphError::UnresolvedRelation { relation, key, .. } => {
                e.set("code", "UNRESOLVED_RELATION");
                e.set("relation", relation.as_str());
                e.set("key", key.as_str());
            }
            ContentGraphError::InvalidInput(_) => e.set("code", "BAD_USER_INPUT"),
            ContentGraphError::Config(_) | ContentGraphError::Internal(_) => {
                e.set("code", "INTERNAL")
            }
        })
    }
}

// GraphQL Query root
pub struct Query;

#[Object]
impl Query {
    /// All posts, newest first
    async fn posts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<PostGQL>> {
        let engine = ctx.data::<QueryEngine>()?;
        let posts = engine.list_posts_sorted().await.map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(PostGQL::from).collect())
    }

    /// Get a post by ID
    async fn post(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<PostGQL>> {
        let engine = ctx.data::<QueryEngine>()?;
        match engine.get_post_by_id(&PostId::from(id.0)).await {
            Ok(post) => Ok(post.map(PostGQL::from)),
            Err(e) => Err(e.extend()),
        }
    }

    /// Get a user by ID
    async fn user(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<UserGQL>> {
        let engine = ctx.data::<QueryEngine>()?;
        match engine.get_user_by_id(&UserId::from(id.0)).await {
            Ok(user) => Ok(user.as_ref().map(UserGQL::from)),
            Err(e) => Err(e.extend()),
        }
    }
}

// GraphQL Mutation root
pub struct Mutation;

#[Object]
impl Mutation {
    /// Create a new post; the server assigns its id and publication time
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        input: CreatePostInput,
    ) -> async_graphql::Result<PostGQL> {
        let engine = ctx.data::<MutationEngine>()?;
        let created = engine
            .create_post(NewPost::from(input))
            .await
            .map_err(|e| e.extend())?;

        Ok(PostGQL::from(created))
    }
}

// Schema type alias
pub type ContentGraphSchema = Schema<Query, Mutation, EmptySubscription>;

/// Create the GraphQL schema over a freshly seeded in-memory store
pub fn create_schema() -> crate::Result<ContentGraphSchema> {
    let storage: Arc<dyn ContentStorage> = Arc::new(InMemoryStorage::seeded()?);
    Ok(create_schema_with_storage(storage))
}

/// Create schema with a storage backend
///
/// The engines all share the one store handle.
pub fn create_schema_with_storage(storage: Arc<dyn ContentStorage>) -> ContentGraphSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(QueryEngine::new(storage.clone()))
        .data(MutationEngine::new(storage.clone()))
        .data(RelationResolver::new(storage))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Request, Variables};
    use serde_json::{json, Value};

    async fn run(schema: &ContentGraphSchema, query: &str, variables: Value) -> Value {
        let request = Request::new(query).variables(Variables::from_json(variables));
        serde_json::to_value(schema.execute(request).await).unwrap()
    }

    fn seeded_schema() -> (Arc<dyn ContentStorage>, ContentGraphSchema) {
        let storage: Arc<dyn ContentStorage> = Arc::new(InMemoryStorage::seeded().unwrap());
        (storage.clone(), create_schema_with_storage(storage))
    }

    #[tokio::test]
    async fn test_posts_with_authors() {
        let schema = create_schema().unwrap();

        let res = run(
            &schema,
            "{ posts { id title publishedAt tags author { id name avatarUrl } } }",
            json!({}),
        )
        .await;

        assert!(res.get("errors").is_none(), "unexpected errors: {}", res);
        let posts = res["data"]["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0]["title"], "Building Scalable APIs");
        assert_eq!(posts[0]["author"]["name"], "Carol Williams");
        let newest = DateTime::parse_from_rfc3339(posts[0]["publishedAt"].as_str().unwrap()).unwrap();
        assert_eq!(newest.with_timezone(&Utc), "2024-03-10T09:15:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(posts[2]["tags"], json!(["graphql", "api", "tutorial"]));
    }

    #[tokio::test]
    async fn test_only_selected_fields_are_returned() {
        let schema = create_schema().unwrap();

        let res = run(&schema, r#"{ post(id: "2") { title } }"#, json!({})).await;

        assert_eq!(res["data"], json!({ "post": { "title": "React Best Practices" } }));
    }

    #[tokio::test]
    async fn test_user_lookup_and_absence() {
        let schema = create_schema().unwrap();
        let query = "query GetUser($id: ID!) { user(id: $id) { id name avatarUrl } }";

        let found = run(&schema, query, json!({ "id": "1" })).await;
        assert_eq!(
            found["data"]["user"],
            json!({ "id": "1", "name": "Alice Smith", "avatarUrl": "https://i.pravatar.cc/150?img=1" })
        );

        let missing = run(&schema, query, json!({ "id": "99" })).await;
        assert_eq!(missing["data"]["user"], Value::Null);
        assert!(missing.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_create_post_then_traverse_author() {
        let schema = create_schema().unwrap();
        let mutation = r#"
            mutation CreatePost($input: CreatePostInput!) {
                createPost(input: $input) { id title tags publishedAt author { name } }
            }
        "#;

        let res = run(
            &schema,
            mutation,
            json!({ "input": { "title": "T", "body": "B", "tags": ["x"], "authorId": "2" } }),
        )
        .await;

        let created = &res["data"]["createPost"];
        assert_eq!(created["id"], "4");
        assert_eq!(created["tags"], json!(["x"]));
        assert_eq!(created["author"]["name"], "Bob Johnson");

        let published_at = created["publishedAt"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(published_at).is_ok());

        let listed = run(&schema, "{ posts { id } }", json!({})).await;
        assert_eq!(listed["data"]["posts"][0]["id"], "4");
    }

    #[tokio::test]
    async fn test_create_post_omitted_tags_are_empty_list() {
        let schema = create_schema().unwrap();

        let res = run(
            &schema,
            r#"mutation { createPost(input: { title: "T", body: "B", authorId: "2" }) { tags } }"#,
            json!({}),
        )
        .await;

        assert_eq!(res["data"]["createPost"]["tags"], json!([]));
    }

    #[tokio::test]
    async fn test_missing_required_input_is_rejected_without_write() {
        let (storage, schema) = seeded_schema();

        let res = run(
            &schema,
            r#"mutation { createPost(input: { body: "B", authorId: "2" }) { id } }"#,
            json!({}),
        )
        .await;

        assert!(res["errors"].as_array().map_or(false, |e| !e.is_empty()));
        assert_eq!(storage.list_posts().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_title_reports_bad_user_input() {
        let (storage, schema) = seeded_schema();

        let res = run(
            &schema,
            r#"mutation { createPost(input: { title: "", body: "B", authorId: "2" }) { id } }"#,
            json!({}),
        )
        .await;

        assert_eq!(res["errors"][0]["extensions"]["code"], "BAD_USER_INPUT");
        assert_eq!(storage.list_posts().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_dangling_author_is_a_request_error() {
        let (_, schema) = seeded_schema();

        let created = run(
            &schema,
            r#"mutation { createPost(input: { title: "T", body: "B", authorId: "404" }) { id } }"#,
            json!({}),
        )
        .await;
        assert_eq!(created["data"]["createPost"]["id"], "4");

        let res = run(&schema, r#"{ post(id: "4") { title author { name } } }"#, json!({})).await;

        // Non-null author fails, so the nullable post collapses to null
        assert_eq!(res["data"]["post"], Value::Null);
        let error = &res["errors"][0];
        assert_eq!(error["extensions"]["code"], "UNRESOLVED_RELATION");
        assert_eq!(error["extensions"]["key"], "404");
        assert_eq!(error["path"], json!(["post", "author"]));

        // Without selecting the author the post resolves normally
        let plain = run(&schema, r#"{ post(id: "4") { title } }"#, json!({})).await;
        assert_eq!(plain["data"]["post"]["title"], "T");
    }

    #[test]
    fn test_sdl_matches_contract() {
        let sdl = create_schema().unwrap().sdl();

        assert!(sdl.contains("type User"));
        assert!(sdl.contains("type Post"));
        assert!(sdl.contains("input CreatePostInput"));
        assert!(sdl.contains("scalar DateTime"));
        assert!(sdl.contains("avatarUrl: String\n"));
        assert!(sdl.contains("author: User!"));
        assert!(sdl.contains("tags: [String!]!"));
    }
}
