//! Post HTTP handlers.
//!
//! ```text
//! GET    /api/v1/posts/{id}
//! PUT    /api/v1/posts/{id}
//! DELETE /api/v1/posts/{id}?version=N
//! POST   /api/v1/rooms/{id}/posts
//! GET    /api/v1/rooms/{id}/posts
//! POST   /api/v1/posts/{id}/likes
//! GET    /api/v1/posts/{id}/likes
//! POST   /api/v1/posts/{id}/comments
//! GET    /api/v1/posts/{id}/comments
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AddCommentRequest, UpdatePostRequest};
use crate::domain::{
    EntityKind, Error, NewPost, Post, PostChanges, PostComment, PostId, PostStatus,
    RoomId,
};
use crate::domain::version_gate::empty_update_error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::payloads::{ActorBody, DeletedResponse, VersionQuery, parse_actor};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, optional_text, parse_id, require_text, require_version,
};

/// Post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub room_id: String,
    pub author: ActorBody,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub video: Option<String>,
    #[schema(example = "Posted")]
    pub status: String,
    #[schema(example = 1)]
    pub version: u32,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            room_id: post.room_id.to_string(),
            author: ActorBody::from(post.author),
            title: post.title,
            description: post.description,
            image: post.image,
            video: post.video,
            status: post.status.as_str().to_owned(),
            version: post.version.get(),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}

/// Request payload for a versioned post update.
///
/// `version` is required; at least one other field must be present.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostBody {
    pub version: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    /// `Posted` or `Blocked`.
    pub status: Option<String>,
}

/// Request payload for publishing a post in a room.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub author: Option<ActorBody>,
}

/// Request payload for liking a post.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeBody {
    pub actor: Option<ActorBody>,
}

/// Outcome of a like request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    /// `false` when the actor had already liked the post.
    pub recorded: bool,
    pub like_count: usize,
}

/// Likes on a post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikesResponse {
    pub like_count: usize,
    pub likers: Vec<ActorBody>,
}

/// Request payload for commenting on a post.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    pub actor: Option<ActorBody>,
    pub body: Option<String>,
}

/// Comment as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub post_id: String,
    pub actor: ActorBody,
    pub body: String,
    #[schema(format = "date-time")]
    pub commented_at: String,
}

impl From<PostComment> for CommentResponse {
    fn from(comment: PostComment) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            actor: ActorBody::from(comment.actor),
            body: comment.body,
            commented_at: comment.commented_at.to_rfc3339(),
        }
    }
}

fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    parse_id(raw, FieldName::new("id"))
}

fn parse_status(raw: Option<String>) -> Result<Option<PostStatus>, Error> {
    raw.map(|value| {
        value
            .parse::<PostStatus>()
            .map_err(|_| invalid_value_error(FieldName::new("status"), &value, "Posted or Blocked"))
    })
    .transpose()
}

fn parse_update(id: PostId, body: UpdatePostBody) -> Result<UpdatePostRequest, Error> {
    let expected_version = require_version(body.version)?;
    let changes = PostChanges {
        title: optional_text(body.title, FieldName::new("title"))?,
        description: body.description,
        image: body.image,
        video: body.video,
        status: parse_status(body.status)?,
    };
    if changes.is_empty() {
        return Err(empty_update_error(EntityKind::Post));
    }
    Ok(UpdatePostRequest {
        id,
        expected_version,
        changes,
    })
}

fn parse_new_post(room_id: RoomId, body: CreatePostBody) -> Result<NewPost, Error> {
    Ok(NewPost {
        room_id,
        author: parse_actor(body.author, FieldName::new("author"))?,
        title: require_text(body.title, FieldName::new("title"))?,
        description: body.description.unwrap_or_default(),
        image: body.image,
        video: body.video,
    })
}

/// Fetch a post by id.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Post not found", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostResponse>> {
    let id = parse_post_id(&path)?;
    let post = state.posts_query.get(id).await?;
    Ok(web::Json(PostResponse::from(post)))
}

/// Apply a versioned update to a post.
///
/// A stale `version` yields 409 with the current version in
/// `details.currentVersion`.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = UpdatePostBody,
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Post not found", body = Error),
        (status = 409, description = "Version conflict", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePostBody>,
) -> ApiResult<web::Json<PostResponse>> {
    let id = parse_post_id(&path)?;
    let request = parse_update(id, payload.into_inner())?;
    let post = state.posts.update(request).await?;
    Ok(web::Json(PostResponse::from(post)))
}

/// Delete a post still at the given version.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier"), VersionQuery),
    responses(
        (status = 200, description = "Post deleted", body = DeletedResponse),
        (status = 400, description = "Invalid id or missing version", body = Error),
        (status = 404, description = "Post not found", body = Error),
        (status = 409, description = "Version conflict", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<VersionQuery>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_post_id(&path)?;
    let expected = query.expected()?;
    state.posts.delete(id, expected).await?;
    Ok(web::Json(DeletedResponse::for_id(id)))
}

/// Publish a post in a room at version 1.
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/posts",
    params(("id" = String, Path, description = "Room identifier")),
    request_body = CreatePostBody,
    responses(
        (status = 201, description = "Post published", body = PostResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/rooms/{id}/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CreatePostBody>,
) -> ApiResult<HttpResponse> {
    let room_id: RoomId = parse_id(&path, FieldName::new("id"))?;
    let draft = parse_new_post(room_id, payload.into_inner())?;
    let post = state.posts.create(draft).await?;
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// List a room's posts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}/posts",
    params(("id" = String, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Posts in the room", body = [PostResponse]),
        (status = 400, description = "Invalid id", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listRoomPosts"
)]
#[get("/rooms/{id}/posts")]
pub async fn list_room_posts(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let room_id: RoomId = parse_id(&path, FieldName::new("id"))?;
    let posts = state.posts_query.list_by_room(room_id).await?;
    Ok(web::Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Like a post. Repeated likes by the same actor are not counted twice.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/likes",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = LikeBody,
    responses(
        (status = 200, description = "Like outcome", body = LikeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Post not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "likePost"
)]
#[post("/posts/{id}/likes")]
pub async fn like_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<LikeBody>,
) -> ApiResult<web::Json<LikeResponse>> {
    let id = parse_post_id(&path)?;
    let actor = parse_actor(payload.into_inner().actor, FieldName::new("actor"))?;
    let receipt = state.posts.like(id, actor).await?;
    Ok(web::Json(LikeResponse {
        recorded: receipt.recorded(),
        like_count: receipt.like_count,
    }))
}

/// List who liked a post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}/likes",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Likes", body = LikesResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Post not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPostLikes"
)]
#[get("/posts/{id}/likes")]
pub async fn list_likes(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<LikesResponse>> {
    let id = parse_post_id(&path)?;
    let likes = state.posts_query.likes(id).await?;
    Ok(web::Json(LikesResponse {
        like_count: likes.len(),
        likers: likes
            .into_iter()
            .map(|like| ActorBody::from(like.actor))
            .collect(),
    }))
}

/// Comment on a post.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/comments",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = CommentBody,
    responses(
        (status = 201, description = "Comment stored", body = CommentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Post not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "commentOnPost"
)]
#[post("/posts/{id}/comments")]
pub async fn comment_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CommentBody>,
) -> ApiResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let CommentBody { actor, body } = payload.into_inner();
    let request = AddCommentRequest {
        post_id,
        actor: parse_actor(actor, FieldName::new("actor"))?,
        body: require_text(body, FieldName::new("body"))?,
    };
    let comment = state.posts.comment(request).await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// List comments on a post, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}/comments",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Comments", body = [CommentResponse]),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Post not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPostComments"
)]
#[get("/posts/{id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let id = parse_post_id(&path)?;
    let comments = state.posts_query.comments(id).await?;
    Ok(web::Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
