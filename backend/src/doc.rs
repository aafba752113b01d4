//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every room, post, and health endpoint together with
//! the request and response bodies they exchange. The document backs Swagger
//! UI in debug builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::payloads::{ActorBody, DeletedResponse};
use crate::inbound::http::posts::{
    CommentBody, CommentResponse, CreatePostBody, LikeBody, LikeResponse, LikesResponse,
    PostResponse, UpdatePostBody,
};
use crate::inbound::http::rooms::{
    CreateRoomBody, JoinRoomBody, MembershipResponse, RoomResponse, UpdateRoomBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agora backend API",
        description = "Community rooms and posts guarded by optimistic concurrency versions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::rooms::create_room,
        crate::inbound::http::rooms::list_rooms,
        crate::inbound::http::rooms::get_room,
        crate::inbound::http::rooms::update_room,
        crate::inbound::http::rooms::delete_room,
        crate::inbound::http::rooms::request_membership,
        crate::inbound::http::rooms::list_members,
        crate::inbound::http::rooms::decide_membership,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::list_room_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::posts::like_post,
        crate::inbound::http::posts::list_likes,
        crate::inbound::http::posts::comment_post,
        crate::inbound::http::posts::list_comments,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        ActorBody,
        DeletedResponse,
        RoomResponse,
        CreateRoomBody,
        UpdateRoomBody,
        JoinRoomBody,
        MembershipResponse,
        PostResponse,
        CreatePostBody,
        UpdatePostBody,
        LikeBody,
        LikeResponse,
        LikesResponse,
        CommentBody,
        CommentResponse,
    )),
    tags(
        (name = "rooms", description = "Rooms and their memberships"),
        (name = "posts", description = "Posts, likes, and comments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
