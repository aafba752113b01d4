//! Room HTTP handlers.
//!
//! ```text
//! POST   /api/v1/rooms
//! GET    /api/v1/rooms
//! GET    /api/v1/rooms/{id}
//! PUT    /api/v1/rooms/{id}
//! DELETE /api/v1/rooms/{id}?version=N
//! POST   /api/v1/rooms/{id}/members
//! GET    /api/v1/rooms/{id}/members
//! POST   /api/v1/rooms/{id}/members/{member_id}/{action}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UpdateRoomRequest;
use crate::domain::version_gate::empty_update_error;
use crate::domain::{
    CategoryId, EntityKind, Error, MemberId, MembershipDecision, NewRoom, Room, RoomChanges,
    RoomId, RoomMembership, RoomOwnerId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payloads::{DeletedResponse, VersionQuery};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, missing_field_error, optional_text, parse_id,
    parse_optional_id, require_text, require_version,
};

/// Room as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[schema(example = "Room Created")]
    pub status: String,
    #[schema(format = "uuid")]
    pub category_id: String,
    #[schema(format = "uuid")]
    pub room_owner_id: String,
    #[schema(example = "Admin")]
    pub created_by: String,
    #[schema(example = 1)]
    pub version: u32,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.to_string(),
            title: room.title,
            description: room.description,
            status: room.status,
            category_id: room.category_id.to_string(),
            room_owner_id: room.room_owner_id.to_string(),
            created_by: room.created_by,
            version: room.version.get(),
            created_at: room.created_at.to_rfc3339(),
            updated_at: room.updated_at.to_rfc3339(),
        }
    }
}

/// Request payload for opening a room.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomBody {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Defaults to `Room Created`.
    pub status: Option<String>,
    #[schema(format = "uuid")]
    pub category_id: Option<String>,
    #[schema(format = "uuid")]
    pub room_owner_id: Option<String>,
}

/// Request payload for a versioned room update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomBody {
    pub version: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[schema(format = "uuid")]
    pub category_id: Option<String>,
    #[schema(format = "uuid")]
    pub room_owner_id: Option<String>,
}

/// Request payload for joining a room.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomBody {
    #[schema(format = "uuid")]
    pub member_id: Option<String>,
}

/// Membership as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    #[schema(format = "uuid")]
    pub room_id: String,
    #[schema(format = "uuid")]
    pub member_id: String,
    #[schema(example = "JoinRequested")]
    pub status: String,
    #[schema(format = "date-time")]
    pub joined_at: String,
    #[schema(format = "date-time")]
    pub decided_at: Option<String>,
}

impl From<RoomMembership> for MembershipResponse {
    fn from(membership: RoomMembership) -> Self {
        Self {
            room_id: membership.room_id.to_string(),
            member_id: membership.member_id.to_string(),
            status: membership.status.as_str().to_owned(),
            joined_at: membership.joined_at.to_rfc3339(),
            decided_at: membership.decided_at.map(|at| at.to_rfc3339()),
        }
    }
}

/// Path segments of a membership decision.
#[derive(Debug, Deserialize)]
pub struct MembershipPath {
    pub id: String,
    pub member_id: String,
    pub action: String,
}

fn parse_room_id(raw: &str) -> Result<RoomId, Error> {
    parse_id(raw, FieldName::new("id"))
}

fn parse_new_room(body: CreateRoomBody) -> Result<NewRoom, Error> {
    let category_id = body
        .category_id
        .ok_or_else(|| missing_field_error(FieldName::new("categoryId")))?;
    let room_owner_id = body
        .room_owner_id
        .ok_or_else(|| missing_field_error(FieldName::new("roomOwnerId")))?;

    Ok(NewRoom {
        title: require_text(body.title, FieldName::new("title"))?,
        description: body.description.unwrap_or_default(),
        status: optional_text(body.status, FieldName::new("status"))?,
        category_id: parse_id(&category_id, FieldName::new("categoryId"))?,
        room_owner_id: parse_id(&room_owner_id, FieldName::new("roomOwnerId"))?,
    })
}

fn parse_update(id: RoomId, body: UpdateRoomBody) -> Result<UpdateRoomRequest, Error> {
    let expected_version = require_version(body.version)?;
    let changes = RoomChanges {
        title: optional_text(body.title, FieldName::new("title"))?,
        description: body.description,
        status: optional_text(body.status, FieldName::new("status"))?,
        category_id: parse_optional_id::<CategoryId>(body.category_id, FieldName::new("categoryId"))?,
        room_owner_id: parse_optional_id::<RoomOwnerId>(
            body.room_owner_id,
            FieldName::new("roomOwnerId"),
        )?,
    };
    if changes.is_empty() {
        return Err(empty_update_error(EntityKind::Room));
    }
    Ok(UpdateRoomRequest {
        id,
        expected_version,
        changes,
    })
}

/// Open a room at version 1.
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    request_body = CreateRoomBody,
    responses(
        (status = 201, description = "Room opened", body = RoomResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["rooms"],
    operation_id = "createRoom"
)]
#[post("/rooms")]
pub async fn create_room(
    state: web::Data<HttpState>,
    payload: web::Json<CreateRoomBody>,
) -> ApiResult<HttpResponse> {
    let draft = parse_new_room(payload.into_inner())?;
    let room = state.rooms.create(draft).await?;
    Ok(HttpResponse::Created().json(RoomResponse::from(room)))
}

/// List every room, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    responses(
        (status = 200, description = "Rooms", body = [RoomResponse]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["rooms"],
    operation_id = "listRooms"
)]
#[get("/rooms")]
pub async fn list_rooms(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<RoomResponse>>> {
    let rooms = state.rooms_query.list().await?;
    Ok(web::Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// Fetch a room by id.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    params(("id" = String, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room", body = RoomResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Room not found", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["rooms"],
    operation_id = "getRoom"
)]
#[get("/rooms/{id}")]
pub async fn get_room(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RoomResponse>> {
    let id = parse_room_id(&path)?;
    let room = state.rooms_query.get(id).await?;
    Ok(web::Json(RoomResponse::from(room)))
}

/// Apply a versioned update to a room.
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    params(("id" = String, Path, description = "Room identifier")),
    request_body = UpdateRoomBody,
    responses(
        (status = 200, description = "Updated room", body = RoomResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Room not found", body = Error),
        (status = 409, description = "Version conflict", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["rooms"],
    operation_id = "updateRoom"
)]
#[put("/rooms/{id}")]
pub async fn update_room(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateRoomBody>,
) -> ApiResult<web::Json<RoomResponse>> {
    let id = parse_room_id(&path)?;
    let request = parse_update(id, payload.into_inner())?;
    let room = state.rooms.update(request).await?;
    Ok(web::Json(RoomResponse::from(room)))
}

/// Delete a room still at the given version. Its posts are left in place.
#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}",
    params(("id" = String, Path, description = "Room identifier"), VersionQuery),
    responses(
        (status = 200, description = "Room deleted", body = DeletedResponse),
        (status = 400, description = "Invalid id or missing version", body = Error),
        (status = 404, description = "Room not found", body = Error),
        (status = 409, description = "Version conflict", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["rooms"],
    operation_id = "deleteRoom"
)]
#[delete("/rooms/{id}")]
pub async fn delete_room(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<VersionQuery>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_room_id(&path)?;
    let expected = query.expected()?;
    state.rooms.delete(id, expected).await?;
    Ok(web::Json(DeletedResponse::for_id(id)))
}

/// Ask to join a room.
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/members",
    params(("id" = String, Path, description = "Room identifier")),
    request_body = JoinRoomBody,
    responses(
        (status = 201, description = "Join requested", body = MembershipResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Room not found", body = Error),
        (status = 409, description = "Membership already exists", body = Error)
    ),
    tags = ["rooms"],
    operation_id = "requestMembership"
)]
#[post("/rooms/{id}/members")]
pub async fn request_membership(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<JoinRoomBody>,
) -> ApiResult<HttpResponse> {
    let room_id = parse_room_id(&path)?;
    let member_raw = payload
        .into_inner()
        .member_id
        .ok_or_else(|| missing_field_error(FieldName::new("memberId")))?;
    let member_id: MemberId = parse_id(&member_raw, FieldName::new("memberId"))?;
    let membership = state.rooms.request_membership(room_id, member_id).await?;
    Ok(HttpResponse::Created().json(MembershipResponse::from(membership)))
}

/// List a room's memberships.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}/members",
    params(("id" = String, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Memberships", body = [MembershipResponse]),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Room not found", body = Error)
    ),
    tags = ["rooms"],
    operation_id = "listMembers"
)]
#[get("/rooms/{id}/members")]
pub async fn list_members(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<MembershipResponse>>> {
    let id = parse_room_id(&path)?;
    let members = state.rooms_query.members(id).await?;
    Ok(web::Json(
        members.into_iter().map(MembershipResponse::from).collect(),
    ))
}

/// Accept, reject, block, or unblock a member.
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/members/{member_id}/{action}",
    params(
        ("id" = String, Path, description = "Room identifier"),
        ("member_id" = String, Path, description = "Member identifier"),
        ("action" = String, Path, description = "accept, reject, block, or unblock")
    ),
    responses(
        (status = 200, description = "Membership updated", body = MembershipResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Membership not found", body = Error)
    ),
    tags = ["rooms"],
    operation_id = "decideMembership"
)]
#[post("/rooms/{id}/members/{member_id}/{action}")]
pub async fn decide_membership(
    state: web::Data<HttpState>,
    path: web::Path<MembershipPath>,
) -> ApiResult<web::Json<MembershipResponse>> {
    let MembershipPath {
        id,
        member_id,
        action,
    } = path.into_inner();
    let room_id = parse_room_id(&id)?;
    let member_id: MemberId = parse_id(&member_id, FieldName::new("memberId"))?;
    let decision: MembershipDecision = action.parse().map_err(|_| {
        invalid_value_error(
            FieldName::new("action"),
            &action,
            "one of accept, reject, block, unblock",
        )
    })?;
    let membership = state
        .rooms
        .decide_membership(room_id, member_id, decision)
        .await?;
    Ok(web::Json(MembershipResponse::from(membership)))
}

#[cfg(test)]
#[path = "rooms_tests.rs"]
mod tests;
