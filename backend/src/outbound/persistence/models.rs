//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types are fallible
//! because text columns carry enums the database only loosely constrains.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Actor, ActorKind, CategoryId, CommentId, MemberId, MembershipStatus, Post, PostChanges,
    PostComment, PostId, PostLike, PostStatus, Room, RoomChanges, RoomId, RoomMembership,
    RoomOwnerId,
};

use super::diesel_helpers::version_from_db;
use super::schema::{post_comments, post_likes, posts, room_members, rooms};

fn parse_actor(kind: &str, id: Uuid) -> Result<Actor, String> {
    let kind: ActorKind = kind.parse().map_err(|err| format!("{err}"))?;
    Ok(Actor::from_parts(kind, id))
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// Row struct for reading from the rooms table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoomRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: String,
    pub category_id: Uuid,
    pub room_owner_id: Uuid,
    pub created_by: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RoomRow> for Room {
    type Error = String;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RoomId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            status: row.status,
            category_id: CategoryId::from_uuid(row.category_id),
            room_owner_id: RoomOwnerId::from_uuid(row.room_owner_id),
            created_by: row.created_by,
            version: version_from_db(row.version)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for opening a room.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rooms)]
pub(crate) struct NewRoomRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    pub category_id: Uuid,
    pub room_owner_id: Uuid,
    pub created_by: &'a str,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Allow-listed room columns a guarded update may assign.
///
/// `None` fields are skipped by Diesel, leaving the column untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = rooms)]
pub(crate) struct RoomChangeset<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub status: Option<&'a str>,
    pub category_id: Option<Uuid>,
    pub room_owner_id: Option<Uuid>,
}

impl<'a> From<&'a RoomChanges> for RoomChangeset<'a> {
    fn from(changes: &'a RoomChanges) -> Self {
        Self {
            title: changes.title.as_deref(),
            description: changes.description.as_deref(),
            status: changes.status.as_deref(),
            category_id: changes.category_id.map(Uuid::from),
            room_owner_id: changes.room_owner_id.map(Uuid::from),
        }
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: Uuid,
    pub room_id: Uuid,
    pub author_kind: String,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub status: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = String;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let status: PostStatus = row.status.parse().map_err(|err| format!("{err}"))?;
        Ok(Self {
            id: PostId::from_uuid(row.id),
            room_id: RoomId::from_uuid(row.room_id),
            author: parse_actor(&row.author_kind, row.author_id)?,
            title: row.title,
            description: row.description,
            image: row.image,
            video: row.video,
            status,
            version: version_from_db(row.version)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for publishing a post.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub id: Uuid,
    pub room_id: Uuid,
    pub author_kind: &'a str,
    pub author_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
    pub video: Option<&'a str>,
    pub status: &'a str,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Allow-listed post columns a guarded update may assign.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostChangeset<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub image: Option<&'a str>,
    pub video: Option<&'a str>,
    pub status: Option<&'a str>,
}

impl<'a> From<&'a PostChanges> for PostChangeset<'a> {
    fn from(changes: &'a PostChanges) -> Self {
        Self {
            title: changes.title.as_deref(),
            description: changes.description.as_deref(),
            image: changes.image.as_deref(),
            video: changes.video.as_deref(),
            status: changes.status.map(PostStatus::as_str),
        }
    }
}

// ---------------------------------------------------------------------------
// Likes and comments
// ---------------------------------------------------------------------------

/// Row struct for the post_likes table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = post_likes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostLikeRow {
    pub post_id: Uuid,
    pub actor_kind: String,
    pub actor_id: Uuid,
    pub liked_at: DateTime<Utc>,
}

impl PostLikeRow {
    pub(crate) fn new(post_id: &PostId, like: &PostLike) -> Self {
        Self {
            post_id: *post_id.as_uuid(),
            actor_kind: like.actor.kind().as_str().to_owned(),
            actor_id: *like.actor.id(),
            liked_at: like.liked_at,
        }
    }
}

impl TryFrom<PostLikeRow> for PostLike {
    type Error = String;

    fn try_from(row: PostLikeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            actor: parse_actor(&row.actor_kind, row.actor_id)?,
            liked_at: row.liked_at,
        })
    }
}

/// Row struct for the post_comments table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = post_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostCommentRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub actor_kind: String,
    pub actor_id: Uuid,
    pub body: String,
    pub commented_at: DateTime<Utc>,
}

impl From<&PostComment> for PostCommentRow {
    fn from(comment: &PostComment) -> Self {
        Self {
            id: *comment.id.as_uuid(),
            post_id: *comment.post_id.as_uuid(),
            actor_kind: comment.actor.kind().as_str().to_owned(),
            actor_id: *comment.actor.id(),
            body: comment.body.clone(),
            commented_at: comment.commented_at,
        }
    }
}

impl TryFrom<PostCommentRow> for PostComment {
    type Error = String;

    fn try_from(row: PostCommentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CommentId::from_uuid(row.id),
            post_id: PostId::from_uuid(row.post_id),
            actor: parse_actor(&row.actor_kind, row.actor_id)?,
            body: row.body,
            commented_at: row.commented_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Memberships
// ---------------------------------------------------------------------------

/// Row struct for the room_members table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = room_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MembershipRow {
    pub room_id: Uuid,
    pub member_id: Uuid,
    pub status: String,
    pub joined_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl From<&RoomMembership> for MembershipRow {
    fn from(membership: &RoomMembership) -> Self {
        Self {
            room_id: *membership.room_id.as_uuid(),
            member_id: *membership.member_id.as_uuid(),
            status: membership.status.as_str().to_owned(),
            joined_at: membership.joined_at,
            decided_at: membership.decided_at,
        }
    }
}

impl TryFrom<MembershipRow> for RoomMembership {
    type Error = String;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let status: MembershipStatus = row.status.parse().map_err(|err| format!("{err}"))?;
        Ok(Self {
            room_id: RoomId::from_uuid(row.room_id),
            member_id: MemberId::from_uuid(row.member_id),
            status,
            joined_at: row.joined_at,
            decided_at: row.decided_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Version;
    use chrono::TimeZone;
    use rstest::rstest;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn post_row(author_kind: &str, status: &str, version: i32) -> PostRow {
        PostRow {
            id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            author_kind: author_kind.to_owned(),
            author_id: Uuid::new_v4(),
            title: "A".to_owned(),
            description: String::new(),
            image: None,
            video: Some("clip.mp4".to_owned()),
            status: status.to_owned(),
            version,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[rstest]
    fn post_row_converts_to_domain() {
        let row = post_row("room_owner", "Blocked", 4);
        let author_id = row.author_id;

        let post = Post::try_from(row).expect("valid row");

        assert_eq!(post.author, Actor::RoomOwner(RoomOwnerId::from_uuid(author_id)));
        assert_eq!(post.status, PostStatus::Blocked);
        assert_eq!(post.version, Version::new(4));
        assert_eq!(post.video.as_deref(), Some("clip.mp4"));
    }

    #[rstest]
    #[case::unknown_author("moderator", "Posted", 1)]
    #[case::unknown_status("member", "Hidden", 1)]
    #[case::negative_version("member", "Posted", -1)]
    fn malformed_post_rows_are_rejected(
        #[case] author_kind: &str,
        #[case] status: &str,
        #[case] version: i32,
    ) {
        assert!(Post::try_from(post_row(author_kind, status, version)).is_err());
    }

    #[rstest]
    fn post_changeset_borrows_only_assigned_fields() {
        let changes = PostChanges {
            title: Some("B".to_owned()),
            status: Some(PostStatus::Blocked),
            ..PostChanges::default()
        };

        let changeset = PostChangeset::from(&changes);

        assert_eq!(changeset.title, Some("B"));
        assert_eq!(changeset.status, Some("Blocked"));
        assert!(changeset.description.is_none());
        assert!(changeset.image.is_none());
    }

    #[rstest]
    fn membership_round_trips_through_row() {
        let membership =
            RoomMembership::request(RoomId::random(), MemberId::random(), timestamp());

        let row = MembershipRow::from(&membership);
        assert_eq!(row.status, "JoinRequested");

        let restored = RoomMembership::try_from(row).expect("valid row");
        assert_eq!(restored, membership);
    }
}
