//! Posts published in community rooms, plus their likes and comments.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Actor, CommentId, EntityKind, PostId, RoomId, Version, Versioned};

/// Moderation status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PostStatus {
    /// Visible in its room.
    #[default]
    Posted,
    /// Hidden by a moderator.
    Blocked,
}

impl PostStatus {
    /// Returns the database string representation.
    ///
    /// # Examples
    /// ```
    /// # use agora::domain::PostStatus;
    /// assert_eq!(PostStatus::Posted.as_str(), "Posted");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posted => "Posted",
            Self::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown post status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown post status: {input}")]
pub struct ParsePostStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl FromStr for PostStatus {
    type Err = ParsePostStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Posted" => Ok(Self::Posted),
            "Blocked" => Ok(Self::Blocked),
            other => Err(ParsePostStatusError {
                input: other.to_owned(),
            }),
        }
    }
}

/// A post and its optimistic concurrency stamp.
///
/// `room_id` and `author` are references; the post never embeds copies of
/// the room or the author, and nothing checks that they still exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub room_id: RoomId,
    pub author: Actor,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub status: PostStatus,
    pub version: Version,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Versioned for Post {
    const KIND: EntityKind = EntityKind::Post;

    fn version(&self) -> Version {
        self.version
    }
}

/// Fields supplied when publishing a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub room_id: RoomId,
    pub author: Actor,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub video: Option<String>,
}

impl Post {
    /// Materialise a freshly published post at [`Version::INITIAL`].
    #[must_use]
    pub fn publish(id: PostId, draft: NewPost, now: DateTime<Utc>) -> Self {
        let NewPost {
            room_id,
            author,
            title,
            description,
            image,
            video,
        } = draft;
        Self {
            id,
            room_id,
            author,
            title,
            description,
            image,
            video,
            status: PostStatus::Posted,
            version: Version::INITIAL,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Allow-listed post fields that a versioned update may assign.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub status: Option<PostStatus>,
}

impl PostChanges {
    /// `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.video.is_none()
            && self.status.is_none()
    }

    /// Assign every present field onto `post`. Version and timestamps are
    /// left to the caller.
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            post.description.clone_from(description);
        }
        if let Some(image) = &self.image {
            post.image = Some(image.clone());
        }
        if let Some(video) = &self.video {
            post.video = Some(video.clone());
        }
        if let Some(status) = self.status {
            post.status = status;
        }
    }
}

/// A like left on a post. Each actor may like a post once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLike {
    pub actor: Actor,
    pub liked_at: DateTime<Utc>,
}

/// Result of recording a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The like was stored.
    Recorded,
    /// The actor had already liked the post; nothing changed.
    AlreadyLiked,
}

/// A like outcome with the post's like count as of the same write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeReceipt {
    pub outcome: LikeOutcome,
    pub like_count: usize,
}

impl LikeReceipt {
    /// Whether this request stored a new like.
    pub fn recorded(&self) -> bool {
        self.outcome == LikeOutcome::Recorded
    }
}

/// A comment left on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostComment {
    pub id: CommentId,
    pub post_id: PostId,
    pub actor: Actor,
    pub body: String,
    pub commented_at: DateTime<Utc>,
}
