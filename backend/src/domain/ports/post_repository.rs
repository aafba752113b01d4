//! Driven port for post persistence.

use async_trait::async_trait;

use crate::domain::{
    LikeReceipt, Post, PostChanges, PostComment, PostId, PostLike, RoomId,
};

use super::{EntityRepositoryError, VersionedRepository};

/// Post storage: the versioned primitives plus the child collections that
/// live and die with a post.
#[async_trait]
pub trait PostRepository:
    VersionedRepository<Id = PostId, Entity = Post, Changes = PostChanges>
{
    /// Store a newly published post.
    async fn insert(&self, post: &Post) -> Result<(), EntityRepositoryError>;

    /// Posts referencing `room_id`, newest first.
    async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<Post>, EntityRepositoryError>;

    /// Record a like once per actor and report the resulting like count.
    /// Returns `None` when the post is missing.
    async fn add_like(
        &self,
        post_id: &PostId,
        like: &PostLike,
    ) -> Result<Option<LikeReceipt>, EntityRepositoryError>;

    /// Likes on the post, oldest first.
    async fn likes(&self, post_id: &PostId) -> Result<Vec<PostLike>, EntityRepositoryError>;

    /// Store a comment. Returns `false` when the post is missing.
    async fn add_comment(&self, comment: &PostComment) -> Result<bool, EntityRepositoryError>;

    /// Comments on the post, oldest first.
    async fn comments(&self, post_id: &PostId) -> Result<Vec<PostComment>, EntityRepositoryError>;
}
