//! Driving port for reading posts.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostComment, PostId, PostLike, RoomId};

/// Read-side operations on posts consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostQuery: Send + Sync {
    /// Fetch a post.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the post does not exist, or a storage
    /// error when the repository fails.
    async fn get(&self, id: PostId) -> Result<Post, Error>;

    /// Posts published in a room, newest first.
    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Post>, Error>;

    /// Likes on an existing post.
    async fn likes(&self, id: PostId) -> Result<Vec<PostLike>, Error>;

    /// Comments on an existing post, oldest first.
    async fn comments(&self, id: PostId) -> Result<Vec<PostComment>, Error>;
}
