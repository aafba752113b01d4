//! Driving port for post mutations.
//!
//! Updates and deletes carry the version the caller last observed. A stale
//! version is reported as a conflict that includes the current version, so
//! the caller can refetch and retry deliberately.

use async_trait::async_trait;

use crate::domain::{
    Actor, Error, LikeReceipt, NewPost, Post, PostChanges, PostComment, PostId, Version,
};

/// Versioned update of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePostRequest {
    pub id: PostId,
    /// Version the caller expects the post to be at.
    pub expected_version: Version,
    pub changes: PostChanges,
}

/// Comment to append to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    pub post_id: PostId,
    pub actor: Actor,
    pub body: String,
}

/// Write-side operations on posts consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Publish a post at version 1.
    async fn create(&self, draft: NewPost) -> Result<Post, Error>;

    /// Apply a versioned update.
    ///
    /// # Errors
    ///
    /// - invalid request when `changes` is empty
    /// - not found when the post does not exist
    /// - conflict when `expected_version` is stale
    async fn update(&self, request: UpdatePostRequest) -> Result<Post, Error>;

    /// Remove the post when it is still at `expected_version`.
    ///
    /// # Errors
    ///
    /// Not found or conflict, as for [`PostCommand::update`].
    async fn delete(&self, id: PostId, expected_version: Version) -> Result<(), Error>;

    /// Record a like from `actor`; repeated likes are reported, not stored.
    /// The receipt carries the like count observed by the same write.
    async fn like(&self, id: PostId, actor: Actor) -> Result<LikeReceipt, Error>;

    /// Append a comment.
    async fn comment(&self, request: AddCommentRequest) -> Result<PostComment, Error>;
}
