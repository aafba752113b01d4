//! Post service implementing the post driving ports.
//!
//! Updates and deletes go through the shared [`VersionGate`]. Likes and
//! comments are child records and leave the post's version alone.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{AddCommentRequest, PostCommand, PostQuery, PostRepository, UpdatePostRequest};
use super::version_gate::{
    VersionGate, empty_update_error, map_repository_error, not_found_error,
};
use super::{
    Actor, CommentId, EntityKind, Error, LikeReceipt, NewPost, Post, PostComment, PostId,
    PostLike, RoomId, Version,
};

/// Post command and query service backed by a [`PostRepository`].
pub struct PostService<R> {
    repository: Arc<R>,
    gate: VersionGate<R>,
    clock: Arc<dyn Clock>,
}

impl<R> Clone for PostService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            gate: self.gate.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R> PostService<R>
where
    R: PostRepository,
{
    /// Create a service over `repository`, taking timestamps from `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        let gate = VersionGate::new(Arc::clone(&repository), Arc::clone(&clock));
        Self {
            repository,
            gate,
            clock,
        }
    }

    async fn require_post(&self, id: PostId) -> Result<Post, Error> {
        self.repository
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found_error(EntityKind::Post, &id))
    }
}

#[async_trait]
impl<R> PostQuery for PostService<R>
where
    R: PostRepository + 'static,
{
    async fn get(&self, id: PostId) -> Result<Post, Error> {
        self.require_post(id).await
    }

    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Post>, Error> {
        self.repository
            .list_by_room(&room_id)
            .await
            .map_err(map_repository_error)
    }

    async fn likes(&self, id: PostId) -> Result<Vec<PostLike>, Error> {
        self.require_post(id).await?;
        self.repository
            .likes(&id)
            .await
            .map_err(map_repository_error)
    }

    async fn comments(&self, id: PostId) -> Result<Vec<PostComment>, Error> {
        self.require_post(id).await?;
        self.repository
            .comments(&id)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> PostCommand for PostService<R>
where
    R: PostRepository + 'static,
{
    async fn create(&self, draft: NewPost) -> Result<Post, Error> {
        let post = Post::publish(PostId::random(), draft, self.clock.utc());
        self.repository
            .insert(&post)
            .await
            .map_err(map_repository_error)?;
        info!(post_id = %post.id, room_id = %post.room_id, "post published");
        Ok(post)
    }

    async fn update(&self, request: UpdatePostRequest) -> Result<Post, Error> {
        let UpdatePostRequest {
            id,
            expected_version,
            changes,
        } = request;
        if changes.is_empty() {
            return Err(empty_update_error(EntityKind::Post));
        }

        self.gate
            .conditional_update(&id, expected_version, &changes)
            .await
            .map_err(map_repository_error)?
            .into_result(EntityKind::Post, &id, expected_version)
    }

    async fn delete(&self, id: PostId, expected_version: Version) -> Result<(), Error> {
        self.gate
            .conditional_delete(&id, expected_version)
            .await
            .map_err(map_repository_error)?
            .into_result(EntityKind::Post, &id, expected_version)?;
        info!(post_id = %id, version = %expected_version, "post deleted");
        Ok(())
    }

    async fn like(&self, id: PostId, actor: Actor) -> Result<LikeReceipt, Error> {
        let like = PostLike {
            actor,
            liked_at: self.clock.utc(),
        };
        self.repository
            .add_like(&id, &like)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found_error(EntityKind::Post, &id))
    }

    async fn comment(&self, request: AddCommentRequest) -> Result<PostComment, Error> {
        let AddCommentRequest {
            post_id,
            actor,
            body,
        } = request;
        let comment = PostComment {
            id: CommentId::random(),
            post_id,
            actor,
            body,
            commented_at: self.clock.utc(),
        };
        let stored = self
            .repository
            .add_comment(&comment)
            .await
            .map_err(map_repository_error)?;
        if stored {
            Ok(comment)
        } else {
            Err(not_found_error(EntityKind::Post, &post_id))
        }
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
