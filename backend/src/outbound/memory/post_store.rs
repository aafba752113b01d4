//! In-memory `PostRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{EntityRepositoryError, PostRepository, VersionedRepository};
use crate::domain::{
    LikeOutcome, LikeReceipt, Post, PostChanges, PostComment, PostId, PostLike, RoomId, Version,
};

use super::{lock, next_version};

#[derive(Default)]
struct PostState {
    posts: HashMap<PostId, Post>,
    likes: HashMap<PostId, Vec<PostLike>>,
    comments: HashMap<PostId, Vec<PostComment>>,
}

/// Post repository holding everything in process memory.
#[derive(Default)]
pub struct InMemoryPostRepository {
    state: Mutex<PostState>,
}

impl InMemoryPostRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VersionedRepository for InMemoryPostRepository {
    type Id = PostId;
    type Entity = Post;
    type Changes = PostChanges;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, EntityRepositoryError> {
        Ok(lock(&self.state)?.posts.get(id).cloned())
    }

    async fn update_if_version(
        &self,
        id: &PostId,
        expected: Version,
        changes: &PostChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, EntityRepositoryError> {
        let mut state = lock(&self.state)?;
        let Some(post) = state.posts.get_mut(id) else {
            return Ok(None);
        };
        if post.version != expected {
            return Ok(None);
        }

        let version = next_version(post.version)?;
        changes.apply_to(post);
        post.version = version;
        post.updated_at = updated_at;
        Ok(Some(post.clone()))
    }

    async fn delete_if_version(
        &self,
        id: &PostId,
        expected: Version,
    ) -> Result<bool, EntityRepositoryError> {
        let mut state = lock(&self.state)?;
        if state.posts.get(id).map(|post| post.version) != Some(expected) {
            return Ok(false);
        }

        state.posts.remove(id);
        state.likes.remove(id);
        state.comments.remove(id);
        Ok(true)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), EntityRepositoryError> {
        let mut state = lock(&self.state)?;
        if state.posts.contains_key(&post.id) {
            return Err(EntityRepositoryError::query(format!(
                "post {} already exists",
                post.id
            )));
        }
        state.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<Post>, EntityRepositoryError> {
        let state = lock(&self.state)?;
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|post| post.room_id == *room_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
        Ok(posts)
    }

    async fn add_like(
        &self,
        post_id: &PostId,
        like: &PostLike,
    ) -> Result<Option<LikeReceipt>, EntityRepositoryError> {
        let mut state = lock(&self.state)?;
        if !state.posts.contains_key(post_id) {
            return Ok(None);
        }

        let likes = state.likes.entry(*post_id).or_default();
        let outcome = if likes.iter().any(|existing| existing.actor == like.actor) {
            LikeOutcome::AlreadyLiked
        } else {
            likes.push(like.clone());
            LikeOutcome::Recorded
        };
        Ok(Some(LikeReceipt {
            outcome,
            like_count: likes.len(),
        }))
    }

    async fn likes(&self, post_id: &PostId) -> Result<Vec<PostLike>, EntityRepositoryError> {
        Ok(lock(&self.state)?
            .likes
            .get(post_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_comment(&self, comment: &PostComment) -> Result<bool, EntityRepositoryError> {
        let mut state = lock(&self.state)?;
        if !state.posts.contains_key(&comment.post_id) {
            return Ok(false);
        }
        state
            .comments
            .entry(comment.post_id)
            .or_default()
            .push(comment.clone());
        Ok(true)
    }

    async fn comments(&self, post_id: &PostId) -> Result<Vec<PostComment>, EntityRepositoryError> {
        Ok(lock(&self.state)?
            .comments
            .get(post_id)
            .cloned()
            .unwrap_or_default())
    }
}
