//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Guarded mutations are single statements: the version predicate sits in
//! the `WHERE` clause of the `UPDATE`/`DELETE`, and the increment happens in
//! the same statement. Likes and comments rely on the `post_id` foreign key
//! to detect a missing post without a prior read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{EntityRepositoryError, PostRepository, VersionedRepository};
use crate::domain::{
    LikeOutcome, LikeReceipt, Post, PostChanges, PostComment, PostId, PostLike, RoomId, Version,
};

use super::diesel_helpers::{
    collect_rows, count_from_db, guard_version, is_foreign_key_violation, map_diesel_error,
    map_pool_error, version_for_db,
};
use super::models::{NewPostRow, PostChangeset, PostCommentRow, PostLikeRow, PostRow};
use super::pool::DbPool;
use super::schema::{post_comments, post_likes, posts};

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_post(row: PostRow) -> Result<Post, EntityRepositoryError> {
    Post::try_from(row).map_err(EntityRepositoryError::query)
}

#[async_trait]
impl VersionedRepository for DieselPostRepository {
    type Id = PostId;
    type Entity = Post;
    type Changes = PostChanges;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = posts::table
            .filter(posts::id.eq(id.as_uuid()))
            .select(PostRow::as_select())
            .first::<PostRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn update_if_version(
        &self,
        id: &PostId,
        expected: Version,
        changes: &PostChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, EntityRepositoryError> {
        let Some(expected) = guard_version(expected) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            posts::table
                .filter(posts::id.eq(id.as_uuid()))
                .filter(posts::version.eq(expected)),
        )
        .set((
            PostChangeset::from(changes),
            posts::version.eq(posts::version + 1),
            posts::updated_at.eq(updated_at),
        ))
        .returning(PostRow::as_returning())
        .get_result::<PostRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn delete_if_version(
        &self,
        id: &PostId,
        expected: Version,
    ) -> Result<bool, EntityRepositoryError> {
        let Some(expected) = guard_version(expected) else {
            return Ok(false);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            posts::table
                .filter(posts::id.eq(id.as_uuid()))
                .filter(posts::version.eq(expected)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted == 1)
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewPostRow {
            id: *post.id.as_uuid(),
            room_id: *post.room_id.as_uuid(),
            author_kind: post.author.kind().as_str(),
            author_id: *post.author.id(),
            title: &post.title,
            description: &post.description,
            image: post.image.as_deref(),
            video: post.video.as_deref(),
            status: post.status.as_str(),
            version: version_for_db(post.version)?,
            created_at: post.created_at,
            updated_at: post.updated_at,
        };

        diesel::insert_into(posts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<Post>, EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostRow> = posts::table
            .filter(posts::room_id.eq(room_id.as_uuid()))
            .order((posts::created_at.desc(), posts::id.desc()))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(rows)
    }

    async fn add_like(
        &self,
        post_id: &PostId,
        like: &PostLike,
    ) -> Result<Option<LikeReceipt>, EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = PostLikeRow::new(post_id, like);
        let post_uuid = *post_id.as_uuid();

        // The insert and the count share one transaction so the count always
        // includes the like this request stored.
        let result = conn
            .transaction(|conn| {
                async move {
                    let inserted = diesel::insert_into(post_likes::table)
                        .values(&row)
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;
                    let count: i64 = post_likes::table
                        .filter(post_likes::post_id.eq(post_uuid))
                        .count()
                        .get_result(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((inserted, count))
                }
                .scope_boxed()
            })
            .await;

        let (inserted, count) = match result {
            Ok(pair) => pair,
            Err(err) if is_foreign_key_violation(&err) => return Ok(None),
            Err(err) => return Err(map_diesel_error(err)),
        };
        let outcome = if inserted == 0 {
            LikeOutcome::AlreadyLiked
        } else {
            LikeOutcome::Recorded
        };
        Ok(Some(LikeReceipt {
            outcome,
            like_count: count_from_db(count)?,
        }))
    }

    async fn likes(&self, post_id: &PostId) -> Result<Vec<PostLike>, EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostLikeRow> = post_likes::table
            .filter(post_likes::post_id.eq(post_id.as_uuid()))
            .order(post_likes::liked_at.asc())
            .select(PostLikeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(rows)
    }

    async fn add_comment(&self, comment: &PostComment) -> Result<bool, EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = diesel::insert_into(post_comments::table)
            .values(&PostCommentRow::from(comment))
            .execute(&mut conn)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) if is_foreign_key_violation(&err) => Ok(false),
            Err(err) => Err(map_diesel_error(err)),
        }
    }

    async fn comments(&self, post_id: &PostId) -> Result<Vec<PostComment>, EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostCommentRow> = post_comments::table
            .filter(post_comments::post_id.eq(post_id.as_uuid()))
            .order((post_comments::commented_at.asc(), post_comments::id.asc()))
            .select(PostCommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(rows)
    }
}
