//! Shared fixtures and repository mocks for domain unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use mockall::mock;

use super::ports::{EntityRepositoryError, PostRepository, RoomRepository, VersionedRepository};
use super::{
    JoinOutcome, LikeReceipt, MemberId, MembershipStatus, Post, PostChanges, PostComment, PostId,
    PostLike, Room, RoomChanges, RoomId, RoomMembership, Version,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock frozen at a fixed instant.
pub(crate) struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock_at(utc_now: DateTime<Utc>) -> Arc<dyn Clock> {
    Arc::new(FixtureClock { utc_now })
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    fixture_clock_at(fixture_timestamp())
}

mock! {
    pub RoomStore {}

    #[async_trait]
    impl VersionedRepository for RoomStore {
        type Id = RoomId;
        type Entity = Room;
        type Changes = RoomChanges;

        async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, EntityRepositoryError>;
        async fn update_if_version(
            &self,
            id: &RoomId,
            expected: Version,
            changes: &RoomChanges,
            updated_at: DateTime<Utc>,
        ) -> Result<Option<Room>, EntityRepositoryError>;
        async fn delete_if_version(
            &self,
            id: &RoomId,
            expected: Version,
        ) -> Result<bool, EntityRepositoryError>;
    }

    #[async_trait]
    impl RoomRepository for RoomStore {
        async fn insert(&self, room: &Room) -> Result<(), EntityRepositoryError>;
        async fn list(&self) -> Result<Vec<Room>, EntityRepositoryError>;
        async fn request_membership(
            &self,
            membership: &RoomMembership,
        ) -> Result<Option<JoinOutcome>, EntityRepositoryError>;
        async fn set_membership_status(
            &self,
            room_id: &RoomId,
            member_id: &MemberId,
            status: MembershipStatus,
            decided_at: DateTime<Utc>,
        ) -> Result<Option<RoomMembership>, EntityRepositoryError>;
        async fn memberships(
            &self,
            room_id: &RoomId,
        ) -> Result<Vec<RoomMembership>, EntityRepositoryError>;
    }
}

mock! {
    pub PostStore {}

    #[async_trait]
    impl VersionedRepository for PostStore {
        type Id = PostId;
        type Entity = Post;
        type Changes = PostChanges;

        async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, EntityRepositoryError>;
        async fn update_if_version(
            &self,
            id: &PostId,
            expected: Version,
            changes: &PostChanges,
            updated_at: DateTime<Utc>,
        ) -> Result<Option<Post>, EntityRepositoryError>;
        async fn delete_if_version(
            &self,
            id: &PostId,
            expected: Version,
        ) -> Result<bool, EntityRepositoryError>;
    }

    #[async_trait]
    impl PostRepository for PostStore {
        async fn insert(&self, post: &Post) -> Result<(), EntityRepositoryError>;
        async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<Post>, EntityRepositoryError>;
        async fn add_like(
            &self,
            post_id: &PostId,
            like: &PostLike,
        ) -> Result<Option<LikeReceipt>, EntityRepositoryError>;
        async fn likes(&self, post_id: &PostId) -> Result<Vec<PostLike>, EntityRepositoryError>;
        async fn add_comment(&self, comment: &PostComment) -> Result<bool, EntityRepositoryError>;
        async fn comments(&self, post_id: &PostId) -> Result<Vec<PostComment>, EntityRepositoryError>;
    }
}
