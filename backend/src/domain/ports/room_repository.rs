//! Driven port for room persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    JoinOutcome, MemberId, MembershipStatus, Room, RoomChanges, RoomId, RoomMembership,
};

use super::{EntityRepositoryError, VersionedRepository};

/// Room storage: the versioned primitives plus room memberships.
///
/// Membership changes never touch the room's version.
#[async_trait]
pub trait RoomRepository:
    VersionedRepository<Id = RoomId, Entity = Room, Changes = RoomChanges>
{
    /// Store a newly opened room.
    async fn insert(&self, room: &Room) -> Result<(), EntityRepositoryError>;

    /// Every room, newest first.
    async fn list(&self) -> Result<Vec<Room>, EntityRepositoryError>;

    /// Store a join request unless the member already has a membership.
    /// Returns `None` when the room is missing.
    async fn request_membership(
        &self,
        membership: &RoomMembership,
    ) -> Result<Option<JoinOutcome>, EntityRepositoryError>;

    /// Overwrite a membership status. Returns `None` when no membership
    /// exists for the pair.
    async fn set_membership_status(
        &self,
        room_id: &RoomId,
        member_id: &MemberId,
        status: MembershipStatus,
        decided_at: DateTime<Utc>,
    ) -> Result<Option<RoomMembership>, EntityRepositoryError>;

    /// Memberships of the room, in join order.
    async fn memberships(
        &self,
        room_id: &RoomId,
    ) -> Result<Vec<RoomMembership>, EntityRepositoryError>;
}
