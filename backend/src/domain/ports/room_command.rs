//! Driving port for room mutations and the membership workflow.

use async_trait::async_trait;

use crate::domain::{
    Error, MemberId, MembershipDecision, NewRoom, Room, RoomChanges, RoomId, RoomMembership,
    Version,
};

/// Versioned update of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRoomRequest {
    pub id: RoomId,
    /// Version the caller expects the room to be at.
    pub expected_version: Version,
    pub changes: RoomChanges,
}

/// Write-side operations on rooms consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomCommand: Send + Sync {
    /// Open a room at version 1.
    async fn create(&self, draft: NewRoom) -> Result<Room, Error>;

    /// Apply a versioned update.
    ///
    /// # Errors
    ///
    /// Invalid request for empty changes, not found, or conflict with the
    /// current version.
    async fn update(&self, request: UpdateRoomRequest) -> Result<Room, Error>;

    /// Remove the room when it is still at `expected_version`. Posts that
    /// reference the room are left in place.
    async fn delete(&self, id: RoomId, expected_version: Version) -> Result<(), Error>;

    /// Ask to join a room.
    ///
    /// # Errors
    ///
    /// Not found when the room is missing; conflict when the member already
    /// holds a membership.
    async fn request_membership(
        &self,
        room_id: RoomId,
        member_id: MemberId,
    ) -> Result<RoomMembership, Error>;

    /// Accept, reject, block, or unblock an existing membership.
    async fn decide_membership(
        &self,
        room_id: RoomId,
        member_id: MemberId,
        decision: MembershipDecision,
    ) -> Result<RoomMembership, Error>;
}
