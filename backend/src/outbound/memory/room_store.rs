//! In-memory `RoomRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{EntityRepositoryError, RoomRepository, VersionedRepository};
use crate::domain::{
    JoinOutcome, MemberId, MembershipStatus, Room, RoomChanges, RoomId, RoomMembership, Version,
};

use super::{lock, next_version};

#[derive(Default)]
struct RoomState {
    rooms: HashMap<RoomId, Room>,
    members: HashMap<RoomId, Vec<RoomMembership>>,
}

/// Room repository holding everything in process memory.
#[derive(Default)]
pub struct InMemoryRoomRepository {
    state: Mutex<RoomState>,
}

impl InMemoryRoomRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VersionedRepository for InMemoryRoomRepository {
    type Id = RoomId;
    type Entity = Room;
    type Changes = RoomChanges;

    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, EntityRepositoryError> {
        Ok(lock(&self.state)?.rooms.get(id).cloned())
    }

    async fn update_if_version(
        &self,
        id: &RoomId,
        expected: Version,
        changes: &RoomChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Room>, EntityRepositoryError> {
        let mut state = lock(&self.state)?;
        let Some(room) = state.rooms.get_mut(id) else {
            return Ok(None);
        };
        if room.version != expected {
            return Ok(None);
        }

        let version = next_version(room.version)?;
        changes.apply_to(room);
        room.version = version;
        room.updated_at = updated_at;
        Ok(Some(room.clone()))
    }

    async fn delete_if_version(
        &self,
        id: &RoomId,
        expected: Version,
    ) -> Result<bool, EntityRepositoryError> {
        let mut state = lock(&self.state)?;
        if state.rooms.get(id).map(|room| room.version) != Some(expected) {
            return Ok(false);
        }

        // Posts are stored elsewhere and keep their room reference.
        state.rooms.remove(id);
        state.members.remove(id);
        Ok(true)
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert(&self, room: &Room) -> Result<(), EntityRepositoryError> {
        let mut state = lock(&self.state)?;
        if state.rooms.contains_key(&room.id) {
            return Err(EntityRepositoryError::query(format!(
                "room {} already exists",
                room.id
            )));
        }
        state.rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Room>, EntityRepositoryError> {
        let state = lock(&self.state)?;
        let mut rooms: Vec<Room> = state.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
        Ok(rooms)
    }

    async fn request_membership(
        &self,
        membership: &RoomMembership,
    ) -> Result<Option<JoinOutcome>, EntityRepositoryError> {
        let mut state = lock(&self.state)?;
        if !state.rooms.contains_key(&membership.room_id) {
            return Ok(None);
        }

        let members = state.members.entry(membership.room_id).or_default();
        if let Some(existing) = members
            .iter()
            .find(|existing| existing.member_id == membership.member_id)
        {
            return Ok(Some(JoinOutcome::AlreadyMember(existing.clone())));
        }
        members.push(membership.clone());
        Ok(Some(JoinOutcome::Requested(membership.clone())))
    }

    async fn set_membership_status(
        &self,
        room_id: &RoomId,
        member_id: &MemberId,
        status: MembershipStatus,
        decided_at: DateTime<Utc>,
    ) -> Result<Option<RoomMembership>, EntityRepositoryError> {
        let mut state = lock(&self.state)?;
        let membership = state
            .members
            .get_mut(room_id)
            .and_then(|members| members.iter_mut().find(|m| m.member_id == *member_id));

        Ok(membership.map(|membership| {
            membership.status = status;
            membership.decided_at = Some(decided_at);
            membership.clone()
        }))
    }

    async fn memberships(
        &self,
        room_id: &RoomId,
    ) -> Result<Vec<RoomMembership>, EntityRepositoryError> {
        Ok(lock(&self.state)?
            .members
            .get(room_id)
            .cloned()
            .unwrap_or_default())
    }
}
