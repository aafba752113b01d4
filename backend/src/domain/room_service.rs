//! Room service implementing the room driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::ports::{RoomCommand, RoomQuery, RoomRepository, UpdateRoomRequest};
use super::version_gate::{
    VersionGate, empty_update_error, map_repository_error, not_found_error,
};
use super::{
    EntityKind, Error, JoinOutcome, MemberId, MembershipDecision, NewRoom, Room, RoomId,
    RoomMembership, Version,
};

/// Room command and query service backed by a [`RoomRepository`].
pub struct RoomService<R> {
    repository: Arc<R>,
    gate: VersionGate<R>,
    clock: Arc<dyn Clock>,
}

impl<R> Clone for RoomService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            gate: self.gate.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R> RoomService<R>
where
    R: RoomRepository,
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
}

fn membership_not_found(room_id: RoomId, member_id: MemberId) -> Error {
    Error::not_found(format!("member {member_id} has no membership in room {room_id}"))
        .with_details(json!({
            "code": "membership_not_found",
            "roomId": room_id.to_string(),
            "memberId": member_id.to_string(),
        }))
}

#[async_trait]
impl<R> RoomQuery for RoomService<R>
where
    R: RoomRepository + 'static,
{
    async fn get(&self, id: RoomId) -> Result<Room, Error> {
        self.repository
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found_error(EntityKind::Room, &id))
    }

    async fn list(&self) -> Result<Vec<Room>, Error> {
        self.repository.list().await.map_err(map_repository_error)
    }

    async fn members(&self, id: RoomId) -> Result<Vec<RoomMembership>, Error> {
        self.get(id).await?;
        self.repository
            .memberships(&id)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> RoomCommand for RoomService<R>
where
    R: RoomRepository + 'static,
{
    async fn create(&self, draft: NewRoom) -> Result<Room, Error> {
        let room = Room::open(RoomId::random(), draft, self.clock.utc());
        self.repository
            .insert(&room)
            .await
            .map_err(map_repository_error)?;
        info!(room_id = %room.id, "room opened");
        Ok(room)
    }

    async fn update(&self, request: UpdateRoomRequest) -> Result<Room, Error> {
        let UpdateRoomRequest {
            id,
            expected_version,
            changes,
        } = request;
        if changes.is_empty() {
            return Err(empty_update_error(EntityKind::Room));
        }

        self.gate
            .conditional_update(&id, expected_version, &changes)
            .await
            .map_err(map_repository_error)?
            .into_result(EntityKind::Room, &id, expected_version)
    }

    async fn delete(&self, id: RoomId, expected_version: Version) -> Result<(), Error> {
        self.gate
            .conditional_delete(&id, expected_version)
            .await
            .map_err(map_repository_error)?
            .into_result(EntityKind::Room, &id, expected_version)?;
        info!(room_id = %id, version = %expected_version, "room deleted");
        Ok(())
    }

    async fn request_membership(
        &self,
        room_id: RoomId,
        member_id: MemberId,
    ) -> Result<RoomMembership, Error> {
        let request = RoomMembership::request(room_id, member_id, self.clock.utc());
        let outcome = self
            .repository
            .request_membership(&request)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found_error(EntityKind::Room, &room_id))?;

        match outcome {
            JoinOutcome::Requested(membership) => Ok(membership),
            JoinOutcome::AlreadyMember(existing) => Err(Error::conflict(format!(
                "member {member_id} already has a membership in room {room_id}"
            ))
            .with_details(json!({
                "code": "membership_exists",
                "status": existing.status.as_str(),
            }))),
        }
    }

    async fn decide_membership(
        &self,
        room_id: RoomId,
        member_id: MemberId,
        decision: MembershipDecision,
    ) -> Result<RoomMembership, Error> {
        let status = decision.resulting_status();
        let membership = self
            .repository
            .set_membership_status(&room_id, &member_id, status, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| membership_not_found(room_id, member_id))?;
        info!(%room_id, %member_id, %status, "membership decided");
        Ok(membership)
    }
}

#[cfg(test)]
#[path = "room_service_tests.rs"]
mod tests;
