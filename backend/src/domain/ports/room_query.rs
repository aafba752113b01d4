//! Driving port for reading rooms.

use async_trait::async_trait;

use crate::domain::{Error, Room, RoomId, RoomMembership};

/// Read-side operations on rooms consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomQuery: Send + Sync {
    /// Fetch a room, or a not-found error.
    async fn get(&self, id: RoomId) -> Result<Room, Error>;

    /// Every room, newest first.
    async fn list(&self) -> Result<Vec<Room>, Error>;

    /// Memberships of an existing room.
    async fn members(&self, id: RoomId) -> Result<Vec<RoomMembership>, Error>;
}
